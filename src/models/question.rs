// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};
use validator::Validate;

/// The fixed set of course-topic categories a question belongs to.
///
/// The literal values (including their inconsistent casing) are part of the
/// stored data and the wire format, so they must not be normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "question_category")]
pub enum QuestionCategory {
    #[sqlx(rename = "Pertemuan 1-Pemikiran Sistem")]
    #[serde(rename = "Pertemuan 1-Pemikiran Sistem")]
    PemikiranSistem,

    #[sqlx(rename = "PERTEMUAN 2- ANALISIS JARINGAN")]
    #[serde(rename = "PERTEMUAN 2- ANALISIS JARINGAN")]
    AnalisisJaringan,

    #[sqlx(rename = "Pertemuan 3-Parameter Analisis Jaringan")]
    #[serde(rename = "Pertemuan 3-Parameter Analisis Jaringan")]
    ParameterAnalisisJaringan,

    #[sqlx(rename = "Pertemuan 4-Analisis Jaringan Pada Manajemen Proyek")]
    #[serde(rename = "Pertemuan 4-Analisis Jaringan Pada Manajemen Proyek")]
    AnalisisJaringanManajemenProyek,

    #[sqlx(rename = "Pertemuan 5- Simulasi Monte Carlo")]
    #[serde(rename = "Pertemuan 5- Simulasi Monte Carlo")]
    SimulasiMonteCarlo,

    #[sqlx(rename = "Game Theory 2xN")]
    #[serde(rename = "Game Theory 2xN")]
    GameTheory2xN,

    #[sqlx(rename = "Game Theory MxN")]
    #[serde(rename = "Game Theory MxN")]
    GameTheoryMxN,
}

impl QuestionCategory {
    /// All categories, in declaration order. Score summaries report every
    /// category even when no question exists for it yet.
    pub const ALL: [QuestionCategory; 7] = [
        QuestionCategory::PemikiranSistem,
        QuestionCategory::AnalisisJaringan,
        QuestionCategory::ParameterAnalisisJaringan,
        QuestionCategory::AnalisisJaringanManajemenProyek,
        QuestionCategory::SimulasiMonteCarlo,
        QuestionCategory::GameTheory2xN,
        QuestionCategory::GameTheoryMxN,
    ];
}

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,

    pub title: String,

    /// The text content of the question.
    pub content: String,

    pub category: QuestionCategory,

    pub max_score: i32,

    /// Keywords used by the automatic scorer, in the order the lecturer
    /// entered them. Stored as a JSON array; null when the question is
    /// graded manually only.
    pub keywords: Option<Json<Vec<String>>>,

    /// Free-text hint describing the expected answer shape.
    pub answer_pattern: Option<String>,

    /// ID of the lecturer who created the question.
    pub created_by: i64,

    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for creating a new question.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    #[validate(length(min = 1, max = 5000))]
    pub content: String,
    pub category: QuestionCategory,
    #[validate(range(min = 1, message = "max_score must be positive."))]
    pub max_score: i32,
    pub keywords: Option<Vec<String>>,
    #[validate(length(max = 2000))]
    pub answer_pattern: Option<String>,
}

/// DTO for updating a question. All fields are optional; for the nullable
/// columns a JSON `null` clears the stored value while an absent field
/// leaves it untouched (hence the double `Option`).
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateQuestionRequest {
    #[validate(length(min = 1, max = 300))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 5000))]
    pub content: Option<String>,
    pub category: Option<QuestionCategory>,
    #[validate(range(min = 1, message = "max_score must be positive."))]
    pub max_score: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_explicit_null")]
    pub keywords: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "deserialize_explicit_null")]
    pub answer_pattern: Option<Option<String>>,
}

/// Deserializes a field so that a present-but-null value maps to
/// `Some(None)` while an absent field stays `None` (via `#[serde(default)]`).
fn deserialize_explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::<T>::deserialize(deserializer)?))
}
