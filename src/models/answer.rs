// src/models/answer.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Scoring state of an answer.
///
/// An answer starts `pending` (or `auto_scored` when the question carries
/// keywords) and moves to `manually_scored` once a lecturer grades it.
/// It never moves back: re-grading overwrites the manual score in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "answer_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AnswerStatus {
    Pending,
    AutoScored,
    ManuallyScored,
}

/// Represents the 'answers' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Answer {
    pub id: i64,

    pub question_id: i64,
    pub student_id: i64,

    /// The student's free-text submission.
    pub content: String,

    /// Score produced by the keyword auto-scorer, if any.
    pub auto_score: Option<i32>,

    /// Score assigned by a lecturer, if any.
    pub manual_score: Option<i32>,

    /// The score used for all reporting. Mirrors `auto_score` until a
    /// manual score is recorded, then mirrors `manual_score` permanently.
    pub final_score: Option<i32>,

    pub status: AnswerStatus,

    /// Optional lecturer feedback attached during manual grading.
    pub feedback: Option<String>,

    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub scored_at: Option<chrono::DateTime<chrono::Utc>>,

    /// ID of the lecturer who graded manually, if any.
    pub scored_by: Option<i64>,
}

/// One answer to a question joined with the submitting student's identity,
/// for the lecturer's grading view.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuestionAnswer {
    pub id: i64,
    pub question_id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub nim: Option<String>,
    pub content: String,
    pub auto_score: Option<i32>,
    pub manual_score: Option<i32>,
    pub final_score: Option<i32>,
    pub status: AnswerStatus,
    pub feedback: Option<String>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub scored_at: Option<chrono::DateTime<chrono::Utc>>,
    pub scored_by: Option<i64>,
}

/// DTO for submitting an answer. The student is taken from the JWT claims.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitAnswerRequest {
    pub question_id: i64,
    #[validate(length(min = 1, message = "Answer content must not be empty."))]
    pub content: String,
}

/// DTO for manual grading. The scoring lecturer is taken from the JWT claims.
#[derive(Debug, Deserialize, Validate)]
pub struct ManualScoreRequest {
    #[validate(range(min = 0, message = "manual_score must not be negative."))]
    pub manual_score: i32,
    #[validate(length(max = 2000))]
    pub feedback: Option<String>,
}
