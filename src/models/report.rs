// src/models/report.rs

use serde::{Deserialize, Serialize};

use crate::models::{answer::AnswerStatus, question::QuestionCategory};

/// Score breakdown for a single category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: QuestionCategory,
    pub score: i32,
    pub max_score: i32,
    pub percentage: f64,
}

/// One student's overall and per-category performance across the whole
/// question catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub student_id: i64,
    pub student_name: String,
    pub nim: String,
    pub total_questions: i64,
    pub answered_questions: i64,
    pub total_score: i32,
    pub max_possible_score: i32,
    pub percentage: f64,
    /// Always contains exactly the 7 defined categories, in declaration
    /// order, including categories with no questions yet.
    pub category_scores: Vec<CategoryScore>,
}

/// One row of a student's progress report: the state of a single
/// submitted answer joined with its question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEntry {
    pub question_id: i64,
    pub question_title: String,
    pub category: QuestionCategory,
    pub final_score: Option<i32>,
    pub max_score: i32,
    pub status: AnswerStatus,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

/// Per-question submission/scoring state for one student. Only answered
/// questions appear; the list is ordered newest submission first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    pub student_id: i64,
    pub answers: Vec<ProgressEntry>,
}
