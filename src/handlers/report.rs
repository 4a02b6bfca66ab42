// src/handlers/report.rs

use axum::{Json, extract::Path, extract::State, response::IntoResponse};
use sqlx::PgPool;

use crate::{
    error::AppError,
    models::{
        answer::AnswerStatus,
        question::QuestionCategory,
        report::{ProgressEntry, ProgressReport, ScoreSummary},
        user::{User, UserRole},
    },
    scoring::{self, CatalogEntry, ScoredAnswer},
};

/// Helper struct for fetching the question catalog's weights.
#[derive(sqlx::FromRow)]
struct CatalogRow {
    category: QuestionCategory,
    max_score: i32,
}

/// Helper struct for fetching a student's answers joined with their
/// question's category.
#[derive(sqlx::FromRow)]
struct ScoredRow {
    category: QuestionCategory,
    final_score: Option<i32>,
}

async fn fetch_student(pool: &PgPool, student_id: i64) -> Result<User, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, role, name, nim, attendance_number, password_hash, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(student_id)
    .fetch_optional(pool)
    .await?;

    match user {
        Some(user) if user.role == UserRole::Student => Ok(user),
        _ => Err(AppError::NotFound("Student not found".to_string())),
    }
}

async fn fetch_catalog(pool: &PgPool) -> Result<Vec<CatalogEntry>, AppError> {
    let rows: Vec<CatalogRow> = sqlx::query_as("SELECT category, max_score FROM questions")
        .fetch_all(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch question catalog: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    Ok(rows
        .into_iter()
        .map(|row| CatalogEntry {
            category: row.category,
            max_score: row.max_score,
        })
        .collect())
}

fn build_summary(
    student: &User,
    questions: &[CatalogEntry],
    answers: &[ScoredAnswer],
) -> ScoreSummary {
    let totals = scoring::summarize(questions, answers);

    ScoreSummary {
        student_id: student.id,
        student_name: student.name.clone(),
        nim: student.nim.clone().unwrap_or_default(),
        total_questions: totals.total_questions,
        answered_questions: totals.answered_questions,
        total_score: totals.total_score,
        max_possible_score: totals.max_possible_score,
        percentage: totals.percentage,
        category_scores: totals.category_scores,
    }
}

/// Computes one student's score summary over the whole question catalog.
/// 404 when the id does not belong to a student.
pub async fn score_summary(
    State(pool): State<PgPool>,
    Path(student_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let student = fetch_student(&pool, student_id).await?;
    let questions = fetch_catalog(&pool).await?;

    let rows: Vec<ScoredRow> = sqlx::query_as(
        r#"
        SELECT q.category, a.final_score
        FROM answers a
        JOIN questions q ON q.id = a.question_id
        WHERE a.student_id = $1
        "#,
    )
    .bind(student_id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch scored answers: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    let answers: Vec<ScoredAnswer> = rows
        .into_iter()
        .map(|row| ScoredAnswer {
            category: row.category,
            final_score: row.final_score,
        })
        .collect();

    Ok(Json(build_summary(&student, &questions, &answers)))
}

/// Helper struct for fetching a progress report row.
#[derive(sqlx::FromRow)]
struct ProgressRow {
    question_id: i64,
    question_title: String,
    category: QuestionCategory,
    final_score: Option<i32>,
    max_score: i32,
    status: AnswerStatus,
    submitted_at: chrono::DateTime<chrono::Utc>,
}

/// Produces a student's per-question progress report, newest submission
/// first. Only answered questions appear. 404 when the id does not belong
/// to a student, consistent with the score summary.
pub async fn progress_report(
    State(pool): State<PgPool>,
    Path(student_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    fetch_student(&pool, student_id).await?;

    let rows: Vec<ProgressRow> = sqlx::query_as(
        r#"
        SELECT a.question_id, q.title AS question_title, q.category,
               a.final_score, q.max_score, a.status, a.submitted_at
        FROM answers a
        JOIN questions q ON q.id = a.question_id
        WHERE a.student_id = $1
        ORDER BY a.submitted_at DESC
        "#,
    )
    .bind(student_id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch progress report: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    let report = ProgressReport {
        student_id,
        answers: rows
            .into_iter()
            .map(|row| ProgressEntry {
                question_id: row.question_id,
                question_title: row.question_title,
                category: row.category,
                final_score: row.final_score,
                max_score: row.max_score,
                status: row.status,
                submitted_at: row.submitted_at,
            })
            .collect(),
    };

    Ok(Json(report))
}

/// Helper struct tying an answer row to its student for roster grouping.
#[derive(sqlx::FromRow)]
struct RosterAnswerRow {
    student_id: i64,
    category: QuestionCategory,
    final_score: Option<i32>,
}

/// Computes a score summary for every registered student, for the
/// lecturer-facing class roster. Lecturers are excluded from the roster;
/// sorting is left to the caller. Lecturer only.
pub async fn all_students_summary(
    State(pool): State<PgPool>,
) -> Result<impl IntoResponse, AppError> {
    let students = sqlx::query_as::<_, User>(
        r#"
        SELECT id, role, name, nim, attendance_number, password_hash, created_at
        FROM users
        WHERE role = 'student'
        ORDER BY id
        "#,
    )
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch student roster: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    let questions = fetch_catalog(&pool).await?;

    let answer_rows: Vec<RosterAnswerRow> = sqlx::query_as(
        r#"
        SELECT a.student_id, q.category, a.final_score
        FROM answers a
        JOIN questions q ON q.id = a.question_id
        "#,
    )
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch roster answers: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    let summaries: Vec<ScoreSummary> = students
        .iter()
        .map(|student| {
            let answers: Vec<ScoredAnswer> = answer_rows
                .iter()
                .filter(|row| row.student_id == student.id)
                .map(|row| ScoredAnswer {
                    category: row.category,
                    final_score: row.final_score,
                })
                .collect();
            build_summary(student, &questions, &answers)
        })
        .collect();

    Ok(Json(summaries))
}
