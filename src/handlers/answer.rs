// src/handlers/answer.rs

use axum::{
    Json,
    extract::{Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::PgPool;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        answer::{Answer, ManualScoreRequest, QuestionAnswer, SubmitAnswerRequest},
        question::Question,
    },
    scoring,
    utils::jwt::Claims,
};

/// Submits a student's answer to a question.
///
/// When the question defines keywords the answer is auto-scored on the way
/// in; otherwise it stays pending until a lecturer grades it. A student can
/// submit at most one answer per question; resubmission is a 409 Conflict.
pub async fn submit_answer(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<SubmitAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    if claims.role != "student" {
        return Err(AppError::Forbidden(
            "Only students can submit answers".to_string(),
        ));
    }
    let student_id = claims.user_id()?;

    let question = sqlx::query_as::<_, Question>(
        r#"
        SELECT id, title, content, category, max_score, keywords, answer_pattern,
               created_by, created_at, updated_at
        FROM questions
        WHERE id = $1
        "#,
    )
    .bind(payload.question_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Question not found".to_string()))?;

    let auto = scoring::auto_score(
        &payload.content,
        question.keywords.as_deref().map(Vec::as_slice),
        question.max_score,
    );

    // final_score mirrors auto_score; scored_at is only set when auto-scored.
    let answer = sqlx::query_as::<_, Answer>(
        r#"
        INSERT INTO answers
            (question_id, student_id, content, auto_score, manual_score, final_score,
             status, feedback, scored_at, scored_by)
        VALUES ($1, $2, $3, $4, NULL, $4, $5, NULL,
                CASE WHEN $4 IS NULL THEN NULL ELSE NOW() END, NULL)
        RETURNING id, question_id, student_id, content, auto_score, manual_score,
                  final_score, status, feedback, submitted_at, scored_at, scored_by
        "#,
    )
    .bind(payload.question_id)
    .bind(student_id)
    .bind(&payload.content)
    .bind(auto.score)
    .bind(auto.status)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        if e.to_string().contains("unique constraint") || e.to_string().contains("23505") {
            AppError::Conflict("Answer already submitted for this question".to_string())
        } else {
            tracing::error!("Failed to submit answer: {:?}", e);
            AppError::from(e)
        }
    })?;

    Ok((StatusCode::CREATED, Json(answer)))
}

/// Records a lecturer's manual score for an answer.
///
/// The manual score always overrides any automatic score and becomes the
/// final score; re-grading overwrites the previous manual score in place
/// and the answer never returns to 'pending' or 'auto_scored'.
pub async fn manual_score_answer(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    Json(payload): Json<ManualScoreRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let scored_by = claims.user_id()?;

    // Join the question to validate the score against its maximum.
    let max_score: Option<(i32,)> = sqlx::query_as(
        r#"
        SELECT q.max_score
        FROM answers a
        JOIN questions q ON q.id = a.question_id
        WHERE a.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(&pool)
    .await?;

    let (max_score,) = max_score.ok_or(AppError::NotFound("Answer not found".to_string()))?;

    if payload.manual_score > max_score {
        return Err(AppError::BadRequest(format!(
            "manual_score must be between 0 and {}",
            max_score
        )));
    }

    let answer = sqlx::query_as::<_, Answer>(
        r#"
        UPDATE answers
        SET manual_score = $1,
            final_score = $1,
            status = 'manually_scored',
            feedback = $2,
            scored_at = NOW(),
            scored_by = $3
        WHERE id = $4
        RETURNING id, question_id, student_id, content, auto_score, manual_score,
                  final_score, status, feedback, submitted_at, scored_at, scored_by
        "#,
    )
    .bind(payload.manual_score)
    .bind(&payload.feedback)
    .bind(scored_by)
    .bind(id)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to score answer {}: {:?}", id, e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(answer))
}

/// Lists one student's answers, most recent submission first.
pub async fn student_answers(
    State(pool): State<PgPool>,
    Path(student_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let answers = sqlx::query_as::<_, Answer>(
        r#"
        SELECT a.id, a.question_id, a.student_id, a.content, a.auto_score,
               a.manual_score, a.final_score, a.status, a.feedback,
               a.submitted_at, a.scored_at, a.scored_by
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
        tracing::error!("Failed to fetch student answers: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(answers))
}

/// Lists all answers submitted for one question, with each submitting
/// student's name and NIM for the grading view. Lecturer only.
pub async fn question_answers(
    State(pool): State<PgPool>,
    Path(question_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let answers = sqlx::query_as::<_, QuestionAnswer>(
        r#"
        SELECT a.id, a.question_id, a.student_id, u.name AS student_name, u.nim,
               a.content, a.auto_score, a.manual_score, a.final_score, a.status,
               a.feedback, a.submitted_at, a.scored_at, a.scored_by
        FROM answers a
        JOIN users u ON u.id = a.student_id
        WHERE a.question_id = $1
        ORDER BY a.submitted_at
        "#,
    )
    .bind(question_id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch question answers: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(answers))
}
