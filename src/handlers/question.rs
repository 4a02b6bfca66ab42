// src/handlers/question.rs

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use sqlx::{PgPool, Postgres, QueryBuilder, types::Json as SqlJson};
use validator::Validate;

use crate::{
    error::AppError,
    models::question::{CreateQuestionRequest, Question, QuestionCategory, UpdateQuestionRequest},
    utils::jwt::Claims,
};

/// Query parameters for listing questions.
#[derive(Debug, Deserialize)]
pub struct ListQuestionsParams {
    pub category: Option<QuestionCategory>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Lists questions, optionally filtered by category, with paging.
pub async fn list_questions(
    State(pool): State<PgPool>,
    Query(params): Query<ListQuestionsParams>,
) -> Result<impl IntoResponse, AppError> {
    let limit = params.limit.unwrap_or(50).clamp(1, 200);
    let offset = params.offset.unwrap_or(0).max(0);

    let mut query_builder = QueryBuilder::<Postgres>::new(
        "SELECT id, title, content, category, max_score, keywords, answer_pattern,
                created_by, created_at, updated_at
         FROM questions",
    );

    if let Some(category) = params.category {
        query_builder.push(" WHERE category = ");
        query_builder.push_bind(category);
    }

    query_builder.push(" ORDER BY id");
    query_builder.push(" LIMIT ");
    query_builder.push_bind(limit);
    query_builder.push(" OFFSET ");
    query_builder.push_bind(offset);

    let questions: Vec<Question> = query_builder
        .build_query_as()
        .fetch_all(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list questions: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    Ok(Json(questions))
}

/// Creates a new question.
/// Lecturer only; authorship is taken from the JWT claims.
pub async fn create_question(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    if claims.role != "lecturer" {
        return Err(AppError::Forbidden(
            "Only lecturers can create questions".to_string(),
        ));
    }
    let created_by = claims.user_id()?;

    let question = sqlx::query_as::<_, Question>(
        r#"
        INSERT INTO questions (title, content, category, max_score, keywords, answer_pattern, created_by)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, title, content, category, max_score, keywords, answer_pattern,
                  created_by, created_at, updated_at
        "#,
    )
    .bind(&payload.title)
    .bind(&payload.content)
    .bind(payload.category)
    .bind(payload.max_score)
    .bind(payload.keywords.map(SqlJson))
    .bind(&payload.answer_pattern)
    .bind(created_by)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create question: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok((StatusCode::CREATED, Json(question)))
}

/// Updates an existing question. Only the provided fields change; for the
/// nullable fields an explicit JSON null clears the stored value.
/// Bumps `updated_at` on every call. Lecturer only.
pub async fn update_question(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    // Check existence first so a missing id is a 404, not a silent no-op.
    let exists: Option<(i64,)> = sqlx::query_as("SELECT id FROM questions WHERE id = $1")
        .bind(id)
        .fetch_optional(&pool)
        .await?;

    if exists.is_none() {
        return Err(AppError::NotFound("Question not found".to_string()));
    }

    let mut query_builder = QueryBuilder::<Postgres>::new("UPDATE questions SET updated_at = NOW()");

    if let Some(title) = &payload.title {
        query_builder.push(", title = ");
        query_builder.push_bind(title);
    }
    if let Some(content) = &payload.content {
        query_builder.push(", content = ");
        query_builder.push_bind(content);
    }
    if let Some(category) = payload.category {
        query_builder.push(", category = ");
        query_builder.push_bind(category);
    }
    if let Some(max_score) = payload.max_score {
        query_builder.push(", max_score = ");
        query_builder.push_bind(max_score);
    }
    if let Some(keywords) = &payload.keywords {
        query_builder.push(", keywords = ");
        query_builder.push_bind(keywords.clone().map(SqlJson));
    }
    if let Some(answer_pattern) = &payload.answer_pattern {
        query_builder.push(", answer_pattern = ");
        query_builder.push_bind(answer_pattern.clone());
    }

    query_builder.push(" WHERE id = ");
    query_builder.push_bind(id);
    query_builder.push(
        " RETURNING id, title, content, category, max_score, keywords, answer_pattern,
                    created_by, created_at, updated_at",
    );

    let question: Question = query_builder
        .build_query_as()
        .fetch_one(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update question {}: {:?}", id, e);
            AppError::InternalServerError(e.to_string())
        })?;

    Ok(Json(question))
}
