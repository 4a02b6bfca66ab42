// src/handlers/auth.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::user::{LecturerRegisterRequest, LoginRequest, StudentRegisterRequest, User, UserRole},
    utils::{
        hash::{hash_password, verify_password},
        jwt::sign_jwt,
    },
};

/// Registers a new student.
///
/// Hashes the password using Argon2 before storing it.
/// The NIM must be unique; a duplicate returns 409 Conflict.
pub async fn register_student(
    State(pool): State<PgPool>,
    Json(payload): Json<StudentRegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let password_hash = hash_password(&payload.password)?;

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (role, name, nim, attendance_number, password_hash)
        VALUES ('student', $1, $2, $3, $4)
        RETURNING id, role, name, nim, attendance_number, password_hash, created_at
        "#,
    )
    .bind(&payload.name)
    .bind(&payload.nim)
    .bind(payload.attendance_number)
    .bind(&password_hash)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        // Postgres error code for unique violation is 23505
        if e.to_string().contains("unique constraint") || e.to_string().contains("23505") {
            AppError::Conflict(format!("NIM '{}' already exists", payload.nim))
        } else {
            tracing::error!("Failed to register student: {:?}", e);
            AppError::from(e)
        }
    })?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Registers a new lecturer.
///
/// Lecturers log in by name, so the name must be unique among lecturers.
pub async fn register_lecturer(
    State(pool): State<PgPool>,
    Json(payload): Json<LecturerRegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let password_hash = hash_password(&payload.password)?;

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (role, name, nim, attendance_number, password_hash)
        VALUES ('lecturer', $1, NULL, NULL, $2)
        RETURNING id, role, name, nim, attendance_number, password_hash, created_at
        "#,
    )
    .bind(&payload.name)
    .bind(&password_hash)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        if e.to_string().contains("unique constraint") || e.to_string().contains("23505") {
            AppError::Conflict(format!("Lecturer '{}' already exists", payload.name))
        } else {
            tracing::error!("Failed to register lecturer: {:?}", e);
            AppError::from(e)
        }
    })?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Authenticates a user and returns a JWT token.
///
/// Students are looked up by NIM, lecturers by name; both go through the
/// same identifier field so the login form stays a single input.
pub async fn login(
    State(pool): State<PgPool>,
    State(config): State<Config>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, role, name, nim, attendance_number, password_hash, created_at
        FROM users
        WHERE nim = $1 OR (role = 'lecturer' AND name = $1)
        "#,
    )
    .bind(&payload.identifier)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Login DB error: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    let user = user.ok_or(AppError::AuthError("Invalid credentials".to_string()))?;

    let is_valid = verify_password(&payload.password, &user.password_hash)?;

    if !is_valid {
        return Err(AppError::AuthError("Invalid credentials".to_string()));
    }

    let role = match user.role {
        UserRole::Student => "student",
        UserRole::Lecturer => "lecturer",
    };

    let token = sign_jwt(user.id, role, &config.jwt_secret, config.jwt_expiration)?;

    Ok(Json(json!({
        "token": token,
        "type": "Bearer",
        "user": user
    })))
}
