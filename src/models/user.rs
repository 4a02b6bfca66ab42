// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// User role: students sit exams, lecturers author and grade them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Lecturer,
}

/// Represents the 'users' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    pub role: UserRole,

    pub name: String,

    /// Student enrollment number, used as the login identifier.
    /// Null for lecturers.
    pub nim: Option<String>,

    /// Null for lecturers.
    pub attendance_number: Option<i32>,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password_hash: String,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for student registration.
#[derive(Debug, Deserialize, Validate)]
pub struct StudentRegisterRequest {
    #[validate(length(min = 1, max = 100, message = "Name must not be empty."))]
    pub name: String,
    #[validate(length(min = 1, max = 30, message = "NIM must not be empty."))]
    pub nim: String,
    #[validate(range(min = 1, message = "Attendance number must be positive."))]
    pub attendance_number: i32,
    #[validate(length(min = 6, max = 128, message = "Password must be at least 6 characters."))]
    pub password: String,
}

/// DTO for lecturer registration.
#[derive(Debug, Deserialize, Validate)]
pub struct LecturerRegisterRequest {
    #[validate(length(min = 1, max = 100, message = "Name must not be empty."))]
    pub name: String,
    #[validate(length(min = 6, max = 128, message = "Password must be at least 6 characters."))]
    pub password: String,
}

/// DTO for login. Students log in with their NIM, lecturers with their name.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 100))]
    pub identifier: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}
