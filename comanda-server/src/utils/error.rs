//! Unified error handling
//!
//! Application error type and response envelope:
//! - [`AppError`] - application error enum
//! - [`AppResponse`] - API response structure
//!
//! # Error codes
//!
//! | Code | Meaning | HTTP status |
//! |------|---------|-------------|
//! | E0000 | Success | 200 |
//! | E0002 | Validation failed | 400 |
//! | E0003 | Resource not found | 404 |
//! | E0004 | State conflict | 409 |
//! | E0006 | Invalid request | 400 |
//! | E9001 | Internal error | 500 |
//! | E9002 | Database error | 500 |
//!
//! # Example
//!
//! ```ignore
//! // Return an error
//! Err(AppError::not_found("Order order:42 not found"))
//!
//! // Return a success envelope
//! Ok(ok(data))
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::db::repository::RepoError;

/// API response envelope
///
/// ```json
/// {
///   "code": "E0000",
///   "message": "Success",
///   "data": { ... }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    /// Error code (E0000 means success)
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Response payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Application error enum
///
/// Every failure path returns one of these; nothing is silently swallowed
/// into an empty success response.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Business logic errors (4xx) ==========
    #[error("Resource not found: {0}")]
    /// Referenced order / line / menu item absent (404)
    NotFound(String),

    #[error("State conflict: {0}")]
    /// Mutation rejected by the lifecycle rules (409)
    Conflict(String),

    #[error("Validation failed: {0}")]
    /// Malformed or out-of-range input (400)
    Validation(String),

    // ========== System errors (5xx) ==========
    #[error("Database error: {0}")]
    /// Store unavailable or constraint violation (500)
    Database(String),

    #[error("Internal server error: {0}")]
    /// Unexpected failure (500)
    Internal(String),

    #[error("Invalid request: {0}")]
    /// Request shape problems outside field validation (400)
    Invalid(String),
}

/// Result type for API handlers
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // Not found (404)
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg.as_str()),

            // Lifecycle conflicts (409)
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "E0004", msg.as_str()),

            // Validation (400)
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "E0002", msg.as_str()),

            // Database errors (500): log details, return a generic message
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, "E9002", "Database error")
            }

            // Internal errors (500)
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Internal server error",
                )
            }

            // Invalid request (400)
            AppError::Invalid(msg) => (StatusCode::BAD_REQUEST, "E0006", msg.as_str()),
        };

        let body = Json(AppResponse::<()> {
            code: code.to_string(),
            message: message.to_string(),
            data: None,
        });

        (status, body).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Conflict(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

// ========== Helper functions ==========

/// Create a successful response envelope
pub fn ok<T: Serialize>(data: T) -> Json<AppResponse<T>> {
    Json(AppResponse {
        code: "E0000".to_string(),
        message: "Success".to_string(),
        data: Some(data),
    })
}
