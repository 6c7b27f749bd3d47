//! Bootstrap-level errors
//!
//! Failures before or outside the request path (opening the database,
//! binding the listener). Request-path errors are [`crate::utils::AppError`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for server bootstrap
pub type Result<T> = std::result::Result<T, ServerError>;
