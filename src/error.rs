//! Error types for mediabin.

use thiserror::Error;

/// Common error type for mediabin.
#[derive(Error, Debug)]
pub enum MediabinError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Authentication error (unknown user or wrong password).
    #[error("authentication error: {0}")]
    Auth(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Conflicting resource (duplicate username).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for mediabin operations.
pub type Result<T> = std::result::Result<T, MediabinError>;
