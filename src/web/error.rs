//! API error handling for the mediabin web layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::MediabinError;

/// API error response body: `{"error": "<message>"}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
}

/// API error type carrying an HTTP status and a message.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Create a bad request error (400).
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Create an unauthorized error (401).
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    /// Create a not found error (404).
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Create an internal server error (500).
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// The HTTP status of this error.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The message of this error.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<MediabinError> for ApiError {
    fn from(err: MediabinError) -> Self {
        match &err {
            MediabinError::Validation(msg) => ApiError::bad_request(msg.clone()),
            MediabinError::Conflict(msg) => ApiError::bad_request(msg.clone()),
            MediabinError::NotFound(_) => ApiError::not_found("File not found"),
            MediabinError::Auth(msg) => ApiError::unauthorized(msg.clone()),
            _ => {
                tracing::error!("internal error: {}", err);
                ApiError::internal("An internal error occurred")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(ApiError::bad_request("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::unauthorized("x").status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::internal("x").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_and_conflict_map_to_400() {
        let err: ApiError = MediabinError::Validation("Username and password are required.".into()).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err: ApiError = MediabinError::Conflict("User already exists.".into()).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "User already exists.");
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let err: ApiError = MediabinError::NotFound("File".into()).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_io_maps_to_500_without_detail() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ApiError = MediabinError::Io(io).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.message().contains("denied"));
    }
}
