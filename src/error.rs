//! HTTP-facing error type.
//!
//! Handlers return `Result<_, AppError>`; every variant maps to a status code
//! and the shared `{ error, message }` JSON body.

use std::fmt::Display;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::routes::ErrorResponse;

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed input, caught before any I/O.
    #[error("{0}")]
    Validation(String),

    #[error("Invalid admin password")]
    InvalidCredentials,

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Too many requests. Please try again later.")]
    RateLimited,

    /// A store or storage call failed. `action` is the user-facing prefix.
    #[error("{action}: {message}")]
    Backend {
        action: &'static str,
        message: String,
    },

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::Backend { .. } | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "request failed");
        }
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
                message: None,
            }),
        )
            .into_response()
    }
}

/// Attach a user-facing action prefix to a backend failure.
pub trait BackendContext<T> {
    fn or_backend(self, action: &'static str) -> Result<T, AppError>;
}

impl<T, E: Display> BackendContext<T> for Result<T, E> {
    fn or_backend(self, action: &'static str) -> Result<T, AppError> {
        self.map_err(|e| AppError::Backend {
            action,
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_concatenates_action_and_message() {
        let result: Result<(), String> = Err("connection reset".to_string());
        let err = result.or_backend("Delete failed").unwrap_err();
        assert_eq!(err.to_string(), "Delete failed: connection reset");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_invalid_credentials_message() {
        let err = AppError::InvalidCredentials;
        assert_eq!(err.to_string(), "Invalid admin password");
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }
}
