// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::{location::LocationError, session::SessionError};

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    // 500 Internal Server Error
    #[error("internal server error: {0}")]
    InternalServerError(String),

    // 400 Bad Request
    #[error("bad request: {0}")]
    BadRequest(String),

    // 403 Forbidden (location permission denied)
    #[error("forbidden: {0}")]
    Forbidden(String),

    // 404 Not Found
    #[error("not found: {0}")]
    NotFound(String),

    // 409 Conflict (action not allowed in the session's current state)
    #[error("conflict: {0}")]
    Conflict(String),
}

/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };
        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Permission denial ends the session before it starts.
impl From<LocationError> for AppError {
    fn from(err: LocationError) -> Self {
        match err {
            LocationError::PermissionDenied => {
                AppError::Forbidden("Permissão negada para acessar a localização.".to_string())
            }
            LocationError::PositionUnavailable => AppError::BadRequest(err.to_string()),
        }
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::InvalidTransition { .. } => AppError::Conflict(err.to_string()),
            SessionError::AnswerIndexOutOfRange { .. } | SessionError::AnswerCountMismatch { .. } => {
                AppError::BadRequest(err.to_string())
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::BadRequest(err.to_string())
    }
}
