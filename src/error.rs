//! Application error types and their HTTP mappings.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Failures surfaced by the shortening core and its collaborators.
///
/// The `EmptyUrl`, `InvalidUrl` and `NotFound` messages are part of the
/// service contract and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("Url to shorten cannot be empty")]
    EmptyUrl,
    #[error("This is not a valid Url")]
    InvalidUrl,
    #[error("Url Not Found")]
    NotFound,
    /// Unique-index violation on `original_url`: a concurrent request
    /// created the mapping first.
    #[error("a mapping for this url already exists")]
    DuplicateUrl,
    /// Unique-index violation on `short_path`: the candidate was taken
    /// between the availability probe and the insert.
    #[error("short path is already taken")]
    DuplicatePath,
    #[error("storage failure: {0}")]
    Store(String),
    #[error("Missing Host header")]
    MissingHost,
}

impl AppError {
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Store(e.to_string())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::EmptyUrl | AppError::InvalidUrl | AppError::MissingHost => {
                (StatusCode::BAD_REQUEST, "validation_error")
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found"),
            AppError::DuplicateUrl | AppError::DuplicatePath => (StatusCode::CONFLICT, "conflict"),
            AppError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}
