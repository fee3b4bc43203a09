//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps [`StoreError`] onto HTTP status codes and returns a JSON body of
//! the form `{"detail": "...", "code": "..."}`. Internal failure details
//! are logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use yamled_store::StoreError;

/// JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable message, shown by the editor.
    pub detail: String,
    /// Machine-readable error code (e.g. "NOT_FOUND", "BAD_REQUEST").
    pub code: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// The request names a bad file or carries unusable content (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The request body could not be extracted (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// No such file (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// The service cannot currently serve requests (503).
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Internal server error (500). Only `context` reaches the client.
    #[error("{context}: {detail}")]
    Internal {
        /// What was being attempted, e.g. "Error saving file".
        context: String,
        /// The underlying failure, for the logs.
        detail: String,
    },
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::ServiceUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
            Self::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// The message returned to the client.
    fn detail(&self) -> String {
        match self {
            Self::BadRequest(msg)
            | Self::Validation(msg)
            | Self::NotFound(msg)
            | Self::ServiceUnavailable(msg) => msg.clone(),
            Self::Internal { context, .. } => context.clone(),
        }
    }

    /// Construct an internal error (500).
    pub fn internal(context: &str, detail: impl ToString) -> Self {
        Self::Internal {
            context: context.to_string(),
            detail: detail.to_string(),
        }
    }

    /// Map a store failure, using `context` as the client-facing message
    /// should it turn out to be an internal error.
    pub fn from_store(err: StoreError, context: &str) -> Self {
        match err {
            StoreError::InvalidExtension(_)
            | StoreError::InvalidPath(_)
            | StoreError::InvalidContent(_)
            | StoreError::NonUtf8Content => Self::BadRequest(err.to_string()),
            StoreError::NotFound(_) => Self::NotFound(err.to_string()),
            StoreError::Io { .. } => Self::internal(context, err),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::from_store(err, "File store error")
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        match &self {
            Self::Internal { .. } => tracing::error!(error = %self, "internal server error"),
            Self::ServiceUnavailable(_) => tracing::warn!(error = %self, "service unavailable"),
            _ => tracing::debug!(error = %self, "request rejected"),
        }

        let body = ErrorBody {
            detail: self.detail(),
            code: code.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
