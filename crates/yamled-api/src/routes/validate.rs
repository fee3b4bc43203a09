//! # Validation API
//!
//! - **POST `/api/validate`** — Parse YAML text and report syntax or
//!   structural problems without storing anything.
//!
//! The profile is chosen from the optional `filename`: names containing
//! `nursing` (any case) get the pathway/ruleset structural checks. This
//! endpoint reports problems in the body and always answers 200 once the
//! request body has been extracted.

use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use yamled_core::{validate_content, ValidationReport};

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

/// Filename assumed when the request omits one.
pub const DEFAULT_FILENAME: &str = "untitled.yaml";

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

/// Content to validate.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ValidateRequest {
    /// YAML text.
    pub content: String,
    /// Name hint selecting the validation profile.
    #[serde(default)]
    pub filename: Option<String>,
}

/// Validation outcome.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidateResponse {
    /// True when no errors were found.
    pub valid: bool,
    /// Syntax or structural error messages.
    pub errors: Vec<String>,
    /// Parsed document, absent when parsing failed.
    pub parsed_data: Option<serde_json::Value>,
    /// Indented JSON rendering of the document.
    pub json_preview: Option<String>,
}

impl From<ValidationReport> for ValidateResponse {
    fn from(report: ValidationReport) -> Self {
        Self {
            valid: report.valid,
            errors: report.errors,
            parsed_data: report.parsed_data,
            json_preview: report.json_preview,
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/validate", post(validate_yaml))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/validate — Validate YAML content.
#[utoipa::path(
    post,
    path = "/api/validate",
    request_body = ValidateRequest,
    responses(
        (status = 200, description = "Validation report", body = ValidateResponse),
        (status = 422, description = "Malformed request body", body = crate::error::ErrorBody),
    ),
    tag = "validation"
)]
pub(crate) async fn validate_yaml(
    body: Result<Json<ValidateRequest>, JsonRejection>,
) -> Result<Json<ValidateResponse>, AppError> {
    let req = extract_json(body)?;
    let filename = req.filename.as_deref().unwrap_or(DEFAULT_FILENAME);

    let report = validate_content(&req.content, filename);
    tracing::debug!(filename, valid = report.valid, errors = report.errors.len(), "validated content");
    Ok(Json(report.into()))
}
