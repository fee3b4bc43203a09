//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into a single OpenAPI 3.1 spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "yamled API",
        description = "Edit, validate and convert the YAML documents under a managed directory.\n\nDocuments whose filename contains `nursing` are additionally checked against the pathway configuration and ruleset structure rules.",
        license(name = "AGPL-3.0-or-later")
    ),
    servers(
        (url = "http://localhost:8001", description = "Local development server"),
    ),
    paths(
        // ── Files ─────────────────────────────────────────────────────────
        crate::routes::files::list_files,
        crate::routes::files::get_file,
        crate::routes::files::save_file,
        crate::routes::files::convert_file,
        crate::routes::files::upload_file,
        // ── Validation ───────────────────────────────────────────────────
        crate::routes::validate::validate_yaml,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::routes::files::FileInfo,
        crate::routes::files::FileListResponse,
        crate::routes::files::FileContentResponse,
        crate::routes::files::SaveRequest,
        crate::routes::files::SaveResponse,
        crate::routes::files::ConvertResponse,
        crate::routes::files::UploadForm,
        crate::routes::files::UploadResponse,
        crate::routes::validate::ValidateRequest,
        crate::routes::validate::ValidateResponse,
    )),
    tags(
        (name = "files", description = "YAML files under the managed root"),
        (name = "validation", description = "Syntax and structure checks"),
    )
)]
pub struct ApiDoc;

pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
