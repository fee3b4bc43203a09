//! # yamled-api — HTTP Service for yamled
//!
//! Serves a browser-based YAML editor: list and read the files under a
//! managed root, validate edits, save with backups, convert to JSON and
//! accept uploads.
//!
//! ## API Surface
//!
//! | Path                       | Module                 | Purpose                  |
//! |----------------------------|------------------------|--------------------------|
//! | `/`                        | this module            | Service banner           |
//! | `/health/*`                | this module            | Liveness and readiness   |
//! | `/api/files`, `/api/files/*` | [`routes::files`]    | List and read            |
//! | `/api/save`                | [`routes::files`]      | Save with backup         |
//! | `/api/convert/*`           | [`routes::files`]      | YAML to JSON             |
//! | `/api/upload`              | [`routes::files`]      | Multipart upload         |
//! | `/api/validate`            | [`routes::validate`]   | Syntax and structure     |
//! | `/openapi.json`            | [`openapi`]            | OpenAPI 3.1 document     |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! CorsLayer → TraceLayer → DefaultBodyLimit → Handler
//! ```

pub mod error;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::{HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Name reported by the service banner.
pub const SERVICE_NAME: &str = "yamled-api";

/// Browser origins allowed to call the API with credentials.
pub const ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    // Body size limit: 2 MiB, shared by JSON and multipart bodies.
    let api = Router::new()
        .merge(routes::files::router())
        .merge(routes::validate::router())
        .merge(openapi::router())
        .layer(DefaultBodyLimit::max(2 * 1024 * 1024));

    Router::new()
        .route("/", get(banner))
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

/// CORS for the editor front-end. Credentials are allowed, so methods and
/// headers are mirrored from the preflight request rather than wildcarded.
fn cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = ALLOWED_ORIGINS
        .into_iter()
        .map(HeaderValue::from_static)
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

/// Service banner body.
#[derive(Debug, Serialize, Deserialize)]
pub struct Banner {
    pub message: String,
    pub service: String,
    pub version: String,
}

/// GET / — Report that the service is up.
async fn banner() -> Json<Banner> {
    Json(Banner {
        message: "YAML Editor API is running".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — the managed root must be an existing directory.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    if !state.store.root().is_dir() {
        tracing::warn!(root = %state.store.root().display(), "root directory unavailable");
        return (StatusCode::SERVICE_UNAVAILABLE, "root directory unavailable").into_response();
    }
    (StatusCode::OK, "ready").into_response()
}
