//! # File API
//!
//! HTTP surface over the [`yamled_store::FileStore`]:
//!
//! - **GET `/api/files`** — List YAML files under the root
//! - **GET `/api/files/{*name}`** — Read one file
//! - **POST `/api/save`** — Save content, backing up the previous version
//! - **POST `/api/convert/{*name}`** — Write a JSON copy of a YAML file under the root
//! - **POST `/api/upload`** — Store an uploaded file (multipart field `file`)
//!
//! `{*name}` captures the rest of the path, so names may include
//! sub-directories (`nursing/rules/intake.yaml`).

use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use yamled_store::{FileRecord, StoreError};

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

/// Multipart field carrying the uploaded file.
pub const UPLOAD_FIELD: &str = "file";

const CONVERT_CONTEXT: &str = "Error converting file";

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

/// One YAML file under the root.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FileInfo {
    /// File name.
    pub name: String,
    /// Path prefixed with the root directory's name.
    pub path: String,
    /// Size in bytes.
    pub size: u64,
    /// Last modification time.
    pub modified: DateTime<Utc>,
}

impl From<FileRecord> for FileInfo {
    fn from(record: FileRecord) -> Self {
        Self {
            name: record.name,
            path: record.path,
            size: record.size,
            modified: record.modified,
        }
    }
}

/// File listing.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FileListResponse {
    /// Files sorted by name.
    pub files: Vec<FileInfo>,
}

/// A file's content.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FileContentResponse {
    /// The requested name.
    pub filename: String,
    /// File text.
    pub content: String,
    /// Size in bytes.
    pub size: u64,
    /// Last modification time.
    pub modified: DateTime<Utc>,
}

/// Content to store.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveRequest {
    /// YAML text, written verbatim.
    pub content: String,
    /// Target name relative to the root.
    pub filename: String,
}

/// Outcome of a save.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SaveResponse {
    pub success: bool,
    pub message: String,
    pub filename: String,
    /// Bytes written.
    pub size: u64,
    /// Time of the write.
    pub modified: DateTime<Utc>,
}

/// Outcome of a conversion.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ConvertResponse {
    pub success: bool,
    pub message: String,
    /// Source name.
    pub yaml_file: String,
    /// Name of the JSON file written.
    pub json_file: String,
    /// The JSON text written.
    pub json_content: String,
}

/// Multipart form accepted by the upload endpoint.
#[derive(Debug, ToSchema)]
pub struct UploadForm {
    /// The YAML file.
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// Outcome of an upload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub filename: String,
    /// Bytes stored.
    pub size: u64,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/files", get(list_files))
        .route("/api/files/{*name}", get(get_file))
        .route("/api/save", post(save_file))
        .route("/api/convert/{*name}", post(convert_file))
        .route("/api/upload", post(upload_file))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/files — List YAML files under the root.
#[utoipa::path(
    get,
    path = "/api/files",
    responses(
        (status = 200, description = "Files sorted by name", body = FileListResponse),
    ),
    tag = "files"
)]
pub(crate) async fn list_files(State(state): State<AppState>) -> Json<FileListResponse> {
    let files = state.store.list_files().into_iter().map(FileInfo::from).collect();
    Json(FileListResponse { files })
}

/// GET /api/files/{name} — Read a file, falling back to the legacy directory.
#[utoipa::path(
    get,
    path = "/api/files/{name}",
    params(("name" = String, Path, description = "File name relative to the root")),
    responses(
        (status = 200, description = "File content", body = FileContentResponse),
        (status = 400, description = "Invalid extension or path", body = crate::error::ErrorBody),
        (status = 404, description = "File not found", body = crate::error::ErrorBody),
    ),
    tag = "files"
)]
pub(crate) async fn get_file(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<FileContentResponse>, AppError> {
    let stored = state
        .store
        .read(&name)
        .map_err(|e| AppError::from_store(e, "Error reading file"))?;

    Ok(Json(FileContentResponse {
        filename: name,
        content: stored.content,
        size: stored.size,
        modified: stored.modified,
    }))
}

/// POST /api/save — Save YAML content under the root.
///
/// The content must parse. An existing file is renamed to a timestamped
/// backup before the new content is written.
#[utoipa::path(
    post,
    path = "/api/save",
    request_body = SaveRequest,
    responses(
        (status = 200, description = "File saved", body = SaveResponse),
        (status = 400, description = "Invalid extension, path or YAML", body = crate::error::ErrorBody),
        (status = 422, description = "Malformed request body", body = crate::error::ErrorBody),
    ),
    tag = "files"
)]
pub(crate) async fn save_file(
    State(state): State<AppState>,
    body: Result<Json<SaveRequest>, JsonRejection>,
) -> Result<Json<SaveResponse>, AppError> {
    let req = extract_json(body)?;
    let saved = state
        .store
        .save(&req.filename, &req.content)
        .map_err(|e| AppError::from_store(e, "Error saving file"))?;

    Ok(Json(SaveResponse {
        success: true,
        message: format!("File '{}' saved successfully", req.filename),
        filename: req.filename,
        size: saved.size,
        modified: saved.modified,
    }))
}

/// POST /api/convert/{name} — Write a JSON copy of a YAML file.
#[utoipa::path(
    post,
    path = "/api/convert/{name}",
    params(("name" = String, Path, description = "YAML file name relative to the root")),
    responses(
        (status = 200, description = "JSON written", body = ConvertResponse),
        (status = 400, description = "Invalid extension or path", body = crate::error::ErrorBody),
        (status = 404, description = "File not found", body = crate::error::ErrorBody),
        (status = 500, description = "Stored file could not be converted", body = crate::error::ErrorBody),
    ),
    tag = "files"
)]
pub(crate) async fn convert_file(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ConvertResponse>, AppError> {
    // Unparsable stored content is a 500; only caller input maps to 400.
    let converted = state.store.convert(&name).map_err(|e| match e {
        err @ StoreError::InvalidContent(_) => AppError::internal(CONVERT_CONTEXT, err),
        other => AppError::from_store(other, CONVERT_CONTEXT),
    })?;

    Ok(Json(ConvertResponse {
        success: true,
        message: format!("Converted {} to {}", name, converted.json_name),
        yaml_file: name,
        json_file: converted.json_name,
        json_content: converted.json_content,
    }))
}

/// POST /api/upload — Store an uploaded YAML file under the root.
#[utoipa::path(
    post,
    path = "/api/upload",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File stored", body = UploadResponse),
        (status = 400, description = "Missing file, invalid extension, non-UTF-8 or invalid YAML", body = crate::error::ErrorBody),
    ),
    tag = "files"
)]
pub(crate) async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let mut multipart = multipart.map_err(|e| AppError::BadRequest(e.body_text()))?;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::BadRequest("Uploaded file has no name".into()))?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        let saved = state
            .store
            .upload(&filename, &bytes)
            .map_err(|e| AppError::from_store(e, "Error uploading file"))?;

        return Ok(Json(UploadResponse {
            success: true,
            message: format!("File '{filename}' uploaded successfully"),
            filename,
            size: saved.size,
        }));
    }

    Err(AppError::BadRequest(format!(
        "No file provided in field '{UPLOAD_FIELD}'"
    )))
}
