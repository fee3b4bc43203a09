//! # Convert to JSON
//!
//! Parses a stored YAML file and writes an indented JSON rendering to the
//! JSON name of the same logical path under the root. Mapping roots gain a `_metadata` entry recording where and when the
//! JSON was generated:
//!
//! ```json
//! "_metadata": {
//!   "generatedFrom": "pathway.yaml",
//!   "generatedAt": "2024-03-09T07:05:01.123456Z",
//!   "generatedBy": "yaml-editor-api"
//! }
//! ```
//!
//! Any existing `_metadata` key is overwritten. Non-mapping roots are
//! written unchanged.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use yamled_core::{parse_document, to_pretty_json};

use crate::error::{StoreError, StoreResult};
use crate::policy::json_sibling_name;

/// Value of `_metadata.generatedBy`.
pub const GENERATED_BY: &str = "yaml-editor-api";

/// Key under which conversion metadata is recorded.
pub const METADATA_KEY: &str = "_metadata";

/// Outcome of a conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Converted {
    /// Logical name of the JSON file.
    pub json_name: String,
    /// The JSON text that was written.
    pub json_content: String,
}

/// Convert the YAML file at `source` (known to the client as
/// `logical_name`) and write the JSON under `root`.
///
/// The output is always `root/<logical_name with .json>`, wherever the
/// source was found. Missing parent directories are created.
pub fn convert_file(
    source: &Path,
    root: &Path,
    logical_name: &str,
    now: DateTime<Utc>,
) -> StoreResult<Converted> {
    let text = fs::read_to_string(source).map_err(|e| StoreError::io(source, e))?;
    let mut doc = parse_document(&text)?;
    stamp_metadata(&mut doc, logical_name, now);
    let json_content = to_pretty_json(&doc)?;

    let json_name = json_sibling_name(logical_name);
    let target = root.join(&json_name);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }
    fs::write(&target, &json_content).map_err(|e| StoreError::io(&target, e))?;
    tracing::info!(
        source = %source.display(),
        target = %target.display(),
        "converted YAML to JSON"
    );

    Ok(Converted {
        json_name,
        json_content,
    })
}

/// Insert the `_metadata` entry into a mapping root.
pub fn stamp_metadata(doc: &mut Value, logical_name: &str, now: DateTime<Utc>) {
    if let Some(root) = doc.as_object_mut() {
        root.insert(
            METADATA_KEY.to_string(),
            json!({
                "generatedFrom": logical_name,
                "generatedAt": now.to_rfc3339(),
                "generatedBy": GENERATED_BY,
            }),
        );
    }
}
