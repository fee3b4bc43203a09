//! # Listing
//!
//! Recursive enumeration of the YAML files under the root. Listing never
//! fails: an unreadable root gives an empty list, and entries whose
//! metadata cannot be read are left out. Every skipped entry is logged.

use std::fs;
use std::path::{Component, Path};

use chrono::{DateTime, Utc};
use serde::Serialize;
use walkdir::WalkDir;

use crate::policy::has_allowed_extension;

/// One YAML file found under the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    /// File name without directories.
    pub name: String,
    /// `<root-name>/<relative path>` with `/` separators.
    pub path: String,
    /// Size in bytes.
    pub size: u64,
    /// Last modification time.
    pub modified: DateTime<Utc>,
}

/// Walk `root` and collect a record for every `.yaml`/`.yml` file,
/// sorted by file name (ties broken by path).
pub fn list_files(root: &Path, root_name: &str) -> Vec<FileRecord> {
    let mut records = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(root = %root.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if entry.file_type().is_dir() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            tracing::debug!(path = %entry.path().display(), "skipping non UTF-8 file name");
            continue;
        };
        if !has_allowed_extension(name) {
            continue;
        }

        let metadata = match fs::metadata(entry.path()) {
            Ok(metadata) if metadata.is_file() => metadata,
            Ok(_) => continue,
            Err(e) => {
                tracing::debug!(path = %entry.path().display(), error = %e, "skipping file without metadata");
                continue;
            }
        };
        let modified = match metadata.modified() {
            Ok(time) => DateTime::<Utc>::from(time),
            Err(e) => {
                tracing::debug!(path = %entry.path().display(), error = %e, "skipping file without mtime");
                continue;
            }
        };

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        records.push(FileRecord {
            name: name.to_string(),
            path: display_path(root_name, relative),
            size: metadata.len(),
            modified,
        });
    }

    records.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.path.cmp(&b.path)));
    records
}

fn display_path(root_name: &str, relative: &Path) -> String {
    let mut parts: Vec<String> = Vec::new();
    if !root_name.is_empty() {
        parts.push(root_name.to_string());
    }
    for component in relative.components() {
        if let Component::Normal(part) = component {
            parts.push(part.to_string_lossy().into_owned());
        }
    }
    parts.join("/")
}
