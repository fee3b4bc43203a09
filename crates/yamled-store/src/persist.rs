//! # Safe Persistence
//!
//! Backup-then-write protocol used by save and upload:
//!
//! 1. If a file exists at the target, rename it to
//!    `<target>.backup.<YYYYMMDDhhmmss>` (local time). If that name is
//!    taken, `-1`, `-2`, ... is appended until a free name is found.
//! 2. Write the new content verbatim.
//!
//! A failed write after a successful rename leaves the backup in place and
//! no file at the target.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use crate::error::{StoreError, StoreResult};

/// Format of the timestamp in backup names.
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Outcome of a successful save or upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedFile {
    /// Bytes written.
    pub size: u64,
    /// Wall-clock time of the write.
    pub modified: DateTime<Utc>,
}

/// Write `content` to `target`, backing up whatever was there.
///
/// Missing parent directories are created.
pub fn write_with_backup(target: &Path, content: &str) -> StoreResult<SavedFile> {
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
    }

    if target.is_file() {
        let backup = backup_path(target, Local::now());
        fs::rename(target, &backup).map_err(|e| StoreError::io(target, e))?;
        tracing::debug!(
            target = %target.display(),
            backup = %backup.display(),
            "backed up existing file"
        );
    }

    fs::write(target, content).map_err(|e| StoreError::io(target, e))?;
    Ok(SavedFile {
        size: content.len() as u64,
        modified: Utc::now(),
    })
}

/// First free backup name for `target` at time `now`.
pub fn backup_path(target: &Path, now: DateTime<Local>) -> PathBuf {
    let stamp = now.format(BACKUP_TIMESTAMP_FORMAT).to_string();
    let base = backup_candidate(target, &stamp, None);
    if !base.exists() {
        return base;
    }
    (1u32..)
        .map(|n| backup_candidate(target, &stamp, Some(n)))
        .find(|candidate| !candidate.exists())
        .unwrap_or(base)
}

fn backup_candidate(target: &Path, stamp: &str, n: Option<u32>) -> PathBuf {
    let mut name = OsString::from(target.as_os_str());
    name.push(".backup.");
    name.push(stamp);
    if let Some(n) = n {
        name.push(format!("-{n}"));
    }
    PathBuf::from(name)
}
