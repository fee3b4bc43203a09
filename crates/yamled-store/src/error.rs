//! # Error Types
//!
//! [`StoreError`] covers every way a store operation can fail. The HTTP
//! layer maps each variant onto a status code; the `Display` text is what
//! a client sees as the error detail, except for [`StoreError::Io`], whose
//! text stays in the logs.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use yamled_core::DocumentError;

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by [`crate::FileStore`].
#[derive(Error, Debug)]
pub enum StoreError {
    /// The logical name does not end in `.yaml` or `.yml`.
    #[error("Invalid file extension: {0} (only .yaml and .yml files are allowed)")]
    InvalidExtension(String),

    /// The logical name is empty or would escape the managed directories.
    #[error("Invalid file path: {0}")]
    InvalidPath(String),

    /// No candidate location holds the file.
    #[error("File not found: {0}")]
    NotFound(String),

    /// The content to be stored does not parse.
    #[error("Invalid YAML: {0}")]
    InvalidContent(#[from] DocumentError),

    /// Uploaded bytes are not UTF-8 text.
    #[error("File must be valid UTF-8 text")]
    NonUtf8Content,

    /// Filesystem failure.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path the operation was acting on.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
