//! Store configuration.

use std::path::{Path, PathBuf};

/// Directories the store operates on. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// The managed root. Saves, uploads and listings happen here.
    pub root: PathBuf,
    /// Second place to look when a read misses under the root.
    pub legacy_dir: Option<PathBuf>,
}

impl StoreConfig {
    /// Configuration rooted at `root` with the default legacy directory,
    /// the parent of the root.
    ///
    /// Listing paths are prefixed with the root's own name
    /// (`nursing/pathway.yaml`), so the parent is where such a path
    /// resolves when it is handed back to a read.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let legacy_dir = default_legacy_dir(&root);
        Self { root, legacy_dir }
    }

    /// Replace the legacy directory. `None` disables the fallback.
    pub fn with_legacy_dir(mut self, legacy_dir: Option<PathBuf>) -> Self {
        self.legacy_dir = legacy_dir;
        self
    }

    /// The last component of the root, used to prefix listing paths.
    ///
    /// Roots such as `.` have no final component of their own; the
    /// canonicalized path is consulted for those.
    pub fn root_name(&self) -> String {
        if let Some(name) = self.root.file_name() {
            return name.to_string_lossy().into_owned();
        }
        self.root
            .canonicalize()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_default()
    }
}

fn default_legacy_dir(root: &Path) -> Option<PathBuf> {
    match root.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Some(PathBuf::from(".")),
        Some(parent) => Some(parent.to_path_buf()),
        None => None,
    }
}
