//! # yamled-cli — Command-Line Tool for yamled
//!
//! Provides the `yamled` command, which runs the same validation and store
//! operations as the HTTP service directly against the local filesystem.
//!
//! ## Subcommands
//!
//! - `yamled validate` — Validate a local file and print the report.
//! - `yamled list` — Print the YAML files under a root as JSON.
//! - `yamled convert` — Write the JSON copy of a managed YAML file under the root.
//!
//! ```bash
//! yamled validate drafts/pathway.yaml --filename nursing/pathway.yaml
//! yamled list --root ./nursing
//! yamled convert pathway.yaml --root ./nursing
//! ```
//!
//! Every `run_*` function returns the process exit code: `0` on success,
//! `1` when validation found problems.

pub mod convert;
pub mod list;
pub mod validate;

use std::path::PathBuf;

use clap::Args;
use yamled_store::{FileStore, StoreConfig};

/// Root used when `--root` is not given.
pub const DEFAULT_ROOT: &str = "./nursing";

/// Arguments locating the managed directories.
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Managed root directory.
    #[arg(long, default_value = DEFAULT_ROOT)]
    pub root: PathBuf,

    /// Read fallback directory. Defaults to the parent of the root.
    #[arg(long)]
    pub legacy_dir: Option<PathBuf>,
}

impl StoreArgs {
    /// Build the store these arguments describe.
    pub fn open(&self) -> FileStore {
        let mut config = StoreConfig::new(self.root.clone());
        if let Some(legacy) = &self.legacy_dir {
            config = config.with_legacy_dir(Some(legacy.clone()));
        }
        tracing::debug!(root = %config.root.display(), legacy_dir = ?config.legacy_dir, "opening store");
        FileStore::new(config)
    }
}
