//! # List Subcommand
//!
//! Prints the YAML files under the root as a JSON array, in the same shape
//! as `GET /api/files`.

use anyhow::Result;
use clap::Args;

use crate::StoreArgs;

/// Arguments for the list subcommand.
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub store: StoreArgs,
}

/// Execute the list subcommand.
pub fn run_list(args: &ListArgs) -> Result<u8> {
    let store = args.store.open();
    if !store.root().is_dir() {
        tracing::warn!(root = %store.root().display(), "root is not a directory");
    }
    let files = store.list_files();
    println!("{}", serde_json::to_string_pretty(&files)?);
    tracing::info!(count = files.len(), "listed files");
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn listing_missing_root_still_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let args = ListArgs {
            store: StoreArgs {
                root: dir.path().join("absent"),
                legacy_dir: None,
            },
        };
        assert_eq!(run_list(&args).unwrap(), 0);
    }

    #[test]
    fn listing_existing_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.yaml"), "a: 1\n").unwrap();
        let args = ListArgs {
            store: StoreArgs {
                root: PathBuf::from(dir.path()),
                legacy_dir: None,
            },
        };
        assert_eq!(run_list(&args).unwrap(), 0);
        assert_eq!(args.store.open().list_files().len(), 1);
    }
}
