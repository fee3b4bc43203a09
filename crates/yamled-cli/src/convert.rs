//! # Convert Subcommand
//!
//! Writes the JSON rendering of a managed YAML file under the root, with
//! the same `_metadata` stamp as `POST /api/convert/{name}`, and prints the
//! JSON file's name.

use anyhow::{Context, Result};
use clap::Args;

use crate::StoreArgs;

/// Arguments for the convert subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// YAML file name relative to the root.
    pub name: String,

    #[command(flatten)]
    pub store: StoreArgs,
}

/// Execute the convert subcommand.
pub fn run_convert(args: &ConvertArgs) -> Result<u8> {
    let store = args.store.open();
    let converted = store
        .convert(&args.name)
        .with_context(|| format!("failed to convert {}", args.name))?;
    println!("{}", converted.json_name);
    Ok(0)
}
