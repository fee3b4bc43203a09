//! # Validate Subcommand
//!
//! Validates a local file exactly as `POST /api/validate` would and prints
//! the report as JSON.
//!
//! The profile comes from `--filename` when given, otherwise from the path
//! as typed, so `yamled validate nursing/pathway.yaml` gets the structural
//! checks.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use yamled_core::{validate_content, ValidationReport};

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// File to validate.
    pub file: PathBuf,

    /// Name used to pick the validation profile.
    #[arg(long)]
    pub filename: Option<String>,
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let hint = args
        .filename
        .clone()
        .unwrap_or_else(|| args.file.to_string_lossy().into_owned());
    let report = validate_file(&args.file, &hint)?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    if report.valid {
        tracing::info!(file = %args.file.display(), "valid");
        Ok(0)
    } else {
        tracing::warn!(file = %args.file.display(), errors = report.errors.len(), "invalid");
        Ok(1)
    }
}

/// Read `path` and validate its content under the profile implied by `hint`.
pub fn validate_file(path: &Path, hint: &str) -> Result<ValidationReport> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let content = String::from_utf8(bytes)
        .with_context(|| format!("{} is not valid UTF-8 text", path.display()))?;
    Ok(validate_content(&content, hint))
}
