//! # yamled CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use yamled_cli::convert::{run_convert, ConvertArgs};
use yamled_cli::list::{run_list, ListArgs};
use yamled_cli::validate::{run_validate, ValidateArgs};

/// yamled — validate, list and convert YAML documents.
#[derive(Parser, Debug)]
#[command(name = "yamled", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a local YAML file and print the report.
    Validate(ValidateArgs),

    /// List the YAML files under the managed root.
    List(ListArgs),

    /// Convert a managed YAML file to JSON.
    Convert(ConvertArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match &cli.command {
        Commands::Validate(args) => run_validate(args),
        Commands::List(args) => run_list(args),
        Commands::Convert(args) => run_convert(args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}
