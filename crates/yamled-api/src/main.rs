//! # yamled-api — Binary Entry Point
//!
//! Starts the Axum HTTP server for the YAML editor.
//! Binds to `YAMLED_HOST:YAMLED_PORT` (default `0.0.0.0:8001`).

use yamled_api::state::{AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("Invalid configuration: {e}");
        e
    })?;

    if !config.root.is_dir() {
        tracing::warn!(
            root = %config.root.display(),
            "root directory does not exist yet; readiness will fail until it is created"
        );
    }

    let addr = config.bind_addr();
    tracing::info!(
        root = %config.root.display(),
        legacy_dir = ?config.legacy_dir,
        "yamled API listening on {}",
        addr
    );

    let app = yamled_api::app(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
