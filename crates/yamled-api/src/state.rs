//! # Application State
//!
//! Configuration read from the environment, and the shared state handed to
//! every handler via the `State` extractor.
//!
//! | Variable            | Default               |
//! |---------------------|-----------------------|
//! | `YAMLED_ROOT`       | `./nursing`           |
//! | `YAMLED_LEGACY_DIR` | parent of the root    |
//! | `YAMLED_HOST`       | `0.0.0.0`             |
//! | `YAMLED_PORT`       | `8001`                |
//!
//! An empty `YAMLED_LEGACY_DIR` disables the legacy read fallback.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use yamled_store::{FileStore, StoreConfig};

/// Default managed root.
pub const DEFAULT_ROOT: &str = "./nursing";

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8001;

/// Configuration errors detected at startup.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The port variable is not a number in `1..=65535`.
    #[error("invalid YAMLED_PORT {0:?}: expected a port number")]
    InvalidPort(String),

    /// The host variable is not an IP address.
    #[error("invalid YAMLED_HOST {0:?}: expected an IP address")]
    InvalidHost(String),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Managed root directory.
    pub root: PathBuf,
    /// Read fallback directory. `None` disables the fallback.
    pub legacy_dir: Option<PathBuf>,
    /// Address to bind.
    pub host: IpAddr,
    /// Port to bind.
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        let store = StoreConfig::new(DEFAULT_ROOT);
        Self {
            root: store.root,
            legacy_dir: store.legacy_dir,
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    /// Build configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let root = lookup("YAMLED_ROOT").unwrap_or_else(|| DEFAULT_ROOT.to_string());
        let mut store = StoreConfig::new(root);
        if let Some(legacy) = lookup("YAMLED_LEGACY_DIR") {
            store = store.with_legacy_dir((!legacy.is_empty()).then(|| PathBuf::from(legacy)));
        }

        let host = match lookup("YAMLED_HOST") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidHost(raw))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };
        let port = match lookup("YAMLED_PORT") {
            Some(raw) => match raw.parse::<u16>() {
                Ok(port) if port != 0 => port,
                _ => return Err(ConfigError::InvalidPort(raw)),
            },
            None => DEFAULT_PORT,
        };

        Ok(Self {
            root: store.root,
            legacy_dir: store.legacy_dir,
            host,
            port,
        })
    }

    /// Configuration for the file store.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.root.clone()).with_legacy_dir(self.legacy_dir.clone())
    }

    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Shared application state passed to all route handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Configuration the state was built from.
    pub config: AppConfig,
    /// The file store. Immutable, shared across requests.
    pub store: Arc<FileStore>,
}

impl AppState {
    /// Build state from configuration.
    pub fn new(config: AppConfig) -> Self {
        let store = Arc::new(FileStore::new(config.store_config()));
        Self { config, store }
    }
}
