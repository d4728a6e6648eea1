use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::types::DEFAULT_KEY_PREFIX;

/// Where stock history blobs are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// CSV files under `STORE_DIR`.
    #[default]
    File,
    /// CSV text in Redis strings.
    Redis,
    /// Read-only public bucket over HTTP.
    Http,
    /// Process memory, lost on restart.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "file" => Ok(StoreBackend::File),
            "redis" => Ok(StoreBackend::Redis),
            "http" => Ok(StoreBackend::Http),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend: {}", other)),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::File => write!(f, "file"),
            StoreBackend::Redis => write!(f, "redis"),
            StoreBackend::Http => write!(f, "http"),
            StoreBackend::Memory => write!(f, "memory"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Blob store implementation.
    pub store_backend: StoreBackend,
    /// Root directory for the file store.
    pub store_dir: PathBuf,
    /// Redis URL for the redis store.
    pub redis_url: String,
    /// Base URL of a public-read bucket for the http store.
    pub store_http_url: Option<String>,
    /// Key prefix for per-stock blobs.
    pub key_prefix: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let store_backend = env::var("STORE_BACKEND")
            .ok()
            .and_then(|v| match v.parse() {
                Ok(backend) => Some(backend),
                Err(e) => {
                    tracing::warn!("{}, falling back to file store", e);
                    None
                }
            })
            .unwrap_or_default();

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3001),
            store_backend,
            store_dir: env::var("STORE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),
            store_http_url: env::var("STORE_HTTP_URL").ok().filter(|v| !v.is_empty()),
            key_prefix: env::var("STORE_KEY_PREFIX")
                .unwrap_or_else(|_| DEFAULT_KEY_PREFIX.to_string()),
        }
    }

    /// In-memory configuration, for tests and demos.
    pub fn in_memory() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            store_backend: StoreBackend::Memory,
            store_dir: PathBuf::from("./data"),
            redis_url: "redis://127.0.0.1:6379".to_string(),
            store_http_url: None,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }

    /// `host:port` to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
