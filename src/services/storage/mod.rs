//! Blob storage for per-stock price history.
//!
//! Every stock lives in one CSV blob at `{prefix}/{CODE}.csv`. Backends only
//! move text around; table decoding, merging and key layout are shared.

pub mod file;
pub mod http;
pub mod memory;
pub mod redis;

pub use file::FileBlobStore;
pub use http::HttpBlobStore;
pub use memory::MemoryBlobStore;
pub use self::redis::RedisBlobStore;

use crate::config::{Config, StoreBackend};
use crate::types::{code_from_key, storage_key, RawTable};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Blob store failures.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] ::redis::RedisError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{0} is not supported by this store")]
    Unsupported(&'static str),
}

/// Text blobs addressed by key.
///
/// Implementors provide the raw operations; the stock-level operations are
/// built on top of them.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Short backend name for logs.
    fn backend(&self) -> &'static str;

    /// Key prefix stock blobs live under.
    fn key_prefix(&self) -> &str;

    /// Read a blob. `None` when the key does not exist.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a blob, replacing any existing one.
    async fn put(&self, key: &str, body: String) -> Result<(), StoreError>;

    /// Write a blob only if the key is free. Returns whether it wrote.
    async fn put_new(&self, key: &str, body: String) -> Result<bool, StoreError>;

    /// Every key under `prefix`.
    async fn keys(&self, prefix: &str) -> Result<Vec<String>, StoreError>;

    /// Raw history table for a stock, or `None` if the store has none.
    async fn fetch_series(&self, code: &str) -> Result<Option<RawTable>, StoreError> {
        let key = storage_key(code, self.key_prefix());
        let Some(body) = self.get(&key).await? else {
            debug!("{}: no blob at {}", self.backend(), key);
            return Ok(None);
        };
        Ok(Some(RawTable::from_csv(&body)?))
    }

    /// Store a table for a stock that has no history yet.
    async fn put_if_absent(&self, code: &str, table: &RawTable) -> Result<bool, StoreError> {
        let key = storage_key(code, self.key_prefix());
        let written = self.put_new(&key, table.to_csv()?).await?;
        if written {
            info!("{}: created {} ({} rows)", self.backend(), key, table.len());
        }
        Ok(written)
    }

    /// Merge new rows ahead of the stored history and write it back.
    ///
    /// Returns the merged row count.
    async fn merge(&self, code: &str, table: RawTable) -> Result<usize, StoreError> {
        let key = storage_key(code, self.key_prefix());
        let merged = match self.get(&key).await? {
            Some(body) => RawTable::merge(table, RawTable::from_csv(&body)?),
            None => RawTable::merge(table, RawTable::default()),
        };
        let rows = merged.len();
        self.put(&key, merged.to_csv()?).await?;
        info!("{}: merged {} ({} rows)", self.backend(), key, rows);
        Ok(rows)
    }

    /// Codes of every stock with a blob, sorted.
    async fn list_codes(&self) -> Result<Vec<String>, StoreError> {
        let prefix = self.key_prefix().to_string();
        let mut codes: Vec<String> = self
            .keys(&prefix)
            .await?
            .iter()
            .filter_map(|key| code_from_key(key, &prefix))
            .collect();
        codes.sort();
        codes.dedup();
        Ok(codes)
    }
}

/// Build the store selected by the configuration.
pub async fn from_config(config: &Config) -> Result<Arc<dyn BlobStore>, StoreError> {
    let prefix = config.key_prefix.clone();
    let store: Arc<dyn BlobStore> = match &config.store_backend {
        StoreBackend::Memory => Arc::new(MemoryBlobStore::new(prefix)),
        StoreBackend::File => Arc::new(FileBlobStore::new(&config.store_dir, prefix)),
        StoreBackend::Redis => Arc::new(RedisBlobStore::connect(&config.redis_url, prefix).await?),
        StoreBackend::Http => {
            let base_url = config
                .store_http_url
                .as_deref()
                .ok_or(StoreError::Unsupported("http store without STORE_HTTP_URL"))?;
            Arc::new(HttpBlobStore::new(base_url, prefix))
        }
    };
    info!("Using {} blob store", store.backend());
    Ok(store)
}
