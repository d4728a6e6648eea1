use super::{BlobStore, StoreError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

/// Read-only access to a public-read object storage bucket.
///
/// Blobs are fetched from `{base_url}/{key}`. Listing and writes are not
/// available over anonymous HTTP.
pub struct HttpBlobStore {
    client: Client,
    base_url: String,
    prefix: String,
}

impl HttpBlobStore {
    pub fn new(base_url: &str, prefix: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            prefix: prefix.into(),
        }
    }

    fn url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    fn backend(&self) -> &'static str {
        "http"
    }

    fn key_prefix(&self) -> &str {
        &self.prefix
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let url = self.url(key);
        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!("GET {} -> 404", url);
            return Ok(None);
        }
        let body = response.error_for_status()?.text().await?;
        Ok(Some(body))
    }

    async fn put(&self, _key: &str, _body: String) -> Result<(), StoreError> {
        Err(StoreError::Unsupported("put"))
    }

    async fn put_new(&self, _key: &str, _body: String) -> Result<bool, StoreError> {
        Err(StoreError::Unsupported("put"))
    }

    async fn keys(&self, _prefix: &str) -> Result<Vec<String>, StoreError> {
        Err(StoreError::Unsupported("listing"))
    }
}
