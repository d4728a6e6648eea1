use super::{BlobStore, StoreError};
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// In-process blob store.
pub struct MemoryBlobStore {
    prefix: String,
    blobs: DashMap<String, String>,
}

impl MemoryBlobStore {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            blobs: DashMap::new(),
        }
    }

    /// Number of stored blobs.
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    fn key_prefix(&self) -> &str {
        &self.prefix
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.blobs.get(key).map(|entry| entry.value().clone()))
    }

    async fn put(&self, key: &str, body: String) -> Result<(), StoreError> {
        self.blobs.insert(key.to_string(), body);
        Ok(())
    }

    async fn put_new(&self, key: &str, body: String) -> Result<bool, StoreError> {
        match self.blobs.entry(key.to_string()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(body);
                Ok(true)
            }
        }
    }

    async fn keys(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        Ok(self
            .blobs
            .iter()
            .filter(|entry| entry.key().starts_with(prefix))
            .map(|entry| entry.key().clone())
            .collect())
    }
}
