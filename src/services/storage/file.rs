use super::{BlobStore, StoreError};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Blobs as files under a root directory; keys are relative paths.
pub struct FileBlobStore {
    root: PathBuf,
    prefix: String,
}

impl FileBlobStore {
    pub fn new(root: impl AsRef<Path>, prefix: impl Into<String>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            prefix: prefix.into(),
        }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    async fn ensure_parent(path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl BlobStore for FileBlobStore {
    fn backend(&self) -> &'static str {
        "file"
    }

    fn key_prefix(&self) -> &str {
        &self.prefix
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path(key)).await {
            Ok(body) => Ok(Some(body)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, key: &str, body: String) -> Result<(), StoreError> {
        let path = self.path(key);
        Self::ensure_parent(&path).await?;
        let tmp = path.with_extension("csv.tmp");
        fs::write(&tmp, body).await?;
        fs::rename(&tmp, &path).await?;
        debug!("Wrote {}", path.display());
        Ok(())
    }

    async fn put_new(&self, key: &str, body: String) -> Result<bool, StoreError> {
        let path = self.path(key);
        Self::ensure_parent(&path).await?;
        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => return Err(e.into()),
        };
        file.write_all(body.as_bytes()).await?;
        file.flush().await?;
        Ok(true)
    }

    async fn keys(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let prefix = prefix.trim_end_matches('/');
        let mut entries = match fs::read_dir(self.path(prefix)).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut keys = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            keys.push(if prefix.is_empty() {
                name
            } else {
                format!("{}/{}", prefix, name)
            });
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBlobStore::new(dir.path(), "Stock_Data");
        assert!(store.get("Stock_Data/ALK.csv").await.unwrap().is_none());
        assert!(store.keys("Stock_Data").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_put_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBlobStore::new(dir.path(), "Stock_Data");
        store.put("Stock_Data/ALK.csv", "Date\n".into()).await.unwrap();

        assert!(dir.path().join("Stock_Data/ALK.csv").exists());
        assert!(!dir.path().join("Stock_Data/ALK.csv.tmp").exists());
        assert_eq!(
            store.keys("Stock_Data").await.unwrap(),
            vec!["Stock_Data/ALK.csv".to_string()]
        );
    }

    #[tokio::test]
    async fn test_put_new_does_not_clobber() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBlobStore::new(dir.path(), "Stock_Data");
        assert!(store.put_new("Stock_Data/KMB.csv", "first".into()).await.unwrap());
        assert!(!store.put_new("Stock_Data/KMB.csv", "second".into()).await.unwrap());
        assert_eq!(
            store.get("Stock_Data/KMB.csv").await.unwrap().as_deref(),
            Some("first")
        );
    }
}
