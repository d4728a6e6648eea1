use super::{BlobStore, StoreError};
use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, RedisResult};
use tracing::{debug, info};

/// Redis key namespace for stock blobs.
const KEY_PREFIX: &str = "mse:";

/// Blobs as Redis strings under `mse:{key}`.
#[derive(Clone)]
pub struct RedisBlobStore {
    conn: ConnectionManager,
    prefix: String,
}

impl RedisBlobStore {
    /// Connect to Redis at the given URL.
    pub async fn connect(redis_url: &str, prefix: impl Into<String>) -> Result<Self, StoreError> {
        let conn = Self::open(redis_url).await?;
        info!("Connected to Redis at {}", redis_url);
        Ok(Self {
            conn,
            prefix: prefix.into(),
        })
    }

    async fn open(redis_url: &str) -> RedisResult<ConnectionManager> {
        let client = redis::Client::open(redis_url)?;
        ConnectionManager::new(client).await
    }

    fn redis_key(key: &str) -> String {
        format!("{}{}", KEY_PREFIX, key)
    }
}

#[async_trait]
impl BlobStore for RedisBlobStore {
    fn backend(&self) -> &'static str {
        "redis"
    }

    fn key_prefix(&self) -> &str {
        &self.prefix
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(Self::redis_key(key)).await?;
        Ok(value)
    }

    async fn put(&self, key: &str, body: String) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(Self::redis_key(key), body).await?;
        Ok(())
    }

    async fn put_new(&self, key: &str, body: String) -> Result<bool, StoreError> {
        let mut conn = self.conn.clone();
        let written: bool = conn.set_nx(Self::redis_key(key), body).await?;
        Ok(written)
    }

    async fn keys(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let mut conn = self.conn.clone();
        let pattern = format!("{}{}*", KEY_PREFIX, prefix);
        let keys: Vec<String> = redis::cmd("KEYS")
            .arg(&pattern)
            .query_async(&mut conn)
            .await?;
        debug!("{} keys match {}", keys.len(), pattern);
        Ok(keys
            .into_iter()
            .filter_map(|k| k.strip_prefix(KEY_PREFIX).map(str::to_string))
            .collect())
    }
}
