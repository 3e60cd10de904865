//! Cache store contract and the in-process moka implementation

use crate::error::Result;
use async_trait::async_trait;
use moka::future::Cache;
use moka::Expiry;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Key-value store with per-entry expiry.
///
/// Every operation may fail with [`CacheError::Unavailable`](crate::CacheError).
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Fetch the bytes stored under `key`, or `None` if absent or expired
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store `value` under `key`, replacing any previous entry, expiring `ttl` from now
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()>;

    /// Remove every key in `keys`; missing keys are ignored
    async fn delete(&self, keys: &[String]) -> Result<()>;

    /// Entry count for health reporting, when the store can tell
    fn entry_count(&self) -> Option<u64> {
        None
    }

    /// Release the store at shutdown
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

pub type SharedStore = Arc<dyn CacheStore>;

#[derive(Clone)]
struct StoredBytes {
    bytes: Arc<[u8]>,
    ttl: Duration,
}

/// Expires each entry after the TTL it was written with
struct PerEntryTtl;

impl Expiry<String, StoredBytes> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &StoredBytes,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &StoredBytes,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// In-process cache store backed by moka
pub struct MokaCacheStore {
    cache: Cache<String, StoredBytes>,
}

impl MokaCacheStore {
    pub fn new() -> Self {
        let cache = Cache::builder().expire_after(PerEntryTtl).build();
        Self { cache }
    }
}

impl Default for MokaCacheStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for MokaCacheStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.cache.get(key).await.map(|entry| entry.bytes.to_vec()))
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()> {
        let entry = StoredBytes {
            bytes: Arc::from(value),
            ttl,
        };
        self.cache.insert(key.to_string(), entry).await;
        debug!(key, ttl_secs = ttl.as_secs(), "Cache entry stored");
        Ok(())
    }

    async fn delete(&self, keys: &[String]) -> Result<()> {
        for key in keys {
            self.cache.invalidate(key).await;
        }
        Ok(())
    }

    fn entry_count(&self) -> Option<u64> {
        Some(self.cache.entry_count())
    }

    async fn close(&self) -> Result<()> {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
        info!("Cache store closed");
        Ok(())
    }
}
