//! Read-through cache manager
//!
//! Looks a key up in the cache store and, on a miss, loads the value from the
//! source of record, fingerprints it, and populates the cache.

use crate::error::{CacheError, Result};
use crate::fingerprint::Fingerprinted;
use crate::guarded::GuardedStore;
use crate::invalidation::Invalidator;
use crate::store::SharedStore;
use crate::types::{CacheSettings, CacheStats};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::atomic::Ordering;
use tracing::debug;

/// Read-through cache over a shared cache store
#[derive(Clone)]
pub struct ReadThroughCache {
    store: GuardedStore,
}

impl ReadThroughCache {
    pub fn new(store: SharedStore, settings: CacheSettings) -> Self {
        Self {
            store: GuardedStore::new(store, settings),
        }
    }

    /// Invalidation coordinator sharing this cache's store, policy and counters
    pub fn invalidator(&self) -> Invalidator {
        Invalidator::new(self.store.clone())
    }

    pub fn stats(&self) -> CacheStats {
        self.store.stats()
    }

    /// Release the underlying cache store
    pub async fn close(&self) -> Result<()> {
        self.store.close().await
    }

    /// Return the cached value and fingerprint for `key`, loading on a miss.
    ///
    /// `loader` returning `Ok(None)` means the entity does not exist; nothing
    /// is cached in that case. Concurrent misses on the same key may each run
    /// the loader, and the last cache write wins.
    pub async fn read_through<V, E, F, Fut>(
        &self,
        key: &str,
        loader: F,
    ) -> std::result::Result<Option<Fingerprinted<V>>, E>
    where
        V: Serialize + DeserializeOwned,
        E: From<CacheError>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<Option<V>, E>>,
    {
        if let Some(entry) = self.lookup::<V>(key).await? {
            self.store.counters.hits.fetch_add(1, Ordering::Relaxed);
            debug!(key, "Cache hit");
            return Ok(Some(entry));
        }

        self.store.counters.misses.fetch_add(1, Ordering::Relaxed);
        debug!(key, "Cache miss");

        let Some(value) = loader().await? else {
            return Ok(None);
        };

        let entry = Fingerprinted::new(value)?;
        let bytes = serde_json::to_vec(&entry).map_err(CacheError::from)?;
        self.store.set(key, bytes).await?;
        Ok(Some(entry))
    }

    async fn lookup<V: DeserializeOwned>(&self, key: &str) -> Result<Option<Fingerprinted<V>>> {
        let Some(bytes) = self.store.get(key).await? else {
            return Ok(None);
        };

        match serde_json::from_slice::<Fingerprinted<V>>(&bytes) {
            Ok(entry) => Ok(Some(entry)),
            Err(e) => {
                // Unreadable entries are replaced by the next population
                self.store.record_error("decode", key, &e);
                Ok(None)
            }
        }
    }
}
