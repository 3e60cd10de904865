//! Applies the configured failure policy around a cache store

use crate::error::{CacheError, Result};
use crate::store::SharedStore;
use crate::types::{CacheSettings, CacheStats, FailurePolicy};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

#[derive(Default)]
pub(crate) struct Counters {
    pub(crate) hits: AtomicU64,
    pub(crate) misses: AtomicU64,
    pub(crate) store_errors: AtomicU64,
}

/// A cache store plus the policy and counters shared by every cache component
#[derive(Clone)]
pub(crate) struct GuardedStore {
    store: SharedStore,
    settings: CacheSettings,
    pub(crate) counters: Arc<Counters>,
}

impl GuardedStore {
    pub(crate) fn new(store: SharedStore, settings: CacheSettings) -> Self {
        Self {
            store,
            settings,
            counters: Arc::new(Counters::default()),
        }
    }

    pub(crate) fn ttl(&self) -> Duration {
        self.settings.ttl
    }

    /// A failed read is a miss under the degrade policy
    pub(crate) async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match self.store.get(key).await {
            Ok(bytes) => Ok(bytes),
            Err(e) => self.absorb("get", key, e).map(|()| None),
        }
    }

    /// Returns whether the entry was actually written
    pub(crate) async fn set(&self, key: &str, bytes: Vec<u8>) -> Result<bool> {
        match self.store.set(key, bytes, self.settings.ttl).await {
            Ok(()) => Ok(true),
            Err(e) => self.absorb("set", key, e).map(|()| false),
        }
    }

    /// Returns whether the keys were actually removed
    pub(crate) async fn delete(&self, keys: &[String]) -> Result<bool> {
        if keys.is_empty() {
            return Ok(true);
        }
        match self.store.delete(keys).await {
            Ok(()) => Ok(true),
            Err(e) => self.absorb("delete", &keys.join(","), e).map(|()| false),
        }
    }

    /// Count and log a store failure that does not reach the caller
    pub(crate) fn record_error(&self, op: &str, key: &str, error: &dyn std::fmt::Display) {
        let total = self.counters.store_errors.fetch_add(1, Ordering::Relaxed) + 1;
        warn!(op, key, error = %error, store_errors = total, "Cache store operation failed, continuing without cache");
    }

    fn absorb(&self, op: &str, key: &str, error: CacheError) -> Result<()> {
        match self.settings.failure_policy {
            FailurePolicy::Degrade => {
                self.record_error(op, key, &error);
                Ok(())
            }
            FailurePolicy::Propagate => Err(error),
        }
    }

    pub(crate) fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.store.entry_count().unwrap_or(0),
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            store_errors: self.counters.store_errors.load(Ordering::Relaxed),
        }
    }

    pub(crate) async fn close(&self) -> Result<()> {
        self.store.close().await
    }
}
