//! Invalidation coordinator
//!
//! Called after a successful mutation of the source of record, before the
//! response goes out, so no later read can see an entry older than the write.

use crate::error::{CacheError, Result};
use crate::fingerprint::Fingerprinted;
use crate::guarded::GuardedStore;
use serde::Serialize;
use tracing::debug;

#[derive(Clone)]
pub struct Invalidator {
    store: GuardedStore,
}

impl Invalidator {
    pub(crate) fn new(store: GuardedStore) -> Self {
        Self { store }
    }

    /// Drop `keys` so the next read repopulates them
    pub async fn invalidate(&self, keys: &[String]) -> Result<()> {
        if self.store.delete(keys).await? {
            debug!(keys = ?keys, "Invalidated cache keys");
        }
        Ok(())
    }

    /// Replace the entry under `key` with `value` and its fresh fingerprint.
    ///
    /// If the store rejects the write (and the failure is being absorbed), the
    /// key is deleted instead so the previous entry cannot outlive the
    /// mutation.
    pub async fn repopulate<V: Serialize>(&self, key: &str, value: V) -> Result<Fingerprinted<V>> {
        let entry = Fingerprinted::new(value)?;
        let bytes = serde_json::to_vec(&entry).map_err(CacheError::from)?;

        if self.store.set(key, bytes).await? {
            debug!(
                key,
                ttl_secs = self.store.ttl().as_secs(),
                "Repopulated cache entry"
            );
        } else {
            self.store.delete(&[key.to_string()]).await?;
        }
        Ok(entry)
    }
}
