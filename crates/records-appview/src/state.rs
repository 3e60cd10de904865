use chrono::{DateTime, Utc};
use etag_cache::{CacheSettings, Invalidator, ReadThroughCache, SharedStore};
use records_db::SharedRecordStore;

/// Shared application state passed to all route handlers
#[derive(Clone)]
pub struct AppState {
    pub records: SharedRecordStore,
    pub cache: ReadThroughCache,
    pub invalidator: Invalidator,
    /// Rewrite the single-record entry on update rather than deleting it
    pub eager_repopulate: bool,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(
        records: SharedRecordStore,
        cache_store: SharedStore,
        settings: CacheSettings,
        eager_repopulate: bool,
    ) -> Self {
        let cache = ReadThroughCache::new(cache_store, settings);
        let invalidator = cache.invalidator();
        Self {
            records,
            cache,
            invalidator,
            eager_repopulate,
            started_at: Utc::now(),
        }
    }
}
