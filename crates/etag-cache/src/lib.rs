//! Read-through cache with content fingerprints
//!
//! Values are cached together with a fingerprint of their canonical JSON
//! form. The fingerprint doubles as an HTTP entity tag: a client presenting
//! the current one can be answered with "not modified". Writers drop or
//! replace affected entries through the [`Invalidator`].

mod conditional;
mod error;
mod fingerprint;
mod guarded;
mod invalidation;
mod read_through;
mod store;
mod types;

pub use conditional::{decide, Decision};
pub use error::{CacheError, Result};
pub use fingerprint::{canonical_bytes, fingerprint, Fingerprinted};
pub use invalidation::Invalidator;
pub use read_through::ReadThroughCache;
pub use store::{CacheStore, MokaCacheStore, SharedStore};
pub use types::{CacheSettings, CacheStats, FailurePolicy, CACHE_TTL, CACHE_TTL_SECS};
