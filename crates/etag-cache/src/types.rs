//! Cache types

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Freshness window for every cache entry, in seconds
pub const CACHE_TTL_SECS: u64 = 300;

/// Freshness window for every cache entry
pub const CACHE_TTL: Duration = Duration::from_secs(CACHE_TTL_SECS);

/// What to do when the cache store itself fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Treat failed reads as misses and log-and-count failed writes/deletes
    #[default]
    Degrade,
    /// Return the store error to the caller
    Propagate,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "degrade" => Ok(FailurePolicy::Degrade),
            "propagate" => Ok(FailurePolicy::Propagate),
            other => Err(format!("unknown cache failure policy: {other}")),
        }
    }
}

/// Settings shared by the read-through manager and the invalidator
#[derive(Debug, Clone)]
pub struct CacheSettings {
    pub ttl: Duration,
    pub failure_policy: FailurePolicy,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl: CACHE_TTL,
            failure_policy: FailurePolicy::Degrade,
        }
    }
}

/// Statistics about the cache
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub entries: u64,
    pub hits: u64,
    pub misses: u64,
    /// Cache store failures that were swallowed under the degrade policy
    pub store_errors: u64,
}
