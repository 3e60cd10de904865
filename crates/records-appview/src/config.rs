use etag_cache::FailurePolicy;
use std::env;
use tracing::warn;

/// Which record store backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordStoreKind {
    Postgres,
    /// Process-local store, for development; data is lost on restart
    Memory,
}

/// Application configuration parsed from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub record_store: RecordStoreKind,
    pub cors_origins: Vec<String>,
    pub cache_failure_policy: FailurePolicy,
    /// Rewrite the single-record cache entry on update instead of dropping it
    pub eager_repopulate: bool,
}

impl Config {
    /// Parse configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let port = get("PORT").and_then(|p| p.parse().ok()).unwrap_or(3000);

        let database_url =
            get("DATABASE_URL").unwrap_or_else(|| "postgres://localhost/records".to_string());

        let db_max_connections = get("DB_MAX_CONNECTIONS")
            .and_then(|n| n.parse().ok())
            .unwrap_or(10);

        let record_store = match get("RECORD_STORE").as_deref().map(str::trim) {
            Some("memory") => RecordStoreKind::Memory,
            Some("postgres") | None => RecordStoreKind::Postgres,
            Some(other) => {
                warn!(value = other, "Unknown RECORD_STORE, using postgres");
                RecordStoreKind::Postgres
            }
        };

        let cors_origins = get("CORS_ORIGINS")
            .map(|s| s.split(',').map(|o| o.trim().to_string()).collect())
            .unwrap_or_else(|| vec!["http://localhost:5173".to_string()]);

        let cache_failure_policy = match get("CACHE_FAILURE_POLICY") {
            Some(value) => value.parse().unwrap_or_else(|e: String| {
                warn!(error = %e, "Invalid CACHE_FAILURE_POLICY, using degrade");
                FailurePolicy::Degrade
            }),
            None => FailurePolicy::Degrade,
        };

        let eager_repopulate = get("CACHE_EAGER_REPOPULATE")
            .map(|v| parse_bool(&v))
            .unwrap_or(true);

        Self {
            port,
            database_url,
            db_max_connections,
            record_store,
            cors_origins,
            cache_failure_policy,
            eager_repopulate,
        }
    }
}

fn parse_bool(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
