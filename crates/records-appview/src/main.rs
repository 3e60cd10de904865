use std::sync::Arc;

use etag_cache::{CacheSettings, MokaCacheStore, CACHE_TTL};
use records_appview::config::RecordStoreKind;
use records_appview::{cors_layer, create_router, start_server, AppState, Config};
use records_db::{MemoryRecordStore, PgRecordStore, SharedRecordStore};
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    let env_filter = EnvFilter::from_default_env().add_directive("records_appview=info".parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    };

    let config = Config::from_env();
    info!(
        port = config.port,
        record_store = ?config.record_store,
        failure_policy = ?config.cache_failure_policy,
        eager_repopulate = config.eager_repopulate,
        "Starting records-appview"
    );

    let records: SharedRecordStore = match config.record_store {
        RecordStoreKind::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .connect(&config.database_url)
                .await?;
            records_db::migrate::migrate(&pool).await?;
            Arc::new(PgRecordStore::new(pool))
        }
        RecordStoreKind::Memory => {
            warn!("Using in-memory record store, data will not survive a restart");
            Arc::new(MemoryRecordStore::new())
        }
    };

    let settings = CacheSettings {
        ttl: CACHE_TTL,
        failure_policy: config.cache_failure_policy,
    };
    let state = AppState::new(
        records,
        Arc::new(MokaCacheStore::new()),
        settings,
        config.eager_repopulate,
    );

    let app = create_router(state.clone()).layer(cors_layer(&config.cors_origins));
    start_server(app, config.port).await?;

    if let Err(e) = state.cache.close().await {
        warn!(error = %e, "Failed to close cache store");
    }
    state.records.close().await;
    info!("Shutdown complete");

    Ok(())
}
