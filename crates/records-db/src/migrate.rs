//! Schema migrations for the `records` table

use crate::error::Result;
use sqlx::PgPool;
use tracing::info;

/// Apply pending migrations from `migrations/`.
///
/// Failures are classified like any other store error, so an unreachable
/// database surfaces as [`StoreError::Unavailable`](crate::StoreError::Unavailable).
pub async fn migrate(pool: &PgPool) -> Result<()> {
    let migrator = sqlx::migrate!();
    info!(
        migrations = migrator.iter().count(),
        "Applying record store migrations"
    );
    migrator.run(pool).await?;
    info!("Record store schema is up to date");
    Ok(())
}
