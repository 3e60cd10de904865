use crate::error::{Result, StoreError};
use crate::store::RecordStore;
use crate::types::{NewRecord, Record};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

/// PostgreSQL-backed record store
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a unique violation on `email` to a conflict; everything else goes through `From`
fn insert_error(err: sqlx::Error, email: &str) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::Conflict(email.to_string())
        }
        _ => StoreError::from(err),
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn create(&self, p: &NewRecord) -> Result<Record> {
        sqlx::query_as::<_, Record>(
            r#"
            INSERT INTO records (name, email)
            VALUES ($1, $2)
            RETURNING id, name, email, created_at
            "#,
        )
        .bind(&p.name)
        .bind(&p.email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| insert_error(e, &p.email))
    }

    async fn find_all(&self) -> Result<Vec<Record>> {
        let rows = sqlx::query_as::<_, Record>(
            "SELECT id, name, email, created_at FROM records ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Record>> {
        let row = sqlx::query_as::<_, Record>(
            "SELECT id, name, email, created_at FROM records WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_name(&self, email: &str, name: &str) -> Result<Record> {
        let row = sqlx::query_as::<_, Record>(
            r#"
            UPDATE records SET name = $2
            WHERE email = $1
            RETURNING id, name, email, created_at
            "#,
        )
        .bind(email)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        row.ok_or(StoreError::NotFound)
    }

    async fn delete(&self, email: &str) -> Result<Record> {
        let row = sqlx::query_as::<_, Record>(
            "DELETE FROM records WHERE email = $1 RETURNING id, name, email, created_at",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        row.ok_or(StoreError::NotFound)
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("Record store connections closed");
    }
}
