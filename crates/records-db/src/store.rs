use crate::error::Result;
use crate::types::{NewRecord, Record};
use async_trait::async_trait;
use std::sync::Arc;

/// Source of record for the `records` collection, keyed by email
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a record; `StoreError::Conflict` if the email is taken
    async fn create(&self, params: &NewRecord) -> Result<Record>;

    /// All records, oldest first
    async fn find_all(&self) -> Result<Vec<Record>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Record>>;

    /// Rename a record; `StoreError::NotFound` if the email is unknown
    async fn update_name(&self, email: &str, name: &str) -> Result<Record>;

    /// Remove a record, returning it; `StoreError::NotFound` if the email is unknown
    async fn delete(&self, email: &str) -> Result<Record>;

    /// Release connections at shutdown
    async fn close(&self) {}
}

pub type SharedRecordStore = Arc<dyn RecordStore>;
