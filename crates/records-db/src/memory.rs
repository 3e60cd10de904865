//! In-memory record store for development and tests

use crate::error::{Result, StoreError};
use crate::store::RecordStore;
use crate::types::{NewRecord, Record};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    next_id: i64,
    /// Kept in insertion (and therefore id) order
    records: Vec<Record>,
}

/// Record store held in process memory, enforcing unique emails
#[derive(Default)]
pub struct MemoryRecordStore {
    inner: RwLock<Inner>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn create(&self, p: &NewRecord) -> Result<Record> {
        let mut inner = self.inner.write().await;
        if inner.records.iter().any(|r| r.email == p.email) {
            return Err(StoreError::Conflict(p.email.clone()));
        }
        inner.next_id += 1;
        let record = Record {
            id: inner.next_id,
            name: p.name.clone(),
            email: p.email.clone(),
            created_at: Utc::now(),
        };
        inner.records.push(record.clone());
        Ok(record)
    }

    async fn find_all(&self) -> Result<Vec<Record>> {
        Ok(self.inner.read().await.records.clone())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Record>> {
        let inner = self.inner.read().await;
        Ok(inner.records.iter().find(|r| r.email == email).cloned())
    }

    async fn update_name(&self, email: &str, name: &str) -> Result<Record> {
        let mut inner = self.inner.write().await;
        let record = inner
            .records
            .iter_mut()
            .find(|r| r.email == email)
            .ok_or(StoreError::NotFound)?;
        record.name = name.to_string();
        Ok(record.clone())
    }

    async fn delete(&self, email: &str) -> Result<Record> {
        let mut inner = self.inner.write().await;
        let index = inner
            .records
            .iter()
            .position(|r| r.email == email)
            .ok_or(StoreError::NotFound)?;
        Ok(inner.records.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_record(name: &str, email: &str) -> NewRecord {
        NewRecord {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let store = MemoryRecordStore::new();
        let ann = store.create(&new_record("Ann", "ann@x.com")).await.unwrap();
        let bob = store.create(&new_record("Bob", "bob@x.com")).await.unwrap();
        assert!(bob.id > ann.id);

        let all = store.find_all().await.unwrap();
        assert_eq!(all, vec![ann, bob]);
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemoryRecordStore::new();
        store.create(&new_record("Ann", "ann@x.com")).await.unwrap();
        let err = store
            .create(&new_record("Other Ann", "ann@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(ref email) if email == "ann@x.com"));
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let store = MemoryRecordStore::new();
        store.create(&new_record("Ann", "ann@x.com")).await.unwrap();
        assert_eq!(
            store.find_by_email("ann@x.com").await.unwrap().unwrap().name,
            "Ann"
        );
        assert!(store.find_by_email("nobody@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_name_in_place() {
        let store = MemoryRecordStore::new();
        let created = store.create(&new_record("Ann", "ann@x.com")).await.unwrap();
        let updated = store.update_name("ann@x.com", "Annie").await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Annie");
        assert_eq!(updated.created_at, created.created_at);
        assert!(matches!(
            store.update_name("nobody@x.com", "X").await,
            Err(StoreError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryRecordStore::new();
        store.create(&new_record("Ann", "ann@x.com")).await.unwrap();
        let deleted = store.delete("ann@x.com").await.unwrap();
        assert_eq!(deleted.email, "ann@x.com");
        assert!(store.find_all().await.unwrap().is_empty());
        assert!(matches!(
            store.delete("ann@x.com").await,
            Err(StoreError::NotFound)
        ));
    }
}
