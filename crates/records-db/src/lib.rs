//! Record store for the records service
//!
//! The `records` collection is keyed externally by a unique email. Stores
//! report conflicts and missing records as distinct [`StoreError`] variants.

pub mod error;
pub mod memory;
pub mod migrate;
pub mod records;
pub mod store;
pub mod types;

pub use error::StoreError;
pub use memory::MemoryRecordStore;
pub use records::PgRecordStore;
pub use sqlx::postgres::PgPool;
pub use store::{RecordStore, SharedRecordStore};
pub use types::*;
