use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;

/// Record row returned from SELECT queries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Record {
    #[ts(type = "number")]
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Parameters for inserting a record
#[derive(Debug, Clone)]
pub struct NewRecord {
    pub name: String,
    pub email: String,
}
