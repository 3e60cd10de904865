use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use etag_cache::Fingerprinted;
use records_db::{NewRecord, Record};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;
use ts_rs::TS;

use crate::error::AppError;
use crate::keys::CacheKey;
use crate::response::CachedJson;
use crate::state::AppState;

#[derive(Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct CreateRecordRequest {
    #[ts(optional)]
    name: Option<String>,
    #[ts(optional)]
    email: Option<String>,
}

#[derive(Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct UpdateRecordRequest {
    #[ts(optional)]
    name: Option<String>,
}

/// Empty strings count as missing
fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// POST /records
pub async fn create_record(
    State(state): State<AppState>,
    body: Result<Json<CreateRecordRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Record>), AppError> {
    let Json(body) = body?;
    let (Some(name), Some(email)) = (required(body.name), required(body.email)) else {
        return Err(AppError::Validation("Name and email are required".into()));
    };

    let record = state.records.create(&NewRecord { name, email }).await?;

    state
        .invalidator
        .invalidate(&[CacheKey::Collection.to_string()])
        .await?;

    info!(id = record.id, email = %record.email, "Created record");
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /records
pub async fn list_records(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<CachedJson<Vec<Record>>, AppError> {
    let store = &state.records;
    let current = state
        .cache
        .read_through(&CacheKey::Collection.to_string(), || async move {
            Ok::<_, AppError>(Some(store.find_all().await?))
        })
        .await?
        .ok_or_else(|| AppError::Internal("collection loader returned no value".into()))?;

    Ok(CachedJson::conditional(&headers, current))
}

/// GET /records/{email}
pub async fn get_record(
    State(state): State<AppState>,
    Path(email): Path<String>,
    headers: HeaderMap,
) -> Result<CachedJson<Record>, AppError> {
    let store = &state.records;
    let current = state
        .cache
        .read_through(&CacheKey::Record(&email).to_string(), || async {
            Ok::<_, AppError>(store.find_by_email(&email).await?)
        })
        .await?
        .ok_or_else(|| AppError::NotFound("Record not found".into()))?;

    Ok(CachedJson::conditional(&headers, current))
}

/// PUT /records/{email}
pub async fn update_record(
    State(state): State<AppState>,
    Path(email): Path<String>,
    body: Result<Json<UpdateRecordRequest>, JsonRejection>,
) -> Result<CachedJson<Record>, AppError> {
    let Json(body) = body?;
    let Some(name) = required(body.name) else {
        return Err(AppError::Validation("Name is required".into()));
    };

    let record = state.records.update_name(&email, &name).await?;

    let record_key = CacheKey::Record(&email).to_string();
    let collection_key = CacheKey::Collection.to_string();

    let current = if state.eager_repopulate {
        let (repopulated, dropped) = tokio::join!(
            state.invalidator.repopulate(&record_key, record),
            state.invalidator.invalidate(std::slice::from_ref(&collection_key)),
        );
        dropped?;
        repopulated?
    } else {
        state
            .invalidator
            .invalidate(&[record_key, collection_key])
            .await?;
        Fingerprinted::new(record)?
    };

    info!(email = %email, etag = %current.fingerprint(), "Updated record");
    Ok(CachedJson::fresh(current))
}

/// DELETE /records/{email}
pub async fn delete_record(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Value>, AppError> {
    let record = state.records.delete(&email).await?;

    state
        .invalidator
        .invalidate(&[
            CacheKey::Record(&email).to_string(),
            CacheKey::Collection.to_string(),
        ])
        .await?;

    info!(id = record.id, email = %email, "Deleted record");
    Ok(Json(json!({ "message": "Deleted successfully" })))
}
