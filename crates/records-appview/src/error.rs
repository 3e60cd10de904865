use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use etag_cache::CacheError;
use records_db::StoreError;
use serde_json::json;

/// Application error type that converts to HTTP responses
#[derive(Debug)]
pub enum AppError {
    /// Missing or malformed request fields
    Validation(String),
    NotFound(String),
    Conflict(String),
    /// The record store or cache store could not be reached
    StoreUnavailable(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::StoreUnavailable(msg) => {
                tracing::error!(error = %msg, "Store unavailable");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".into())
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".into())
            }
        };

        (status, axum::Json(json!({ "message": message }))).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Conflict(_) => AppError::Conflict("Email already exists".into()),
            StoreError::NotFound => AppError::NotFound("Record not found".into()),
            StoreError::Unavailable(msg) => AppError::StoreUnavailable(msg),
            StoreError::Database(err) => AppError::Internal(err.to_string()),
        }
    }
}

impl From<CacheError> for AppError {
    fn from(e: CacheError) -> Self {
        match e {
            CacheError::Unavailable(msg) => AppError::StoreUnavailable(format!("cache: {msg}")),
            CacheError::Serialization(err) => AppError::Internal(err.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}
