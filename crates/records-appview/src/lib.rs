//! Records REST API
//!
//! Reads go through the etag cache and honor `If-None-Match`; writes go to
//! the record store and then invalidate the affected cache keys.

pub mod config;
pub mod error;
pub mod keys;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use config::Config;
pub use error::AppError;
pub use server::{cors_layer, create_router, start_server};
pub use state::AppState;
