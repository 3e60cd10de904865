//! Error types for the etag cache

use std::fmt;

#[derive(Debug)]
pub enum CacheError {
    /// The cache store could not be reached
    Unavailable(String),
    /// A value could not be serialized for fingerprinting or storage
    Serialization(serde_json::Error),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::Unavailable(msg) => write!(f, "Cache store unavailable: {}", msg),
            CacheError::Serialization(err) => write!(f, "Serialization error: {}", err),
        }
    }
}

impl std::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CacheError::Serialization(err) => Some(err),
            CacheError::Unavailable(_) => None,
        }
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::Serialization(err)
    }
}

pub type Result<T> = std::result::Result<T, CacheError>;
