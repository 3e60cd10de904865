//! Cache keys for the records collection
//!
//! Exactly two key shapes exist: the whole collection, and one record by email.

use std::fmt;

pub const COLLECTION_KEY: &str = "records";
pub const RECORD_KEY_PREFIX: &str = "record:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheKey<'a> {
    Collection,
    Record(&'a str),
}

impl fmt::Display for CacheKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Collection => f.write_str(COLLECTION_KEY),
            CacheKey::Record(email) => write!(f, "{RECORD_KEY_PREFIX}{email}"),
        }
    }
}
