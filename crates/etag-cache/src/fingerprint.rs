//! Content fingerprints
//!
//! A fingerprint is the hex SHA-256 digest of a value's canonical JSON form.
//! Object keys are sorted before hashing, so two values that differ only in
//! field order share a fingerprint.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

/// Compute the fingerprint of any serializable value
pub fn fingerprint<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let bytes = canonical_bytes(value)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

/// Serialize a value to compact JSON with object keys in sorted order
pub fn canonical_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let value = canonicalize(serde_json::to_value(value)?);
    Ok(serde_json::to_vec(&value)?)
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let sorted: Map<String, Value> = entries
                .into_iter()
                .map(|(k, v)| (k, canonicalize(v)))
                .collect();
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

/// A value paired with the fingerprint computed from it.
///
/// `new` is the only way to build one from a fresh value, which keeps the
/// fingerprint tied to the exact value it describes. Entries read back from
/// the cache are deserialized whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fingerprinted<T> {
    #[serde(rename = "data")]
    value: T,
    #[serde(rename = "etag")]
    fingerprint: String,
}

impl<T: Serialize> Fingerprinted<T> {
    pub fn new(value: T) -> Result<Self> {
        let fingerprint = fingerprint(&value)?;
        Ok(Self { value, fingerprint })
    }
}

impl<T> Fingerprinted<T> {
    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn into_parts(self) -> (T, String) {
        (self.value, self.fingerprint)
    }

    /// Pair a value with an arbitrary fingerprint, for fixtures
    #[cfg(test)]
    pub(crate) fn from_parts(value: T, fingerprint: impl Into<String>) -> Self {
        Self {
            value,
            fingerprint: fingerprint.into(),
        }
    }
}
