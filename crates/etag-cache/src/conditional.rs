//! Conditional response policy

use crate::fingerprint::Fingerprinted;

/// How to answer a conditional read
#[derive(Debug, Clone, PartialEq)]
pub enum Decision<T> {
    /// The client's copy is current; answer without a body
    NotModified { fingerprint: String },
    /// Send the full value with its fingerprint
    Send(Fingerprinted<T>),
}

/// Compare the client's `If-None-Match` value against the current fingerprint.
///
/// Matching is exact, case-sensitive string equality.
pub fn decide<T>(if_none_match: Option<&str>, current: Fingerprinted<T>) -> Decision<T> {
    match if_none_match {
        Some(client) if client == current.fingerprint() => {
            let (_, fingerprint) = current.into_parts();
            Decision::NotModified { fingerprint }
        }
        _ => Decision::Send(current),
    }
}
