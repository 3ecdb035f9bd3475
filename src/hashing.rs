//! Content Fingerprints - SHA-256 over Canonical JSON
//!
//! Fingerprints identify entity content independent of key order, so a
//! memoized projection survives a re-fetch that returns the same data.

use std::fmt::Write;

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    Sha256::digest(data).iter().fold(String::with_capacity(64), |mut out, byte| {
        let _ = write!(out, "{byte:02x}");
        out
    })
}

/// Compact JSON with object keys in sorted order.
///
/// Relies on `serde_json::Map` being ordered by key; the `preserve_order`
/// feature must stay off for fingerprints to be stable.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let value: Value = serde_json::to_value(value)?;
    serde_json::to_string(&value)
}

/// Content fingerprint of any serializable entity.
pub fn fingerprint<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    canonical_json(value).map(|canonical| sha256_hex(canonical.as_bytes()))
}

/// Digest of a save request body, tagged with the endpoint it targets.
pub fn payload_digest(kind: &str, payload: &impl Serialize) -> Result<String, serde_json::Error> {
    let canonical = canonical_json(payload)?;
    Ok(sha256_hex(format!("{kind}:{canonical}").as_bytes()))
}
