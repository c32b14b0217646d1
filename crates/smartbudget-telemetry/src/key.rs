#![forbid(unsafe_code)]

//! Duplicate-suppression keys.
//!
//! A key is the triple (level, message, digest of the canonical payload).
//! Keeping the fields apart means `("a:b", "c")` and `("a", "b:c")` can
//! never collide the way a joined string would.

use serde::Serialize;
use serde_json::Value;

use crate::config::UNSERIALIZABLE;
use crate::event::Level;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Composite identity of a report for suppression purposes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub level: Level,
    pub message: String,
    pub data_digest: u64,
}

impl DedupKey {
    /// Key for an already canonical payload.
    #[must_use]
    pub fn new(level: Level, message: &str, canonical: &Value) -> Self {
        Self {
            level,
            message: message.to_owned(),
            data_digest: digest(canonical),
        }
    }
}

/// Convert `data` to its canonical JSON value.
///
/// Object keys come out sorted (`serde_json::Map` is ordered), so two
/// payloads that differ only in field order are equal. A payload that
/// cannot be represented (a map with non-string keys, a failing `Serialize`
/// impl) becomes the string `"[unserializable]"` and the second tuple field
/// is `false`.
pub fn canonical_json<T: Serialize + ?Sized>(data: &T) -> (Value, bool) {
    match serde_json::to_value(data) {
        Ok(value) => (value, true),
        Err(err) => {
            tracing::warn!(
                target: "smartbudget_telemetry::fallback",
                error = %err,
                "payload not serializable, using placeholder"
            );
            (Value::String(UNSERIALIZABLE.to_owned()), false)
        }
    }
}

/// FNV-1a over the compact rendering of a canonical value.
#[must_use]
pub fn digest(canonical: &Value) -> u64 {
    fnv1a64(canonical.to_string().as_bytes())
}

#[must_use]
pub fn fnv1a64(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for &byte in bytes {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}
