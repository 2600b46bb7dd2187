//! Configuration for the public-key cache.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for [`PublicKeyCache`](crate::PublicKeyCache).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KeyCacheConfig {
    /// Upper bound on a single key fetch. On expiry every waiting caller
    /// gets `KeyUnavailable` and the cache returns to empty.
    #[serde(rename = "fetchTimeoutMs", with = "duration_ms")]
    pub fetch_timeout: Duration,
}

impl Default for KeyCacheConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(10),
        }
    }
}

/// Serialize a [`Duration`] as integer milliseconds.
pub mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
