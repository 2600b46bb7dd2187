//! Console configuration.

use serde::{Deserialize, Serialize};

use grantdesk_credentials::KeyCacheConfig;

use crate::error::{ConsoleError, Result};

/// Configuration for [`Console`](crate::Console).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConsoleConfig {
    /// Public key cache settings.
    pub key_cache: KeyCacheConfig,
    /// System the console creates users in.
    pub system_id: i64,
    /// Do not submit role edits that change nothing.
    pub skip_empty_updates: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            key_cache: KeyCacheConfig::default(),
            system_id: 2,
            skip_empty_updates: true,
        }
    }
}

impl ConsoleConfig {
    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ConsoleError::Config(e.to_string()))
    }
}
