//! Where the public key comes from.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Payload of the public key endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicKeyResponse {
    #[serde(default)]
    pub public_key: Option<String>,
}

impl PublicKeyResponse {
    pub fn new(public_key: impl Into<String>) -> Self {
        Self {
            public_key: Some(public_key.into()),
        }
    }
}

/// A backend that publishes the RSA key used to encrypt passwords.
#[async_trait]
pub trait PublicKeySource: Send + Sync {
    async fn fetch_public_key(&self) -> Result<PublicKeyResponse>;
}
