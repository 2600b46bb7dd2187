//! Encrypted login.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use grantdesk_core::{Envelope, UserId};

use crate::cache::PublicKeyCache;
use crate::error::{CredentialError, Result};
use crate::source::PublicKeySource;

/// Username and plaintext password as entered.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both fields must be non-blank.
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(CredentialError::EmptyInput("username"));
        }
        if self.password.is_empty() {
            return Err(CredentialError::EmptyInput("password"));
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Login payload; `password` is base64 RSA ciphertext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Tokens issued on a successful login.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: UserId,
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("access_token", &"<redacted>")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// A backend that exchanges encrypted credentials for a session.
#[async_trait]
pub trait LoginEndpoint: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<Envelope<Session>>;
}

/// Validate, encrypt the password, and log in.
pub async fn login<S, E>(
    keys: &PublicKeyCache<S>,
    endpoint: &E,
    credentials: &Credentials,
) -> Result<Session>
where
    S: PublicKeySource + 'static,
    E: LoginEndpoint + ?Sized,
{
    credentials.validate()?;

    let request = LoginRequest {
        username: credentials.username.clone(),
        password: keys.encrypt_password(&credentials.password).await?,
    };

    match endpoint.login(&request).await?.into_result() {
        Ok(Some(session)) => {
            info!(user = %session.user_id, "login succeeded");
            Ok(session)
        }
        Ok(None) => Err(CredentialError::Backend(
            "login succeeded without a session".into(),
        )),
        Err(errors) => {
            warn!(username = %credentials.username, "login rejected");
            Err(CredentialError::LoginRejected(errors))
        }
    }
}
