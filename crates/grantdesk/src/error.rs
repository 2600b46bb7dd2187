//! Error types for the console.

use grantdesk_client::ClientError;
use grantdesk_core::CoreError;
use grantdesk_credentials::CredentialError;
use grantdesk_perms::PermsError;
use thiserror::Error;

/// Errors that can occur during console operations.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Core model error.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Permission reconciliation or submission error.
    #[error("permission error: {0}")]
    Permission(#[from] PermsError),

    /// Credential or login error.
    #[error("credential error: {0}")]
    Credential(#[from] CredentialError),

    /// HTTP adapter error.
    #[error("client error: {0}")]
    Client(#[from] ClientError),

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type for console operations.
pub type Result<T> = std::result::Result<T, ConsoleError>;
