//! Error types for credential handling.

use thiserror::Error;

/// Errors that can occur while encrypting credentials or logging in.
///
/// `Clone` because a single failed key fetch is observed by every caller
/// that was waiting on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// A required input was blank.
    #[error("{0} cannot be empty")]
    EmptyInput(&'static str),

    /// No usable public key could be obtained.
    #[error("public key unavailable: {0}")]
    KeyUnavailable(String),

    /// The cryptographic step produced no ciphertext.
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    /// The backend refused the credentials.
    #[error("login rejected: {}", .0.join("; "))]
    LoginRejected(Vec<String>),

    /// A collaborator failed for a reason other than the above.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Result type for credential operations.
pub type Result<T> = std::result::Result<T, CredentialError>;
