//! Error types for the HTTP adapter.

use thiserror::Error;

use grantdesk_credentials::CredentialError;
use grantdesk_perms::PermsError;

/// Errors that can occur while talking to the backend.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure: connect, timeout, TLS.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered 401. The stored access token has been cleared.
    #[error("unauthorized")]
    Unauthorized,

    /// Non-success status without a usable envelope.
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not the expected JSON.
    #[error("invalid response body: {0}")]
    Decode(String),

    /// The envelope reported `succeeded == false`.
    #[error("rejected: {}", .0.join("; "))]
    Rejected(Vec<String>),

    /// The base URL or an endpoint path is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

impl From<ClientError> for PermsError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Rejected(errors) => PermsError::UpdateRejected(errors),
            other => PermsError::Backend(other.to_string()),
        }
    }
}

impl From<ClientError> for CredentialError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Rejected(errors) => CredentialError::LoginRejected(errors),
            other => CredentialError::Backend(other.to_string()),
        }
    }
}
