//! Error types for the grantdesk core.

use thiserror::Error;

/// Errors raised while interpreting reference data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("unknown action type: {0:?}")]
    UnknownAction(String),

    #[error("unknown module: {0:?}")]
    UnknownModule(String),

    #[error("module {module:?} does not offer action {action}")]
    ActionNotOffered { module: String, action: String },

    #[error("duplicate module in catalog: {0:?}")]
    DuplicateModule(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
