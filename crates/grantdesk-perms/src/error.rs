//! Error types for permission reconciliation.

use thiserror::Error;

/// Errors that can occur while reconciling or submitting permissions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermsError {
    /// The permission catalog is empty or was never loaded, so no
    /// permission name can be resolved. Distinct from "no changes".
    #[error("permission catalog unavailable")]
    CatalogUnavailable,

    /// A new user must receive at least one permission.
    #[error("no permissions selected")]
    NoPermissionsSelected,

    /// The backend rejected an update.
    #[error("update rejected: {}", .0.join("; "))]
    UpdateRejected(Vec<String>),

    /// A collaborator (catalog source or delta consumer) failed.
    #[error("backend error: {0}")]
    Backend(String),

    /// Core error.
    #[error("core error: {0}")]
    Core(#[from] grantdesk_core::CoreError),
}

/// Result type for permission operations.
pub type Result<T> = std::result::Result<T, PermsError>;
