//! Collaborator traits: where catalogs come from and where deltas go.
//!
//! Implementations talk to the backend (see `grantdesk-client`) or keep
//! everything in memory for tests (see `grantdesk-testkit`).

use async_trait::async_trait;

use grantdesk_core::{PermissionCatalogEntry, RoleId, UserId};

use crate::error::Result;
use crate::grant_set::IdSet;
use crate::update::{CreateUserRequest, PermissionUpdate};

/// Read-only source of reference and assignment data.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the full permission catalog.
    async fn fetch_catalog(&self) -> Result<Vec<PermissionCatalogEntry>>;

    /// Identifiers currently granted to a role by default.
    async fn fetch_role_permissions(&self, role_id: &RoleId) -> Result<IdSet>;

    /// Identifiers currently granted to a user under a role.
    async fn fetch_user_permissions(&self, user_id: &UserId, role_id: &RoleId) -> Result<IdSet>;
}

/// Applies permission changes authoritatively.
///
/// Implementations map a rejected reply to
/// [`PermsError::UpdateRejected`](crate::PermsError::UpdateRejected).
#[async_trait]
pub trait DeltaConsumer: Send + Sync {
    /// Apply a delta to a role or user.
    async fn submit_update(&self, update: &PermissionUpdate) -> Result<()>;

    /// Create a user with an initial role and grant set.
    async fn create_user(&self, request: &CreateUserRequest) -> Result<()>;
}
