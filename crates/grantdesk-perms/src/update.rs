//! Requests handed to the delta consumer.

use serde::{Deserialize, Serialize};

use grantdesk_core::{PermissionId, RoleId, UserId};

use crate::delta::PermissionDelta;
use crate::error::{PermsError, Result};
use crate::grant_set::IdSet;

/// Whose permissions an update applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UpdateSubject {
    /// A user's grants under a role.
    #[serde(rename_all = "camelCase")]
    User { user_id: UserId, role_id: RoleId },

    /// A role's default grants.
    #[serde(rename_all = "camelCase")]
    Role { role_id: RoleId },
}

impl UpdateSubject {
    pub fn role_id(&self) -> &RoleId {
        match self {
            UpdateSubject::User { role_id, .. } | UpdateSubject::Role { role_id } => role_id,
        }
    }
}

/// A permission delta addressed to a role or user.
///
/// Empty sides are sent as `null`; identifiers are sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionUpdate {
    #[serde(flatten)]
    pub subject: UpdateSubject,
    pub added: Option<Vec<PermissionId>>,
    pub deleted: Option<Vec<PermissionId>>,
}

impl PermissionUpdate {
    pub fn new(subject: UpdateSubject, delta: &PermissionDelta) -> Self {
        Self {
            subject,
            added: delta.added_or_none(),
            deleted: delta.deleted_or_none(),
        }
    }

    pub fn for_role(role_id: RoleId, delta: &PermissionDelta) -> Self {
        Self::new(UpdateSubject::Role { role_id }, delta)
    }

    pub fn for_user(user_id: UserId, role_id: RoleId, delta: &PermissionDelta) -> Self {
        Self::new(UpdateSubject::User { user_id, role_id }, delta)
    }

    /// True when neither side carries identifiers.
    pub fn is_empty(&self) -> bool {
        self.added.is_none() && self.deleted.is_none()
    }
}

/// Request to create a user with a role and an initial set of grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub user_id: UserId,
    pub role_id: RoleId,
    pub permission_ids: Vec<PermissionId>,
    pub system_id: i64,
}

impl CreateUserRequest {
    /// Fails with [`PermsError::NoPermissionsSelected`] on an empty grant set.
    pub fn new(
        user_id: UserId,
        role_id: RoleId,
        permission_ids: &IdSet,
        system_id: i64,
    ) -> Result<Self> {
        if permission_ids.is_empty() {
            return Err(PermsError::NoPermissionsSelected);
        }
        Ok(Self {
            user_id,
            role_id,
            permission_ids: permission_ids.iter().cloned().collect(),
            system_id,
        })
    }
}
