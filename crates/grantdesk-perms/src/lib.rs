//! # Grantdesk Permissions
//!
//! Permission reconciliation: turning edited grants into the add/delete
//! identifier sets the backend applies.
//!
//! ## Overview
//!
//! Grants are edited as a [`GrantSet`], a map from module display name to
//! granted actions. Saving resolves every granted pair to a canonical
//! permission name (`"<Action> <ModuleKey>"`), looks the name up in the
//! [`PermissionCatalog`](grantdesk_core::PermissionCatalog), and diffs the
//! resulting identifiers against the original snapshot.
//!
//! ## Key Concepts
//!
//! - **GrantSet**: The working, editable grants
//! - **PermissionDelta**: `added` / `deleted` identifier sets
//! - **Role change**: Reassigning a user's role replaces their grants
//!   wholesale instead of diffing
//! - **Catalog unavailable**: An empty catalog is an error, never an empty delta
//!
//! ## Usage
//!
//! ```rust
//! use grantdesk_core::{ActionType, ModuleCatalog, PermissionCatalog, PermissionCatalogEntry};
//! use grantdesk_perms::{compute_delta, GrantSet, IdSet};
//!
//! let catalog = PermissionCatalog::new(vec![PermissionCatalogEntry::new(10, "View Goals")]);
//!
//! let mut working = GrantSet::new();
//! working.set("Goal Management", ActionType::View, true);
//!
//! let delta = compute_delta(&IdSet::new(), &working, ModuleCatalog::standard(), &catalog).unwrap();
//! assert_eq!(delta.added.len(), 1);
//! ```

pub mod delta;
pub mod error;
pub mod grant_set;
pub mod resolve;
pub mod role;
pub mod source;
pub mod update;

pub use delta::{
    compute_code_delta, compute_delta, merge_role_change, resolve_working_ids, DeltaKind,
    PermissionDelta,
};
pub use error::{PermsError, Result};
pub use grant_set::{GrantSet, IdSet};
pub use resolve::{capitalize_action, resolve_permission_id, resolve_permission_name};
pub use role::{initial_working_ids, RoleSelection};
pub use source::{CatalogSource, DeltaConsumer};
pub use update::{CreateUserRequest, PermissionUpdate, UpdateSubject};
