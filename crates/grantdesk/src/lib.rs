//! # Grantdesk
//!
//! Permission administration for a role-based backend.
//!
//! ## Overview
//!
//! Grantdesk turns edited permission grants into the minimal add/delete
//! identifier sets the backend applies, and encrypts passwords with the
//! backend's RSA public key before they leave the process.
//!
//! ## Key Concepts
//!
//! - **Module catalog**: Static map from module display name to the key
//!   used in permission names (`"Goal Management"` → `"Goals"`)
//! - **Permission catalog**: Backend reference data mapping
//!   `"<Action> <ModuleKey>"` names to identifiers
//! - **GrantSet**: The editable grants of a role or user
//! - **PermissionDelta**: What to add and delete
//! - **Public key cache**: Fetched once, shared between concurrent callers
//!
//! ## Usage
//!
//! ```rust,ignore
//! use grantdesk::{ActionType, ClientConfig, Console, ConsoleConfig, RoleId};
//!
//! async fn example() -> grantdesk::Result<()> {
//!     let console = Console::connect(ClientConfig::new("https://host/api"), ConsoleConfig::default())?;
//!
//!     let role = RoleId::from(4);
//!     let mut snapshot = console.load_role_grants(&role).await?;
//!     snapshot.working.set("Goal Management", ActionType::Export, true);
//!
//!     console
//!         .save_role_permissions(&role, &snapshot.original, &snapshot.working)
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod console;
pub mod error;

pub use config::ConsoleConfig;
pub use console::{Backend, Console, GrantSnapshot, SaveOutcome};
pub use error::{ConsoleError, Result};

// Re-export component crates
pub use grantdesk_client::{ClientConfig, ClientError, Endpoints, HttpBackend};
pub use grantdesk_core::{
    ActionType, ModuleCatalog, ModuleDefinition, PermissionCatalog, PermissionCatalogEntry,
    PermissionId, RoleId, UserId,
};
pub use grantdesk_credentials::{
    CredentialError, Credentials, KeyCacheConfig, KeyState, PublicKeyMaterial, Session,
};
pub use grantdesk_perms::{
    DeltaKind, GrantSet, IdSet, PermissionDelta, PermissionUpdate, PermsError, RoleSelection,
    UpdateSubject,
};
