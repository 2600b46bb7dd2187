//! # Grantdesk Core
//!
//! Pure data model for the grantdesk admin console: permission identifiers,
//! the permission catalog fetched from the backend, and the static module
//! catalog that maps display modules to internal module keys.
//!
//! This crate contains no I/O. Everything here is reference data or a
//! lookup over reference data.
//!
//! ## Key Types
//!
//! - [`PermissionId`], [`RoleId`], [`UserId`] - Opaque backend identifiers
//! - [`Envelope`] - The backend's `{succeeded, errors, data}` reply
//! - [`PermissionCatalogEntry`] - One `{id, englishName, code, description}` row
//! - [`PermissionCatalog`] - Read-only lookup table indexed by name and code
//! - [`ActionType`] - The fixed set of actions a module can offer
//! - [`ModuleCatalog`] - Display module name to module key mapping

pub mod action;
pub mod catalog;
pub mod envelope;
pub mod error;
pub mod module;
pub mod types;

pub use action::ActionType;
pub use catalog::{PermissionCatalog, PermissionCatalogEntry};
pub use envelope::{Ack, Envelope};
pub use error::{CoreError, Result};
pub use module::{fallback_module_key, ModuleCatalog, ModuleDefinition};
pub use types::{PermissionId, RoleId, UserId};
