//! Canonical permission-name resolution.
//!
//! A UI toggle is a `(module display name, action)` pair. The backend knows
//! permissions by identifier, and the catalog maps canonical names of the
//! form `"<Action> <ModuleKey>"` to identifiers.

use grantdesk_core::{ActionType, ModuleCatalog, PermissionCatalog, PermissionId};

/// Capitalize an action: first character uppercase, the rest lowercase.
///
/// Returns `None` for a blank action.
pub fn capitalize_action(action: &str) -> Option<String> {
    let trimmed = action.trim();
    let mut chars = trimmed.chars();
    let first = chars.next()?;
    let mut out = String::with_capacity(trimmed.len());
    out.extend(first.to_uppercase());
    out.push_str(&chars.as_str().to_lowercase());
    Some(out)
}

/// Resolve the canonical permission name for a module and action.
///
/// The action is case-insensitive. Returns `None` when the module is not in
/// the module catalog or the action is blank. Modules without an explicit
/// key resolve through the fallback key.
pub fn resolve_permission_name(
    modules: &ModuleCatalog,
    module: &str,
    action: &str,
) -> Option<String> {
    let definition = modules.get(module)?;
    let action = capitalize_action(action)?;
    Some(format!("{} {}", action, definition.module_key()))
}

/// Resolve a typed `(module, action)` pair all the way to its identifier.
pub fn resolve_permission_id<'c>(
    modules: &ModuleCatalog,
    catalog: &'c PermissionCatalog,
    module: &str,
    action: ActionType,
) -> Option<&'c PermissionId> {
    let definition = modules.get(module)?;
    catalog.id_for_name(&definition.permission_name(action))
}
