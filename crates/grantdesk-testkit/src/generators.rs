//! Proptest generators for property-based testing.

use proptest::prelude::*;

use grantdesk_core::{ActionType, ModuleCatalog, PermissionId};
use grantdesk_perms::{GrantSet, IdSet};

/// Generate an ActionType.
pub fn action_type() -> impl Strategy<Value = ActionType> {
    prop::sample::select(ActionType::ALL.to_vec())
}

/// Generate a set of permission identifiers drawn from `0..max_id`.
pub fn id_set(max_id: i64, max_len: usize) -> impl Strategy<Value = IdSet> {
    prop::collection::btree_set(0..max_id, 0..=max_len)
        .prop_map(|raw| raw.into_iter().map(PermissionId::from).collect())
}

/// Generate a grant set over the standard modules.
pub fn grant_set(max_pairs: usize) -> impl Strategy<Value = GrantSet> {
    let modules: Vec<String> = ModuleCatalog::standard()
        .iter()
        .map(|m| m.display_name().to_string())
        .collect();

    prop::collection::vec((prop::sample::select(modules), action_type()), 0..=max_pairs).prop_map(
        |pairs| {
            let mut set = GrantSet::new();
            for (module, action) in pairs {
                set.grant(module, action);
            }
            set
        },
    )
}

/// Generate a grant set that may also name modules the catalog does not know.
pub fn grant_set_with_unknown_modules(max_pairs: usize) -> impl Strategy<Value = GrantSet> {
    (grant_set(max_pairs), prop::collection::vec(("[A-Z][a-z]{2,8} Management", action_type()), 0..4))
        .prop_map(|(mut set, extra)| {
            for (module, action) in extra {
                set.grant(module, action);
            }
            set
        })
}
