//! Permission deltas.
//!
//! The backend applies permission changes as a pair of identifier sets:
//! what to add and what to delete. This module computes that pair from an
//! original snapshot and a working [`GrantSet`].

use std::collections::BTreeSet;

use tracing::{debug, trace};

use grantdesk_core::{ModuleCatalog, PermissionCatalog, PermissionId};

use crate::error::{PermsError, Result};
use crate::grant_set::{GrantSet, IdSet};

/// How a delta relates to its original snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeltaKind {
    /// Minimal diff. `added` and `deleted` are disjoint,
    /// `added ∩ original == ∅` and `deleted ⊆ original`.
    #[default]
    Incremental,

    /// Wholesale replacement after a role change: `deleted` is the entire
    /// original set and `added` the entire working set. The two may share
    /// identifiers; the consumer deletes before it adds.
    Replacement,
}

/// The change needed to turn an original grant snapshot into a working one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionDelta {
    pub added: IdSet,
    pub deleted: IdSet,
    pub kind: DeltaKind,
}

impl PermissionDelta {
    /// Minimal diff between two identifier sets.
    pub fn between(original: &IdSet, working: &IdSet) -> Self {
        Self {
            added: working.difference(original).cloned().collect(),
            deleted: original.difference(working).cloned().collect(),
            kind: DeltaKind::Incremental,
        }
    }

    /// Delete everything in `original`, add everything in `working`.
    pub fn replacement(original: &IdSet, working: &IdSet) -> Self {
        Self {
            added: working.clone(),
            deleted: original.clone(),
            kind: DeltaKind::Replacement,
        }
    }

    /// True when there is nothing to add or delete.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty()
    }

    /// Apply to an original snapshot: `(original − deleted) ∪ added`.
    pub fn apply(&self, original: &IdSet) -> IdSet {
        original
            .difference(&self.deleted)
            .chain(self.added.iter())
            .cloned()
            .collect()
    }

    /// Added identifiers in wire form: sorted, or `None` when empty.
    pub fn added_or_none(&self) -> Option<Vec<PermissionId>> {
        non_empty(&self.added)
    }

    /// Deleted identifiers in wire form: sorted, or `None` when empty.
    pub fn deleted_or_none(&self) -> Option<Vec<PermissionId>> {
        non_empty(&self.deleted)
    }
}

fn non_empty(ids: &IdSet) -> Option<Vec<PermissionId>> {
    if ids.is_empty() {
        None
    } else {
        Some(ids.iter().cloned().collect())
    }
}

/// Resolve every granted pair of a working set to its catalog identifier.
///
/// Pairs whose module is unknown or whose canonical name has no catalog
/// entry are skipped. An empty catalog is an error, not an empty result.
pub fn resolve_working_ids(
    working: &GrantSet,
    modules: &ModuleCatalog,
    catalog: &PermissionCatalog,
) -> Result<IdSet> {
    if catalog.is_empty() {
        return Err(PermsError::CatalogUnavailable);
    }

    let mut ids = BTreeSet::new();
    for (module, action) in working.iter() {
        let Some(definition) = modules.get(module) else {
            debug!(module, %action, "skipping grant on unknown module");
            continue;
        };
        let name = definition.permission_name(action);
        match catalog.id_for_name(&name) {
            Some(id) => {
                trace!(name = %name, id = %id, "resolved permission");
                ids.insert(id.clone());
            }
            None => debug!(name = %name, "no catalog entry for permission, skipping"),
        }
    }
    Ok(ids)
}

/// Compute the minimal delta from `original` to the working grant set.
///
/// Calling with a working set that resolves to `original` yields an empty
/// delta. Fails with [`PermsError::CatalogUnavailable`] when the catalog is
/// empty, so "not ready" is never mistaken for "no changes".
pub fn compute_delta(
    original: &IdSet,
    working: &GrantSet,
    modules: &ModuleCatalog,
    catalog: &PermissionCatalog,
) -> Result<PermissionDelta> {
    let working_ids = resolve_working_ids(working, modules, catalog)?;
    let delta = PermissionDelta::between(original, &working_ids);
    debug!(
        original = original.len(),
        working = working_ids.len(),
        added = delta.added.len(),
        deleted = delta.deleted.len(),
        "computed permission delta"
    );
    Ok(delta)
}

/// Delta for a user edit that may have reassigned the user's role.
///
/// A role change resets permissions wholesale: every original id is deleted
/// and every working id is added. Without a role change this is the minimal
/// diff.
pub fn merge_role_change(original: &IdSet, role_changed: bool, working: &IdSet) -> PermissionDelta {
    if role_changed {
        PermissionDelta::replacement(original, working)
    } else {
        PermissionDelta::between(original, working)
    }
}

/// Diff two permission-code sets and map the result to identifiers.
///
/// Codes without a catalog entry are skipped.
pub fn compute_code_delta(
    original_codes: &BTreeSet<String>,
    working_codes: &BTreeSet<String>,
    catalog: &PermissionCatalog,
) -> Result<PermissionDelta> {
    if catalog.is_empty() {
        return Err(PermsError::CatalogUnavailable);
    }

    let to_ids = |codes: std::collections::btree_set::Difference<'_, String>| -> IdSet {
        codes
            .filter_map(|code| {
                let id = catalog.id_for_code(code);
                if id.is_none() {
                    debug!(code = %code, "no catalog entry for permission code, skipping");
                }
                id.cloned()
            })
            .collect()
    };

    Ok(PermissionDelta {
        added: to_ids(working_codes.difference(original_codes)),
        deleted: to_ids(original_codes.difference(working_codes)),
        kind: DeltaKind::Incremental,
    })
}
