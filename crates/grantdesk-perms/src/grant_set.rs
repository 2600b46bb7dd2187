//! Working grant sets.
//!
//! A [`GrantSet`] is the editable form of a role's or user's grants: a map
//! from module display name to the actions granted on it. It is independent
//! of any UI widget; a checkbox toggle is a call to [`GrantSet::set`].

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use grantdesk_core::{ActionType, ModuleCatalog, PermissionCatalog, PermissionId};

use crate::error::{PermsError, Result};

/// A set of permission identifiers.
pub type IdSet = BTreeSet<PermissionId>;

/// Grants keyed by module display name.
///
/// Serializes as `{"Goal Management": ["view", "create"]}`. Modules with no
/// granted action are not stored, so two grant sets granting the same pairs
/// are always equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrantSet {
    modules: BTreeMap<String, BTreeSet<ActionType>>,
}

impl GrantSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw UI state: module name to lowercase action strings.
    pub fn from_raw<M, A, I>(raw: I) -> Result<Self>
    where
        I: IntoIterator<Item = (M, Vec<A>)>,
        M: Into<String>,
        A: AsRef<str>,
    {
        let mut set = Self::new();
        for (module, actions) in raw {
            let module = module.into();
            for action in actions {
                let action = action.as_ref().parse::<ActionType>()?;
                set.grant(module.clone(), action);
            }
        }
        Ok(set)
    }

    /// Grant an action. Returns `true` if it was not already granted.
    pub fn grant(&mut self, module: impl Into<String>, action: ActionType) -> bool {
        self.modules.entry(module.into()).or_default().insert(action)
    }

    /// Revoke an action. Returns `true` if it was granted.
    pub fn revoke(&mut self, module: &str, action: ActionType) -> bool {
        let Some(actions) = self.modules.get_mut(module) else {
            return false;
        };
        let removed = actions.remove(&action);
        if actions.is_empty() {
            self.modules.remove(module);
        }
        removed
    }

    /// Apply a checkbox toggle.
    pub fn set(&mut self, module: &str, action: ActionType, checked: bool) {
        if checked {
            self.grant(module, action);
        } else {
            self.revoke(module, action);
        }
    }

    pub fn is_granted(&self, module: &str, action: ActionType) -> bool {
        self.modules
            .get(module)
            .is_some_and(|actions| actions.contains(&action))
    }

    /// Actions granted on a module, in display order.
    pub fn actions(&self, module: &str) -> impl Iterator<Item = ActionType> + '_ {
        self.modules.get(module).into_iter().flatten().copied()
    }

    /// Module names with at least one granted action.
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    /// Every granted `(module, action)` pair.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ActionType)> {
        self.modules
            .iter()
            .flat_map(|(module, actions)| actions.iter().map(move |a| (module.as_str(), *a)))
    }

    /// Number of granted pairs.
    pub fn len(&self) -> usize {
        self.modules.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Build the working set that corresponds to a set of assigned ids.
    ///
    /// Every offered `(module, action)` pair of the module catalog is
    /// resolved; the pair is granted when its catalog id is assigned.
    /// Assigned ids that match no module pair are not representable and are
    /// dropped.
    pub fn from_assigned_ids(
        assigned: &IdSet,
        modules: &ModuleCatalog,
        catalog: &PermissionCatalog,
    ) -> Result<Self> {
        if catalog.is_empty() {
            return Err(PermsError::CatalogUnavailable);
        }

        let mut set = Self::new();
        for module in modules.iter() {
            for &action in module.actions() {
                let granted = catalog
                    .id_for_name(&module.permission_name(action))
                    .is_some_and(|id| assigned.contains(id));
                if granted {
                    set.grant(module.display_name(), action);
                }
            }
        }
        Ok(set)
    }

    /// Build a working set from permission codes such as `GOALS_VIEW`.
    ///
    /// Codes that decode to no module action are skipped.
    pub fn from_codes<'a>(
        codes: impl IntoIterator<Item = &'a str>,
        modules: &ModuleCatalog,
    ) -> Self {
        let mut set = Self::new();
        for code in codes {
            if let Some((module, action)) = modules.decode_code(code) {
                set.grant(module.display_name(), action);
            }
        }
        set
    }

    /// Permission codes for every granted pair of a recognized module.
    pub fn permission_codes(&self, modules: &ModuleCatalog) -> BTreeSet<String> {
        self.iter()
            .filter_map(|(module, action)| {
                modules
                    .get(module)
                    .map(|definition| definition.permission_code(action))
            })
            .collect()
    }
}
