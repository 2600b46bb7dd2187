//! Role (re)assignment of a user.

use grantdesk_core::RoleId;

use crate::grant_set::IdSet;

/// The role a user had when the editor opened, and the one now selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSelection {
    /// Role the user held when the edit started, if any.
    pub initial: Option<RoleId>,
    /// Role currently selected in the editor.
    pub selected: RoleId,
}

impl RoleSelection {
    pub fn new(initial: Option<RoleId>, selected: RoleId) -> Self {
        Self { initial, selected }
    }

    /// Keep the user's current role.
    pub fn unchanged(role: RoleId) -> Self {
        Self {
            initial: Some(role.clone()),
            selected: role,
        }
    }

    /// A user with no initial role always counts as changed.
    pub fn changed(&self) -> bool {
        self.initial.as_ref() != Some(&self.selected)
    }
}

/// Identifiers the editor starts from for a user.
///
/// Keeping the same role shows the user's own grants, unless they have
/// none; otherwise the selected role's defaults are shown.
pub fn initial_working_ids(
    selection: &RoleSelection,
    user_ids: &IdSet,
    role_default_ids: &IdSet,
) -> IdSet {
    if !selection.changed() && !user_ids.is_empty() {
        user_ids.clone()
    } else {
        role_default_ids.clone()
    }
}
