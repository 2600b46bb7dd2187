//! Canonical reconciliation scenarios.
//!
//! Each scenario is a fixed input with its expected delta, usable as a
//! table-driven test or as a benchmark input.

use grantdesk_core::{ActionType, PermissionCatalog, PermissionCatalogEntry};
use grantdesk_perms::{GrantSet, IdSet};

use crate::fixtures::ids;

/// A reconciliation case with its expected outcome.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: &'static str,
    pub catalog: PermissionCatalog,
    pub original: IdSet,
    pub working: GrantSet,
    pub role_changed: bool,
    pub expected_added: IdSet,
    pub expected_deleted: IdSet,
}

fn goals_catalog() -> PermissionCatalog {
    PermissionCatalog::new(vec![
        PermissionCatalogEntry::new(10, "View Goals"),
        PermissionCatalogEntry::new(20, "Create Goals"),
        PermissionCatalogEntry::new(30, "View Pillers"),
    ])
}

fn grants(pairs: &[(&str, ActionType)]) -> GrantSet {
    let mut set = GrantSet::new();
    for (module, action) in pairs {
        set.grant(*module, *action);
    }
    set
}

/// All canonical scenarios.
pub fn all_scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "view_goals_resolves",
            catalog: goals_catalog(),
            original: ids(&[]),
            working: grants(&[("Goal Management", ActionType::View)]),
            role_changed: false,
            expected_added: ids(&[10]),
            expected_deleted: ids(&[]),
        },
        Scenario {
            name: "swap_one_grant",
            catalog: goals_catalog(),
            original: ids(&[10, 20]),
            working: grants(&[
                ("Goal Management", ActionType::Create),
                ("Pillar Management", ActionType::View),
            ]),
            role_changed: false,
            expected_added: ids(&[30]),
            expected_deleted: ids(&[10]),
        },
        Scenario {
            name: "unchanged_is_empty",
            catalog: goals_catalog(),
            original: ids(&[10, 20]),
            working: grants(&[
                ("Goal Management", ActionType::View),
                ("Goal Management", ActionType::Create),
            ]),
            role_changed: false,
            expected_added: ids(&[]),
            expected_deleted: ids(&[]),
        },
        Scenario {
            name: "unmatched_pairs_skipped",
            catalog: goals_catalog(),
            original: ids(&[]),
            working: grants(&[
                ("Goal Management", ActionType::Export),
                ("Payroll Management", ActionType::View),
            ]),
            role_changed: false,
            expected_added: ids(&[]),
            expected_deleted: ids(&[]),
        },
        Scenario {
            name: "role_change_replaces",
            catalog: goals_catalog(),
            original: ids(&[10, 20]),
            working: grants(&[
                ("Goal Management", ActionType::View),
                ("Pillar Management", ActionType::View),
            ]),
            role_changed: true,
            expected_added: ids(&[10, 30]),
            expected_deleted: ids(&[10, 20]),
        },
    ]
}
