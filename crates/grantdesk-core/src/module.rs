//! Module catalog: display module name to internal module key.
//!
//! Canonical permission names are built as `"<Action> <ModuleKey>"`, where
//! the module key is an internal short name that does not always match the
//! display name (`"Pillar Management"` is keyed `"Pillers"`). The mapping
//! lives here, once, and every resolution path reads it.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::action::ActionType;
use crate::error::{CoreError, Result};

/// Trailing qualifier stripped from display names that have no explicit key.
const DISPLAY_QUALIFIER: &str = " Management";

/// Derive a module key from a display name that has no explicit mapping.
///
/// Strips a trailing `" Management"`; names without it are returned as-is.
pub fn fallback_module_key(display_name: &str) -> &str {
    display_name
        .strip_suffix(DISPLAY_QUALIFIER)
        .unwrap_or(display_name)
}

/// A single entry of the module catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDefinition {
    display_name: String,
    module_key: Option<String>,
    code_prefix: String,
    actions: Vec<ActionType>,
}

impl ModuleDefinition {
    /// Create a module that relies on the fallback key and offers every action.
    pub fn new(display_name: impl Into<String>) -> Self {
        let display_name = display_name.into();
        let code_prefix = code_prefix_for(fallback_module_key(&display_name));
        Self {
            display_name,
            module_key: None,
            code_prefix,
            actions: ActionType::ALL.to_vec(),
        }
    }

    /// Set an explicit module key. Also re-derives the code prefix.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.code_prefix = code_prefix_for(&key);
        self.module_key = Some(key);
        self
    }

    /// Override the permission-code prefix.
    pub fn with_code_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.code_prefix = prefix.into();
        self
    }

    /// Restrict the actions this module offers.
    pub fn with_actions(mut self, actions: impl IntoIterator<Item = ActionType>) -> Self {
        self.actions = actions.into_iter().collect();
        self
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// The explicit key, if one was configured.
    pub fn explicit_key(&self) -> Option<&str> {
        self.module_key.as_deref()
    }

    /// The module key used to build canonical permission names.
    pub fn module_key(&self) -> &str {
        match &self.module_key {
            Some(key) => key,
            None => fallback_module_key(&self.display_name),
        }
    }

    pub fn code_prefix(&self) -> &str {
        &self.code_prefix
    }

    pub fn actions(&self) -> &[ActionType] {
        &self.actions
    }

    pub fn offers(&self, action: ActionType) -> bool {
        self.actions.contains(&action)
    }

    /// Canonical permission name for an action on this module.
    pub fn permission_name(&self, action: ActionType) -> String {
        format!("{} {}", action.display_name(), self.module_key())
    }

    /// Permission code for an action on this module, e.g. `GOALS_VIEW`.
    pub fn permission_code(&self, action: ActionType) -> String {
        format!("{}_{}", self.code_prefix, action.code_suffix())
    }

    /// Parse an action out of a permission code carrying this module's prefix.
    pub fn action_for_code(&self, code: &str) -> Option<ActionType> {
        let suffix = code
            .strip_prefix(self.code_prefix.as_str())?
            .strip_prefix('_')?;
        self.actions
            .iter()
            .copied()
            .find(|a| a.code_suffix() == suffix)
    }
}

fn code_prefix_for(key: &str) -> String {
    key.trim().to_ascii_uppercase().replace(' ', "_")
}

/// Ordered, immutable mapping of display modules.
#[derive(Debug, Clone, Default)]
pub struct ModuleCatalog {
    modules: Vec<ModuleDefinition>,
    by_name: HashMap<String, usize>,
}

impl ModuleCatalog {
    /// Build a catalog. Display names must be unique.
    pub fn new(modules: impl IntoIterator<Item = ModuleDefinition>) -> Result<Self> {
        let modules: Vec<ModuleDefinition> = modules.into_iter().collect();
        let mut by_name = HashMap::with_capacity(modules.len());
        for (idx, module) in modules.iter().enumerate() {
            if by_name.insert(module.display_name.clone(), idx).is_some() {
                return Err(CoreError::DuplicateModule(module.display_name.clone()));
            }
        }
        Ok(Self { modules, by_name })
    }

    /// The modules managed by the console.
    pub fn standard() -> &'static ModuleCatalog {
        static STANDARD: OnceLock<ModuleCatalog> = OnceLock::new();
        STANDARD.get_or_init(|| {
            let explicit = STANDARD_KEYED
                .iter()
                .map(|(name, key)| ModuleDefinition::new(*name).with_key(*key));
            let fallback = STANDARD_FALLBACK.iter().map(|name| ModuleDefinition::new(*name));
            let modules: Vec<ModuleDefinition> = explicit.chain(fallback).collect();
            let by_name = modules
                .iter()
                .enumerate()
                .map(|(idx, m)| (m.display_name.clone(), idx))
                .collect();
            ModuleCatalog { modules, by_name }
        })
    }

    pub fn get(&self, display_name: &str) -> Option<&ModuleDefinition> {
        self.by_name.get(display_name).map(|&idx| &self.modules[idx])
    }

    /// Look up a module, failing with [`CoreError::UnknownModule`].
    pub fn require(&self, display_name: &str) -> Result<&ModuleDefinition> {
        self.get(display_name)
            .ok_or_else(|| CoreError::UnknownModule(display_name.to_string()))
    }

    pub fn contains(&self, display_name: &str) -> bool {
        self.by_name.contains_key(display_name)
    }

    /// Module key for a recognized display name.
    pub fn module_key(&self, display_name: &str) -> Option<Cow<'_, str>> {
        self.get(display_name).map(|m| Cow::Borrowed(m.module_key()))
    }

    /// Find the module and action a permission code refers to.
    pub fn decode_code(&self, code: &str) -> Option<(&ModuleDefinition, ActionType)> {
        self.modules
            .iter()
            .find_map(|m| m.action_for_code(code).map(|a| (m, a)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModuleDefinition> {
        self.modules.iter()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

/// Display names with an explicit key.
const STANDARD_KEYED: &[(&str, &str)] = &[
    ("Strategy Management", "Strategy"),
    ("Pillar Management", "Pillers"),
    ("Perspective Management", "Perspective"),
    ("Goal Management", "Goals"),
    ("Initiative Management", "Initiatives"),
    ("Project Management", "Projects"),
    ("Milestone Management", "Milestones"),
    ("Deliverable Management", "Deliverables"),
    ("Budget Management", "Budget"),
    ("Benefit Management", "Benefit"),
    ("Benefit KPI Management", "Benefit KPI"),
    ("Benefit Report Frequency Management", "Benefit Report"),
    ("Concern Item Management", "Concern"),
    ("Conversation Management", "Conversations"),
    ("KPI Management", "KPI"),
    ("Indicator Management", "Indicator"),
    ("Variable Management", "Variable"),
];

/// Display names keyed by [`fallback_module_key`].
const STANDARD_FALLBACK: &[&str] = &[
    "Committee Management",
    "Document Management",
    "Meeting Management",
    "Decision Management",
    "Member Management",
    "Voting Management",
    "Task Management",
    "Calendar Management",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_strips_trailing_qualifier() {
        assert_eq!(fallback_module_key("Meeting Management"), "Meeting");
        assert_eq!(fallback_module_key("Reports"), "Reports");
        assert_eq!(fallback_module_key("Management Reports"), "Management Reports");
    }

    #[test]
    fn test_standard_explicit_keys() {
        let catalog = ModuleCatalog::standard();
        assert_eq!(catalog.module_key("Pillar Management").unwrap(), "Pillers");
        assert_eq!(catalog.module_key("Goal Management").unwrap(), "Goals");
        assert_eq!(
            catalog.module_key("Benefit Report Frequency Management").unwrap(),
            "Benefit Report"
        );
        assert_eq!(catalog.module_key("Concern Item Management").unwrap(), "Concern");
    }

    #[test]
    fn test_standard_fallback_keys() {
        let catalog = ModuleCatalog::standard();
        let meeting = catalog.get("Meeting Management").unwrap();
        assert_eq!(meeting.explicit_key(), None);
        assert_eq!(meeting.module_key(), "Meeting");
        assert_eq!(meeting.permission_code(ActionType::View), "MEETING_VIEW");
    }

    #[test]
    fn test_unknown_module() {
        let catalog = ModuleCatalog::standard();
        assert!(catalog.get("Payroll Management").is_none());
        assert!(matches!(
            catalog.require("Payroll Management"),
            Err(CoreError::UnknownModule(_))
        ));
    }

    #[test]
    fn test_permission_name_and_code() {
        let module = ModuleDefinition::new("Benefit KPI Management").with_key("Benefit KPI");
        assert_eq!(module.permission_name(ActionType::Update), "Update Benefit KPI");
        assert_eq!(module.permission_code(ActionType::Update), "BENEFIT_KPI_UPDATE");
        assert_eq!(module.action_for_code("BENEFIT_KPI_UPDATE"), Some(ActionType::Update));
        assert_eq!(module.action_for_code("BENEFIT_UPDATE"), None);
    }

    #[test]
    fn test_decode_code_prefers_exact_prefix() {
        let catalog = ModuleCatalog::standard();
        let (module, action) = catalog.decode_code("BENEFIT_KPI_EXPORT").unwrap();
        assert_eq!(module.display_name(), "Benefit KPI Management");
        assert_eq!(action, ActionType::Export);

        let (module, _) = catalog.decode_code("BENEFIT_VIEW").unwrap();
        assert_eq!(module.display_name(), "Benefit Management");
    }

    #[test]
    fn test_duplicate_module_rejected() {
        let result = ModuleCatalog::new([
            ModuleDefinition::new("Task Management"),
            ModuleDefinition::new("Task Management"),
        ]);
        assert_eq!(
            result.unwrap_err(),
            CoreError::DuplicateModule("Task Management".into())
        );
    }

    #[test]
    fn test_restricted_actions() {
        let module = ModuleDefinition::new("Calendar Management")
            .with_actions([ActionType::View, ActionType::Export]);
        assert!(module.offers(ActionType::View));
        assert!(!module.offers(ActionType::Delete));
        assert_eq!(module.action_for_code("CALENDAR_DELETE"), None);
    }
}
