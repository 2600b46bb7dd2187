//! Permission catalog: the backend's reference list of permissions.
//!
//! The catalog is the source of truth mapping canonical permission names
//! (`"View Goals"`) and permission codes (`"GOALS_VIEW"`) to opaque
//! [`PermissionId`]s. It is fetched once and never mutated.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::PermissionId;

/// One row of the permission catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionCatalogEntry {
    pub id: PermissionId,

    /// Canonical name, formatted `"<Action> <ModuleKey>"`.
    pub english_name: String,

    #[serde(default)]
    pub code: String,

    #[serde(default)]
    pub description: String,
}

impl PermissionCatalogEntry {
    pub fn new(id: impl Into<PermissionId>, english_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            english_name: english_name.into(),
            code: String::new(),
            description: String::new(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Read-only lookup table over catalog entries.
///
/// Lookups are exact-match. When several entries share a name or code the
/// first one wins.
#[derive(Debug, Clone, Default)]
pub struct PermissionCatalog {
    entries: Vec<PermissionCatalogEntry>,
    by_name: HashMap<String, usize>,
    by_code: HashMap<String, usize>,
}

impl PermissionCatalog {
    pub fn new(entries: Vec<PermissionCatalogEntry>) -> Self {
        let mut by_name = HashMap::with_capacity(entries.len());
        let mut by_code = HashMap::with_capacity(entries.len());

        for (idx, entry) in entries.iter().enumerate() {
            by_name.entry(entry.english_name.clone()).or_insert(idx);
            if !entry.code.is_empty() {
                by_code.entry(entry.code.clone()).or_insert(idx);
            }
        }

        Self {
            entries,
            by_name,
            by_code,
        }
    }

    pub fn by_name(&self, english_name: &str) -> Option<&PermissionCatalogEntry> {
        self.by_name.get(english_name).map(|&idx| &self.entries[idx])
    }

    pub fn by_code(&self, code: &str) -> Option<&PermissionCatalogEntry> {
        self.by_code.get(code).map(|&idx| &self.entries[idx])
    }

    pub fn id_for_name(&self, english_name: &str) -> Option<&PermissionId> {
        self.by_name(english_name).map(|e| &e.id)
    }

    pub fn id_for_code(&self, code: &str) -> Option<&PermissionId> {
        self.by_code(code).map(|e| &e.id)
    }

    pub fn entries(&self) -> &[PermissionCatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<PermissionCatalogEntry>> for PermissionCatalog {
    fn from(entries: Vec<PermissionCatalogEntry>) -> Self {
        Self::new(entries)
    }
}

impl FromIterator<PermissionCatalogEntry> for PermissionCatalog {
    fn from_iter<I: IntoIterator<Item = PermissionCatalogEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PermissionCatalog {
        PermissionCatalog::new(vec![
            PermissionCatalogEntry::new(10, "View Goals").with_code("GOALS_VIEW"),
            PermissionCatalogEntry::new(11, "Create Goals").with_code("GOALS_CREATE"),
            PermissionCatalogEntry::new(12, "View Goals"),
            PermissionCatalogEntry::new(13, "Export Goals"),
        ])
    }

    #[test]
    fn test_lookup_by_name_first_wins() {
        let catalog = sample();
        assert_eq!(catalog.id_for_name("View Goals"), Some(&PermissionId::from(10)));
        assert_eq!(catalog.id_for_name("Create Goals"), Some(&PermissionId::from(11)));
        assert_eq!(catalog.id_for_name("view goals"), None);
    }

    #[test]
    fn test_lookup_by_code_skips_blank_codes() {
        let catalog = sample();
        assert_eq!(catalog.id_for_code("GOALS_CREATE"), Some(&PermissionId::from(11)));
        assert_eq!(catalog.id_for_code(""), None);
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_entry_deserializes_backend_shape() {
        let raw = r#"{
            "id": 10,
            "englishName": "View Goals",
            "arabicName": "ignored",
            "code": "GOALS_VIEW",
            "description": "Can view goals"
        }"#;
        let entry: PermissionCatalogEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.id, PermissionId::from(10));
        assert_eq!(entry.english_name, "View Goals");
        assert_eq!(entry.code, "GOALS_VIEW");
    }

    #[test]
    fn test_entry_without_code() {
        let raw = r#"{"id": "a1", "englishName": "View Budget"}"#;
        let entry: PermissionCatalogEntry = serde_json::from_str(raw).unwrap();
        assert!(entry.code.is_empty());
        assert!(entry.description.is_empty());
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = PermissionCatalog::default();
        assert!(catalog.is_empty());
        assert_eq!(catalog.id_for_name("View Goals"), None);
    }
}
