//! Action types offered by permission modules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// An action that can be granted on a module.
///
/// On the wire and in working grant sets actions are lowercase
/// (`"view"`); in canonical permission names they are capitalized
/// (`"View Goals"`); in permission codes they are uppercase (`"GOALS_VIEW"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    View,
    Create,
    Update,
    Delete,
    Export,
}

impl ActionType {
    /// All action types, in display order.
    pub const ALL: [ActionType; 5] = [
        ActionType::View,
        ActionType::Create,
        ActionType::Update,
        ActionType::Delete,
        ActionType::Export,
    ];

    /// Lowercase form used in working grant sets.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ActionType::View => "view",
            ActionType::Create => "create",
            ActionType::Update => "update",
            ActionType::Delete => "delete",
            ActionType::Export => "export",
        }
    }

    /// Capitalized form used in canonical permission names.
    pub const fn display_name(&self) -> &'static str {
        match self {
            ActionType::View => "View",
            ActionType::Create => "Create",
            ActionType::Update => "Update",
            ActionType::Delete => "Delete",
            ActionType::Export => "Export",
        }
    }

    /// Uppercase suffix used in permission codes.
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            ActionType::View => "VIEW",
            ActionType::Create => "CREATE",
            ActionType::Update => "UPDATE",
            ActionType::Delete => "DELETE",
            ActionType::Export => "EXPORT",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = CoreError;

    /// Case-insensitive parse; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ActionType::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CoreError::UnknownAction(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("view".parse::<ActionType>().unwrap(), ActionType::View);
        assert_eq!("VIEW".parse::<ActionType>().unwrap(), ActionType::View);
        assert_eq!(" Export ".parse::<ActionType>().unwrap(), ActionType::Export);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "approve".parse::<ActionType>().unwrap_err();
        assert_eq!(err, CoreError::UnknownAction("approve".into()));
    }

    #[test]
    fn test_forms() {
        let a = ActionType::Delete;
        assert_eq!(a.as_str(), "delete");
        assert_eq!(a.display_name(), "Delete");
        assert_eq!(a.code_suffix(), "DELETE");
        assert_eq!(serde_json::to_string(&a).unwrap(), "\"delete\"");
    }
}
