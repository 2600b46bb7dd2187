//! Strong type definitions for grantdesk.
//!
//! Backend identifiers are newtypes so a role id can never be passed where a
//! permission id is expected. The backend is free to use integers or strings
//! (GUIDs); both shapes are accepted on the wire and serialized back exactly
//! as received.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! backend_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(untagged)]
        pub enum $name {
            /// Integer identifier.
            Numeric(i64),
            /// String identifier (typically a GUID).
            Text(String),
        }

        impl $name {
            /// Returns the integer form, if this is a numeric identifier.
            pub fn as_numeric(&self) -> Option<i64> {
                match self {
                    $name::Numeric(n) => Some(*n),
                    $name::Text(_) => None,
                }
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $name::Numeric(n) => write!(f, "{}", n),
                    $name::Text(s) => f.write_str(s),
                }
            }
        }

        impl From<i64> for $name {
            fn from(n: i64) -> Self {
                $name::Numeric(n)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name::Text(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name::Text(s)
            }
        }
    };
}

backend_id! {
    /// Opaque identifier of a permission.
    PermissionId
}

backend_id! {
    /// Opaque identifier of a role.
    RoleId
}

backend_id! {
    /// Opaque identifier of a user (an Active Directory GUID for new users).
    UserId
}
