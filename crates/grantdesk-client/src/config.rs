//! HTTP adapter configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use grantdesk_credentials::config::duration_ms;

/// REST paths, relative to [`ClientConfig::base_url`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Endpoints {
    pub public_key: String,
    pub login: String,
    pub permissions: String,
    pub role_permissions: String,
    pub role_permissions_update: String,
    pub user_permissions: String,
    pub user_permissions_update: String,
    pub create_user: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            public_key: "/auth-service/auth/public-key".into(),
            login: "/auth-service/auth/login".into(),
            permissions: "/committee-service/Permission".into(),
            role_permissions: "/committee-service/RolePermission".into(),
            role_permissions_update: "/committee-service/RolePermission/update".into(),
            user_permissions: "/committee-service/MemberRolePermission".into(),
            user_permissions_update: "/auth-service/UserRolePermission/update".into(),
            create_user: "/auth-service/User/create".into(),
        }
    }
}

/// Configuration for [`HttpBackend`](crate::HttpBackend).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    /// Backend root, e.g. `https://example.org/api`.
    pub base_url: String,

    /// Per-request timeout.
    #[serde(rename = "timeoutMs", with = "duration_ms")]
    pub timeout: Duration,

    pub endpoints: Endpoints,

    /// Page size used to fetch the whole permission catalog in one page.
    pub catalog_page_size: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".into(),
            timeout: Duration::from_secs(10),
            endpoints: Endpoints::default(),
            catalog_page_size: 1000,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Join the base URL and a path without doubling slashes.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
