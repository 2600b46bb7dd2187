//! reqwest-backed implementation of every collaborator trait.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use grantdesk_core::{Envelope, PermissionCatalogEntry, PermissionId, RoleId, UserId};
use grantdesk_credentials::{
    CredentialError, LoginEndpoint, LoginRequest, PublicKeyResponse, PublicKeySource, Session,
};
use grantdesk_perms::{
    CatalogSource, CreateUserRequest, DeltaConsumer, IdSet, PermissionUpdate, PermsError,
    UpdateSubject,
};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// One assignment record: a role (or user-under-role) and its permissions.
#[derive(Debug, Deserialize)]
struct AssignmentRecord {
    #[serde(default)]
    permissions: Vec<AssignedPermission>,
}

#[derive(Debug, Deserialize)]
struct AssignedPermission {
    id: PermissionId,
}

/// Talks to the REST backend.
///
/// Requests carry `Authorization: Bearer <token>` once a token is set. A
/// 401 reply clears the token.
pub struct HttpBackend {
    client: Client,
    config: ClientConfig,
    token: RwLock<Option<String>>,
}

impl HttpBackend {
    pub fn new(config: ClientConfig) -> Result<Self> {
        if reqwest::Url::parse(&config.base_url).is_err() {
            return Err(ClientError::Config(format!(
                "invalid base url: {}",
                config.base_url
            )));
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self {
            client,
            config,
            token: RwLock::new(None),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Set or clear the bearer token.
    pub async fn set_access_token(&self, token: Option<String>) {
        *self.token.write().await = token;
    }

    pub async fn has_access_token(&self) -> bool {
        self.token.read().await.is_some()
    }

    async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token.read().await.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a request and decode its JSON body.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.authorize(request).await.send().await?;
        let status = response.status();
        let url = response.url().path().to_string();

        if status == StatusCode::UNAUTHORIZED {
            warn!(path = %url, "backend returned 401, clearing access token");
            self.set_access_token(None).await;
            return Err(ClientError::Unauthorized);
        }

        let body = response.text().await?;
        debug!(path = %url, status = status.as_u16(), bytes = body.len(), "backend replied");

        match serde_json::from_str::<T>(&body) {
            Ok(value) => Ok(value),
            Err(_) if !status.is_success() => Err(ClientError::Status {
                status: status.as_u16(),
                body,
            }),
            Err(e) => Err(ClientError::Decode(e.to_string())),
        }
    }

    /// Send a request whose reply is an envelope, failing on rejection.
    async fn send_envelope<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Option<T>> {
        let envelope: Envelope<T> = self.send(request).await?;
        envelope.into_result().map_err(ClientError::Rejected)
    }

    async fn fetch_assignments(&self, request: RequestBuilder) -> Result<IdSet> {
        let records: Option<Vec<AssignmentRecord>> = self.send_envelope(request).await?;
        Ok(records
            .unwrap_or_default()
            .into_iter()
            .flat_map(|record| record.permissions)
            .map(|permission| permission.id)
            .collect())
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.config.url(path))
    }
}

#[async_trait]
impl PublicKeySource for HttpBackend {
    async fn fetch_public_key(&self) -> std::result::Result<PublicKeyResponse, CredentialError> {
        let raw: serde_json::Value = self.send(self.get(&self.config.endpoints.public_key)).await?;

        // Accept the key at the top level or inside an envelope's `data`.
        let key = raw
            .get("publicKey")
            .or_else(|| raw.get("data").and_then(|data| data.get("publicKey")))
            .and_then(serde_json::Value::as_str)
            .map(str::to_string);
        Ok(PublicKeyResponse { public_key: key })
    }
}

#[async_trait]
impl LoginEndpoint for HttpBackend {
    async fn login(
        &self,
        request: &LoginRequest,
    ) -> std::result::Result<Envelope<Session>, CredentialError> {
        let url = self.config.url(&self.config.endpoints.login);
        Ok(self.send(self.client.post(url).json(request)).await?)
    }
}

#[async_trait]
impl CatalogSource for HttpBackend {
    async fn fetch_catalog(&self) -> std::result::Result<Vec<PermissionCatalogEntry>, PermsError> {
        let request = self.get(&self.config.endpoints.permissions).query(&[
            ("page", "1".to_string()),
            ("pageSize", self.config.catalog_page_size.to_string()),
        ]);
        let entries: Option<Vec<PermissionCatalogEntry>> = self.send_envelope(request).await?;
        Ok(entries.unwrap_or_default())
    }

    async fn fetch_role_permissions(&self, role_id: &RoleId) -> std::result::Result<IdSet, PermsError> {
        let request = self
            .get(&self.config.endpoints.role_permissions)
            .query(&[("RoleId", role_id.to_string())]);
        Ok(self.fetch_assignments(request).await?)
    }

    async fn fetch_user_permissions(
        &self,
        user_id: &UserId,
        role_id: &RoleId,
    ) -> std::result::Result<IdSet, PermsError> {
        let request = self.get(&self.config.endpoints.user_permissions).query(&[
            ("UserId", user_id.to_string()),
            ("RoleId", role_id.to_string()),
        ]);
        Ok(self.fetch_assignments(request).await?)
    }
}

#[async_trait]
impl DeltaConsumer for HttpBackend {
    async fn submit_update(&self, update: &PermissionUpdate) -> std::result::Result<(), PermsError> {
        let path = match update.subject {
            UpdateSubject::Role { .. } => &self.config.endpoints.role_permissions_update,
            UpdateSubject::User { .. } => &self.config.endpoints.user_permissions_update,
        };
        let request = self.client.patch(self.config.url(path)).json(update);
        let _: Option<serde_json::Value> = self.send_envelope(request).await?;
        Ok(())
    }

    async fn create_user(&self, request: &CreateUserRequest) -> std::result::Result<(), PermsError> {
        let url = self.config.url(&self.config.endpoints.create_user);
        let _: Option<serde_json::Value> =
            self.send_envelope(self.client.post(url).json(request)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_base_url() {
        let result = HttpBackend::new(ClientConfig::new("not a url"));
        assert!(matches!(result, Err(ClientError::Config(_))));
    }

    #[test]
    fn test_assignment_records_parse() {
        let records: Vec<AssignmentRecord> =
            serde_json::from_str(r#"[{"permissions": [{"id": 1, "englishName": "View Goals"}]}, {}]"#)
                .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].permissions[0].id, PermissionId::from(1));
        assert!(records[1].permissions.is_empty());
    }
}
