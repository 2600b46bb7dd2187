//! The Console: one handle over catalog loading, reconciliation,
//! submission, and login.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use grantdesk_client::{ClientConfig, HttpBackend};
use grantdesk_core::{ModuleCatalog, PermissionCatalog, RoleId, UserId};
use grantdesk_credentials::{
    login, Credentials, KeyState, LoginEndpoint, PublicKeyCache, PublicKeySource, Session,
};
use grantdesk_perms::{
    compute_delta, initial_working_ids, merge_role_change, resolve_working_ids, CatalogSource,
    CreateUserRequest, DeltaConsumer, GrantSet, IdSet, PermissionDelta, PermissionUpdate,
    PermsError, RoleSelection,
};

use crate::config::ConsoleConfig;
use crate::error::Result;

/// Everything the console needs from a backend.
pub trait Backend: CatalogSource + DeltaConsumer + PublicKeySource + LoginEndpoint {}

impl<T> Backend for T where T: CatalogSource + DeltaConsumer + PublicKeySource + LoginEndpoint {}

/// Grants as loaded for editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantSnapshot {
    /// Identifiers the delta is computed against.
    pub original: IdSet,
    /// Editable grants to start from.
    pub working: GrantSet,
}

/// What a save did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The update was accepted by the backend.
    Submitted(PermissionUpdate),
    /// Nothing changed; no request was sent.
    Unchanged,
}

/// The main Console struct.
///
/// Holds the module catalog, the permission catalog once loaded, and the
/// public key cache. All methods take `&self`.
pub struct Console<B: Backend + 'static> {
    backend: Arc<B>,
    modules: ModuleCatalog,
    catalog: RwLock<Option<Arc<PermissionCatalog>>>,
    keys: PublicKeyCache<B>,
    config: ConsoleConfig,
}

impl Console<HttpBackend> {
    /// Console over the REST backend.
    pub fn connect(client: ClientConfig, config: ConsoleConfig) -> Result<Self> {
        Ok(Self::new(HttpBackend::new(client)?, config))
    }

    /// Log in and keep the access token for subsequent requests.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Session> {
        let session = self.login(credentials).await?;
        self.backend
            .set_access_token(Some(session.access_token.clone()))
            .await;
        Ok(session)
    }
}

impl<B: Backend + 'static> Console<B> {
    /// Create a console with the standard module catalog.
    pub fn new(backend: B, config: ConsoleConfig) -> Self {
        Self::with_modules(backend, ModuleCatalog::standard().clone(), config)
    }

    /// Create a console with a custom module catalog.
    pub fn with_modules(backend: B, modules: ModuleCatalog, config: ConsoleConfig) -> Self {
        let backend = Arc::new(backend);
        let keys = PublicKeyCache::new(Arc::clone(&backend), config.key_cache.clone());
        Self {
            backend,
            modules,
            catalog: RwLock::new(None),
            keys,
            config,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn modules(&self) -> &ModuleCatalog {
        &self.modules
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Catalog
    // ─────────────────────────────────────────────────────────────────────────

    /// Fetch the permission catalog and keep it for later calls.
    ///
    /// An empty reply fails with `CatalogUnavailable` and is not kept, so
    /// the next call fetches again.
    pub async fn load_catalog(&self) -> Result<Arc<PermissionCatalog>> {
        let entries = self.backend.fetch_catalog().await?;
        if entries.is_empty() {
            warn!("permission catalog is empty");
            return Err(PermsError::CatalogUnavailable.into());
        }
        let catalog = Arc::new(PermissionCatalog::new(entries));
        info!(entries = catalog.len(), "permission catalog loaded");
        *self.catalog.write().await = Some(Arc::clone(&catalog));
        Ok(catalog)
    }

    /// The loaded catalog, loading it on first use.
    ///
    /// Fails with `CatalogUnavailable` while the backend has no entries.
    pub async fn catalog(&self) -> Result<Arc<PermissionCatalog>> {
        let loaded = self.catalog.read().await.clone();
        match loaded {
            Some(catalog) => Ok(catalog),
            None => self.load_catalog().await,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Role Permissions
    // ─────────────────────────────────────────────────────────────────────────

    /// Load a role's default grants for editing.
    pub async fn load_role_grants(&self, role_id: &RoleId) -> Result<GrantSnapshot> {
        let catalog = self.catalog().await?;
        let original = self.backend.fetch_role_permissions(role_id).await?;
        let working = GrantSet::from_assigned_ids(&original, &self.modules, &catalog)?;
        debug!(role = %role_id, assigned = original.len(), "role grants loaded");
        Ok(GrantSnapshot { original, working })
    }

    /// Reconcile and submit a role's edited grants.
    pub async fn save_role_permissions(
        &self,
        role_id: &RoleId,
        original: &IdSet,
        working: &GrantSet,
    ) -> Result<SaveOutcome> {
        let catalog = self.catalog().await?;
        let delta = compute_delta(original, working, &self.modules, &catalog)?;

        if delta.is_empty() && self.config.skip_empty_updates {
            debug!(role = %role_id, "role permissions unchanged, not submitting");
            return Ok(SaveOutcome::Unchanged);
        }

        let update = PermissionUpdate::for_role(role_id.clone(), &delta);
        self.submit(update, &delta).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // User Permissions
    // ─────────────────────────────────────────────────────────────────────────

    /// Load a user's grants for editing under the selected role.
    ///
    /// `original` is what the user holds under their initial role (empty
    /// when they have none). `working` starts from the user's own grants
    /// when the role is kept, and from the selected role's defaults
    /// otherwise.
    pub async fn load_user_grants(
        &self,
        user_id: &UserId,
        selection: &RoleSelection,
    ) -> Result<GrantSnapshot> {
        let catalog = self.catalog().await?;

        let original = match &selection.initial {
            Some(role_id) => self.backend.fetch_user_permissions(user_id, role_id).await?,
            None => IdSet::new(),
        };

        let seed = if selection.changed() || original.is_empty() {
            let defaults = self.backend.fetch_role_permissions(&selection.selected).await?;
            initial_working_ids(selection, &original, &defaults)
        } else {
            original.clone()
        };

        let working = GrantSet::from_assigned_ids(&seed, &self.modules, &catalog)?;
        debug!(
            user = %user_id,
            role = %selection.selected,
            role_changed = selection.changed(),
            assigned = original.len(),
            "user grants loaded"
        );
        Ok(GrantSnapshot { original, working })
    }

    /// Reconcile and submit a user's edited grants.
    ///
    /// A role change replaces the user's grants wholesale and is submitted
    /// even when the working set equals the original.
    pub async fn save_user_permissions(
        &self,
        user_id: &UserId,
        selection: &RoleSelection,
        original: &IdSet,
        working: &GrantSet,
    ) -> Result<SaveOutcome> {
        let catalog = self.catalog().await?;
        let working_ids = resolve_working_ids(working, &self.modules, &catalog)?;
        let role_changed = selection.changed();
        let delta = merge_role_change(original, role_changed, &working_ids);

        if delta.is_empty() && !role_changed {
            debug!(user = %user_id, "user permissions unchanged, not submitting");
            return Ok(SaveOutcome::Unchanged);
        }

        let update =
            PermissionUpdate::for_user(user_id.clone(), selection.selected.clone(), &delta);
        self.submit(update, &delta).await
    }

    /// Create a user with a role and the edited grants.
    pub async fn create_user(
        &self,
        user_id: &UserId,
        role_id: &RoleId,
        working: &GrantSet,
    ) -> Result<()> {
        let catalog = self.catalog().await?;
        let ids = resolve_working_ids(working, &self.modules, &catalog)?;
        let request =
            CreateUserRequest::new(user_id.clone(), role_id.clone(), &ids, self.config.system_id)?;

        self.backend.create_user(&request).await?;
        info!(user = %user_id, role = %role_id, permissions = ids.len(), "user created");
        Ok(())
    }

    async fn submit(&self, update: PermissionUpdate, delta: &PermissionDelta) -> Result<SaveOutcome> {
        self.backend.submit_update(&update).await?;
        info!(
            role = %update.subject.role_id(),
            added = delta.added.len(),
            deleted = delta.deleted.len(),
            kind = ?delta.kind,
            "permission update submitted"
        );
        Ok(SaveOutcome::Submitted(update))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Credentials
    // ─────────────────────────────────────────────────────────────────────────

    /// Encrypt a password with the backend's public key.
    pub async fn encrypt_password(&self, plaintext: &str) -> Result<String> {
        Ok(self.keys.encrypt_password(plaintext).await?)
    }

    /// Validate credentials, encrypt the password, and log in.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session> {
        Ok(login(&self.keys, self.backend.as_ref(), credentials).await?)
    }

    /// Forget the cached public key; the next encryption refetches it.
    pub async fn invalidate_public_key(&self) {
        self.keys.invalidate().await;
    }

    pub async fn public_key_state(&self) -> KeyState {
        self.keys.state().await
    }
}
