//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: a catalog covering the
//! standard modules, a throwaway RSA key, and an in-memory backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, OnceLock, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use base64::prelude::{Engine, BASE64_STANDARD};
use rsa::pkcs8::{EncodePublicKey, LineEnding};
use rsa::{Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};

use grantdesk_core::{
    Envelope, ModuleCatalog, PermissionCatalog, PermissionCatalogEntry, PermissionId, RoleId,
    UserId,
};
use grantdesk_credentials::{
    CredentialError, LoginEndpoint, LoginRequest, PublicKeyResponse, PublicKeySource, Session,
};
use grantdesk_perms::{
    CatalogSource, CreateUserRequest, DeltaConsumer, IdSet, PermissionUpdate, PermsError,
    UpdateSubject,
};

/// One catalog entry for every offered action of every standard module.
///
/// Ids are `module_index * 10 + action_index + 1`, in catalog order.
pub fn standard_catalog_entries() -> Vec<PermissionCatalogEntry> {
    let mut entries = Vec::new();
    for (m, module) in ModuleCatalog::standard().iter().enumerate() {
        for (a, &action) in module.actions().iter().enumerate() {
            let id = (m * 10 + a + 1) as i64;
            entries.push(
                PermissionCatalogEntry::new(id, module.permission_name(action))
                    .with_code(module.permission_code(action)),
            );
        }
    }
    entries
}

/// [`standard_catalog_entries`] as a lookup table.
pub fn standard_catalog() -> PermissionCatalog {
    PermissionCatalog::new(standard_catalog_entries())
}

/// Build an id set from integers.
pub fn ids(raw: &[i64]) -> IdSet {
    raw.iter().copied().map(PermissionId::from).collect()
}

/// A 1024-bit RSA key shared by every test in the process.
pub struct TestKey;

impl TestKey {
    pub fn private() -> &'static RsaPrivateKey {
        static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
        KEY.get_or_init(|| {
            let mut rng = rand::thread_rng();
            RsaPrivateKey::new(&mut rng, 1024).expect("generate test key")
        })
    }

    /// SPKI PEM of the public half.
    pub fn public_pem() -> String {
        RsaPublicKey::from(Self::private())
            .to_public_key_pem(LineEnding::LF)
            .expect("encode test key")
    }

    /// Decrypt base64 ciphertext produced by the credential flow.
    pub fn decrypt(ciphertext: &str) -> Option<String> {
        let bytes = BASE64_STANDARD.decode(ciphertext).ok()?;
        let plain = Self::private().decrypt(Pkcs1v15Encrypt, &bytes).ok()?;
        String::from_utf8(plain).ok()
    }
}

/// What the memory backend's key endpoint answers.
#[derive(Debug, Clone)]
pub enum KeyReply {
    /// The test key's PEM.
    Valid,
    /// A reply without a key.
    Missing,
    /// A transport failure.
    Fail(String),
}

#[derive(Default)]
struct State {
    catalog: Vec<PermissionCatalogEntry>,
    role_permissions: HashMap<RoleId, IdSet>,
    user_permissions: HashMap<(UserId, RoleId), IdSet>,
    accounts: HashMap<String, String>,
    updates: Vec<PermissionUpdate>,
    created: Vec<CreateUserRequest>,
    logins: Vec<LoginRequest>,
    reject_updates: Option<Vec<String>>,
    key_replies: Vec<KeyReply>,
}

/// In-memory backend implementing every collaborator trait.
///
/// Applies submitted updates to its own state (deletes, then adds), counts
/// calls, and records every request for inspection.
pub struct MemoryBackend {
    state: RwLock<State>,
    key_delay: Mutex<Duration>,
    key_fetches: AtomicUsize,
    catalog_fetches: AtomicUsize,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    /// Empty backend: no catalog, no grants, valid key.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
            key_delay: Mutex::new(Duration::ZERO),
            key_fetches: AtomicUsize::new(0),
            catalog_fetches: AtomicUsize::new(0),
        }
    }

    /// Backend serving [`standard_catalog_entries`].
    pub fn with_standard_catalog() -> Self {
        let backend = Self::new();
        backend.set_catalog(standard_catalog_entries());
        backend
    }

    pub fn set_catalog(&self, entries: Vec<PermissionCatalogEntry>) {
        self.state.write().unwrap().catalog = entries;
    }

    pub fn set_role_permissions(&self, role: RoleId, assigned: IdSet) {
        self.state.write().unwrap().role_permissions.insert(role, assigned);
    }

    pub fn set_user_permissions(&self, user: UserId, role: RoleId, assigned: IdSet) {
        self.state
            .write()
            .unwrap()
            .user_permissions
            .insert((user, role), assigned);
    }

    pub fn role_permissions(&self, role: &RoleId) -> IdSet {
        self.state
            .read()
            .unwrap()
            .role_permissions
            .get(role)
            .cloned()
            .unwrap_or_default()
    }

    pub fn user_permissions(&self, user: &UserId, role: &RoleId) -> IdSet {
        self.state
            .read()
            .unwrap()
            .user_permissions
            .get(&(user.clone(), role.clone()))
            .cloned()
            .unwrap_or_default()
    }

    /// Register an account that can log in.
    pub fn add_account(&self, username: &str, password: &str) {
        self.state
            .write()
            .unwrap()
            .accounts
            .insert(username.to_string(), password.to_string());
    }

    /// Reject every subsequent update with these messages.
    pub fn reject_updates(&self, messages: &[&str]) {
        self.state.write().unwrap().reject_updates =
            Some(messages.iter().map(|m| m.to_string()).collect());
    }

    /// Queue replies for the key endpoint; once drained it answers `Valid`.
    pub fn queue_key_replies(&self, replies: impl IntoIterator<Item = KeyReply>) {
        self.state.write().unwrap().key_replies.extend(replies);
    }

    /// Delay every key fetch, to hold the cache in `Fetching`.
    pub fn set_key_delay(&self, delay: Duration) {
        *self.key_delay.lock().unwrap() = delay;
    }

    pub fn key_fetches(&self) -> usize {
        self.key_fetches.load(Ordering::SeqCst)
    }

    pub fn catalog_fetches(&self) -> usize {
        self.catalog_fetches.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> Vec<PermissionUpdate> {
        self.state.read().unwrap().updates.clone()
    }

    pub fn created_users(&self) -> Vec<CreateUserRequest> {
        self.state.read().unwrap().created.clone()
    }

    pub fn logins(&self) -> Vec<LoginRequest> {
        self.state.read().unwrap().logins.clone()
    }
}

fn apply(target: &mut IdSet, update: &PermissionUpdate) {
    for id in update.deleted.iter().flatten() {
        target.remove(id);
    }
    for id in update.added.iter().flatten() {
        target.insert(id.clone());
    }
}

#[async_trait]
impl CatalogSource for MemoryBackend {
    async fn fetch_catalog(&self) -> Result<Vec<PermissionCatalogEntry>, PermsError> {
        self.catalog_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.state.read().unwrap().catalog.clone())
    }

    async fn fetch_role_permissions(&self, role_id: &RoleId) -> Result<IdSet, PermsError> {
        Ok(self.role_permissions(role_id))
    }

    async fn fetch_user_permissions(
        &self,
        user_id: &UserId,
        role_id: &RoleId,
    ) -> Result<IdSet, PermsError> {
        Ok(self.user_permissions(user_id, role_id))
    }
}

#[async_trait]
impl DeltaConsumer for MemoryBackend {
    async fn submit_update(&self, update: &PermissionUpdate) -> Result<(), PermsError> {
        let mut state = self.state.write().unwrap();
        if let Some(messages) = state.reject_updates.clone() {
            return Err(PermsError::UpdateRejected(messages));
        }
        state.updates.push(update.clone());

        match &update.subject {
            UpdateSubject::Role { role_id } => {
                let target = state.role_permissions.entry(role_id.clone()).or_default();
                apply(target, update);
            }
            UpdateSubject::User { user_id, role_id } => {
                let target = state
                    .user_permissions
                    .entry((user_id.clone(), role_id.clone()))
                    .or_default();
                apply(target, update);
            }
        }
        Ok(())
    }

    async fn create_user(&self, request: &CreateUserRequest) -> Result<(), PermsError> {
        let mut state = self.state.write().unwrap();
        if let Some(messages) = state.reject_updates.clone() {
            return Err(PermsError::UpdateRejected(messages));
        }
        state.created.push(request.clone());
        state.user_permissions.insert(
            (request.user_id.clone(), request.role_id.clone()),
            request.permission_ids.iter().cloned().collect(),
        );
        Ok(())
    }
}

#[async_trait]
impl PublicKeySource for MemoryBackend {
    async fn fetch_public_key(&self) -> Result<PublicKeyResponse, CredentialError> {
        self.key_fetches.fetch_add(1, Ordering::SeqCst);
        let delay = *self.key_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let reply = {
            let mut state = self.state.write().unwrap();
            if state.key_replies.is_empty() {
                KeyReply::Valid
            } else {
                state.key_replies.remove(0)
            }
        };
        match reply {
            KeyReply::Valid => Ok(PublicKeyResponse::new(TestKey::public_pem())),
            KeyReply::Missing => Ok(PublicKeyResponse::default()),
            KeyReply::Fail(message) => Err(CredentialError::Backend(message)),
        }
    }
}

#[async_trait]
impl LoginEndpoint for MemoryBackend {
    async fn login(&self, request: &LoginRequest) -> Result<Envelope<Session>, CredentialError> {
        let mut state = self.state.write().unwrap();
        state.logins.push(request.clone());

        let expected = state.accounts.get(&request.username);
        let supplied = TestKey::decrypt(&request.password);
        match (expected, supplied) {
            (Some(expected), Some(supplied)) if *expected == supplied => {
                Ok(Envelope::ok(Session {
                    user_id: UserId::from(request.username.as_str()),
                    access_token: format!("access-{}", request.username),
                    refresh_token: Some(format!("refresh-{}", request.username)),
                }))
            }
            _ => Ok(Envelope::rejected(["Invalid username or password"])),
        }
    }
}
