//! Lazily fetched, cached public key.
//!
//! The key is fetched on first use. Callers that arrive while a fetch is in
//! flight join that fetch instead of starting their own. A successful fetch
//! is cached for the life of the cache (or until [`PublicKeyCache::invalidate`]);
//! a failed one leaves the cache empty so the next call retries.
//!
//! ```text
//!   Empty ──public_key()──▶ Fetching ──ok──▶ Cached
//!     ▲                        │
//!     └────────err/timeout─────┘
//! ```

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::KeyCacheConfig;
use crate::error::{CredentialError, Result};
use crate::key::PublicKeyMaterial;
use crate::source::PublicKeySource;

type KeyFetch = Shared<BoxFuture<'static, Result<Arc<PublicKeyMaterial>>>>;

/// Observable state of a [`PublicKeyCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Empty,
    Fetching,
    Cached,
}

enum Slot {
    Empty,
    Fetching { generation: u64, fetch: KeyFetch },
    Cached(Arc<PublicKeyMaterial>),
}

struct Inner {
    slot: Slot,
    next_generation: u64,
}

/// Holds at most one public key and coalesces concurrent fetches.
pub struct PublicKeyCache<S: PublicKeySource + 'static> {
    source: Arc<S>,
    config: KeyCacheConfig,
    inner: Mutex<Inner>,
}

impl<S: PublicKeySource + 'static> PublicKeyCache<S> {
    pub fn new(source: Arc<S>, config: KeyCacheConfig) -> Self {
        Self {
            source,
            config,
            inner: Mutex::new(Inner {
                slot: Slot::Empty,
                next_generation: 0,
            }),
        }
    }

    pub fn config(&self) -> &KeyCacheConfig {
        &self.config
    }

    /// Return the cached key, fetching it if needed.
    ///
    /// At most one fetch is in flight at any time. Every caller waiting on a
    /// fetch observes the same outcome.
    pub async fn public_key(&self) -> Result<Arc<PublicKeyMaterial>> {
        let (generation, fetch) = {
            let mut inner = self.inner.lock().await;
            let joined = match &inner.slot {
                Slot::Cached(material) => return Ok(Arc::clone(material)),
                Slot::Fetching { generation, fetch } => Some((*generation, fetch.clone())),
                Slot::Empty => None,
            };
            match joined {
                Some(pending) => {
                    debug!(generation = pending.0, "joining in-flight public key fetch");
                    pending
                }
                None => {
                    let generation = inner.next_generation;
                    inner.next_generation += 1;
                    let fetch = fetch_key(Arc::clone(&self.source), self.config.clone())
                        .boxed()
                        .shared();
                    inner.slot = Slot::Fetching {
                        generation,
                        fetch: fetch.clone(),
                    };
                    debug!(generation, "starting public key fetch");
                    (generation, fetch)
                }
            }
        };

        let outcome = fetch.await;

        let mut inner = self.inner.lock().await;
        let current = matches!(
            &inner.slot,
            Slot::Fetching { generation: g, .. } if *g == generation
        );
        if current {
            inner.slot = match &outcome {
                Ok(material) => Slot::Cached(Arc::clone(material)),
                Err(_) => Slot::Empty,
            };
        }
        outcome
    }

    /// Encrypt a password with the backend's public key.
    ///
    /// A blank password fails before any key fetch.
    pub async fn encrypt_password(&self, plaintext: &str) -> Result<String> {
        if plaintext.is_empty() {
            return Err(CredentialError::EmptyInput("password"));
        }
        let material = self.public_key().await?;
        material.encrypt(plaintext)
    }

    /// Drop the cached key; the next call fetches a fresh one.
    ///
    /// A fetch already in flight still completes for its waiters but is
    /// not cached.
    pub async fn invalidate(&self) {
        let mut inner = self.inner.lock().await;
        if !matches!(inner.slot, Slot::Empty) {
            info!("public key invalidated");
        }
        inner.slot = Slot::Empty;
    }

    pub async fn state(&self) -> KeyState {
        match self.inner.lock().await.slot {
            Slot::Empty => KeyState::Empty,
            Slot::Fetching { .. } => KeyState::Fetching,
            Slot::Cached(_) => KeyState::Cached,
        }
    }
}

async fn fetch_key<S: PublicKeySource>(
    source: Arc<S>,
    config: KeyCacheConfig,
) -> Result<Arc<PublicKeyMaterial>> {
    let response = match tokio::time::timeout(config.fetch_timeout, source.fetch_public_key()).await
    {
        Ok(Ok(response)) => response,
        Ok(Err(e)) => {
            warn!(error = %e, "public key fetch failed");
            return Err(match e {
                CredentialError::KeyUnavailable(_) => e,
                other => CredentialError::KeyUnavailable(other.to_string()),
            });
        }
        Err(_) => {
            warn!(timeout_ms = config.fetch_timeout.as_millis() as u64, "public key fetch timed out");
            return Err(CredentialError::KeyUnavailable(format!(
                "fetch timed out after {:?}",
                config.fetch_timeout
            )));
        }
    };

    let text = response
        .public_key
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| CredentialError::KeyUnavailable("public key not found in response".into()))?;

    let material = PublicKeyMaterial::parse(&text)?;
    info!(fingerprint = material.fingerprint(), bits = material.bits(), "public key cached");
    Ok(Arc::new(material))
}
