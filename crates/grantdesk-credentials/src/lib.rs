//! # grantdesk-credentials
//!
//! Password encryption for login.
//!
//! The backend publishes an RSA public key. [`PublicKeyCache`] fetches it
//! once, shares one in-flight fetch between concurrent callers, and caches
//! it until invalidated. Passwords are encrypted with RSA PKCS#1 v1.5 and
//! sent as base64.
//!
//! Keys are identified in logs by a short BLAKE3 fingerprint. Key material,
//! passwords, and ciphertext are never logged.

pub mod cache;
pub mod config;
pub mod error;
pub mod key;
pub mod login;
pub mod source;

pub use cache::{KeyState, PublicKeyCache};
pub use config::KeyCacheConfig;
pub use error::{CredentialError, Result};
pub use key::PublicKeyMaterial;
pub use login::{login, Credentials, LoginEndpoint, LoginRequest, Session};
pub use source::{PublicKeyResponse, PublicKeySource};
