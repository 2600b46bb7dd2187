//! RSA public key material and password encryption.
//!
//! The backend publishes an RSA public key. Passwords are encrypted with
//! RSA PKCS#1 v1.5 and transmitted as standard base64, so plaintext never
//! leaves the client.

use std::fmt;

use base64::prelude::{Engine, BASE64_STANDARD};
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::pkcs8::DecodePublicKey;
use rsa::traits::PublicKeyParts;
use rsa::{Pkcs1v15Encrypt, RsaPublicKey};

use crate::error::{CredentialError, Result};

/// A parsed RSA public key as published by the backend.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKeyMaterial {
    text: String,
    key: RsaPublicKey,
    fingerprint: String,
}

impl PublicKeyMaterial {
    /// Parse key material.
    ///
    /// Accepts a PEM document (`PUBLIC KEY` or `RSA PUBLIC KEY`, with or
    /// without line breaks) or a bare base64 DER body.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(CredentialError::KeyUnavailable("empty public key".into()));
        }

        let (label, body) = match split_pem(trimmed) {
            Some((label, body)) => (Some(label), body),
            None if trimmed.starts_with("-----") => {
                return Err(CredentialError::KeyUnavailable("malformed PEM document".into()))
            }
            None => (None, strip_whitespace(trimmed)),
        };

        let der = BASE64_STANDARD
            .decode(body.as_bytes())
            .map_err(|e| CredentialError::KeyUnavailable(format!("invalid base64: {e}")))?;

        let key = match label {
            Some("RSA PUBLIC KEY") => RsaPublicKey::from_pkcs1_der(&der)
                .map_err(|e| CredentialError::KeyUnavailable(e.to_string()))?,
            _ => RsaPublicKey::from_public_key_der(&der)
                .or_else(|_| RsaPublicKey::from_pkcs1_der(&der))
                .map_err(|e| CredentialError::KeyUnavailable(e.to_string()))?,
        };

        let digest = blake3::hash(&der);
        let fingerprint = hex::encode(&digest.as_bytes()[..8]);

        Ok(Self {
            text: trimmed.to_string(),
            key,
            fingerprint,
        })
    }

    /// The key as it was published.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Short BLAKE3 fingerprint of the DER encoding, safe to log.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Modulus size in bits.
    pub fn bits(&self) -> usize {
        self.key.size() * 8
    }

    /// Longest plaintext, in bytes, PKCS#1 v1.5 can encrypt with this key.
    pub fn max_plaintext_len(&self) -> usize {
        self.key.size().saturating_sub(11)
    }

    /// Encrypt a plaintext and return base64 ciphertext.
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        if plaintext.len() > self.max_plaintext_len() {
            return Err(CredentialError::EncryptionFailed(format!(
                "plaintext of {} bytes exceeds the {} byte limit of a {}-bit key",
                plaintext.len(),
                self.max_plaintext_len(),
                self.bits()
            )));
        }

        let mut rng = rand::thread_rng();
        let ciphertext = self
            .key
            .encrypt(&mut rng, Pkcs1v15Encrypt, plaintext.as_bytes())
            .map_err(|e| CredentialError::EncryptionFailed(e.to_string()))?;

        if ciphertext.is_empty() {
            return Err(CredentialError::EncryptionFailed("empty ciphertext".into()));
        }
        Ok(BASE64_STANDARD.encode(ciphertext))
    }
}

impl fmt::Debug for PublicKeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicKeyMaterial")
            .field("bits", &self.bits())
            .field("fingerprint", &self.fingerprint)
            .finish()
    }
}

/// Split a PEM document into its label and whitespace-free body.
fn split_pem(text: &str) -> Option<(&str, String)> {
    let rest = text.strip_prefix("-----BEGIN ")?;
    let label_end = rest.find("-----")?;
    let label = &rest[..label_end];
    let after = &rest[label_end + 5..];
    let body_end = after.find("-----END")?;
    Some((label, strip_whitespace(&after[..body_end])))
}

fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}
