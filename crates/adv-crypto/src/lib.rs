//! # adv-crypto
//!
//! Encrypted storage codec for the sensitive part of a case record.
//!
//! Values are serialized with `serde_json`, sealed with AES-256-GCM under a
//! fresh 96-bit nonce, and stored as text:
//!
//! ```text
//! v1:<base64(nonce || ciphertext+tag)>
//! ```
//!
//! The key comes from [`adv_config::CryptoConfig`] at construction and stays
//! fixed for the life of the codec. Only this crate ever looks inside a blob.

mod error;

pub use error::CryptoError;

use adv_config::{CryptoConfig, KEY_LEN};
use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, KeyInit, Payload},
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use serde::de::DeserializeOwned;

const NONCE_SIZE: usize = 12;

/// Scheme tag written in front of every blob.
const SCHEME_V1: &str = "v1:";

/// Bound into the GCM tag so blobs from other tools using the same key do
/// not open here.
const SCHEME_AAD: &[u8] = b"advocate/case-details/v1";

/// Symmetric codec for structured payloads.
#[derive(Clone)]
pub struct CryptoCodec {
    cipher: Option<Aes256Gcm>,
}

impl CryptoCodec {
    /// Build a codec from configuration.
    ///
    /// An empty key produces a codec whose every call fails with
    /// `KeyUnavailable`, so read paths that never touch sealed data still work.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidKey` if the key is not base64 or does not
    /// decode to 32 bytes.
    pub fn from_config(config: &CryptoConfig) -> Result<Self, CryptoError> {
        if !config.is_configured() {
            tracing::warn!("no case encryption key configured; sealed details are unavailable");
            return Ok(Self::without_key());
        }
        let bytes = STANDARD
            .decode(config.key.trim())
            .map_err(|e| CryptoError::InvalidKey(format!("not base64: {e}")))?;
        Self::from_key_bytes(&bytes)
    }

    /// Build a codec from raw key bytes.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidKey` unless `key` is exactly 32 bytes.
    pub fn from_key_bytes(key: &[u8]) -> Result<Self, CryptoError> {
        if key.len() != KEY_LEN {
            return Err(CryptoError::InvalidKey(format!(
                "expected {KEY_LEN} bytes, got {}",
                key.len()
            )));
        }
        let cipher = Aes256Gcm::new_from_slice(key)
            .map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
        Ok(Self {
            cipher: Some(cipher),
        })
    }

    #[must_use]
    pub const fn without_key() -> Self {
        Self { cipher: None }
    }

    #[must_use]
    pub const fn has_key(&self) -> bool {
        self.cipher.is_some()
    }

    /// Seal a serializable value into an opaque blob.
    ///
    /// # Errors
    ///
    /// `KeyUnavailable` without a key, `Serialize` if the value cannot be
    /// encoded as JSON, `Random` if no nonce can be drawn.
    pub fn encrypt<T: Serialize>(&self, value: &T) -> Result<String, CryptoError> {
        let cipher = self.cipher.as_ref().ok_or(CryptoError::KeyUnavailable)?;
        let plaintext = serde_json::to_vec(value)?;

        let mut nonce_bytes = [0u8; NONCE_SIZE];
        getrandom::fill(&mut nonce_bytes).map_err(|e| CryptoError::Random(e.to_string()))?;

        let ciphertext = cipher
            .encrypt(
                Nonce::from_slice(&nonce_bytes),
                Payload {
                    msg: &plaintext,
                    aad: SCHEME_AAD,
                },
            )
            .map_err(|_| CryptoError::CorruptPayload("encryption failed".into()))?;

        let mut sealed = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        sealed.extend_from_slice(&nonce_bytes);
        sealed.extend_from_slice(&ciphertext);
        Ok(format!("{SCHEME_V1}{}", STANDARD.encode(sealed)))
    }

    /// Open a blob produced by [`Self::encrypt`].
    ///
    /// # Errors
    ///
    /// `KeyUnavailable` without a key; `CorruptPayload` if the blob has the
    /// wrong scheme tag, bad base64, is truncated, fails authentication, or
    /// does not decode into `T`.
    pub fn decrypt<T: DeserializeOwned>(&self, blob: &str) -> Result<T, CryptoError> {
        let cipher = self.cipher.as_ref().ok_or(CryptoError::KeyUnavailable)?;

        let encoded = blob
            .strip_prefix(SCHEME_V1)
            .ok_or_else(|| CryptoError::CorruptPayload("unknown scheme tag".into()))?;
        let sealed = STANDARD
            .decode(encoded)
            .map_err(|e| CryptoError::CorruptPayload(format!("bad base64: {e}")))?;
        if sealed.len() <= NONCE_SIZE {
            return Err(CryptoError::CorruptPayload(format!(
                "blob too short ({} bytes)",
                sealed.len()
            )));
        }

        let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_SIZE);
        let plaintext = cipher
            .decrypt(
                Nonce::from_slice(nonce_bytes),
                Payload {
                    msg: ciphertext,
                    aad: SCHEME_AAD,
                },
            )
            .map_err(|_| CryptoError::CorruptPayload("authentication failed".into()))?;

        serde_json::from_slice(&plaintext)
            .map_err(|e| CryptoError::CorruptPayload(format!("payload shape: {e}")))
    }
}

impl std::fmt::Debug for CryptoCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptoCodec")
            .field("has_key", &self.has_key())
            .finish()
    }
}
