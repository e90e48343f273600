//! Codec error types.

use adv_core::errors::CaseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    /// No key was configured for this process.
    #[error("no encryption key is configured")]
    KeyUnavailable,

    /// The configured key is not a base64-encoded 32-byte key.
    #[error("invalid encryption key: {0}")]
    InvalidKey(String),

    /// The blob was not produced by this codec's key and scheme.
    #[error("corrupt payload: {0}")]
    CorruptPayload(String),

    /// The value could not be serialized before sealing.
    #[error("failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The OS random source failed while drawing a nonce.
    #[error("random source failed: {0}")]
    Random(String),
}

impl From<CryptoError> for CaseError {
    fn from(error: CryptoError) -> Self {
        match error {
            CryptoError::KeyUnavailable | CryptoError::InvalidKey(_) => Self::KeyUnavailable,
            CryptoError::CorruptPayload(reason) => {
                tracing::warn!(%reason, "refusing to open case details");
                Self::CorruptPayload
            }
            CryptoError::Serialize(e) => Self::Validation(format!("case details: {e}")),
            CryptoError::Random(reason) => {
                tracing::error!(%reason, "nonce generation failed");
                Self::StorageUnavailable
            }
        }
    }
}
