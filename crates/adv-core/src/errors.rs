//! The error taxonomy returned by every case operation.
//!
//! Crate-internal errors (`DatabaseError`, `CryptoError`, `ConfigError`) are
//! defined in their own crates and converted into `CaseError` at the service
//! boundary. A `CaseError` never carries raw storage text, so transport layers
//! can render it verbatim.

use thiserror::Error;

/// Named failure conditions of the case lifecycle engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CaseError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Role or ownership check failed.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Target status is not a member of the enumerated set.
    #[error("Invalid status: '{0}'")]
    InvalidStatus(String),

    /// Referenced athlete or lawyer does not exist or has the wrong role.
    #[error("Invalid party: {0}")]
    InvalidParty(String),

    /// Encrypted payload was not produced by the configured key and scheme.
    #[error("Encrypted payload is corrupt or was sealed with another key")]
    CorruptPayload,

    /// No decryption key is configured for this process.
    #[error("No encryption key is configured")]
    KeyUnavailable,

    /// Transient backend failure. Safe for the caller to retry.
    #[error("Storage is unavailable")]
    StorageUnavailable,

    /// Input failed validation (missing or malformed field).
    #[error("Validation error: {0}")]
    Validation(String),
}

impl CaseError {
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    /// Stable machine-readable code for transport mapping.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::Forbidden(_) => "forbidden",
            Self::InvalidStatus(_) => "invalid_status",
            Self::InvalidParty(_) => "invalid_party",
            Self::CorruptPayload => "corrupt_payload",
            Self::KeyUnavailable => "key_unavailable",
            Self::StorageUnavailable => "storage_unavailable",
            Self::Validation(_) => "validation",
        }
    }

    /// Whether a caller-side retry can succeed without changing the request.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::StorageUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_storage_errors_are_retryable() {
        assert!(CaseError::StorageUnavailable.is_retryable());
        assert!(!CaseError::KeyUnavailable.is_retryable());
        assert!(!CaseError::not_found("doping_case", "cas-1").is_retryable());
    }

    #[test]
    fn codes_are_snake_case() {
        let errors = [
            CaseError::not_found("doping_case", "cas-1"),
            CaseError::Forbidden("x".into()),
            CaseError::InvalidStatus("x".into()),
            CaseError::InvalidParty("x".into()),
            CaseError::CorruptPayload,
            CaseError::KeyUnavailable,
            CaseError::StorageUnavailable,
            CaseError::Validation("x".into()),
        ];
        for err in errors {
            let code = err.code();
            assert!(code.chars().all(|c| c.is_ascii_lowercase() || c == '_'), "{code}");
        }
    }

    #[test]
    fn not_found_message_names_entity() {
        let err = CaseError::not_found("doping_case", "cas-0000abcd");
        assert_eq!(err.to_string(), "Entity not found: doping_case cas-0000abcd");
    }
}
