//! Key material for the case-details codec.

use serde::{Deserialize, Serialize};

/// Length in bytes of a decoded AES-256 key.
pub const KEY_LEN: usize = 32;

/// Process-wide key configuration, read once at startup and never rotated
/// while the process runs.
#[derive(Clone, Default, Deserialize, Serialize)]
pub struct CryptoConfig {
    /// Base64-encoded 32-byte key. Empty means no key is configured.
    #[serde(default)]
    pub key: String,
}

impl CryptoConfig {
    /// Check if a key is present. Does not validate its encoding.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.key.trim().is_empty()
    }
}

impl std::fmt::Debug for CryptoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let key = if self.is_configured() { "<redacted>" } else { "<unset>" };
        f.debug_struct("CryptoConfig").field("key", &key).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        assert!(!CryptoConfig::default().is_configured());
    }

    #[test]
    fn whitespace_key_is_not_configured() {
        let config = CryptoConfig { key: "  ".into() };
        assert!(!config.is_configured());
    }

    #[test]
    fn debug_never_prints_key() {
        let config = CryptoConfig {
            key: "c2VjcmV0LWtleS1tYXRlcmlhbA==".into(),
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("c2VjcmV0"));
        assert!(rendered.contains("<redacted>"));
    }
}
