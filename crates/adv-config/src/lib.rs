//! # adv-config
//!
//! Layered configuration loading for Advocate using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ADVOCATE_*` prefix, `__` as separator)
//! 2. Project-level `.advocate/config.toml`
//! 3. User-level `~/.config/advocate/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `ADVOCATE_DATABASE__PATH` -> `database.path`,
//! `ADVOCATE_CRYPTO__KEY` -> `crypto.key`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use adv_config::AdvConfig;
//!
//! let config = AdvConfig::load_with_dotenv().expect("config");
//! config.require_crypto().expect("a case key must be configured");
//! println!("database: {}", config.database.path);
//! ```

mod crypto;
mod database;
mod error;
mod general;

pub use crypto::{CryptoConfig, KEY_LEN};
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AdvConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub crypto: CryptoConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl AdvConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be parsed or a value
    /// has the wrong type, and `ConfigError::InvalidValue` if [`Self::validate`]
    /// rejects the result.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".advocate/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("ADVOCATE_").split("__"))
    }

    /// Reject values that parse but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an empty `database.path` or a
    /// zero `general.default_limit`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.general.default_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.default_limit".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Fail unless a case key is configured.
    ///
    /// The codec itself tolerates a missing key (decrypt reports
    /// `KeyUnavailable`); binaries that write cases call this at startup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` for an empty `crypto.key`.
    pub fn require_crypto(&self) -> Result<&CryptoConfig, ConfigError> {
        if self.crypto.is_configured() {
            Ok(&self.crypto)
        } else {
            Err(ConfigError::NotConfigured {
                section: "crypto".into(),
            })
        }
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("advocate").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = AdvConfig::default();
        assert!(!config.crypto.is_configured());
        assert_eq!(config.database.path, "advocate.db");
        assert_eq!(config.general.default_limit, 50);
    }

    #[test]
    fn require_crypto_rejects_missing_key() {
        let config = AdvConfig::default();
        assert!(matches!(
            config.require_crypto(),
            Err(ConfigError::NotConfigured { ref section }) if section == "crypto"
        ));
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(AdvConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_limit_and_empty_path() {
        let mut config = AdvConfig::default();
        config.general.default_limit = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "general.default_limit"
        ));

        let mut config = AdvConfig::default();
        config.database.path = "  ".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "database.path"
        ));
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: AdvConfig = AdvConfig::figment().extract()?;
            assert!(!config.crypto.is_configured());
            assert_eq!(config.general.default_limit, 50);
            Ok(())
        });
    }
}
