//! Errors raised while loading or checking Advocate configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be parsed or a value has the wrong type.
    #[error("failed to load configuration: {0}")]
    Figment(#[from] figment::Error),

    /// A section needed by the current operation is empty.
    #[error("'{section}' is not configured")]
    NotConfigured { section: String },

    /// A value parsed but is unusable.
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
