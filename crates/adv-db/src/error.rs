//! Database error types for adv-db.

use adv_core::errors::CaseError;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB, lost conditional update).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Storage failures cross the service boundary as `StorageUnavailable`; the
/// underlying message is logged here and goes no further.
impl From<DatabaseError> for CaseError {
    fn from(error: DatabaseError) -> Self {
        tracing::error!(%error, "storage operation failed");
        Self::StorageUnavailable
    }
}
