//! Service layer orchestrating case mutations with their audit entries.
//!
//! `CaseService` wraps `AdvDb` (raw database access) and `CryptoCodec`
//! (sealing of case details). All repo methods are implemented as
//! `impl CaseService` blocks under [`crate::repos`].

use adv_config::AdvConfig;
use adv_crypto::CryptoCodec;
use tokio::sync::{Mutex, MutexGuard};

use crate::AdvDb;
use crate::error::DatabaseError;

/// Orchestrates case mutations with the audit log.
///
/// Every mutation method follows this protocol:
/// 1. Take the write lock
/// 2. Validate referenced parties and load current state
/// 3. Begin transaction
/// 4. Execute SQL and append the audit entry (inside transaction)
/// 5. Commit, or roll back on any error
///
/// Reads go through the same connection, so they hold the lock too and never
/// observe a transaction that is still open.
pub struct CaseService {
    db: AdvDb,
    codec: CryptoCodec,
    conn_lock: Mutex<()>,
}

impl CaseService {
    /// Create a new service over a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    /// * `codec` - Codec holding the process-wide case key.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str, codec: CryptoCodec) -> Result<Self, DatabaseError> {
        let db = AdvDb::open_local(db_path).await?;
        Ok(Self::from_db(db, codec))
    }

    /// Create a service from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Other` for a malformed key, or `DatabaseError`
    /// if the database cannot be opened.
    pub async fn from_config(config: &AdvConfig) -> Result<Self, DatabaseError> {
        let codec = CryptoCodec::from_config(&config.crypto)
            .map_err(|e| DatabaseError::Other(e.into()))?;
        Self::new_local(&config.database.path, codec).await
    }

    /// Create from an existing `AdvDb` (for testing).
    #[must_use]
    pub fn from_db(db: AdvDb, codec: CryptoCodec) -> Self {
        Self {
            db,
            codec,
            conn_lock: Mutex::new(()),
        }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &AdvDb {
        &self.db
    }

    /// Access the case-details codec.
    #[must_use]
    pub const fn codec(&self) -> &CryptoCodec {
        &self.codec
    }

    /// Serialize mutations. Held for the whole read-validate-write unit.
    pub(crate) async fn write_guard(&self) -> MutexGuard<'_, ()> {
        self.conn_lock.lock().await
    }

    /// Held by public reads for the duration of their queries.
    pub(crate) async fn read_guard(&self) -> MutexGuard<'_, ()> {
        self.conn_lock.lock().await
    }

    /// Open a transaction on the service connection.
    pub(crate) async fn begin(&self) -> Result<libsql::Transaction, DatabaseError> {
        Ok(self.db.conn().transaction().await?)
    }
}

/// Commit `tx` if the unit of work succeeded, roll it back otherwise.
pub(crate) async fn finish<T>(
    tx: libsql::Transaction,
    result: Result<T, DatabaseError>,
) -> Result<T, DatabaseError> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(error) => {
            if let Err(rollback) = tx.rollback().await {
                tracing::error!(%rollback, "rollback failed after {error}");
            }
            Err(error)
        }
    }
}
