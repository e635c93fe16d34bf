//! Service layer orchestrating database mutations with audit entries.
//!
//! `AegisService` wraps `AegisDb`. All repo methods are implemented as
//! `impl AegisService` blocks under `repos/`; mutations append an audit
//! trail entry alongside the write.

use crate::AegisDb;
use crate::error::DatabaseError;

/// Orchestrates database mutations with the audit trail.
pub struct AegisService {
    db: AegisDb,
}

impl AegisService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` — Path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = AegisDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Create from an existing `AegisDb` (for testing).
    #[must_use]
    pub const fn from_db(db: AegisDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &AegisDb {
        &self.db
    }
}
