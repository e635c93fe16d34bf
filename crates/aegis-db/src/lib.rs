//! # aegis-db
//!
//! libSQL database operations for Aegis state.
//!
//! Handles all relational state: the requirements library, unified guidance
//! templates, framework requirement mappings, organizations, per-category
//! migration unit statuses, and the append-only audit trail.
//!
//! The database is the single authoritative store for guidance content;
//! nothing downstream re-parses rendered markdown out of source files.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
pub mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle for all Aegis state operations.
pub struct AegisDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl AegisDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Foreign keys are per-connection in SQLite.
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let aegis_db = Self { db, conn };
        aegis_db.run_migrations().await?;
        Ok(aegis_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Run a query, mapping errors into `DatabaseError`.
    pub async fn query(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<libsql::Rows, DatabaseError> {
        self.conn.query(sql, params).await.map_err(Into::into)
    }

    /// Execute a statement, returning the affected row count.
    pub async fn execute(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<u64, DatabaseError> {
        self.conn.execute(sql, params).await.map_err(Into::into)
    }

    /// Generate a prefixed ID via libSQL. Returns e.g. `"req-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}

#[cfg(test)]
mod tests {
    use super::AegisDb;
    use aegis_core::ids::{PREFIX_REQUIREMENT, has_prefix};

    #[tokio::test]
    async fn open_memory_runs_migrations() {
        let db = AegisDb::open_local(":memory:").await.expect("open");
        let mut rows = db
            .query("SELECT count(*) FROM requirements_library", ())
            .await
            .expect("table exists");
        let row = rows.next().await.expect("row").expect("row");
        assert_eq!(row.get::<i64>(0).expect("count"), 0);
    }

    #[tokio::test]
    async fn generated_ids_carry_prefix() {
        let db = AegisDb::open_local(":memory:").await.expect("open");
        let id = db.generate_id(PREFIX_REQUIREMENT).await.expect("id");
        assert!(has_prefix(&id, PREFIX_REQUIREMENT));
        assert_eq!(id.len(), "req-".len() + 8);
    }
}
