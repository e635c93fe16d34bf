//! Migration unit repository.
//!
//! One row per category. Transitions go through the `MigrationStatus`
//! state machine; a disallowed transition is a `DatabaseError::InvalidState`
//! rather than a silent overwrite, so two concurrent runs cannot both mark
//! the same unit running.

use aegis_core::entities::MigrationUnit;
use aegis_core::enums::MigrationStatus;
use chrono::Utc;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum};
use crate::service::AegisService;

const UNIT_COLUMNS: &str = "unit, status, error, templates_created, mappings_created, updated_at";

fn row_to_unit(row: &libsql::Row) -> Result<MigrationUnit, DatabaseError> {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let templates_created = row.get::<i64>(3)? as u32;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mappings_created = row.get::<i64>(4)? as u32;
    Ok(MigrationUnit {
        unit: row.get::<String>(0)?,
        status: parse_enum(&row.get::<String>(1)?)?,
        error: get_opt_string(row, 2)?,
        templates_created,
        mappings_created,
        updated_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl AegisService {
    /// Ensure a unit row exists for the given category slug, creating it
    /// in `pending` if missing. Returns the current state either way.
    pub async fn ensure_unit(&self, unit: &str) -> Result<MigrationUnit, DatabaseError> {
        self.db()
            .execute(
                "INSERT INTO migration_units (unit, status, updated_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT (unit) DO NOTHING",
                libsql::params![
                    unit,
                    MigrationStatus::Pending.as_str(),
                    Utc::now().to_rfc3339()
                ],
            )
            .await?;
        self.get_unit(unit).await
    }

    /// Get a unit by category slug.
    pub async fn get_unit(&self, unit: &str) -> Result<MigrationUnit, DatabaseError> {
        let mut rows = self
            .db()
            .query(
                &format!("SELECT {UNIT_COLUMNS} FROM migration_units WHERE unit = ?1"),
                libsql::params![unit],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_unit(&row)
    }

    /// Move a unit to a new status, enforcing the state machine.
    ///
    /// `error` is recorded when transitioning to `failed` and cleared on
    /// any other transition.
    pub async fn transition_unit(
        &self,
        unit: &str,
        next: MigrationStatus,
        error: Option<&str>,
    ) -> Result<MigrationUnit, DatabaseError> {
        let current = self.get_unit(unit).await?;
        if !current.status.can_transition_to(next) {
            return Err(DatabaseError::InvalidState(format!(
                "Unit '{unit}' cannot move from {} to {next}",
                current.status
            )));
        }
        let error = if next == MigrationStatus::Failed {
            error
        } else {
            None
        };
        self.db()
            .execute(
                "UPDATE migration_units SET status = ?1, error = ?2, updated_at = ?3
                 WHERE unit = ?4",
                libsql::params![next.as_str(), error, Utc::now().to_rfc3339(), unit],
            )
            .await?;
        self.get_unit(unit).await
    }

    /// Mark every unit still in `running` as `failed`.
    ///
    /// A unit only stays `running` when a previous run died mid-category;
    /// without this reclaim the stuck row would reject the `running`
    /// transition on every later run. Returns the number of reclaimed units.
    pub async fn recover_stale_units(&self) -> Result<u64, DatabaseError> {
        self.db()
            .execute(
                "UPDATE migration_units SET status = ?1, error = ?2, updated_at = ?3
                 WHERE status = ?4",
                libsql::params![
                    MigrationStatus::Failed.as_str(),
                    "interrupted by process exit",
                    Utc::now().to_rfc3339(),
                    MigrationStatus::Running.as_str()
                ],
            )
            .await
    }

    /// Record how many templates and mappings a completed unit produced.
    pub async fn record_unit_counts(
        &self,
        unit: &str,
        templates_created: u32,
        mappings_created: u32,
    ) -> Result<(), DatabaseError> {
        let affected = self
            .db()
            .execute(
                "UPDATE migration_units
                 SET templates_created = ?1, mappings_created = ?2, updated_at = ?3
                 WHERE unit = ?4",
                libsql::params![
                    templates_created,
                    mappings_created,
                    Utc::now().to_rfc3339(),
                    unit
                ],
            )
            .await?;
        if affected == 0 {
            return Err(DatabaseError::NoResult);
        }
        Ok(())
    }

    /// All units ordered by slug, for the end-of-run summary.
    pub async fn list_units(&self) -> Result<Vec<MigrationUnit>, DatabaseError> {
        let mut rows = self
            .db()
            .query(
                &format!("SELECT {UNIT_COLUMNS} FROM migration_units ORDER BY unit"),
                (),
            )
            .await?;
        let mut units = Vec::new();
        while let Some(row) = rows.next().await? {
            units.push(row_to_unit(&row)?);
        }
        Ok(units)
    }

    /// Drop all unit rows. Used by `migrate --clean` for a fresh run.
    pub async fn reset_units(&self) -> Result<u64, DatabaseError> {
        self.db().execute("DELETE FROM migration_units", ()).await
    }
}

#[cfg(test)]
mod tests {
    use crate::error::DatabaseError;
    use crate::test_support::memory_service;
    use aegis_core::enums::MigrationStatus;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn ensure_is_idempotent() {
        let service = memory_service().await;
        let first = service.ensure_unit("access-control").await.expect("ensure");
        assert_eq!(first.status, MigrationStatus::Pending);

        service
            .transition_unit("access-control", MigrationStatus::Running, None)
            .await
            .expect("run");
        let again = service.ensure_unit("access-control").await.expect("ensure");
        assert_eq!(again.status, MigrationStatus::Running);
    }

    #[tokio::test]
    async fn failed_unit_can_retry_and_clears_error() {
        let service = memory_service().await;
        service.ensure_unit("network-security").await.expect("ensure");
        service
            .transition_unit("network-security", MigrationStatus::Running, None)
            .await
            .expect("run");
        let failed = service
            .transition_unit(
                "network-security",
                MigrationStatus::Failed,
                Some("legacy source missing"),
            )
            .await
            .expect("fail");
        assert_eq!(failed.error.as_deref(), Some("legacy source missing"));

        let retried = service
            .transition_unit("network-security", MigrationStatus::Running, None)
            .await
            .expect("retry");
        assert_eq!(retried.error, None);
    }

    #[tokio::test]
    async fn done_is_terminal() {
        let service = memory_service().await;
        service.ensure_unit("cryptography").await.expect("ensure");
        service
            .transition_unit("cryptography", MigrationStatus::Running, None)
            .await
            .expect("run");
        service
            .transition_unit("cryptography", MigrationStatus::Done, None)
            .await
            .expect("done");

        let err = service
            .transition_unit("cryptography", MigrationStatus::Running, None)
            .await
            .expect_err("done is terminal");
        assert!(matches!(err, DatabaseError::InvalidState(_)));
    }

    #[tokio::test]
    async fn stale_running_units_are_reclaimed_as_failed() {
        let service = memory_service().await;
        service.ensure_unit("access-control").await.expect("ensure");
        service
            .transition_unit("access-control", MigrationStatus::Running, None)
            .await
            .expect("run");

        let reclaimed = service.recover_stale_units().await.expect("recover");
        assert_eq!(reclaimed, 1);
        let unit = service.get_unit("access-control").await.expect("get");
        assert_eq!(unit.status, MigrationStatus::Failed);
        assert_eq!(unit.error.as_deref(), Some("interrupted by process exit"));

        // A reclaimed unit retries through the normal state machine.
        service
            .transition_unit("access-control", MigrationStatus::Running, None)
            .await
            .expect("retry");
        assert_eq!(service.recover_stale_units().await.expect("recover"), 1);
    }

    #[tokio::test]
    async fn counts_survive_listing() {
        let service = memory_service().await;
        service.ensure_unit("incident-response").await.expect("ensure");
        service
            .record_unit_counts("incident-response", 1, 5)
            .await
            .expect("counts");
        let units = service.list_units().await.expect("list");
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].templates_created, 1);
        assert_eq!(units[0].mappings_created, 5);
    }
}
