//! Audit trail repository — append and query.

use aegis_core::entities::AuditEntry;
use aegis_core::enums::{AuditAction, EntityType};
use aegis_core::ids::PREFIX_AUDIT;
use chrono::Utc;

use crate::error::DatabaseError;
use crate::helpers::parse_datetime;
use crate::helpers::parse_enum;
use crate::service::AegisService;

fn row_to_entry(row: &libsql::Row) -> Result<AuditEntry, DatabaseError> {
    let detail = match row.get::<Option<String>>(4)? {
        Some(s) if !s.is_empty() => Some(
            serde_json::from_str(&s)
                .map_err(|e| DatabaseError::Query(format!("Invalid audit detail JSON: {e}")))?,
        ),
        _ => None,
    };
    Ok(AuditEntry {
        id: row.get::<String>(0)?,
        entity_type: parse_enum(&row.get::<String>(1)?)?,
        entity_id: row.get::<String>(2)?,
        action: parse_enum(&row.get::<String>(3)?)?,
        detail,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl AegisService {
    /// Append one audit trail entry for a mutation.
    pub async fn append_audit(
        &self,
        entity_type: EntityType,
        entity_id: &str,
        action: AuditAction,
        detail: Option<serde_json::Value>,
    ) -> Result<(), DatabaseError> {
        let id = self.db().generate_id(PREFIX_AUDIT).await?;
        let detail_text = match detail {
            Some(value) => Some(
                serde_json::to_string(&value)
                    .map_err(|e| DatabaseError::Query(format!("Audit detail: {e}")))?,
            ),
            None => None,
        };
        self.db()
            .execute(
                "INSERT INTO audit_trail (id, entity_type, entity_id, action, detail, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    id,
                    entity_type.as_str(),
                    entity_id,
                    action.as_str(),
                    detail_text,
                    Utc::now().to_rfc3339()
                ],
            )
            .await?;
        Ok(())
    }

    /// Most recent audit entries for one entity, newest first.
    pub async fn audit_for_entity(
        &self,
        entity_type: EntityType,
        entity_id: &str,
        limit: u32,
    ) -> Result<Vec<AuditEntry>, DatabaseError> {
        let mut rows = self
            .db()
            .query(
                "SELECT id, entity_type, entity_id, action, detail, created_at
                 FROM audit_trail
                 WHERE entity_type = ?1 AND entity_id = ?2
                 ORDER BY created_at DESC LIMIT ?3",
                libsql::params![entity_type.as_str(), entity_id, limit],
            )
            .await?;

        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(row_to_entry(&row)?);
        }
        Ok(entries)
    }
}
