//! Framework requirement mapping repository.

use aegis_core::entities::FrameworkMapping;
use aegis_core::enums::{AuditAction, EntityType, Framework, RelevanceLevel};
use aegis_core::ids::PREFIX_MAPPING;
use chrono::Utc;

use crate::error::DatabaseError;
use crate::helpers::{parse_datetime, parse_enum};
use crate::service::AegisService;

const MAPPING_COLUMNS: &str =
    "id, template_id, framework, requirement_code, relevance, confidence, created_at";

fn row_to_mapping(row: &libsql::Row) -> Result<FrameworkMapping, DatabaseError> {
    Ok(FrameworkMapping {
        id: row.get::<String>(0)?,
        template_id: row.get::<String>(1)?,
        framework: parse_enum(&row.get::<String>(2)?)?,
        requirement_code: row.get::<String>(3)?,
        relevance: parse_enum(&row.get::<String>(4)?)?,
        confidence: row.get::<f64>(5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

impl AegisService {
    /// Link a template to a framework requirement code.
    ///
    /// Confidence is clamped to `0.0..=1.0`.
    pub async fn create_mapping(
        &self,
        template_id: &str,
        framework: Framework,
        requirement_code: &str,
        relevance: RelevanceLevel,
        confidence: f64,
    ) -> Result<FrameworkMapping, DatabaseError> {
        let id = self.db().generate_id(PREFIX_MAPPING).await?;
        let confidence = confidence.clamp(0.0, 1.0);
        self.db()
            .execute(
                "INSERT INTO framework_requirement_mappings
                 (id, template_id, framework, requirement_code, relevance, confidence, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                libsql::params![
                    id.clone(),
                    template_id,
                    framework.as_str(),
                    requirement_code,
                    relevance.as_str(),
                    confidence,
                    Utc::now().to_rfc3339()
                ],
            )
            .await?;

        self.append_audit(
            EntityType::Mapping,
            &id,
            AuditAction::Created,
            Some(serde_json::json!({
                "template_id": template_id,
                "framework": framework.as_str(),
                "requirement_code": requirement_code,
            })),
        )
        .await?;

        let mut rows = self
            .db()
            .query(
                &format!(
                    "SELECT {MAPPING_COLUMNS} FROM framework_requirement_mappings WHERE id = ?1"
                ),
                libsql::params![id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_mapping(&row)
    }

    /// All mappings for one template, primary relevance first.
    pub async fn mappings_for_template(
        &self,
        template_id: &str,
    ) -> Result<Vec<FrameworkMapping>, DatabaseError> {
        let mut rows = self
            .db()
            .query(
                &format!(
                    "SELECT {MAPPING_COLUMNS} FROM framework_requirement_mappings
                     WHERE template_id = ?1
                     ORDER BY relevance, framework, requirement_code"
                ),
                libsql::params![template_id],
            )
            .await?;
        let mut mappings = Vec::new();
        while let Some(row) = rows.next().await? {
            mappings.push(row_to_mapping(&row)?);
        }
        Ok(mappings)
    }

    /// Total mapping count across all templates.
    pub async fn count_mappings(&self) -> Result<u64, DatabaseError> {
        let mut rows = self
            .db()
            .query("SELECT count(*) FROM framework_requirement_mappings", ())
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        #[allow(clippy::cast_sign_loss)]
        Ok(row.get::<i64>(0)? as u64)
    }
}

#[cfg(test)]
mod tests {
    use crate::repos::template::NewTemplate;
    use crate::test_support::memory_service;
    use aegis_core::enums::{Framework, RelevanceLevel};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn mappings_cascade_on_template_delete() {
        let service = memory_service().await;
        let template = service
            .create_template(&NewTemplate {
                category_name: "Network Security".to_string(),
                category_slug: "network-security".to_string(),
                foundation_content: "Segment and monitor the network.".to_string(),
                implementation_steps: vec![],
                practical_tools: vec![],
                audit_evidence: vec![],
                cross_references: vec![],
            })
            .await
            .expect("template");

        service
            .create_mapping(
                &template.id,
                Framework::Iso27001,
                "8.20",
                RelevanceLevel::Primary,
                0.9,
            )
            .await
            .expect("mapping");
        service
            .create_mapping(
                &template.id,
                Framework::CisIg1,
                "12.1",
                RelevanceLevel::Supporting,
                1.7,
            )
            .await
            .expect("mapping");

        let mappings = service
            .mappings_for_template(&template.id)
            .await
            .expect("list");
        assert_eq!(mappings.len(), 2);
        // Confidence is clamped on write.
        assert!(mappings.iter().all(|m| m.confidence <= 1.0));

        service.delete_all_templates().await.expect("delete");
        assert_eq!(service.count_mappings().await.expect("count"), 0);
    }
}
