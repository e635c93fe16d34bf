//! Unified guidance template repository.
//!
//! Templates are unique per `category_slug`. The migration orchestrator
//! checks existence before inserting, so a re-run skips completed
//! categories instead of duplicating them.

use aegis_core::entities::GuidanceTemplate;
use aegis_core::enums::{AuditAction, EntityType, ReviewStatus};
use aegis_core::ids::PREFIX_TEMPLATE;
use chrono::Utc;

use crate::error::DatabaseError;
use crate::helpers::{parse_datetime, parse_enum, parse_string_vec, to_json_vec};
use crate::service::AegisService;

const TEMPLATE_COLUMNS: &str = "id, category_name, category_slug, foundation_content, \
     implementation_steps, practical_tools, audit_evidence, cross_references, \
     version, review_status, created_at, updated_at";

/// Input for creating a guidance template.
#[derive(Debug, Clone)]
pub struct NewTemplate {
    pub category_name: String,
    pub category_slug: String,
    pub foundation_content: String,
    pub implementation_steps: Vec<String>,
    pub practical_tools: Vec<String>,
    pub audit_evidence: Vec<String>,
    pub cross_references: Vec<String>,
}

fn row_to_template(row: &libsql::Row) -> Result<GuidanceTemplate, DatabaseError> {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let version = row.get::<i64>(8)? as u32;
    Ok(GuidanceTemplate {
        id: row.get::<String>(0)?,
        category_name: row.get::<String>(1)?,
        category_slug: row.get::<String>(2)?,
        foundation_content: row.get::<String>(3)?,
        implementation_steps: parse_string_vec(&row.get::<String>(4)?)?,
        practical_tools: parse_string_vec(&row.get::<String>(5)?)?,
        audit_evidence: parse_string_vec(&row.get::<String>(6)?)?,
        cross_references: parse_string_vec(&row.get::<String>(7)?)?,
        version,
        review_status: parse_enum(&row.get::<String>(9)?)?,
        created_at: parse_datetime(&row.get::<String>(10)?)?,
        updated_at: parse_datetime(&row.get::<String>(11)?)?,
    })
}

impl AegisService {
    /// Whether a template already exists for the given category slug.
    pub async fn template_exists(&self, category_slug: &str) -> Result<bool, DatabaseError> {
        let mut rows = self
            .db()
            .query(
                "SELECT count(*) FROM unified_guidance_templates WHERE category_slug = ?1",
                libsql::params![category_slug],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<i64>(0)? > 0)
    }

    /// Create a guidance template. Fails on duplicate `category_slug`.
    pub async fn create_template(
        &self,
        input: &NewTemplate,
    ) -> Result<GuidanceTemplate, DatabaseError> {
        let id = self.db().generate_id(PREFIX_TEMPLATE).await?;
        let now = Utc::now().to_rfc3339();
        self.db()
            .execute(
                "INSERT INTO unified_guidance_templates
                 (id, category_name, category_slug, foundation_content,
                  implementation_steps, practical_tools, audit_evidence,
                  cross_references, version, review_status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 1, ?9, ?10, ?10)",
                libsql::params![
                    id.clone(),
                    input.category_name.clone(),
                    input.category_slug.clone(),
                    input.foundation_content.clone(),
                    to_json_vec(&input.implementation_steps)?,
                    to_json_vec(&input.practical_tools)?,
                    to_json_vec(&input.audit_evidence)?,
                    to_json_vec(&input.cross_references)?,
                    ReviewStatus::Draft.as_str(),
                    now
                ],
            )
            .await?;

        self.append_audit(
            EntityType::Template,
            &id,
            AuditAction::Created,
            Some(serde_json::json!({ "category_slug": input.category_slug })),
        )
        .await?;

        self.get_template(&id).await
    }

    /// Get a template by ID.
    pub async fn get_template(&self, id: &str) -> Result<GuidanceTemplate, DatabaseError> {
        let mut rows = self
            .db()
            .query(
                &format!("SELECT {TEMPLATE_COLUMNS} FROM unified_guidance_templates WHERE id = ?1"),
                libsql::params![id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_template(&row)
    }

    /// Get a template by category slug.
    pub async fn find_template_by_slug(
        &self,
        category_slug: &str,
    ) -> Result<Option<GuidanceTemplate>, DatabaseError> {
        let mut rows = self
            .db()
            .query(
                &format!(
                    "SELECT {TEMPLATE_COLUMNS} FROM unified_guidance_templates
                     WHERE category_slug = ?1"
                ),
                libsql::params![category_slug],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_template(&row)?)),
            None => Ok(None),
        }
    }

    /// List all templates ordered by category name.
    pub async fn list_templates(&self) -> Result<Vec<GuidanceTemplate>, DatabaseError> {
        let mut rows = self
            .db()
            .query(
                &format!(
                    "SELECT {TEMPLATE_COLUMNS} FROM unified_guidance_templates
                     ORDER BY category_name"
                ),
                (),
            )
            .await?;
        let mut templates = Vec::new();
        while let Some(row) = rows.next().await? {
            templates.push(row_to_template(&row)?);
        }
        Ok(templates)
    }

    /// Delete all templates and their mappings (cascade).
    ///
    /// Used by `migrate --clean` before a fresh run.
    pub async fn delete_all_templates(&self) -> Result<u64, DatabaseError> {
        let deleted = self
            .db()
            .execute("DELETE FROM unified_guidance_templates", ())
            .await?;
        if deleted > 0 {
            self.append_audit(
                EntityType::Template,
                "*",
                AuditAction::Deleted,
                Some(serde_json::json!({ "deleted": deleted })),
            )
            .await?;
        }
        Ok(deleted)
    }
}
