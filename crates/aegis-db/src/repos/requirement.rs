//! Requirements library repository.
//!
//! Requirements are keyed by `(framework, code)`. Imports upsert on that
//! key: metadata columns are refreshed, but canonical guidance already
//! written by the generator or formatter is preserved unless `force` is
//! set.

use aegis_core::entities::Requirement;
use aegis_core::enums::{AuditAction, EntityType, Framework};
use aegis_core::ids::PREFIX_REQUIREMENT;
use chrono::Utc;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum};
use crate::service::AegisService;

/// Column order used by every requirement SELECT.
const REQUIREMENT_COLUMNS: &str = "id, framework, code, section, title, description, \
     category, guidance_legacy, guidance, created_at, updated_at";

/// Input for creating or refreshing a requirement row.
#[derive(Debug, Clone)]
pub struct NewRequirement {
    pub framework: Framework,
    pub code: String,
    pub section: Option<String>,
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub guidance_legacy: Option<String>,
}

fn row_to_requirement(row: &libsql::Row) -> Result<Requirement, DatabaseError> {
    Ok(Requirement {
        id: row.get::<String>(0)?,
        framework: parse_enum(&row.get::<String>(1)?)?,
        code: row.get::<String>(2)?,
        section: get_opt_string(row, 3)?,
        title: row.get::<String>(4)?,
        description: row.get::<String>(5)?,
        category: get_opt_string(row, 6)?,
        guidance_legacy: get_opt_string(row, 7)?,
        guidance: get_opt_string(row, 8)?,
        created_at: parse_datetime(&row.get::<String>(9)?)?,
        updated_at: parse_datetime(&row.get::<String>(10)?)?,
    })
}

impl AegisService {
    /// Insert or refresh a requirement, keyed by `(framework, code)`.
    ///
    /// On conflict the metadata columns are updated. The `guidance` column
    /// is left alone unless `force` is set, so a re-import never clobbers
    /// canonical guidance.
    pub async fn upsert_requirement(
        &self,
        input: &NewRequirement,
        force: bool,
    ) -> Result<Requirement, DatabaseError> {
        let existing = self
            .find_requirement(input.framework, &input.code)
            .await?;
        let now = Utc::now().to_rfc3339();

        let (id, action) = match existing {
            Some(req) => {
                let guidance_sql = if force {
                    "guidance = NULL,"
                } else {
                    ""
                };
                self.db()
                    .execute(
                        &format!(
                            "UPDATE requirements_library
                             SET section = ?1, title = ?2, description = ?3,
                                 category = ?4, guidance_legacy = ?5, {guidance_sql}
                                 updated_at = ?6
                             WHERE id = ?7"
                        ),
                        libsql::params![
                            input.section.clone(),
                            input.title.clone(),
                            input.description.clone(),
                            input.category.clone(),
                            input.guidance_legacy.clone(),
                            now.clone(),
                            req.id.clone()
                        ],
                    )
                    .await?;
                (req.id, AuditAction::Updated)
            }
            None => {
                let id = self.db().generate_id(PREFIX_REQUIREMENT).await?;
                self.db()
                    .execute(
                        "INSERT INTO requirements_library
                         (id, framework, code, section, title, description,
                          category, guidance_legacy, guidance, created_at, updated_at)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, NULL, ?9, ?9)",
                        libsql::params![
                            id.clone(),
                            input.framework.as_str(),
                            input.code.clone(),
                            input.section.clone(),
                            input.title.clone(),
                            input.description.clone(),
                            input.category.clone(),
                            input.guidance_legacy.clone(),
                            now.clone()
                        ],
                    )
                    .await?;
                (id, AuditAction::Created)
            }
        };

        self.append_audit(
            EntityType::Requirement,
            &id,
            action,
            Some(serde_json::json!({
                "framework": input.framework.as_str(),
                "code": input.code,
            })),
        )
        .await?;

        self.get_requirement(&id).await
    }

    /// Look up a requirement by framework and code.
    pub async fn find_requirement(
        &self,
        framework: Framework,
        code: &str,
    ) -> Result<Option<Requirement>, DatabaseError> {
        let mut rows = self
            .db()
            .query(
                &format!(
                    "SELECT {REQUIREMENT_COLUMNS} FROM requirements_library
                     WHERE framework = ?1 AND code = ?2"
                ),
                libsql::params![framework.as_str(), code],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_requirement(&row)?)),
            None => Ok(None),
        }
    }

    /// Get a requirement by ID.
    pub async fn get_requirement(&self, id: &str) -> Result<Requirement, DatabaseError> {
        let mut rows = self
            .db()
            .query(
                &format!("SELECT {REQUIREMENT_COLUMNS} FROM requirements_library WHERE id = ?1"),
                libsql::params![id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_requirement(&row)
    }

    /// Write canonical guidance for one requirement.
    pub async fn set_requirement_guidance(
        &self,
        id: &str,
        guidance: &str,
    ) -> Result<(), DatabaseError> {
        let affected = self
            .db()
            .execute(
                "UPDATE requirements_library SET guidance = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![guidance, Utc::now().to_rfc3339(), id],
            )
            .await?;
        if affected == 0 {
            return Err(DatabaseError::NoResult);
        }
        self.append_audit(EntityType::Requirement, id, AuditAction::Updated, None)
            .await
    }

    /// List requirements, optionally filtered by framework.
    ///
    /// Ordered by framework, then code. Codes sort textually, which matches
    /// the standards-library listing order used by the legacy export.
    pub async fn list_requirements(
        &self,
        framework: Option<Framework>,
        missing_guidance_only: bool,
    ) -> Result<Vec<Requirement>, DatabaseError> {
        let mut sql = format!(
            "SELECT {REQUIREMENT_COLUMNS} FROM requirements_library WHERE 1=1"
        );
        if framework.is_some() {
            sql.push_str(" AND framework = ?1");
        }
        if missing_guidance_only {
            sql.push_str(" AND (guidance IS NULL OR guidance = '')");
        }
        sql.push_str(" ORDER BY framework, code");

        let mut rows = match framework {
            Some(fw) => self.db().query(&sql, libsql::params![fw.as_str()]).await?,
            None => self.db().query(&sql, ()).await?,
        };

        let mut requirements = Vec::new();
        while let Some(row) = rows.next().await? {
            requirements.push(row_to_requirement(&row)?);
        }
        Ok(requirements)
    }

    /// Count requirements per framework. Frameworks with no rows report 0.
    pub async fn count_requirements_by_framework(
        &self,
    ) -> Result<Vec<(Framework, u32)>, DatabaseError> {
        let mut counts = Vec::new();
        for &framework in Framework::all() {
            let mut rows = self
                .db()
                .query(
                    "SELECT count(*) FROM requirements_library WHERE framework = ?1",
                    libsql::params![framework.as_str()],
                )
                .await?;
            let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let count = row.get::<i64>(0)? as u32;
            counts.push((framework, count));
        }
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::NewRequirement;
    use crate::test_support::memory_service;
    use aegis_core::enums::Framework;
    use pretty_assertions::assert_eq;

    fn sample(code: &str) -> NewRequirement {
        NewRequirement {
            framework: Framework::CisIg1,
            code: code.to_string(),
            section: Some("1".to_string()),
            title: "Establish and Maintain Detailed Enterprise Asset Inventory".to_string(),
            description: "Establish and maintain an accurate inventory of assets.".to_string(),
            category: Some("Asset Management".to_string()),
            guidance_legacy: Some("Track all hardware assets".to_string()),
        }
    }

    #[tokio::test]
    async fn upsert_is_keyed_by_framework_and_code() {
        let service = memory_service().await;
        let first = service
            .upsert_requirement(&sample("1.1"), false)
            .await
            .expect("insert");
        let second = service
            .upsert_requirement(&sample("1.1"), false)
            .await
            .expect("update");
        assert_eq!(first.id, second.id);

        let counts = service
            .count_requirements_by_framework()
            .await
            .expect("counts");
        let cis1 = counts
            .iter()
            .find(|(fw, _)| *fw == Framework::CisIg1)
            .expect("cis_ig1 present");
        assert_eq!(cis1.1, 1);
    }

    #[tokio::test]
    async fn reimport_preserves_guidance_unless_forced() {
        let service = memory_service().await;
        let req = service
            .upsert_requirement(&sample("1.2"), false)
            .await
            .expect("insert");
        service
            .set_requirement_guidance(&req.id, "Purpose: Keep the inventory fresh")
            .await
            .expect("set guidance");

        let after_reimport = service
            .upsert_requirement(&sample("1.2"), false)
            .await
            .expect("reimport");
        assert_eq!(
            after_reimport.guidance.as_deref(),
            Some("Purpose: Keep the inventory fresh")
        );

        let after_force = service
            .upsert_requirement(&sample("1.2"), true)
            .await
            .expect("forced reimport");
        assert_eq!(after_force.guidance, None);
    }

    #[tokio::test]
    async fn list_filters_missing_guidance() {
        let service = memory_service().await;
        let a = service
            .upsert_requirement(&sample("1.1"), false)
            .await
            .expect("insert");
        service
            .upsert_requirement(&sample("1.2"), false)
            .await
            .expect("insert");
        service
            .set_requirement_guidance(&a.id, "Purpose: X")
            .await
            .expect("set guidance");

        let missing = service
            .list_requirements(Some(Framework::CisIg1), true)
            .await
            .expect("list");
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].code, "1.2");
    }
}
