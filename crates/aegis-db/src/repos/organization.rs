//! Organization repository.

use aegis_core::entities::Organization;
use aegis_core::enums::{AuditAction, EntityType};
use aegis_core::ids::PREFIX_ORGANIZATION;
use chrono::Utc;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime};
use crate::service::AegisService;

const ORGANIZATION_COLUMNS: &str = "id, name, stripe_customer_id, created_at, updated_at";

fn row_to_organization(row: &libsql::Row) -> Result<Organization, DatabaseError> {
    Ok(Organization {
        id: row.get::<String>(0)?,
        name: row.get::<String>(1)?,
        stripe_customer_id: get_opt_string(row, 2)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
        updated_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl AegisService {
    /// Create an organization. `stripe_customer_id` starts empty and is
    /// filled in lazily on first checkout.
    pub async fn create_organization(&self, name: &str) -> Result<Organization, DatabaseError> {
        let id = self.db().generate_id(PREFIX_ORGANIZATION).await?;
        let now = Utc::now().to_rfc3339();
        self.db()
            .execute(
                "INSERT INTO organizations (id, name, stripe_customer_id, created_at, updated_at)
                 VALUES (?1, ?2, NULL, ?3, ?3)",
                libsql::params![id.clone(), name, now],
            )
            .await?;
        self.append_audit(
            EntityType::Organization,
            &id,
            AuditAction::Created,
            Some(serde_json::json!({ "name": name })),
        )
        .await?;
        self.get_organization(&id).await
    }

    /// Get an organization by ID. Returns `NotFound`-style `NoResult` when missing.
    pub async fn get_organization(&self, id: &str) -> Result<Organization, DatabaseError> {
        let mut rows = self
            .db()
            .query(
                &format!("SELECT {ORGANIZATION_COLUMNS} FROM organizations WHERE id = ?1"),
                libsql::params![id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_organization(&row)
    }

    /// Like [`Self::get_organization`] but `None` instead of an error when missing.
    pub async fn find_organization(
        &self,
        id: &str,
    ) -> Result<Option<Organization>, DatabaseError> {
        match self.get_organization(id).await {
            Ok(org) => Ok(Some(org)),
            Err(DatabaseError::NoResult) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Record the Stripe customer ID for an organization.
    pub async fn set_stripe_customer(
        &self,
        organization_id: &str,
        stripe_customer_id: &str,
    ) -> Result<(), DatabaseError> {
        let affected = self
            .db()
            .execute(
                "UPDATE organizations SET stripe_customer_id = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![stripe_customer_id, Utc::now().to_rfc3339(), organization_id],
            )
            .await?;
        if affected == 0 {
            return Err(DatabaseError::NoResult);
        }
        self.append_audit(
            EntityType::Organization,
            organization_id,
            AuditAction::Updated,
            Some(serde_json::json!({ "stripe_customer_id": stripe_customer_id })),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::memory_service;
    use aegis_core::ids::{PREFIX_ORGANIZATION, has_prefix};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn stripe_customer_starts_empty_and_persists() {
        let service = memory_service().await;
        let org = service
            .create_organization("Acme Corp")
            .await
            .expect("create");
        assert!(has_prefix(&org.id, PREFIX_ORGANIZATION));
        assert_eq!(org.stripe_customer_id, None);

        service
            .set_stripe_customer(&org.id, "cus_123")
            .await
            .expect("set");
        let reloaded = service.get_organization(&org.id).await.expect("get");
        assert_eq!(reloaded.stripe_customer_id.as_deref(), Some("cus_123"));
    }

    #[tokio::test]
    async fn find_returns_none_for_unknown_id() {
        let service = memory_service().await;
        let missing = service
            .find_organization("org-ffffffff")
            .await
            .expect("query");
        assert!(missing.is_none());
    }
}
