//! Checkout session creation flow.
//!
//! Mirrors the billing edge handler: validate the organization, resolve the
//! price, lazily create the Stripe customer, create the session, record the
//! audit entry. Customer creation is lazy and the resulting ID is persisted
//! on the organization row, so a second checkout for the same organization
//! reuses the customer instead of creating another.

use aegis_core::enums::{AuditAction, BillingInterval, BillingTier, EntityType};
use aegis_core::responses::CheckoutResponse;
use aegis_db::service::AegisService;
use serde::Deserialize;

use crate::error::BillingError;
use crate::prices::price_id;
use crate::stripe::{SessionParams, StripeApi};

/// JSON body of `POST /create-checkout-session`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub organization_id: String,
    pub tier: BillingTier,
    /// Display amount in cents, recorded in the audit trail. The charged
    /// amount always comes from the resolved Stripe price.
    pub amount: u64,
    pub interval: BillingInterval,
    pub success_url: String,
    pub cancel_url: String,
}

/// Drives the checkout flow against the database and a Stripe client.
pub struct CheckoutFlow<'a, S: StripeApi> {
    service: &'a AegisService,
    stripe: &'a S,
}

impl<'a, S: StripeApi> CheckoutFlow<'a, S> {
    #[must_use]
    pub const fn new(service: &'a AegisService, stripe: &'a S) -> Self {
        Self { service, stripe }
    }

    /// Create a Checkout Session for the request.
    ///
    /// # Errors
    ///
    /// Returns a client-fault error (`OrganizationNotFound`, `UnknownPrice`,
    /// `BadRequest`) for invalid input, or `Stripe`/`Database` for
    /// downstream failures.
    pub async fn create_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutResponse, BillingError> {
        if request.success_url.is_empty() || request.cancel_url.is_empty() {
            return Err(BillingError::BadRequest(
                "successUrl and cancelUrl are required".into(),
            ));
        }

        let organization = self
            .service
            .find_organization(&request.organization_id)
            .await?
            .ok_or_else(|| {
                BillingError::OrganizationNotFound(request.organization_id.clone())
            })?;

        let price = price_id(request.tier, request.interval).ok_or_else(|| {
            BillingError::UnknownPrice {
                tier: request.tier.to_string(),
                interval: request.interval.to_string(),
            }
        })?;

        let customer_id = match organization.stripe_customer_id {
            Some(id) => id,
            None => {
                let id = self
                    .stripe
                    .create_customer(&organization.name, &organization.id)
                    .await?;
                self.service
                    .set_stripe_customer(&organization.id, &id)
                    .await?;
                id
            }
        };

        let session = self
            .stripe
            .create_checkout_session(&SessionParams {
                customer_id,
                price_id: price.to_string(),
                success_url: request.success_url.clone(),
                cancel_url: request.cancel_url.clone(),
                organization_id: organization.id.clone(),
            })
            .await?;

        self.service
            .append_audit(
                EntityType::Organization,
                &organization.id,
                AuditAction::CheckoutStarted,
                Some(serde_json::json!({
                    "tier": request.tier.as_str(),
                    "interval": request.interval.as_str(),
                    "amount": request.amount,
                    "session_id": session.id,
                })),
            )
            .await?;

        Ok(CheckoutResponse {
            url: session.url,
            session_id: session.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{CheckoutFlow, CheckoutRequest};
    use crate::error::BillingError;
    use crate::stripe::{CheckoutSession, SessionParams, StripeApi};
    use aegis_core::enums::{AuditAction, BillingInterval, BillingTier, EntityType};
    use aegis_db::test_support::memory_service;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fake Stripe client counting customer creations.
    #[derive(Default)]
    struct FakeStripe {
        customers_created: AtomicUsize,
        sessions_created: AtomicUsize,
    }

    impl StripeApi for FakeStripe {
        async fn create_customer(
            &self,
            _name: &str,
            _organization_id: &str,
        ) -> Result<String, BillingError> {
            let n = self.customers_created.fetch_add(1, Ordering::SeqCst);
            Ok(format!("cus_fake_{n}"))
        }

        async fn create_checkout_session(
            &self,
            params: &SessionParams,
        ) -> Result<CheckoutSession, BillingError> {
            let n = self.sessions_created.fetch_add(1, Ordering::SeqCst);
            Ok(CheckoutSession {
                id: format!("cs_fake_{n}"),
                url: format!(
                    "https://checkout.stripe.com/{}/{}",
                    params.customer_id, params.price_id
                ),
            })
        }
    }

    fn request_for(organization_id: &str) -> CheckoutRequest {
        CheckoutRequest {
            organization_id: organization_id.to_string(),
            tier: BillingTier::Professional,
            amount: 9900,
            interval: BillingInterval::Monthly,
            success_url: "https://app.example.com/success".to_string(),
            cancel_url: "https://app.example.com/cancel".to_string(),
        }
    }

    #[tokio::test]
    async fn creates_exactly_one_customer_and_reuses_it() {
        let service = memory_service().await;
        let org = service.create_organization("Acme Corp").await.expect("org");
        let stripe = FakeStripe::default();
        let flow = CheckoutFlow::new(&service, &stripe);

        let first = flow
            .create_session(&request_for(&org.id))
            .await
            .expect("first session");
        assert_eq!(stripe.customers_created.load(Ordering::SeqCst), 1);
        assert_eq!(first.session_id, "cs_fake_0");

        let reloaded = service.get_organization(&org.id).await.expect("org");
        assert_eq!(reloaded.stripe_customer_id.as_deref(), Some("cus_fake_0"));

        flow.create_session(&request_for(&org.id))
            .await
            .expect("second session");
        assert_eq!(stripe.customers_created.load(Ordering::SeqCst), 1);
        assert_eq!(stripe.sessions_created.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn unknown_organization_is_client_fault() {
        let service = memory_service().await;
        let stripe = FakeStripe::default();
        let flow = CheckoutFlow::new(&service, &stripe);

        let err = flow
            .create_session(&request_for("org-ffffffff"))
            .await
            .expect_err("missing org");
        assert!(matches!(err, BillingError::OrganizationNotFound(_)));
        assert!(err.is_client_fault());
        assert_eq!(stripe.customers_created.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_urls_are_rejected_before_any_stripe_call() {
        let service = memory_service().await;
        let org = service.create_organization("Acme Corp").await.expect("org");
        let stripe = FakeStripe::default();
        let flow = CheckoutFlow::new(&service, &stripe);

        let mut request = request_for(&org.id);
        request.success_url.clear();
        let err = flow
            .create_session(&request)
            .await
            .expect_err("missing url");
        assert!(matches!(err, BillingError::BadRequest(_)));
        assert_eq!(stripe.sessions_created.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn checkout_is_audited() {
        let service = memory_service().await;
        let org = service.create_organization("Acme Corp").await.expect("org");
        let stripe = FakeStripe::default();
        let flow = CheckoutFlow::new(&service, &stripe);

        flow.create_session(&request_for(&org.id))
            .await
            .expect("session");
        let entries = service
            .audit_for_entity(EntityType::Organization, &org.id, 10)
            .await
            .expect("audit");
        assert!(entries
            .iter()
            .any(|e| e.action == AuditAction::CheckoutStarted));
    }
}
