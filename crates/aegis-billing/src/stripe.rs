//! Stripe API client.
//!
//! The API sits behind the [`StripeApi`] trait so the checkout flow can be
//! exercised in tests without network access. The production implementation
//! posts form-encoded requests with reqwest, which is the wire format the
//! Stripe REST API expects.

use aegis_config::StripeConfig;
use serde::Deserialize;

use crate::error::BillingError;

/// A created Checkout Session.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct CustomerResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    message: String,
}

/// Parameters for creating a Checkout Session.
#[derive(Debug, Clone)]
pub struct SessionParams {
    pub customer_id: String,
    pub price_id: String,
    pub success_url: String,
    pub cancel_url: String,
    pub organization_id: String,
}

/// Minimal Stripe surface used by the checkout flow.
pub trait StripeApi {
    /// Create a customer, returning the Stripe customer ID.
    fn create_customer(
        &self,
        name: &str,
        organization_id: &str,
    ) -> impl Future<Output = Result<String, BillingError>> + Send;

    /// Create a subscription Checkout Session.
    fn create_checkout_session(
        &self,
        params: &SessionParams,
    ) -> impl Future<Output = Result<CheckoutSession, BillingError>> + Send;
}

/// Production client posting to the Stripe REST API.
pub struct StripeHttp {
    http: reqwest::Client,
    api_base: String,
    secret_key: String,
}

impl StripeHttp {
    #[must_use]
    pub fn new(config: &StripeConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: config.api_base.clone(),
            secret_key: config.secret_key.clone(),
        }
    }

    async fn post_form(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<reqwest::Response, BillingError> {
        let response = self
            .http
            .post(format!("{}{path}", self.api_base))
            .bearer_auth(&self.secret_key)
            .form(form)
            .send()
            .await?;

        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let message = match response.json::<StripeErrorBody>().await {
            Ok(body) => body.error.message,
            Err(_) => format!("HTTP {status}"),
        };
        Err(BillingError::Stripe(message))
    }
}

impl StripeApi for StripeHttp {
    async fn create_customer(
        &self,
        name: &str,
        organization_id: &str,
    ) -> Result<String, BillingError> {
        let response = self
            .post_form(
                "/v1/customers",
                &[
                    ("name", name),
                    ("metadata[organization_id]", organization_id),
                ],
            )
            .await?;
        let customer: CustomerResponse = response.json().await?;
        tracing::info!(customer_id = %customer.id, "created Stripe customer");
        Ok(customer.id)
    }

    async fn create_checkout_session(
        &self,
        params: &SessionParams,
    ) -> Result<CheckoutSession, BillingError> {
        let response = self
            .post_form(
                "/v1/checkout/sessions",
                &[
                    ("customer", params.customer_id.as_str()),
                    ("mode", "subscription"),
                    ("line_items[0][price]", params.price_id.as_str()),
                    ("line_items[0][quantity]", "1"),
                    ("success_url", params.success_url.as_str()),
                    ("cancel_url", params.cancel_url.as_str()),
                    (
                        "metadata[organization_id]",
                        params.organization_id.as_str(),
                    ),
                ],
            )
            .await?;
        let session: CheckoutSession = response.json().await?;
        tracing::info!(session_id = %session.id, "created checkout session");
        Ok(session)
    }
}
