//! Billing error types.

use thiserror::Error;

/// Errors from the checkout flow and the Stripe client.
#[derive(Debug, Error)]
pub enum BillingError {
    /// The request body was missing or malformed.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No organization exists for the given ID.
    #[error("Organization not found: {0}")]
    OrganizationNotFound(String),

    /// The tier and interval pair has no configured price.
    #[error("No price configured for tier '{tier}' with interval '{interval}'")]
    UnknownPrice { tier: String, interval: String },

    /// The Stripe API returned an error response.
    #[error("Stripe API error: {0}")]
    Stripe(String),

    /// HTTP transport failure talking to Stripe.
    #[error("Stripe request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Database failure.
    #[error(transparent)]
    Database(#[from] aegis_db::error::DatabaseError),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BillingError {
    /// Whether this error maps to an HTTP 400 (client fault) rather
    /// than a 500.
    #[must_use]
    pub const fn is_client_fault(&self) -> bool {
        matches!(
            self,
            Self::BadRequest(_) | Self::OrganizationNotFound(_) | Self::UnknownPrice { .. }
        )
    }
}
