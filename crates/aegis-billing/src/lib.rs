//! # aegis-billing
//!
//! Stripe checkout flow for Aegis organizations.
//!
//! The flow resolves a price from the tier and interval lookup table,
//! lazily creates the Stripe customer for the organization, creates a
//! Checkout Session, and records the action in the audit trail. A small
//! `tiny_http` endpoint exposes it as `POST /create-checkout-session`
//! with permissive CORS.

pub mod checkout;
pub mod error;
pub mod prices;
pub mod server;
pub mod stripe;

pub use checkout::{CheckoutFlow, CheckoutRequest};
pub use error::BillingError;
pub use stripe::{StripeApi, StripeHttp};
