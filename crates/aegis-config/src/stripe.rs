//! Stripe API configuration.

use serde::{Deserialize, Serialize};

/// Default Stripe API base URL. Overridable so tests can point at a local stub.
fn default_api_base() -> String {
    String::from("https://api.stripe.com")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeConfig {
    /// Secret API key (`sk_live_...` / `sk_test_...`).
    #[serde(default)]
    pub secret_key: String,

    /// API base URL.
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl Default for StripeConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            api_base: default_api_base(),
        }
    }
}

impl StripeConfig {
    /// Check if the Stripe config has the minimum required fields.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.secret_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = StripeConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.api_base, "https://api.stripe.com");
    }

    #[test]
    fn configured_when_secret_key_set() {
        let config = StripeConfig {
            secret_key: "sk_test_123".into(),
            ..Default::default()
        };
        assert!(config.is_configured());
    }
}
