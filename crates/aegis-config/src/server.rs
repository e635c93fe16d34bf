//! Checkout endpoint server configuration.

use serde::{Deserialize, Serialize};

/// Default bind address for `aeg serve`.
fn default_bind() -> String {
    String::from("127.0.0.1:8787")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Address the checkout endpoint binds to.
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bind_is_loopback() {
        assert_eq!(ServerConfig::default().bind, "127.0.0.1:8787");
    }
}
