//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default result limit.
const fn default_limit() -> u32 {
    20
}

/// Default delay between migration categories, in milliseconds.
const fn default_throttle_ms() -> u64 {
    100
}

/// Default importer write batch size.
const fn default_batch_size() -> u32 {
    8
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default result limit for list commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Delay between migration categories and import batches.
    #[serde(default = "default_throttle_ms")]
    pub throttle_ms: u64,

    /// Number of requirement writes per import batch.
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            throttle_ms: default_throttle_ms(),
            batch_size: default_batch_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.default_limit, 20);
        assert_eq!(config.throttle_ms, 100);
        assert_eq!(config.batch_size, 8);
    }
}
