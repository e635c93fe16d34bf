//! Database location configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Explicit database file path. Empty means `<project>/.aegis/aegis.db`.
    #[serde(default)]
    pub path: String,
}

impl DatabaseConfig {
    /// Whether an explicit path override is set.
    #[must_use]
    pub fn has_override(&self) -> bool {
        !self.path.is_empty()
    }
}
