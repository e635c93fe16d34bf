use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Framework;

/// One compliance control from the requirements library.
///
/// `guidance_legacy` holds whatever free text the record was imported with;
/// `guidance` holds the canonical two-section Purpose/Implementation string
/// produced by the generator or the formatter. The two are never mixed.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Requirement {
    pub id: String,
    pub framework: Framework,
    /// Control code within the framework, e.g. `1.1` or `A.5.1`.
    pub code: String,
    /// Section or clause grouping, e.g. CIS control family `1`.
    pub section: Option<String>,
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    /// Free-text guidance carried over from the legacy source, unmodified.
    pub guidance_legacy: Option<String>,
    /// Canonical Purpose/Implementation guidance.
    pub guidance: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
