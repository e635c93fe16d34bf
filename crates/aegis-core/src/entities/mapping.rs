use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Framework, RelevanceLevel};

/// Join row linking a guidance template to a framework requirement code.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FrameworkMapping {
    pub id: String,
    pub template_id: String,
    pub framework: Framework,
    pub requirement_code: String,
    pub relevance: RelevanceLevel,
    /// Extraction confidence in `0.0..=1.0`.
    pub confidence: f64,
    pub created_at: DateTime<Utc>,
}
