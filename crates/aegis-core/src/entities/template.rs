use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ReviewStatus;

/// A unified guidance template for one compliance category.
///
/// Sections are discrete fields rather than embedded markdown, so no
/// formatting fix-up pass can ever be needed downstream. Uniqueness is
/// enforced on `category_slug`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct GuidanceTemplate {
    pub id: String,
    pub category_name: String,
    pub category_slug: String,
    pub foundation_content: String,
    pub implementation_steps: Vec<String>,
    pub practical_tools: Vec<String>,
    pub audit_evidence: Vec<String>,
    pub cross_references: Vec<String>,
    pub version: u32,
    pub review_status: ReviewStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
