use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::MigrationStatus;

/// Per-category migration work item.
///
/// One row per category slug. The status survives the process, so a crashed
/// or partially failed run can be resumed and summarized from the table
/// rather than from an in-memory error list.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MigrationUnit {
    pub unit: String,
    pub status: MigrationStatus,
    pub error: Option<String>,
    pub templates_created: u32,
    pub mappings_created: u32,
    pub updated_at: DateTime<Utc>,
}
