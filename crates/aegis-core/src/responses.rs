//! CLI response types returned as JSON by `aeg` commands.
//!
//! These structs define the shape of JSON output for commands like
//! `aeg import`, `aeg guidance generate`, `aeg guidance format`, and
//! `aeg migrate`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Framework;

/// Per-framework record count from an import run.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FrameworkCount {
    pub framework: Framework,
    pub count: u32,
}

/// Response from `aeg import`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ImportResponse {
    /// Object literals the locator matched in the source file.
    pub records_located: u32,
    /// Blocks the locator could not parse (reported, never silently dropped).
    pub records_skipped: u32,
    pub inserted: u32,
    pub updated: u32,
    pub by_framework: Vec<FrameworkCount>,
    /// Control codes that failed format validation (e.g. ISO 27001 clause codes).
    pub format_violations: Vec<String>,
    /// Frameworks whose stored control count does not match the published
    /// standard after the import.
    pub count_mismatches: Vec<String>,
}

/// Response from `aeg guidance generate`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct GenerateResponse {
    pub generated: u32,
    pub skipped_existing: u32,
    pub total_requirements: u32,
}

/// Response from `aeg guidance format`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FormatResponse {
    pub reformatted: u32,
    pub already_canonical: u32,
    /// True when run with `--check` (no writes performed).
    pub check_only: bool,
    /// Requirement IDs whose stored guidance was not canonical.
    pub violations: Vec<String>,
}

/// One failed category from a migration run.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CategoryFailure {
    pub category: String,
    pub error: String,
}

/// Response from `aeg migrate`, materialized from the `migration_units` table.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MigrateResponse {
    pub categories_processed: u32,
    pub templates_created: u32,
    pub mappings_created: u32,
    pub skipped_existing: u32,
    pub failures: Vec<CategoryFailure>,
}

impl MigrateResponse {
    /// Whether the run completed without any category failure.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Response body for a successful checkout session creation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CheckoutResponse {
    pub url: String,
    #[serde(rename = "sessionId")]
    pub session_id: String,
}
