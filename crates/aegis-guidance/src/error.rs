//! Guidance error types.

use thiserror::Error;

/// Errors from guidance domain logic.
#[derive(Debug, Error)]
pub enum GuidanceError {
    /// The legacy guidance service has no content for a category.
    #[error("No legacy guidance content for category '{category}'")]
    UnknownCategory { category: String },

    /// A legacy source file contained no recognizable requirement records.
    #[error("No requirement records located in source ({reason})")]
    EmptySource { reason: String },
}
