//! Cross-cutting error types for Aegis.
//!
//! Domain-specific errors (`DatabaseError`, `GuidanceError`, `BillingError`)
//! live in their respective crates. Errors converge on `anyhow` at the CLI
//! boundary.

use thiserror::Error;

/// Errors that can be raised by any Aegis crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A migration unit transition was attempted that is not allowed.
    #[error("Invalid state transition: unit {unit} from {from} to {to}")]
    InvalidTransition {
        unit: String,
        from: String,
        to: String,
    },

    /// Data failed validation (format, counts, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
