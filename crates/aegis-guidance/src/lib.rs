//! # aegis-guidance
//!
//! Pure domain logic for compliance guidance content:
//! - [`generator`] — deterministic Purpose/Implementation guidance from a
//!   control-family lookup table
//! - [`format`] — the single authoritative formatter; parses every legacy
//!   bullet/heading convention and renders the canonical form (a fixed point)
//! - [`sections`] — heading-keyword splitter and framework-reference
//!   extractor for legacy category guidance
//! - [`legacy`] — the embedded legacy guidance service and the 21 category
//!   names the migration walks
//! - [`locator`] — record locator for the legacy mock-data source file
//!
//! Everything here is synchronous and side-effect free; persistence lives in
//! `aegis-db`.

pub mod doc;
pub mod error;
pub mod format;
pub mod generator;
pub mod legacy;
pub mod locator;
pub mod sections;

pub use doc::GuidanceDoc;
pub use error::GuidanceError;
