//! Entity structs for all Aegis domain objects.
//!
//! Each entity maps to a table in the libSQL database. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` for JSON roundtrip and
//! schema export.

mod audit;
mod mapping;
mod migration;
mod organization;
mod requirement;
mod template;

pub use audit::AuditEntry;
pub use mapping::FrameworkMapping;
pub use migration::MigrationUnit;
pub use organization::Organization;
pub use requirement::Requirement;
pub use template::GuidanceTemplate;
