//! Repository methods on [`crate::service::AegisService`], one module per
//! entity.

pub mod audit;
pub mod mapping;
pub mod migration;
pub mod organization;
pub mod requirement;
pub mod template;
