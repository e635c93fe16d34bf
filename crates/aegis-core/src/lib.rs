//! # aegis-core
//!
//! Core types, ID generation prefixes, and error types for Aegis.
//!
//! This crate provides the foundational types shared across all Aegis crates:
//! - Entity structs for all domain objects (requirements, guidance templates,
//!   framework mappings, organizations, migration units)
//! - Framework and status enums, including the migration unit state machine
//! - ID prefix constants
//! - Cross-cutting error types
//! - CLI response types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod responses;
