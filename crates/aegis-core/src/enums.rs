//! Framework, status, and action enums for Aegis.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! `MigrationStatus` carries a state machine and provides `allowed_next_states()`
//! to enforce valid transitions at the application layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Framework
// ---------------------------------------------------------------------------

/// Compliance framework a requirement belongs to.
///
/// CIS controls are tiered by Implementation Group (IG1/IG2/IG3); each group
/// is tracked as its own framework, matching the standards library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Framework {
    Iso27001,
    Iso27002,
    CisIg1,
    CisIg2,
    CisIg3,
}

impl Framework {
    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Iso27001 => "iso27001",
            Self::Iso27002 => "iso27002",
            Self::CisIg1 => "cis_ig1",
            Self::CisIg2 => "cis_ig2",
            Self::CisIg3 => "cis_ig3",
        }
    }

    /// All frameworks, in standards-library order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Iso27001,
            Self::Iso27002,
            Self::CisIg1,
            Self::CisIg2,
            Self::CisIg3,
        ]
    }

    /// Whether this is one of the CIS implementation groups.
    #[must_use]
    pub const fn is_cis(self) -> bool {
        matches!(self, Self::CisIg1 | Self::CisIg2 | Self::CisIg3)
    }

    /// Parse a legacy record ID prefix (`cis-ig2-1.1`, `iso27001-4.1`).
    #[must_use]
    pub fn from_legacy_prefix(id: &str) -> Option<Self> {
        let lower = id.to_ascii_lowercase();
        if lower.starts_with("cis-ig1") {
            Some(Self::CisIg1)
        } else if lower.starts_with("cis-ig2") {
            Some(Self::CisIg2)
        } else if lower.starts_with("cis-ig3") {
            Some(Self::CisIg3)
        } else if lower.starts_with("iso27001") || lower.starts_with("iso-27001") {
            Some(Self::Iso27001)
        } else if lower.starts_with("iso27002") || lower.starts_with("iso-27002") {
            Some(Self::Iso27002)
        } else {
            None
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RelevanceLevel
// ---------------------------------------------------------------------------

/// How strongly a framework requirement relates to a guidance template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RelevanceLevel {
    Primary,
    Supporting,
    Related,
}

impl RelevanceLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Supporting => "supporting",
            Self::Related => "related",
        }
    }
}

impl fmt::Display for RelevanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ReviewStatus
// ---------------------------------------------------------------------------

/// Editorial review status of a guidance template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Draft,
    PendingReview,
    Approved,
}

impl ReviewStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::PendingReview => "pending_review",
            Self::Approved => "approved",
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MigrationStatus
// ---------------------------------------------------------------------------

/// Status of a per-category migration unit.
///
/// ```text
/// pending → running → done
///                   → failed → running (retry)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MigrationStatus {
    Pending,
    Running,
    Done,
    Failed,
}

impl MigrationStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Running],
            Self::Running => &[Self::Done, Self::Failed],
            Self::Failed => &[Self::Running],
            Self::Done => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for MigrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// Domain entity kinds, used by the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Requirement,
    Template,
    Mapping,
    Organization,
    MigrationUnit,
}

impl EntityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Requirement => "requirement",
            Self::Template => "template",
            Self::Mapping => "mapping",
            Self::Organization => "organization",
            Self::MigrationUnit => "migration_unit",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AuditAction
// ---------------------------------------------------------------------------

/// Action recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Created,
    Updated,
    Deleted,
    CheckoutStarted,
}

impl AuditAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
            Self::CheckoutStarted => "checkout_started",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// BillingTier / BillingInterval
// ---------------------------------------------------------------------------

/// Subscription tier offered at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BillingTier {
    Starter,
    Professional,
    Enterprise,
}

impl BillingTier {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Starter => "starter",
            Self::Professional => "professional",
            Self::Enterprise => "enterprise",
        }
    }
}

impl fmt::Display for BillingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Billing interval offered at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BillingInterval {
    Monthly,
    Yearly,
}

impl BillingInterval {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl fmt::Display for BillingInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migration_status_transitions() {
        assert!(MigrationStatus::Pending.can_transition_to(MigrationStatus::Running));
        assert!(MigrationStatus::Running.can_transition_to(MigrationStatus::Done));
        assert!(MigrationStatus::Running.can_transition_to(MigrationStatus::Failed));
        assert!(MigrationStatus::Failed.can_transition_to(MigrationStatus::Running));
        assert!(!MigrationStatus::Done.can_transition_to(MigrationStatus::Running));
        assert!(!MigrationStatus::Pending.can_transition_to(MigrationStatus::Done));
    }

    #[test]
    fn framework_from_legacy_prefix() {
        assert_eq!(
            Framework::from_legacy_prefix("cis-ig2-1.1"),
            Some(Framework::CisIg2)
        );
        assert_eq!(
            Framework::from_legacy_prefix("iso27001-4.1"),
            Some(Framework::Iso27001)
        );
        assert_eq!(Framework::from_legacy_prefix("soc2-cc1.1"), None);
    }

    #[test]
    fn enums_serialize_snake_case() {
        assert_eq!(
            serde_json::to_string(&Framework::CisIg1).expect("serialize"),
            "\"cis_ig1\""
        );
        assert_eq!(
            serde_json::to_string(&MigrationStatus::Pending).expect("serialize"),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&BillingTier::Professional).expect("serialize"),
            "\"professional\""
        );
    }
}
