//! Entity ID prefix constants and helpers.
//!
//! IDs are prefixed 8-char hex strings generated in SQL (see `AegisDb`),
//! e.g. `req-a3f8b2c1`. The prefix makes log lines and audit entries
//! self-describing.

/// Requirement rows in `requirements_library`.
pub const PREFIX_REQUIREMENT: &str = "req";

/// Guidance template rows in `unified_guidance_templates`.
pub const PREFIX_TEMPLATE: &str = "tpl";

/// Framework mapping rows in `framework_requirement_mappings`.
pub const PREFIX_MAPPING: &str = "map";

/// Organization rows.
pub const PREFIX_ORGANIZATION: &str = "org";

/// Audit trail entries.
pub const PREFIX_AUDIT: &str = "aud";

/// Check that an ID carries the expected prefix.
#[must_use]
pub fn has_prefix(id: &str, prefix: &str) -> bool {
    id.len() > prefix.len() + 1 && id.starts_with(prefix) && id.as_bytes()[prefix.len()] == b'-'
}

#[cfg(test)]
mod tests {
    use super::has_prefix;

    #[test]
    fn prefix_check_accepts_well_formed_ids() {
        assert!(has_prefix("req-a3f8b2c1", "req"));
        assert!(has_prefix("tpl-00000000", "tpl"));
    }

    #[test]
    fn prefix_check_rejects_wrong_or_bare_prefix() {
        assert!(!has_prefix("req", "req"));
        assert!(!has_prefix("reqa3f8b2c1", "req"));
        assert!(!has_prefix("tpl-a3f8b2c1", "req"));
    }
}
