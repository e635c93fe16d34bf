//! Deterministic guidance generation from a control-family lookup table.
//!
//! Maps a control's framework, code, and description to a canonical
//! [`GuidanceDoc`]. Bullets come from a hardcoded table keyed by control
//! family: CIS families match on the section digit before the first dot,
//! ISO families on the normalized clause prefix. Anything unmatched falls
//! through to a generic six-bullet template, so the generator never returns
//! an empty document.

use aegis_core::enums::Framework;

use crate::doc::GuidanceDoc;

/// Six-bullet implementation list for one control family.
struct Family {
    framework_kind: FamilyKind,
    prefix: &'static str,
    bullets: [&'static str; 6],
}

#[derive(PartialEq, Eq, Clone, Copy)]
enum FamilyKind {
    Cis,
    Iso,
}

const FAMILIES: &[Family] = &[
    Family {
        framework_kind: FamilyKind::Cis,
        prefix: "1",
        bullets: [
            "Deploy automated discovery tools to enumerate all enterprise assets on the network",
            "Record every asset in a central inventory with owner, location, and network address",
            "Reconcile the inventory against DHCP leases and scan results at least weekly",
            "Flag and investigate unauthorized assets within 24 hours of detection",
            "Remove or quarantine assets that cannot be brought under management",
            "Review inventory completeness with asset owners on a defined schedule",
        ],
    },
    Family {
        framework_kind: FamilyKind::Cis,
        prefix: "2",
        bullets: [
            "Maintain a software inventory covering every installed application and version",
            "Use allowlisting to ensure only authorized software executes",
            "Track installed software against the approved catalog continuously",
            "Remove unsupported or unauthorized software within the remediation window",
            "Tie each software entry to a business owner and justification",
            "Audit the software inventory on the same cadence as the asset inventory",
        ],
    },
    Family {
        framework_kind: FamilyKind::Cis,
        prefix: "3",
        bullets: [
            "Classify data according to the enterprise data management scheme",
            "Map where each data class is stored, processed, and transmitted",
            "Apply access controls that follow the classification, not the system",
            "Encrypt sensitive data at rest and in transit",
            "Define and enforce retention and secure disposal procedures",
            "Log and review access to the most sensitive data classes",
        ],
    },
    Family {
        framework_kind: FamilyKind::Cis,
        prefix: "4",
        bullets: [
            "Establish hardened configuration baselines for every platform in use",
            "Apply baselines through automated configuration management",
            "Detect and alert on drift from the approved baseline",
            "Re-certify baselines whenever platforms or threats change",
            "Restrict administrative interfaces to managed networks",
            "Document approved exceptions with owner and expiry",
        ],
    },
    Family {
        framework_kind: FamilyKind::Cis,
        prefix: "5",
        bullets: [
            "Maintain an inventory of all accounts, including service accounts",
            "Disable dormant accounts after a defined period of inactivity",
            "Enforce unique credentials and multi-factor authentication",
            "Restrict administrator privileges to dedicated accounts",
            "Review account privileges against role requirements quarterly",
            "Centralize account lifecycle management through a directory service",
        ],
    },
    Family {
        framework_kind: FamilyKind::Iso,
        prefix: "5.1",
        bullets: [
            "Write an information security policy approved by top management",
            "Derive topic-specific policies from the overarching policy",
            "Communicate policies to all personnel and relevant external parties",
            "Review policies at planned intervals and after significant change",
            "Record acknowledgement of policy by every employee",
            "Keep superseded policy versions for audit traceability",
        ],
    },
    Family {
        framework_kind: FamilyKind::Iso,
        prefix: "5",
        bullets: [
            "Assign and document information security roles and responsibilities",
            "Segregate conflicting duties across roles",
            "Keep contact with authorities and special interest groups",
            "Integrate security into project management from initiation",
            "Maintain an inventory of information and associated assets",
            "Verify organizational controls during internal audits",
        ],
    },
    Family {
        framework_kind: FamilyKind::Iso,
        prefix: "8",
        bullets: [
            "Harden and monitor user endpoint devices",
            "Restrict privileged access rights and review them regularly",
            "Control access to source code and configuration repositories",
            "Protect systems against malware with layered controls",
            "Manage technical vulnerabilities from identification to remediation",
            "Back up information and test restoration procedures",
        ],
    },
];

/// Generic fallback used for any control code that matches no family.
const GENERIC_BULLETS: [&str; 6] = [
    "Assign a named owner accountable for this control",
    "Document the process that satisfies the control objective",
    "Implement technical or procedural measures proportionate to risk",
    "Collect evidence of operation on a defined cadence",
    "Review effectiveness at planned intervals",
    "Track exceptions and remediation actions to closure",
];

/// Generate canonical guidance for one control.
///
/// Pure and deterministic: identical inputs always yield identical output.
#[must_use]
pub fn generate(framework: Framework, code: &str, description: &str) -> GuidanceDoc {
    let bullets = lookup_family(framework, code).unwrap_or(&GENERIC_BULLETS);
    GuidanceDoc {
        purpose: description.trim().to_string(),
        implementation: bullets.iter().map(ToString::to_string).collect(),
    }
}

fn lookup_family(framework: Framework, code: &str) -> Option<&'static [&'static str; 6]> {
    let kind = if framework.is_cis() {
        FamilyKind::Cis
    } else {
        FamilyKind::Iso
    };
    let normalized = normalize_code(framework, code);

    // Longest-prefix wins so ISO `5.1` beats `5`.
    FAMILIES
        .iter()
        .filter(|family| family.framework_kind == kind)
        .filter(|family| matches_prefix(&normalized, family.prefix))
        .max_by_key(|family| family.prefix.len())
        .map(|family| &family.bullets)
}

/// Strip the ISO `A`/`A.` annex prefix; CIS codes pass through.
fn normalize_code(framework: Framework, code: &str) -> String {
    let trimmed = code.trim();
    if framework.is_cis() {
        return trimmed.to_string();
    }
    trimmed
        .strip_prefix("A.")
        .or_else(|| trimmed.strip_prefix('A'))
        .unwrap_or(trimmed)
        .to_string()
}

/// Prefix match on dot-separated code segments: `5.1` matches `5.1` and
/// `5.1.2` but not `5.12`.
fn matches_prefix(code: &str, prefix: &str) -> bool {
    code == prefix
        || code
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use aegis_core::enums::Framework;
    use pretty_assertions::assert_eq;

    use super::generate;

    #[test]
    fn cis_section_one_yields_asset_inventory_guidance() {
        let doc = generate(Framework::CisIg1, "1.1", "Maintain asset inventory");
        let rendered = doc.render();
        assert!(rendered.starts_with("Purpose: Maintain asset inventory"));
        assert!(rendered.contains("Implementation:"));
        assert_eq!(doc.implementation.len(), 6);
        assert!(doc.implementation[0].contains("automated discovery tools"));
    }

    #[test]
    fn generation_is_deterministic() {
        let a = generate(Framework::Iso27002, "A.5.1", "Policies for information security");
        let b = generate(Framework::Iso27002, "A.5.1", "Policies for information security");
        assert_eq!(a, b);
    }

    #[test]
    fn iso_policy_prefix_beats_broader_family() {
        let doc = generate(Framework::Iso27001, "A.5.1", "Policies for information security");
        assert!(doc.implementation[0].contains("information security policy"));
    }

    #[test]
    fn iso_code_without_annex_prefix_matches_too() {
        let with = generate(Framework::Iso27002, "A.8.7", "Protection against malware");
        let without = generate(Framework::Iso27002, "8.7", "Protection against malware");
        assert_eq!(with.implementation, without.implementation);
    }

    #[test]
    fn unmatched_code_falls_through_to_generic_template() {
        let doc = generate(Framework::CisIg3, "17.9", "Establish incident thresholds");
        assert_eq!(doc.implementation.len(), 6);
        assert!(doc.implementation[0].contains("named owner"));
        assert!(!doc.render().is_empty());
    }

    #[test]
    fn section_prefix_does_not_match_across_digit_boundaries() {
        // CIS 12.x must not match family "1".
        let doc = generate(Framework::CisIg2, "12.1", "Maintain network architecture diagrams");
        assert!(doc.implementation[0].contains("named owner"));
    }
}
