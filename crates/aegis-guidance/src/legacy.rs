//! The embedded legacy guidance service.
//!
//! The original migration pulled category guidance from a legacy in-process
//! service. That content is carried here as an embedded profile table, one
//! entry per category, rendered into the loose heading format that
//! [`crate::sections`] parses. Categories without framework references
//! exercise the migration's default-mapping fallback.

use crate::error::GuidanceError;

/// The 21 compliance categories the migration walks, in migration order.
pub const CATEGORIES: [&str; 21] = [
    "Governance & Leadership",
    "Risk Management",
    "Asset Management",
    "Access Control",
    "Identity Management",
    "Cryptography",
    "Physical Security",
    "Operations Security",
    "Network Security",
    "Communications Security",
    "Secure Development",
    "Configuration Management",
    "Vulnerability Management",
    "Logging & Monitoring",
    "Supplier Relationships",
    "Incident Response",
    "Business Continuity",
    "Compliance & Legal",
    "Human Resources Security",
    "Awareness & Training",
    "Data Protection & Privacy",
];

/// Make a URL-safe slug from a category name: lowercase, runs of
/// non-alphanumerics collapsed to single hyphens.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_hyphen = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

struct CategoryProfile {
    name: &'static str,
    focus: &'static str,
    primary_tool: &'static str,
    /// `FRAMEWORK REFERENCES:` lines, empty when the category has none.
    references: &'static [&'static str],
}

const PROFILES: [CategoryProfile; 21] = [
    CategoryProfile {
        name: "Governance & Leadership",
        focus: "management direction, accountability, and oversight of the security program",
        primary_tool: "a governance, risk and compliance platform",
        references: &["ISO 27001: 5.1 (primary, 0.95)", "ISO 27002: 5.4 (supporting, 0.8)"],
    },
    CategoryProfile {
        name: "Risk Management",
        focus: "identification, assessment, and treatment of information security risks",
        primary_tool: "a risk register with scored treatment plans",
        references: &["ISO 27001: 6.1 (primary, 0.95)", "ISO 27001: 8.2 (supporting, 0.8)"],
    },
    CategoryProfile {
        name: "Asset Management",
        focus: "a complete, owned inventory of information and supporting assets",
        primary_tool: "automated asset discovery feeding a central inventory",
        references: &["CIS IG1: 1.1 (primary, 0.9)", "ISO 27002: 5.9 (supporting, 0.8)"],
    },
    CategoryProfile {
        name: "Access Control",
        focus: "restriction of access to information based on business need",
        primary_tool: "a directory service with group-based entitlements",
        references: &["ISO 27001: 5.15 (primary, 0.9)", "CIS IG2: 6.1 (supporting, 0.7)"],
    },
    CategoryProfile {
        name: "Identity Management",
        focus: "the full lifecycle of identities from provisioning to removal",
        primary_tool: "an identity provider with automated joiner-mover-leaver flows",
        references: &["ISO 27002: 5.16 (primary, 0.9)", "CIS IG1: 5.1 (supporting, 0.8)"],
    },
    CategoryProfile {
        name: "Cryptography",
        focus: "effective and managed use of cryptography to protect information",
        primary_tool: "a managed key management service",
        references: &["ISO 27002: 8.24 (primary, 0.9)"],
    },
    CategoryProfile {
        name: "Physical Security",
        focus: "prevention of unauthorized physical access, damage, and interference",
        primary_tool: "badge access control with visitor logging",
        references: &["ISO 27002: 7.1 (primary, 0.9)"],
    },
    CategoryProfile {
        name: "Operations Security",
        focus: "correct and secure operation of information processing facilities",
        primary_tool: "runbook automation with change tracking",
        references: &["ISO 27002: 8.1 (primary, 0.85)"],
    },
    CategoryProfile {
        name: "Network Security",
        focus: "protection of information in networks and supporting infrastructure",
        primary_tool: "segmented network zones with managed firewalls",
        references: &["ISO 27002: 8.20 (primary, 0.9)", "CIS IG2: 12.1 (supporting, 0.7)"],
    },
    CategoryProfile {
        name: "Communications Security",
        focus: "secure transfer of information within the organization and with externals",
        primary_tool: "enforced TLS with managed certificates",
        references: &["ISO 27002: 5.14 (primary, 0.85)"],
    },
    CategoryProfile {
        name: "Secure Development",
        focus: "security built into the software development lifecycle",
        primary_tool: "pipeline-enforced code review and dependency scanning",
        references: &["ISO 27002: 8.25 (primary, 0.9)", "CIS IG2: 16.1 (supporting, 0.75)"],
    },
    CategoryProfile {
        name: "Configuration Management",
        focus: "hardened, drift-controlled configurations across all platforms",
        primary_tool: "declarative configuration management with drift detection",
        references: &["CIS IG1: 4.1 (primary, 0.9)", "ISO 27002: 8.9 (supporting, 0.8)"],
    },
    CategoryProfile {
        name: "Vulnerability Management",
        focus: "timely identification and remediation of technical vulnerabilities",
        primary_tool: "authenticated vulnerability scanning on a fixed cadence",
        references: &["ISO 27002: 8.8 (primary, 0.9)", "CIS IG1: 7.1 (supporting, 0.8)"],
    },
    CategoryProfile {
        name: "Logging & Monitoring",
        focus: "recording and review of events to detect anomalous activity",
        primary_tool: "centralized log aggregation with alerting rules",
        references: &["ISO 27002: 8.15 (primary, 0.9)", "CIS IG2: 8.2 (supporting, 0.8)"],
    },
    CategoryProfile {
        name: "Supplier Relationships",
        focus: "protection of assets accessible to suppliers and service providers",
        primary_tool: "a vendor register with tiered due-diligence reviews",
        references: &["ISO 27001: 5.19 (primary, 0.9)"],
    },
    CategoryProfile {
        name: "Incident Response",
        focus: "consistent management of security incidents from report to lessons learned",
        primary_tool: "an incident tracker with severity-driven playbooks",
        references: &["ISO 27002: 5.24 (primary, 0.9)", "CIS IG1: 17.1 (supporting, 0.8)"],
    },
    CategoryProfile {
        name: "Business Continuity",
        focus: "availability of information processing during disruption",
        primary_tool: "tested recovery plans with defined RTO and RPO",
        references: &["ISO 27002: 5.29 (primary, 0.85)"],
    },
    CategoryProfile {
        name: "Compliance & Legal",
        focus: "compliance with legal, statutory, regulatory, and contractual requirements",
        primary_tool: "a requirements register mapped to controls",
        references: &["ISO 27001: 5.31 (primary, 0.9)"],
    },
    // The remaining categories intentionally carry no references block; the
    // migration must fall back to the default ISO mapping for them.
    CategoryProfile {
        name: "Human Resources Security",
        focus: "security responsibilities before, during, and after employment",
        primary_tool: "screening and offboarding checklists tied to HR workflows",
        references: &[],
    },
    CategoryProfile {
        name: "Awareness & Training",
        focus: "personnel who understand and fulfil their security responsibilities",
        primary_tool: "role-based training with completion tracking",
        references: &[],
    },
    CategoryProfile {
        name: "Data Protection & Privacy",
        focus: "protection of personal data according to applicable regulation",
        primary_tool: "data mapping with records of processing activities",
        references: &[],
    },
];

/// In-process source of legacy category guidance text.
///
/// Deterministic: the same category always yields the same blob.
#[derive(Debug, Default)]
pub struct LegacyGuidanceService;

impl LegacyGuidanceService {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Render the legacy guidance blob for one category.
    ///
    /// # Errors
    ///
    /// Returns `GuidanceError::UnknownCategory` for names outside
    /// [`CATEGORIES`].
    pub fn content_for(&self, category: &str) -> Result<String, GuidanceError> {
        let profile = PROFILES
            .iter()
            .find(|p| p.name == category)
            .ok_or_else(|| GuidanceError::UnknownCategory {
                category: category.to_string(),
            })?;

        let mut text = format!(
            "{name} establishes {focus}. Auditors expect documented ownership \
and repeatable evidence for every control in this category.\n\n\
IMPLEMENTATION STEPS:\n\
- Define the {lower} policy and assign a control owner\n\
- Implement {focus}\n\
- Operate the controls on a documented cadence\n\
- Measure effectiveness and feed results into management review\n\n\
PRACTICAL TOOLS:\n\
- {tool}\n\
- Ticketing integration for exception handling\n\n\
AUDIT EVIDENCE:\n\
- Approved policy with review history\n\
- Operational records demonstrating the documented cadence\n\n\
CROSS REFERENCES:\n\
- Governance & Leadership\n",
            name = profile.name,
            focus = profile.focus,
            lower = profile.name.to_lowercase(),
            tool = profile.primary_tool,
        );

        if !profile.references.is_empty() {
            text.push_str("\nFRAMEWORK REFERENCES:\n");
            for reference in profile.references {
                text.push_str("- ");
                text.push_str(reference);
                text.push('\n');
            }
        }

        Ok(text)
    }
}
