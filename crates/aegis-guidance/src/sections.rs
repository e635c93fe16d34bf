//! Legacy category-guidance parsing for the migration.
//!
//! Legacy guidance text is one blob per category with loose keyword headings
//! (`FOUNDATION`, `IMPLEMENTATION STEPS`, `PRACTICAL TOOLS`, `AUDIT
//! EVIDENCE`, `CROSS REFERENCES`) and an optional `FRAMEWORK REFERENCES:`
//! block listing requirement codes. This module splits the blob into the
//! discrete template fields and extracts the references.

use std::sync::LazyLock;

use regex::Regex;

use aegis_core::enums::{Framework, RelevanceLevel};

/// Discrete template fields split out of one legacy category blob.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateSections {
    pub foundation: String,
    pub implementation_steps: Vec<String>,
    pub practical_tools: Vec<String>,
    pub audit_evidence: Vec<String>,
    pub cross_references: Vec<String>,
}

/// One framework requirement reference extracted from the
/// `FRAMEWORK REFERENCES:` block.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameworkRef {
    pub framework: Framework,
    pub code: String,
    pub relevance: RelevanceLevel,
    pub confidence: f64,
}

/// The fallback mapping used when a category carries no references block.
#[must_use]
pub fn default_framework_ref() -> FrameworkRef {
    FrameworkRef {
        framework: Framework::Iso27001,
        code: String::from("5.1"),
        relevance: RelevanceLevel::Supporting,
        confidence: 0.5,
    }
}

static REFERENCE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*[-•*]?\s*(ISO\s*27001|ISO\s*27002|CIS\s*IG1|CIS\s*IG2|CIS\s*IG3)\s*:\s*([A-Za-z0-9.]+)\s*(?:\(\s*(primary|supporting|related)\s*,\s*([0-9]*\.?[0-9]+)\s*\))?",
    )
    .expect("reference regex compiles")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    Foundation,
    Steps,
    Tools,
    Evidence,
    CrossRefs,
    FrameworkRefs,
}

/// Split a legacy category blob into discrete template sections.
///
/// Text before the first recognized heading counts as foundation content.
/// The `FRAMEWORK REFERENCES:` block is excluded here; use
/// [`extract_framework_refs`] for it.
#[must_use]
pub fn split_sections(text: &str) -> TemplateSections {
    let mut sections = TemplateSections::default();
    let mut foundation_parts: Vec<String> = Vec::new();
    let mut current = SectionKind::Foundation;

    for line in text.lines() {
        if let Some(kind) = match_section_heading(line) {
            current = kind;
            continue;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let item = strip_bullet(trimmed);

        match current {
            SectionKind::Foundation => foundation_parts.push(trimmed.to_string()),
            SectionKind::Steps => sections.implementation_steps.push(item),
            SectionKind::Tools => sections.practical_tools.push(item),
            SectionKind::Evidence => sections.audit_evidence.push(item),
            SectionKind::CrossRefs => sections.cross_references.push(item),
            SectionKind::FrameworkRefs => {}
        }
    }

    sections.foundation = foundation_parts.join(" ");
    sections
}

/// Extract framework requirement references from the
/// `FRAMEWORK REFERENCES:` block. Returns an empty vec when no block exists;
/// the caller decides whether to fall back to [`default_framework_ref`].
#[must_use]
pub fn extract_framework_refs(text: &str) -> Vec<FrameworkRef> {
    let mut refs = Vec::new();
    let mut in_block = false;

    for line in text.lines() {
        if let Some(kind) = match_section_heading(line) {
            in_block = kind == SectionKind::FrameworkRefs;
            continue;
        }
        if !in_block {
            continue;
        }
        let Some(caps) = REFERENCE_LINE.captures(line) else {
            continue;
        };

        let framework = match caps[1]
            .to_ascii_lowercase()
            .replace(char::is_whitespace, "")
            .as_str()
        {
            "iso27001" => Framework::Iso27001,
            "iso27002" => Framework::Iso27002,
            "cisig1" => Framework::CisIg1,
            "cisig2" => Framework::CisIg2,
            _ => Framework::CisIg3,
        };
        let relevance = match caps.get(3).map(|m| m.as_str().to_ascii_lowercase()) {
            Some(s) if s == "primary" => RelevanceLevel::Primary,
            Some(s) if s == "related" => RelevanceLevel::Related,
            Some(_) => RelevanceLevel::Supporting,
            None => RelevanceLevel::Supporting,
        };
        let confidence = caps
            .get(4)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .unwrap_or(0.5)
            .clamp(0.0, 1.0);

        refs.push(FrameworkRef {
            framework,
            code: caps[2].to_string(),
            relevance,
            confidence,
        });
    }

    refs
}

fn match_section_heading(line: &str) -> Option<SectionKind> {
    let cleaned = strip_bullet(line.trim())
        .trim_matches(|c: char| c == '*' || c == '#' || c.is_whitespace())
        .trim_end_matches(':')
        .to_ascii_uppercase();

    match cleaned.as_str() {
        "FOUNDATION" | "FOUNDATION CONTENT" => Some(SectionKind::Foundation),
        "IMPLEMENTATION" | "IMPLEMENTATION STEPS" => Some(SectionKind::Steps),
        "PRACTICAL TOOLS" | "TOOLS" => Some(SectionKind::Tools),
        "AUDIT EVIDENCE" | "EVIDENCE" => Some(SectionKind::Evidence),
        "CROSS REFERENCES" | "CROSS-REFERENCES" => Some(SectionKind::CrossRefs),
        "FRAMEWORK REFERENCES" => Some(SectionKind::FrameworkRefs),
        _ => None,
    }
}

fn strip_bullet(line: &str) -> String {
    line.trim_start_matches(['-', '•', '*'])
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use aegis_core::enums::{Framework, RelevanceLevel};
    use pretty_assertions::assert_eq;

    use super::{extract_framework_refs, split_sections};

    const BLOB: &str = "\
Access control limits exposure to compromised credentials.
It underpins most other safeguards.

IMPLEMENTATION STEPS:
- Define an access control policy
- Provision access through role templates

PRACTICAL TOOLS:
- Directory service with group-based entitlements

AUDIT EVIDENCE:
- Quarterly access review sign-offs

CROSS REFERENCES:
- Identity Management

FRAMEWORK REFERENCES:
- ISO 27001: 5.15 (primary, 0.9)
- CIS IG2: 6.1 (supporting, 0.7)
- ISO 27002: 8.2
";

    #[test]
    fn preamble_becomes_foundation() {
        let sections = split_sections(BLOB);
        assert!(sections.foundation.starts_with("Access control limits"));
        assert!(sections.foundation.contains("underpins"));
    }

    #[test]
    fn keyword_headings_split_list_sections() {
        let sections = split_sections(BLOB);
        assert_eq!(sections.implementation_steps.len(), 2);
        assert_eq!(
            sections.practical_tools,
            vec!["Directory service with group-based entitlements".to_string()]
        );
        assert_eq!(sections.audit_evidence.len(), 1);
        assert_eq!(
            sections.cross_references,
            vec!["Identity Management".to_string()]
        );
    }

    #[test]
    fn framework_refs_block_is_not_leaked_into_sections() {
        let sections = split_sections(BLOB);
        assert!(
            !sections
                .cross_references
                .iter()
                .any(|r| r.contains("ISO 27001"))
        );
    }

    #[test]
    fn references_parse_with_relevance_and_confidence() {
        let refs = extract_framework_refs(BLOB);
        assert_eq!(refs.len(), 3);
        assert_eq!(refs[0].framework, Framework::Iso27001);
        assert_eq!(refs[0].code, "5.15");
        assert_eq!(refs[0].relevance, RelevanceLevel::Primary);
        assert!((refs[0].confidence - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn reference_without_annotation_defaults_to_supporting() {
        let refs = extract_framework_refs(BLOB);
        assert_eq!(refs[2].framework, Framework::Iso27002);
        assert_eq!(refs[2].relevance, RelevanceLevel::Supporting);
        assert!((refs[2].confidence - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_block_yields_empty_refs() {
        let refs = extract_framework_refs("FOUNDATION:\nJust prose, no references.");
        assert!(refs.is_empty());
    }
}
