//! The single authoritative guidance formatter.
//!
//! The legacy pipeline accumulated six overlapping regex fix-up scripts, each
//! normalizing bullets and headings differently and partially undoing the
//! previous one. This module replaces them all with one parse → render
//! transform whose output is a fixed point: canonical text parses back to the
//! same document, so re-running the formatter is always a no-op.
//!
//! Accepted legacy conventions:
//! - headings `Purpose` / `Purpose:` / `**Purpose**` / `**Purpose:**` /
//!   `## Purpose` (same set for `Implementation`), case-insensitive
//! - bullets `•`, `*`, `-`
//! - headingless preamble text (treated as purpose)

use std::sync::LazyLock;

use regex::Regex;

use crate::doc::GuidanceDoc;

/// Heading line, possibly decorated and possibly carrying inline text:
/// `(#*) (**) (purpose|implementation) (:) (**) (:) (rest)`.
static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(#{1,6}\s*)?(\*\*\s*)?(purpose|implementation)(\s*:)?(\s*\*\*)?(\s*:)?\s*(.*)$",
    )
    .expect("heading regex compiles")
});

/// Bullet line with any legacy marker.
static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[•*-]\s*(.*)$").expect("bullet regex compiles"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Purpose,
    Implementation,
}

/// Parse any accepted guidance text into the structured document.
///
/// Never fails: unrecognized text ends up in the purpose paragraph rather
/// than being dropped, so no content is ever silently lost.
#[must_use]
pub fn parse(text: &str) -> GuidanceDoc {
    let mut purpose_parts: Vec<String> = Vec::new();
    let mut implementation: Vec<String> = Vec::new();
    let mut section = Section::Purpose;

    for line in text.lines() {
        if let Some((heading, inline)) = match_heading(line) {
            section = heading;
            if !inline.is_empty() {
                match section {
                    Section::Purpose => purpose_parts.push(inline),
                    Section::Implementation => implementation.push(inline),
                }
            }
            continue;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(caps) = BULLET.captures(line) {
            let bullet = caps[1].trim().to_string();
            if bullet.is_empty() {
                continue;
            }
            match section {
                // A bullet before any Implementation heading still belongs to
                // the purpose narrative in some legacy records; fold it in.
                Section::Purpose => purpose_parts.push(bullet),
                Section::Implementation => implementation.push(bullet),
            }
            continue;
        }

        match section {
            Section::Purpose => purpose_parts.push(trimmed.to_string()),
            // Wrapped continuation of the previous bullet.
            Section::Implementation => match implementation.last_mut() {
                Some(last) => {
                    last.push(' ');
                    last.push_str(trimmed);
                }
                None => implementation.push(trimmed.to_string()),
            },
        }
    }

    GuidanceDoc {
        purpose: purpose_parts.join(" "),
        implementation,
    }
}

/// Normalize arbitrary legacy guidance text to the canonical form.
#[must_use]
pub fn canonicalize(text: &str) -> String {
    parse(text).render()
}

/// Whether the text is already in canonical form.
#[must_use]
pub fn is_canonical(text: &str) -> bool {
    canonicalize(text) == text
}

/// Match a heading line, returning the section and any inline text after it.
///
/// A bare `Purpose` alone on a line is a heading; `Purpose built tooling...`
/// (no colon, no markers, trailing prose) is an ordinary sentence.
fn match_heading(line: &str) -> Option<(Section, String)> {
    let caps = HEADING.captures(line)?;
    let has_marker = caps.get(1).is_some() || caps.get(2).is_some() || caps.get(5).is_some();
    let has_colon = caps.get(4).is_some() || caps.get(6).is_some();
    let rest = caps[7].trim();

    if !has_marker && !has_colon && !rest.is_empty() {
        return None;
    }

    let section = if caps[3].eq_ignore_ascii_case("purpose") {
        Section::Purpose
    } else {
        Section::Implementation
    };
    Some((section, rest.to_string()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::{canonicalize, is_canonical, parse};

    const CANONICAL: &str = "Purpose: Maintain asset inventory\n\nImplementation:\n- Deploy automated discovery tooling\n- Review the inventory weekly";

    #[rstest]
    #[case::bold_headings(
        "**Purpose**\nMaintain asset inventory\n\n**Implementation**\n• Deploy automated discovery tooling\n• Review the inventory weekly"
    )]
    #[case::markdown_headings(
        "## Purpose\nMaintain asset inventory\n\n## Implementation\n* Deploy automated discovery tooling\n* Review the inventory weekly"
    )]
    #[case::bare_headings(
        "Purpose\nMaintain asset inventory\nImplementation\n- Deploy automated discovery tooling\n- Review the inventory weekly"
    )]
    #[case::inline_purpose(
        "Purpose: Maintain asset inventory\nImplementation:\n- Deploy automated discovery tooling\n- Review the inventory weekly"
    )]
    #[case::bold_with_colon(
        "**Purpose:** Maintain asset inventory\n\n**Implementation:**\n- Deploy automated discovery tooling\n- Review the inventory weekly"
    )]
    fn legacy_variants_normalize_to_one_form(#[case] input: &str) {
        assert_eq!(canonicalize(input), CANONICAL);
    }

    #[test]
    fn canonical_output_is_a_fixed_point() {
        let once = canonicalize(
            "**Purpose**: keep software patched\n• scan\n**Implementation**\n• patch monthly",
        );
        let twice = canonicalize(&once);
        assert_eq!(once, twice);
        assert!(is_canonical(&once));
    }

    #[test]
    fn already_canonical_text_is_returned_unchanged() {
        assert_eq!(canonicalize(CANONICAL), CANONICAL);
        assert!(is_canonical(CANONICAL));
    }

    #[test]
    fn headingless_preamble_becomes_purpose() {
        let doc = parse("Keep clocks synchronized across all systems.");
        assert_eq!(doc.purpose, "Keep clocks synchronized across all systems.");
        assert!(doc.implementation.is_empty());
    }

    #[test]
    fn sentence_starting_with_purpose_is_not_a_heading() {
        let doc = parse("Purpose built tooling is available.\nImplementation:\n- Use it");
        assert_eq!(doc.purpose, "Purpose built tooling is available.");
        assert_eq!(doc.implementation, vec!["Use it".to_string()]);
    }

    #[test]
    fn wrapped_bullet_lines_are_joined() {
        let doc = parse("Purpose: p\n\nImplementation:\n- first half\n  second half\n- next");
        assert_eq!(
            doc.implementation,
            vec!["first half second half".to_string(), "next".to_string()]
        );
    }

    #[test]
    fn multi_line_purpose_is_joined_with_spaces() {
        let doc = parse("Purpose:\nLine one.\nLine two.\n\nImplementation:\n- a");
        assert_eq!(doc.purpose, "Line one. Line two.");
    }

    #[test]
    fn no_content_is_lost_across_normalization() {
        let input = "Random preamble.\n**Implementation**\n• alpha\n• beta";
        let doc = parse(input);
        assert_eq!(doc.purpose, "Random preamble.");
        assert_eq!(doc.implementation, vec!["alpha", "beta"]);
    }
}
