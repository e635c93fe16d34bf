//! Record locator for the legacy mock-data source file.
//!
//! The legacy store was a TypeScript source file full of requirement object
//! literals. The locator anchors on `id: '...'` fields, scopes each record to
//! the text before the next anchor, and extracts the remaining fields with
//! quote-aware regexes. Unlike the legacy scripts, a non-matching block is
//! never silently skipped: every anchor is accounted for in the
//! [`LocateReport`], so callers can verify the expected record count.

use std::sync::LazyLock;

use regex::Regex;

use aegis_core::enums::Framework;

/// One requirement record as found in the legacy source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// Legacy record ID, e.g. `cis-ig2-1.1`.
    pub id: String,
    pub framework: Framework,
    pub code: String,
    pub section: Option<String>,
    pub title: String,
    pub description: String,
    pub guidance: Option<String>,
    pub audit_ready_guidance: Option<String>,
}

/// Accounting for one locate pass over a source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocateReport {
    /// `id:` anchors seen in the file.
    pub anchors_seen: u32,
    /// Fully parsed records.
    pub located: u32,
    /// Anchor IDs whose block was missing required fields or had an
    /// unrecognized framework prefix.
    pub skipped: Vec<String>,
}

static ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"id:\s*(?:'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)")"#).expect("anchor regex")
});

/// Locate and parse all requirement records in legacy source text.
#[must_use]
pub fn locate_records(text: &str) -> (Vec<RawRecord>, LocateReport) {
    let mut records = Vec::new();
    let mut report = LocateReport::default();

    let anchors: Vec<(usize, String)> = ANCHOR
        .captures_iter(text)
        .filter_map(|caps| {
            let m = caps.get(0)?;
            let raw = caps.get(1).or_else(|| caps.get(2))?.as_str();
            Some((m.start(), unescape(raw)))
        })
        .collect();

    report.anchors_seen = u32::try_from(anchors.len()).unwrap_or(u32::MAX);

    for (idx, (start, id)) in anchors.iter().enumerate() {
        let end = anchors
            .get(idx + 1)
            .map_or(text.len(), |(next_start, _)| *next_start);
        let block = &text[*start..end];

        match parse_block(id, block) {
            Some(record) => {
                records.push(record);
                report.located += 1;
            }
            None => report.skipped.push(id.clone()),
        }
    }

    (records, report)
}

fn parse_block(id: &str, block: &str) -> Option<RawRecord> {
    let framework = Framework::from_legacy_prefix(id)?;
    let code = field(block, "code")?;
    // Older snapshots of the file used `name` where newer ones use `title`.
    let title = field(block, "title").or_else(|| field(block, "name"))?;
    let description = field(block, "description")?;

    Some(RawRecord {
        id: id.to_string(),
        framework,
        code,
        section: field(block, "section"),
        title,
        description,
        guidance: field(block, "guidance"),
        audit_ready_guidance: field(block, "auditReadyGuidance"),
    })
}

/// The fixed set of fields a record block may carry.
const FIELD_NAMES: [&str; 7] = [
    "code",
    "section",
    "name",
    "title",
    "description",
    "guidance",
    "auditReadyGuidance",
];

static FIELD_REGEXES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    FIELD_NAMES
        .iter()
        .map(|name| {
            let regex = Regex::new(&format!(
                r#"(?m)^\s*{name}:\s*(?:'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)")"#
            ))
            .expect("field regex compiles");
            (*name, regex)
        })
        .collect()
});

/// Extract a single-or-double-quoted string field from a record block.
fn field(block: &str, name: &str) -> Option<String> {
    let (_, regex) = FIELD_REGEXES.iter().find(|(n, _)| *n == name)?;
    let caps = regex.captures(block)?;
    let raw = caps.get(1).or_else(|| caps.get(2))?.as_str();
    Some(unescape(raw))
}

/// Undo JS string escapes: `\'`, `\"`, `\\`, `\n`, `\t`.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use aegis_core::enums::Framework;
    use pretty_assertions::assert_eq;

    use super::locate_records;

    const SOURCE: &str = r#"
export const requirements = [
  {
    id: 'cis-ig1-1.1',
    code: '1.1',
    section: '1',
    title: 'Establish and Maintain Detailed Enterprise Asset Inventory',
    description: 'Maintain asset inventory',
    guidance: 'Purpose\nMaintain asset inventory',
  },
  {
    id: 'iso27001-4.1',
    code: '4.1',
    name: 'Understanding the organization and its context',
    description: 'Determine external and internal issues',
    auditReadyGuidance: 'Purpose: Determine context\n\nImplementation:\n- Review issues',
  },
  {
    id: 'cis-ig2-2.1',
    code: '2.1',
    title: 'It\'s the software inventory control',
    description: "Maintain a software inventory",
  },
  {
    id: 'soc2-cc1.1',
    code: 'CC1.1',
    title: 'Control environment',
    description: 'COSO principle one',
  },
  {
    id: 'cis-ig3-3.1',
    title: 'Missing code field',
  },
];
"#;

    #[test]
    fn locates_well_formed_records() {
        let (records, report) = locate_records(SOURCE);
        assert_eq!(report.anchors_seen, 5);
        assert_eq!(report.located, 3);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].id, "cis-ig1-1.1");
        assert_eq!(records[0].framework, Framework::CisIg1);
        assert_eq!(records[0].section.as_deref(), Some("1"));
    }

    #[test]
    fn malformed_blocks_are_reported_not_dropped() {
        let (_, report) = locate_records(SOURCE);
        assert_eq!(
            report.skipped,
            vec!["soc2-cc1.1".to_string(), "cis-ig3-3.1".to_string()]
        );
        assert_eq!(report.anchors_seen, report.located + report.skipped.len() as u32);
    }

    #[test]
    fn escaped_quotes_and_double_quotes_parse() {
        let (records, _) = locate_records(SOURCE);
        let software = records
            .iter()
            .find(|r| r.id == "cis-ig2-2.1")
            .expect("record present");
        assert_eq!(software.title, "It's the software inventory control");
        assert_eq!(software.description, "Maintain a software inventory");
    }

    #[test]
    fn name_field_is_accepted_as_title() {
        let (records, _) = locate_records(SOURCE);
        let iso = records
            .iter()
            .find(|r| r.id == "iso27001-4.1")
            .expect("record present");
        assert_eq!(iso.title, "Understanding the organization and its context");
        assert!(iso.audit_ready_guidance.as_deref().unwrap().contains("Implementation:"));
    }

    #[test]
    fn embedded_newline_escapes_are_decoded() {
        let (records, _) = locate_records(SOURCE);
        assert_eq!(
            records[0].guidance.as_deref(),
            Some("Purpose\nMaintain asset inventory")
        );
    }

    #[test]
    fn empty_source_yields_empty_report() {
        let (records, report) = locate_records("const x = 1;");
        assert!(records.is_empty());
        assert_eq!(report.anchors_seen, 0);
        assert!(report.skipped.is_empty());
    }
}
