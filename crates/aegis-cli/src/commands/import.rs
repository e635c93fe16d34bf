//! `aeg import` — ingest requirement records from a legacy source file.
//!
//! Locates record object literals with the guidance locator, then upserts
//! them in throttled batches. Counts are reported per framework and ISO
//! 27001 clause codes are validated against the `4.1`..`10.2` clause
//! format; violations are reported, not dropped.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use anyhow::Context;
use regex::Regex;

use aegis_core::enums::Framework;
use aegis_core::responses::{FrameworkCount, ImportResponse};
use aegis_db::repos::requirement::NewRequirement;
use aegis_guidance::locator::{RawRecord, locate_records};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ImportArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// ISO 27001 management clauses run 4.x through 10.x.
static ISO_CLAUSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[4-9]|10)\.\d+$").expect("clause regex compiles"));

/// ISO 27002:2022 publishes exactly 93 controls.
const EXPECTED_ISO27002_CONTROLS: u32 = 93;

fn to_new_requirement(record: &RawRecord) -> NewRequirement {
    NewRequirement {
        framework: record.framework,
        code: record.code.clone(),
        section: record.section.clone(),
        title: record.title.clone(),
        description: record.description.clone(),
        category: None,
        guidance_legacy: record
            .audit_ready_guidance
            .clone()
            .or_else(|| record.guidance.clone()),
    }
}

pub async fn handle(
    args: &ImportArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let response = import_records(args, ctx, flags).await?;
    output(&response, flags.format)
}

async fn import_records(
    args: &ImportArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<ImportResponse> {
    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file))?;
    let (records, report) = locate_records(&text);
    tracing::info!(
        anchors = report.anchors_seen,
        located = report.located,
        skipped = report.skipped.len(),
        "located records"
    );

    let mut format_violations = Vec::new();
    for record in &records {
        if record.framework == Framework::Iso27001 && !ISO_CLAUSE.is_match(&record.code) {
            format_violations.push(format!("{}: {}", record.id, record.code));
        }
    }

    let batch_size = ctx.config.general.batch_size.max(1) as usize;
    let throttle = std::time::Duration::from_millis(ctx.config.general.throttle_ms);
    let progress = Progress::bar(records.len() as u64, "importing records", flags);

    let mut inserted: u32 = 0;
    let mut updated: u32 = 0;
    let mut by_framework: BTreeMap<&'static str, (Framework, u32)> = BTreeMap::new();

    for (index, batch) in records.chunks(batch_size).enumerate() {
        if index > 0 && !throttle.is_zero() {
            tokio::time::sleep(throttle).await;
        }
        for record in batch {
            let existing = ctx
                .service
                .find_requirement(record.framework, &record.code)
                .await?;
            if existing.is_some() {
                updated += 1;
            } else {
                inserted += 1;
            }

            ctx.service
                .upsert_requirement(&to_new_requirement(record), args.force)
                .await
                .with_context(|| format!("failed to import record '{}'", record.id))?;

            by_framework
                .entry(record.framework.as_str())
                .or_insert((record.framework, 0))
                .1 += 1;
            progress.inc(1);
        }
    }
    progress.finish_clear();

    // The published standard has a fixed control count; verify the stored
    // rows against it after a run that touched the framework at all.
    let mut count_mismatches = Vec::new();
    if by_framework.contains_key(Framework::Iso27002.as_str()) {
        let stored_count = ctx
            .service
            .count_requirements_by_framework()
            .await?
            .into_iter()
            .find(|(framework, _)| *framework == Framework::Iso27002)
            .map_or(0, |(_, count)| count);
        if stored_count != EXPECTED_ISO27002_CONTROLS {
            count_mismatches.push(format!(
                "iso27002: expected {EXPECTED_ISO27002_CONTROLS} controls, have {stored_count}"
            ));
        }
    }

    Ok(ImportResponse {
        records_located: report.located,
        records_skipped: u32::try_from(report.skipped.len()).unwrap_or(u32::MAX),
        inserted,
        updated,
        by_framework: by_framework
            .into_values()
            .map(|(framework, count)| FrameworkCount { framework, count })
            .collect(),
        format_violations,
        count_mismatches,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use aegis_config::AegisConfig;
    use aegis_core::enums::Framework;
    use aegis_db::test_support::memory_service;
    use pretty_assertions::assert_eq;

    use super::{ISO_CLAUSE, handle, import_records};
    use crate::cli::root_commands::ImportArgs;
    use crate::cli::{GlobalFlags, OutputFormat};
    use crate::context::AppContext;

    const SOURCE: &str = r"
export const requirements = [
  {
    id: 'cis-ig1-1.1',
    code: '1.1',
    section: '1',
    name: 'Establish and Maintain Detailed Enterprise Asset Inventory',
    description: 'Maintain asset inventory',
    auditReadyGuidance: 'Track all hardware assets',
  },
  {
    id: 'iso27001-4.1',
    code: '4.1',
    title: 'Understanding the organization and its context',
    description: 'Determine external and internal issues',
  },
  {
    id: 'iso27001-A.5.15',
    code: 'A.5.15',
    title: 'Access control',
    description: 'Rules to control access shall be established',
  },
];
";

    async fn memory_context() -> AppContext {
        let mut config = AegisConfig::default();
        config.general.throttle_ms = 0;
        AppContext {
            service: memory_service().await,
            config,
        }
    }

    fn quiet_flags() -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Raw,
            limit: None,
            quiet: true,
            verbose: false,
            project: None,
        }
    }

    #[test]
    fn iso_clause_regex_accepts_management_clauses_only() {
        assert!(ISO_CLAUSE.is_match("4.1"));
        assert!(ISO_CLAUSE.is_match("10.2"));
        assert!(!ISO_CLAUSE.is_match("A.5.15"));
        assert!(!ISO_CLAUSE.is_match("3.1"));
    }

    #[tokio::test]
    async fn import_upserts_records_and_preserves_legacy_guidance() {
        let ctx = memory_context().await;
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(SOURCE.as_bytes()).expect("write");
        let path = file.path().to_string_lossy().to_string();

        let response = import_records(
            &ImportArgs {
                file: path.clone(),
                force: false,
            },
            &ctx,
            &quiet_flags(),
        )
        .await
        .expect("import succeeds");
        assert_eq!(response.inserted, 3);
        assert_eq!(response.updated, 0);
        // No ISO 27002 records in the run, so no count verification applies.
        assert!(response.count_mismatches.is_empty());

        let asset = ctx
            .service
            .find_requirement(Framework::CisIg1, "1.1")
            .await
            .expect("query")
            .expect("imported");
        assert_eq!(
            asset.guidance_legacy.as_deref(),
            Some("Track all hardware assets")
        );
        assert_eq!(asset.section.as_deref(), Some("1"));

        // Re-import touches the same rows instead of duplicating them.
        handle(
            &ImportArgs { file: path, force: false },
            &ctx,
            &quiet_flags(),
        )
        .await
        .expect("reimport succeeds");
        let all = ctx
            .service
            .list_requirements(None, false)
            .await
            .expect("list");
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn incomplete_iso27002_import_reports_a_count_mismatch() {
        let ctx = memory_context().await;
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(
            br"
export const requirements = [
  {
    id: 'iso27002-5.1',
    code: '5.1',
    title: 'Policies for information security',
    description: 'Information security policy shall be defined',
  },
];
",
        )
        .expect("write");

        let response = import_records(
            &ImportArgs {
                file: file.path().to_string_lossy().to_string(),
                force: false,
            },
            &ctx,
            &quiet_flags(),
        )
        .await
        .expect("import succeeds");

        assert_eq!(response.count_mismatches.len(), 1);
        assert!(response.count_mismatches[0].contains("expected 93"));
        assert!(response.count_mismatches[0].contains("have 1"));
    }
}
