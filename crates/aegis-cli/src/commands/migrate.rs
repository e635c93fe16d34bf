//! `aeg migrate` — build unified guidance templates from legacy category
//! guidance.
//!
//! Walks the 21 categories. Each category is a migration unit with a status
//! row; a failure marks the unit failed and the walk continues, so one bad
//! category never aborts the run. The summary is materialized from the
//! `migration_units` table and a run with any failed unit exits non-zero.

use anyhow::bail;

use aegis_core::enums::MigrationStatus;
use aegis_core::responses::{CategoryFailure, MigrateResponse};
use aegis_db::repos::template::NewTemplate;
use aegis_db::service::AegisService;
use aegis_guidance::legacy::{CATEGORIES, LegacyGuidanceService, slugify};
use aegis_guidance::sections::{default_framework_ref, extract_framework_refs, split_sections};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::MigrateArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

pub async fn handle(
    args: &MigrateArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if args.clean {
        let deleted = ctx.service.delete_all_templates().await?;
        ctx.service.reset_units().await?;
        tracing::info!(deleted, "cleaned existing templates and unit statuses");
    }

    let reclaimed = ctx.service.recover_stale_units().await?;
    if reclaimed > 0 {
        tracing::warn!(reclaimed, "reclaimed units left running by an interrupted run");
    }

    let legacy = LegacyGuidanceService::new();
    let throttle = std::time::Duration::from_millis(ctx.config.general.throttle_ms);
    let progress = Progress::bar(CATEGORIES.len() as u64, "migrating categories", flags);

    let mut templates_created: u32 = 0;
    let mut mappings_created: u32 = 0;
    let mut skipped_existing: u32 = 0;

    for (index, category) in CATEGORIES.iter().enumerate() {
        if index > 0 && !throttle.is_zero() {
            tokio::time::sleep(throttle).await;
        }
        progress.set_message(category);

        let slug = slugify(category);
        let unit = ctx.service.ensure_unit(&slug).await?;

        if ctx.service.template_exists(&slug).await? {
            // Template written but the unit never reached done: the previous
            // run died between the insert and the final transition.
            if unit.status != MigrationStatus::Done {
                ctx.service
                    .transition_unit(&slug, MigrationStatus::Running, None)
                    .await?;
                ctx.service
                    .transition_unit(&slug, MigrationStatus::Done, None)
                    .await?;
            }
            tracing::debug!(%slug, "template exists, skipping");
            skipped_existing += 1;
            progress.inc(1);
            continue;
        }

        ctx.service
            .transition_unit(&slug, MigrationStatus::Running, None)
            .await?;

        match migrate_category(&ctx.service, &legacy, category, &slug).await {
            Ok(new_mappings) => {
                ctx.service
                    .record_unit_counts(&slug, 1, new_mappings)
                    .await?;
                ctx.service
                    .transition_unit(&slug, MigrationStatus::Done, None)
                    .await?;
                templates_created += 1;
                mappings_created += new_mappings;
            }
            Err(error) => {
                tracing::warn!(%slug, %error, "category migration failed");
                ctx.service
                    .transition_unit(&slug, MigrationStatus::Failed, Some(&error.to_string()))
                    .await?;
            }
        }
        progress.inc(1);
    }
    progress.finish_clear();

    let failures: Vec<CategoryFailure> = ctx
        .service
        .list_units()
        .await?
        .into_iter()
        .filter(|unit| unit.status == MigrationStatus::Failed)
        .map(|unit| CategoryFailure {
            category: unit.unit,
            error: unit.error.unwrap_or_else(|| String::from("unknown error")),
        })
        .collect();

    let response = MigrateResponse {
        categories_processed: u32::try_from(CATEGORIES.len()).unwrap_or(u32::MAX),
        templates_created,
        mappings_created,
        skipped_existing,
        failures,
    };
    let clean_run = response.is_clean();
    let failure_count = response.failures.len();
    output(&response, flags.format)?;

    if !clean_run {
        bail!("{failure_count} categories failed to migrate");
    }
    Ok(())
}

/// Migrate one category: parse the legacy blob, insert the template, then
/// its framework mappings. Returns the number of mappings created.
async fn migrate_category(
    service: &AegisService,
    legacy: &LegacyGuidanceService,
    category: &str,
    slug: &str,
) -> anyhow::Result<u32> {
    let content = legacy.content_for(category)?;
    let sections = split_sections(&content);

    let template = service
        .create_template(&NewTemplate {
            category_name: category.to_string(),
            category_slug: slug.to_string(),
            foundation_content: sections.foundation,
            implementation_steps: sections.implementation_steps,
            practical_tools: sections.practical_tools,
            audit_evidence: sections.audit_evidence,
            cross_references: sections.cross_references,
        })
        .await?;

    let mut refs = extract_framework_refs(&content);
    if refs.is_empty() {
        refs.push(default_framework_ref());
    }

    let mut created: u32 = 0;
    for framework_ref in refs {
        service
            .create_mapping(
                &template.id,
                framework_ref.framework,
                &framework_ref.code,
                framework_ref.relevance,
                framework_ref.confidence,
            )
            .await?;
        created += 1;
    }
    Ok(created)
}
