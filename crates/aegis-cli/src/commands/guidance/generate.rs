use aegis_core::responses::GenerateResponse;
use aegis_guidance::generator;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse_framework;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

pub async fn run(
    framework: Option<&str>,
    overwrite: bool,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let framework = framework.map(parse_framework).transpose()?;

    let total = ctx.service.list_requirements(framework, false).await?;
    let targets = if overwrite {
        total.clone()
    } else {
        ctx.service.list_requirements(framework, true).await?
    };

    let total_requirements = u32::try_from(total.len()).unwrap_or(u32::MAX);
    let progress = Progress::bar(targets.len() as u64, "generating guidance", flags);

    let mut generated: u32 = 0;
    for requirement in &targets {
        let doc = generator::generate(requirement.framework, &requirement.code, &requirement.description);
        ctx.service
            .set_requirement_guidance(&requirement.id, &doc.render())
            .await?;
        generated += 1;
        progress.inc(1);
    }
    progress.finish_clear();

    let response = GenerateResponse {
        generated,
        skipped_existing: total_requirements - generated,
        total_requirements,
    };
    output(&response, flags.format)
}
