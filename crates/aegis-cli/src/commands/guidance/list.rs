use crate::cli::GlobalFlags;
use crate::commands::shared::parse_framework;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    framework: Option<&str>,
    missing: bool,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let framework = framework.map(parse_framework).transpose()?;
    let mut requirements = ctx.service.list_requirements(framework, missing).await?;

    let limit = flags.limit.unwrap_or(ctx.config.general.default_limit) as usize;
    requirements.truncate(limit);

    output(&requirements, flags.format)
}
