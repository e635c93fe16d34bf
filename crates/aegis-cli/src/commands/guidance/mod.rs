mod format;
mod generate;
mod get;
mod list;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::GuidanceCommands;
use crate::context::AppContext;

pub async fn handle(
    action: &GuidanceCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        GuidanceCommands::Generate {
            framework,
            overwrite,
        } => generate::run(framework.as_deref(), *overwrite, ctx, flags).await,
        GuidanceCommands::Format { check } => format::run(*check, ctx, flags).await,
        GuidanceCommands::Get { framework, code } => get::run(framework, code, ctx, flags).await,
        GuidanceCommands::List { framework, missing } => {
            list::run(framework.as_deref(), *missing, ctx, flags).await
        }
    }
}
