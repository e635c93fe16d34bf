mod create;
mod get;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::OrgCommands;
use crate::context::AppContext;

pub async fn handle(
    action: &OrgCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        OrgCommands::Create { name } => create::run(name, ctx, flags).await,
        OrgCommands::Get { id } => get::run(id, ctx, flags).await,
    }
}
