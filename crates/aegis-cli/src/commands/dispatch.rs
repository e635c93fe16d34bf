use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Import(args) => commands::import::handle(&args, &ctx, flags).await,
        Commands::Guidance { action } => commands::guidance::handle(&action, &ctx, flags).await,
        Commands::Migrate(args) => commands::migrate::handle(&args, &ctx, flags).await,
        Commands::Org { action } => commands::org::handle(&action, &ctx, flags).await,
        Commands::Serve(args) => commands::serve::handle(&args, ctx, flags).await,
        Commands::Init(_) => {
            unreachable!("init is pre-dispatched in main")
        }
    }
}
