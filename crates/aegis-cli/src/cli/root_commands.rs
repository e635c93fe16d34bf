use clap::{Args, Subcommand};

use crate::cli::subcommands::{GuidanceCommands, OrgCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Initialize aegis for a project.
    Init(InitArgs),
    /// Import requirement records from a legacy source file.
    Import(ImportArgs),
    /// Guidance content operations.
    Guidance {
        #[command(subcommand)]
        action: GuidanceCommands,
    },
    /// Run the unified guidance template migration.
    Migrate(MigrateArgs),
    /// Organizations.
    Org {
        #[command(subcommand)]
        action: OrgCommands,
    },
    /// Run the checkout-session HTTP endpoint.
    Serve(ServeArgs),
}

#[derive(Clone, Debug, Args)]
pub struct InitArgs {
    /// Directory to initialize (defaults to the current directory).
    #[arg(long)]
    pub path: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ImportArgs {
    /// Legacy source file to import records from.
    pub file: String,

    /// Overwrite canonical guidance on re-imported records.
    #[arg(long)]
    pub force: bool,
}

#[derive(Clone, Debug, Args)]
pub struct MigrateArgs {
    /// Delete existing templates, mappings, and unit statuses first.
    #[arg(long)]
    pub clean: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Bind address override (defaults to server.bind from config).
    #[arg(long)]
    pub bind: Option<String>,
}
