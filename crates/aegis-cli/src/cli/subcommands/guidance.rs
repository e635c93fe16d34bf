use clap::Subcommand;

/// Guidance content commands.
#[derive(Clone, Debug, Subcommand)]
pub enum GuidanceCommands {
    /// Generate canonical guidance for requirements that lack it.
    Generate {
        /// Restrict to one framework (iso27001, iso27002, cis_ig1, cis_ig2, cis_ig3).
        #[arg(long)]
        framework: Option<String>,
        /// Regenerate even where guidance already exists.
        #[arg(long)]
        overwrite: bool,
    },
    /// Reformat stored guidance into the canonical convention.
    Format {
        /// Report violations without writing anything.
        #[arg(long)]
        check: bool,
    },
    /// Show one requirement with its guidance.
    Get {
        framework: String,
        code: String,
    },
    /// List requirements.
    List {
        #[arg(long)]
        framework: Option<String>,
        /// Only requirements without canonical guidance.
        #[arg(long)]
        missing: bool,
    },
}
