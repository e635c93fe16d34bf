use aegis_core::errors::CoreError;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse_framework;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    framework: &str,
    code: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let framework = parse_framework(framework)?;
    let requirement = ctx
        .service
        .find_requirement(framework, code)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity_type: String::from("requirement"),
            id: format!("{framework}/{code}"),
        })?;
    output(&requirement, flags.format)
}
