use aegis_core::errors::CoreError;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let organization =
        ctx.service
            .find_organization(id)
            .await?
            .ok_or_else(|| CoreError::NotFound {
                entity_type: String::from("organization"),
                id: id.to_string(),
            })?;
    output(&organization, flags.format)
}
