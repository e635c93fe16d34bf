use aegis_core::responses::FormatResponse;
use aegis_guidance::format::{canonicalize, is_canonical};

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(check: bool, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let requirements = ctx.service.list_requirements(None, false).await?;

    let mut reformatted: u32 = 0;
    let mut already_canonical: u32 = 0;
    let mut violations = Vec::new();

    for requirement in &requirements {
        let Some(guidance) = requirement.guidance.as_deref() else {
            continue;
        };
        if is_canonical(guidance) {
            already_canonical += 1;
            continue;
        }
        violations.push(requirement.id.clone());
        if !check {
            ctx.service
                .set_requirement_guidance(&requirement.id, &canonicalize(guidance))
                .await?;
            reformatted += 1;
        }
    }

    let response = FormatResponse {
        reformatted,
        already_canonical,
        check_only: check,
        violations,
    };
    output(&response, flags.format)
}
