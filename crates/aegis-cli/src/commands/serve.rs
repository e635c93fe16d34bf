use std::sync::Arc;

use aegis_billing::StripeHttp;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ServeArgs;
use crate::context::AppContext;

/// Handle `aeg serve`: run the checkout-session endpoint until interrupted.
pub async fn handle(args: &ServeArgs, ctx: AppContext, _flags: &GlobalFlags) -> anyhow::Result<()> {
    anyhow::ensure!(
        ctx.config.stripe.is_configured(),
        "stripe.secret_key is not configured (set AEGIS_STRIPE__SECRET_KEY or .aegis/config.toml)"
    );

    let bind = args
        .bind
        .clone()
        .unwrap_or_else(|| ctx.config.server.bind.clone());
    let stripe = Arc::new(StripeHttp::new(&ctx.config.stripe));
    let service = Arc::new(ctx.service);

    aegis_billing::server::serve(&bind, service, stripe).await?;
    Ok(())
}
