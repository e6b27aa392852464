//! Preflight checks run before anything touches the disk

use crate::context::Context;
use crate::error::Result;
use tracing::debug;

/// Check connectivity and, for an explicitly named template, that it exists
pub async fn verify(ctx: &mut Context) -> Result<()> {
    let fetcher = ctx.fetcher();

    if !ctx.dry_run && !fetcher.is_reachable().await {
        ctx.error("error", "Unable to connect to the internet.");
        return Err(ctx.exit(1));
    }

    let Some(template) = ctx.template.clone() else {
        return Ok(());
    };

    let catalog = ctx.catalog();
    let locator = catalog.resolve(&template);
    let found = match fetcher.exists(&locator).await {
        Ok(found) => found,
        Err(err) => {
            debug!(error = %err, locator = %locator, "Template lookup failed");
            false
        }
    };

    if !found {
        ctx.error("error", &format!("Template {} could not be found!", template));
        ctx.info(
            "check",
            &format!("Available templates are listed at {}", catalog.repository().web_url()),
        );
        return Err(ctx.exit(1));
    }

    Ok(())
}
