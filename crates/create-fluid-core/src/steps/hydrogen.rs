//! Shopify Hydrogen storefront step

use super::{link_task, LinkLabels};
use crate::context::{Context, Decision};
use crate::error::Result;
use crate::linker::{Hydrogen, LinkError};
use crate::prompt::Question;
use crate::tasks::Recovery;
use crate::ScaffoldError;

const CHANNEL_URL: &str = "https://apps.shopify.com/hydrogen";

/// Decide on linking a storefront and queue the link task
pub fn hydrogen(ctx: &mut Context) -> Result<()> {
    let question = Question::confirm(
        "hydrogen",
        "hydrogen",
        "Initialize or link an existing Hydrogen storefront?",
    )
    .with_hint("optional");

    if !ctx.decide(Decision::Hydrogen, &question)? {
        ctx.info(
            "Sounds good!",
            "You can always run shopify hydrogen link manually, then shopify hydrogen env pull to pull the environment variables.",
        );
        return Ok(());
    }

    let question = Question::confirm(
        "confirmHydrogen",
        "hydrogen",
        "Do you have the Hydrogen channel installed on your Shopify store?",
    );
    if !ctx.decide(Decision::ConfirmHydrogen, &question)? {
        ctx.info(
            "Sounds good!",
            &format!(
                "Install the Hydrogen channel from {}, then run shopify hydrogen link.",
                CHANNEL_URL
            ),
        );
        return Ok(());
    }

    let task = link_task(
        ctx,
        Hydrogen,
        LinkLabels {
            pending: "Hydrogen",
            start: "Linking Hydrogen storefront and pulling environment variables...",
            end: "Hydrogen linked and environment variables pulled",
        },
        |err, reporter| {
            let message = match err {
                ScaffoldError::Link(LinkError::LinkFailed { .. } | LinkError::NotLinked { .. }) => {
                    format!("{}, make sure you have installed the Shopify Hydrogen channel.", err)
                }
                other => other.to_string(),
            };
            reporter.error("error", &message);
            Recovery::Continue
        },
    );
    ctx.push_task(task);
    Ok(())
}
