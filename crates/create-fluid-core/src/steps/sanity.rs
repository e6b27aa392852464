//! Sanity project step

use super::{link_task, LinkLabels};
use crate::context::{Context, Decision};
use crate::error::Result;
use crate::linker::sanity::SANITY_ENV_FILE;
use crate::linker::Sanity;
use crate::prompt::Question;
use crate::tasks::Recovery;

/// Decide on linking a Sanity project and queue the link task
pub fn sanity(ctx: &mut Context) -> Result<()> {
    let question = Question::confirm("sanity", "sanity", "Initialize or link a Sanity project?");

    if !ctx.decide(Decision::Sanity, &question)? {
        ctx.info(
            "Sounds good!",
            &format!("You can always run sanity init --env {} manually.", SANITY_ENV_FILE),
        );
        return Ok(());
    }

    let task = link_task(
        ctx,
        Sanity,
        LinkLabels {
            pending: "Sanity",
            start: "Linking Sanity project and pulling environment variables...",
            end: "Sanity linked and environment variables pulled",
        },
        |err, reporter| {
            reporter.error("error", &err.to_string());
            Recovery::Continue
        },
    );
    ctx.push_task(task);
    Ok(())
}
