//! The step pipeline and the run driver
//!
//! A run is two explicit phases: every [`Step`] runs to completion in order,
//! then the tasks they queued execute as one ordered batch.

use crate::context::Context;
use crate::error::Result;
use crate::steps;
use crate::tasks::{run_tasks, QueueLabels};
use tracing::debug;

/// One stage of the setup pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Verify,
    ProjectDir,
    Template,
    Dependencies,
    Hydrogen,
    Sanity,
    Git,
}

impl Step {
    /// Every step, in run order
    pub const ALL: [Step; 7] = [
        Step::Verify,
        Step::ProjectDir,
        Step::Template,
        Step::Dependencies,
        Step::Hydrogen,
        Step::Sanity,
        Step::Git,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Step::Verify => "verify",
            Step::ProjectDir => "project-dir",
            Step::Template => "template",
            Step::Dependencies => "dependencies",
            Step::Hydrogen => "hydrogen",
            Step::Sanity => "sanity",
            Step::Git => "git",
        }
    }

    /// Run this step against the context
    pub async fn run(self, ctx: &mut Context) -> Result<()> {
        match self {
            Step::Verify => steps::verify::verify(ctx).await,
            Step::ProjectDir => steps::project_dir::project_dir(ctx),
            Step::Template => steps::template::template(ctx),
            Step::Dependencies => steps::dependencies::dependencies(ctx),
            Step::Hydrogen => steps::hydrogen::hydrogen(ctx),
            Step::Sanity => steps::sanity::sanity(ctx),
            Step::Git => steps::git::git(ctx),
        }
    }
}

/// Run each step in order, each fully resolved before the next
pub async fn run_pipeline(ctx: &mut Context, steps: &[Step]) -> Result<()> {
    for step in steps {
        debug!(step = step.name(), "Running step");
        step.run(ctx).await?;
    }
    Ok(())
}

/// Full run: the step pass, the task pass, then the next steps report
pub async fn scaffold(ctx: &mut Context, steps: &[Step], labels: &QueueLabels) -> Result<()> {
    run_pipeline(ctx, steps).await?;

    let tasks = std::mem::take(&mut ctx.tasks);
    let reporter = ctx.reporter();
    if ctx.dry_run {
        reporter.info("--dry-run", &format!("Skipping {} queued task(s)", tasks.len()));
    } else {
        run_tasks(labels, tasks, reporter.as_ref()).await?;
    }

    steps::next_steps::report(ctx);
    Ok(())
}
