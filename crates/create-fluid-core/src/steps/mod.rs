//! The individual setup steps
//!
//! Each step reads and resolves its part of the [`Context`](crate::Context)
//! and queues any long-running work as a task.

pub mod dependencies;
pub mod git;
pub mod hydrogen;
pub mod next_steps;
pub mod project_dir;
pub mod sanity;
pub mod template;
pub mod verify;

use crate::context::Context;
use crate::linker::{link_service, ServiceIntegration};
use crate::tasks::{Recovery, Task};
use crate::ScaffoldError;
use crate::Reporter;

/// Labels of a link task
struct LinkLabels {
    pending: &'static str,
    start: &'static str,
    end: &'static str,
}

/// Build the deferred task that links `integration` from the project directory
fn link_task<S, H>(ctx: &Context, integration: S, labels: LinkLabels, on_error: H) -> Task
where
    S: ServiceIntegration + 'static,
    H: FnOnce(&ScaffoldError, &dyn Reporter) -> Recovery + Send + 'static,
{
    let shell = ctx.shell();
    let reporter = ctx.reporter();
    let cwd = ctx.cwd.clone();
    let installed = ctx.install.unwrap_or(false);

    Task::new(labels.pending, labels.start, labels.end, move || async move {
        link_service(&integration, shell.as_ref(), reporter.as_ref(), &cwd, installed).await
    })
    .interactive()
    .on_error(on_error)
}
