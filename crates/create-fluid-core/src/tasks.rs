//! Deferred task queue
//!
//! Steps append [`Task`]s while the pipeline runs; the queue executes them
//! afterwards, one at a time and in append order, surfacing each task's
//! labels through the [`Reporter`].

use crate::error::{Result, ScaffoldError};
use crate::report::Reporter;
use std::future::Future;
use std::pin::Pin;
use tracing::debug;

/// Boxed future returned by a task operation
pub type TaskFuture = Pin<Box<dyn Future<Output = Result<()>> + Send>>;

type Operation = Box<dyn FnOnce() -> TaskFuture + Send>;
type ErrorHandler = Box<dyn FnOnce(&ScaffoldError, &dyn Reporter) -> Recovery + Send>;

/// What the queue does after a task's error handler ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Keep running the remaining tasks
    Continue,
    /// Stop the run with the given exit code
    Exit(i32),
}

/// A deferred unit of work with progress labels
pub struct Task {
    pub pending: String,
    pub start: String,
    pub end: String,
    /// The operation shares the terminal with a child process
    pub interactive: bool,
    on_error: Option<ErrorHandler>,
    operation: Operation,
}

impl Task {
    /// Create a task from its labels and a zero-argument operation
    pub fn new<F, Fut>(
        pending: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
        operation: F,
    ) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        Self {
            pending: pending.into(),
            start: start.into(),
            end: end.into(),
            interactive: false,
            on_error: None,
            operation: Box::new(move || Box::pin(operation()) as TaskFuture),
        }
    }

    /// Mark the task as handing the terminal to an external program
    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }

    /// Attach an error handler; without one a failure aborts the run
    pub fn on_error<H>(mut self, handler: H) -> Self
    where
        H: FnOnce(&ScaffoldError, &dyn Reporter) -> Recovery + Send + 'static,
    {
        self.on_error = Some(Box::new(handler));
        self
    }
}

impl std::fmt::Debug for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task")
            .field("pending", &self.pending)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("interactive", &self.interactive)
            .field("on_error", &self.on_error.is_some())
            .finish_non_exhaustive()
    }
}

/// Overall labels for the task pass
#[derive(Debug, Clone)]
pub struct QueueLabels {
    pub start: String,
    pub end: String,
}

impl Default for QueueLabels {
    fn default() -> Self {
        Self {
            start: "Project initializing...".to_string(),
            end: "Project initialized!".to_string(),
        }
    }
}

/// Execute tasks strictly in order, each to completion before the next
pub async fn run_tasks(
    labels: &QueueLabels,
    tasks: Vec<Task>,
    reporter: &dyn Reporter,
) -> Result<()> {
    reporter.tasks_started(&labels.start);

    for task in tasks {
        let Task {
            pending,
            start,
            end,
            interactive,
            on_error,
            operation,
        } = task;

        debug!(task = %pending, "Starting task");
        reporter.task_started(&pending, &start, interactive);

        let err = match operation().await {
            Ok(()) => {
                debug!(task = %pending, "Task finished");
                reporter.task_finished(&end);
                continue;
            }
            Err(err) => err,
        };

        let recovery = match on_error {
            Some(handler) => handler(&err, reporter),
            None if err.is_reported() => {
                reporter.tasks_finished(&labels.end, false);
                return Err(err);
            }
            None => {
                reporter.error("error", &err.to_string());
                Recovery::Exit(1)
            }
        };

        match recovery {
            Recovery::Continue => {
                debug!(task = %pending, error = %err, "Task failed, continuing");
                reporter.task_failed(&pending);
            }
            Recovery::Exit(code) => {
                debug!(task = %pending, error = %err, code, "Task aborted the run");
                reporter.tasks_finished(&labels.end, false);
                return Err(ScaffoldError::Exit(code));
            }
        }
    }

    reporter.tasks_finished(&labels.end, true);
    Ok(())
}
