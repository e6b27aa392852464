//! Operator-facing progress and message surface

/// Receives every message a run shows the operator
///
/// All user-visible failures are rendered as a prefix plus a detail line.
/// Implementations must not fail: output is informational only.
pub trait Reporter: Send + Sync {
    /// Informational message (e.g. "Sounds good!", "You can always run ...")
    fn info(&self, prefix: &str, text: &str);

    /// Error message
    fn error(&self, prefix: &str, text: &str);

    /// Free-form line
    fn log(&self, text: &str);

    /// The task pass begins
    fn tasks_started(&self, label: &str);

    /// A task is about to run its operation; `interactive` tasks let a child
    /// process use the terminal while they run
    fn task_started(&self, pending: &str, start: &str, interactive: bool);

    /// A task's operation completed successfully
    fn task_finished(&self, end: &str);

    /// A task failed and its error handler let the run continue
    fn task_failed(&self, pending: &str);

    /// The task pass is over (`success` is false when a task aborted it)
    fn tasks_finished(&self, label: &str, success: bool);
}
