//! Dependency installation

use crate::context::{Context, Decision};
use crate::error::Result;
use crate::prompt::Question;
use crate::shell::{run_checked, RunOptions};
use crate::tasks::{Recovery, Task};

/// Decide whether to install and queue `<pm> install`
pub fn dependencies(ctx: &mut Context) -> Result<()> {
    let question = Question::confirm("install", "deps", "Install dependencies?")
        .with_hint("recommended");

    if !ctx.decide(Decision::Install, &question)? {
        ctx.info("No problem!", "Remember to install dependencies after setup.");
        return Ok(());
    }

    let package_manager = ctx.package_manager;
    let shell = ctx.shell();
    let cwd = ctx.cwd.clone();

    ctx.push_task(
        Task::new(
            "Dependencies",
            format!("Dependencies installing with {}...", package_manager),
            "Dependencies installed",
            move || async move {
                run_checked(
                    shell.as_ref(),
                    &package_manager.install_command(),
                    &RunOptions::ignore(&cwd),
                )
                .await
            },
        )
        .on_error(move |err, reporter| {
            reporter.error("error", &err.to_string());
            reporter.error(
                "error",
                &format!(
                    "Dependencies failed to install, please run {} to install them manually after setup.",
                    package_manager.install_command()
                ),
            );
            Recovery::Continue
        }),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::PackageManager;
    use crate::prompt::Answer;
    use crate::shell::Stdio;
    use crate::tasks::{run_tasks, QueueLabels};
    use crate::test_support::{RecordingShell, ReportEvent, TestRun};

    #[tokio::test]
    async fn test_install_runs_quietly_with_detected_manager() {
        let run = TestRun::new();
        let mut ctx = run.context().with_package_manager(PackageManager::Pnpm);

        dependencies(&mut ctx).unwrap();
        assert_eq!(ctx.install, Some(true));
        assert_eq!(ctx.tasks[0].start, "Dependencies installing with pnpm...");

        let tasks = std::mem::take(&mut ctx.tasks);
        run_tasks(&QueueLabels::default(), tasks, run.reporter.as_ref())
            .await
            .unwrap();

        assert_eq!(run.shell.commands(), vec!["pnpm install"]);
        assert_eq!(run.shell.stdio_of("pnpm install"), Some(Stdio::Ignore));
        assert_eq!(run.shell.cwd_of("pnpm install"), Some(ctx.cwd.clone()));
    }

    #[test]
    fn test_declined_install_only_reminds() {
        let run = TestRun::new().answer("install", Answer::Bool(false));
        let mut ctx = run.context();

        dependencies(&mut ctx).unwrap();

        assert!(ctx.tasks.is_empty());
        assert!(run.reporter.events().contains(&ReportEvent::Info(
            "No problem!".into(),
            "Remember to install dependencies after setup.".into()
        )));
    }

    #[tokio::test]
    async fn test_failed_install_reports_and_continues() {
        let run = TestRun::new().with_shell(RecordingShell::new().fail_on("npm install", 1));
        let mut ctx = run.context();

        dependencies(&mut ctx).unwrap();
        let tasks = std::mem::take(&mut ctx.tasks);
        run_tasks(&QueueLabels::default(), tasks, run.reporter.as_ref())
            .await
            .unwrap();

        assert!(run.reporter.events().contains(&ReportEvent::Error(
            "error".into(),
            "Dependencies failed to install, please run npm install to install them manually after setup."
                .into()
        )));
    }
}
