//! Repository initialization

use crate::context::{Context, Decision};
use crate::error::Result;
use crate::prompt::Question;
use crate::shell::{run_checked, CommandSpec, RunOptions, Shell};
use crate::tasks::{Recovery, Task};
use std::path::Path;
use tracing::debug;

/// Decide on a new repository and queue its initialization
pub fn git(ctx: &mut Context) -> Result<()> {
    if ctx.cwd.join(".git").exists() {
        ctx.info("Nice!", "Git has already been initialized");
        return Ok(());
    }

    let question =
        Question::confirm("git", "git", "Initialize a new git repository?").with_hint("optional");
    if !ctx.decide(Decision::Git, &question)? {
        ctx.info("Sounds good!", "You can always run git init manually.");
        return Ok(());
    }

    let shell = ctx.shell();
    let cwd = ctx.cwd.clone();
    let message = ctx.product.commit_message.clone();
    let author = ctx.product.commit_author.clone();

    ctx.push_task(
        Task::new("Git", "Git initializing...", "Git initialized", move || async move {
            init_repository(shell.as_ref(), &cwd, &message, &author).await
        })
        .on_error(|err, reporter| {
            reporter.error("error", &err.to_string());
            Recovery::Exit(1)
        }),
    );
    Ok(())
}

/// `git init`, stage everything, then make the initial commit
///
/// A failed commit is logged and otherwise ignored.
pub async fn init_repository(
    shell: &dyn Shell,
    cwd: &Path,
    message: &str,
    author: &str,
) -> Result<()> {
    let options = RunOptions::ignore(cwd);

    run_checked(shell, &CommandSpec::new("git", ["init"]), &options).await?;
    run_checked(shell, &CommandSpec::new("git", ["add", "-A"]), &options).await?;

    let author_arg = format!("--author={}", author);
    let commit = CommandSpec::new("git", ["commit", "-m", message, author_arg.as_str()]);
    if let Err(err) = run_checked(shell, &commit, &options).await {
        debug!(error = %err, "Initial commit failed");
    }
    Ok(())
}
