//! External command execution
//!
//! Steps and tasks never spawn processes directly; they go through the
//! [`Shell`] capability so a run can be exercised without touching the system.

use crate::error::{Result, ScaffoldError};
use async_trait::async_trait;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::process::Command as TokioCommand;
use tracing::debug;

/// A program and its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// How the child's standard streams are wired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stdio {
    /// Share the operator's terminal (interactive external CLIs)
    #[default]
    Inherit,
    /// Discard all output
    Ignore,
}

/// Options for a single command invocation
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub cwd: PathBuf,
    pub stdio: Stdio,
}

impl RunOptions {
    pub fn inherit(cwd: &Path) -> Self {
        Self {
            cwd: cwd.to_path_buf(),
            stdio: Stdio::Inherit,
        }
    }

    pub fn ignore(cwd: &Path) -> Self {
        Self {
            cwd: cwd.to_path_buf(),
            stdio: Stdio::Ignore,
        }
    }
}

/// Exit status of a finished command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    pub code: Option<i32>,
}

impl CommandStatus {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for CommandStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

/// Runs external commands to completion
#[async_trait]
pub trait Shell: Send + Sync {
    async fn run(&self, command: &CommandSpec, options: &RunOptions)
        -> std::io::Result<CommandStatus>;
}

/// Run a command and map a non-zero exit status to an error
pub async fn run_checked(
    shell: &dyn Shell,
    command: &CommandSpec,
    options: &RunOptions,
) -> Result<()> {
    let status = shell
        .run(command, options)
        .await
        .map_err(|source| ScaffoldError::Spawn {
            command: command.to_string(),
            source,
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(ScaffoldError::Command {
            command: command.to_string(),
            code: status.code,
        })
    }
}

/// Shell backed by real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemShell;

#[async_trait]
impl Shell for SystemShell {
    async fn run(
        &self,
        command: &CommandSpec,
        options: &RunOptions,
    ) -> std::io::Result<CommandStatus> {
        debug!(command = %command, cwd = %options.cwd.display(), stdio = ?options.stdio, "Running command");

        let mut cmd = TokioCommand::new(&command.program);
        cmd.args(&command.args).current_dir(&options.cwd);

        if options.stdio == Stdio::Ignore {
            cmd.stdin(std::process::Stdio::null())
                .stdout(std::process::Stdio::null())
                .stderr(std::process::Stdio::null());
        }

        let status = cmd.status().await?;
        debug!(command = %command, code = ?status.code(), "Command finished");
        Ok(status.into())
    }
}
