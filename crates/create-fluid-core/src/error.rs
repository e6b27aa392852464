//! Error taxonomy for a scaffolding run

use crate::linker::LinkError;
use thiserror::Error;

/// Errors surfaced by steps, tasks and the template materializer
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The fetch layer reported that the template source does not exist
    #[error("Template {0} does not exist!")]
    TemplateNotFound(String),

    /// Extraction succeeded but left nothing in the target directory
    #[error("Template {0} is empty!")]
    TemplateEmpty(String),

    /// Any other fetch failure, carrying the underlying message
    #[error("{0}")]
    Fetch(String),

    /// Invalid repository specifier
    #[error("Invalid template repository: {0}")]
    InvalidRepository(String),

    /// A spawned command exited with a non-zero status
    #[error("`{command}` exited with status {}", code.map_or_else(|| "unknown".to_string(), |c| c.to_string()))]
    Command { command: String, code: Option<i32> },

    /// A command could not be started at all
    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Link(#[from] LinkError),

    #[error("Invalid package manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The operator aborted an interactive prompt
    #[error("Operation cancelled")]
    Interrupted,

    /// Explicit early termination requested by a step or task
    #[error("Exiting with status {0}")]
    Exit(i32),
}

impl ScaffoldError {
    /// Process exit code this error should terminate with
    pub fn exit_code(&self) -> i32 {
        match self {
            ScaffoldError::Interrupted => 0,
            ScaffoldError::Exit(code) => *code,
            _ => 1,
        }
    }

    /// Whether the operator has already been told about this error
    pub fn is_reported(&self) -> bool {
        matches!(self, ScaffoldError::Interrupted | ScaffoldError::Exit(_))
    }
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;
