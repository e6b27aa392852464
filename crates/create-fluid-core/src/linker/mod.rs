//! Linking the project to hosted third-party services
//!
//! Every integration follows the same shape: run the service's CLI to link
//! the project, confirm the link from the state it leaves on disk, pull or
//! import environment values into `.env`, then run optional setup commands.

pub mod env_file;
pub mod hydrogen;
pub mod sanity;

use crate::error::{Result, ScaffoldError};
use crate::report::Reporter;
use crate::shell::{run_checked, CommandSpec, RunOptions, Shell};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

pub use env_file::EnvFile;
pub use hydrogen::Hydrogen;
pub use sanity::Sanity;

/// Cause-specific service link failures
#[derive(Debug, Error)]
pub enum LinkError {
    /// The link command itself failed
    #[error("Error linking {service}")]
    LinkFailed {
        service: &'static str,
        #[source]
        source: Box<ScaffoldError>,
    },

    /// The link command succeeded but the project state shows no link
    #[error("Error linking {service}")]
    NotLinked {
        service: &'static str,
        reason: String,
    },

    #[error("Error pulling environment variables")]
    EnvPull {
        service: &'static str,
        reason: String,
    },

    #[error("Error creating {what}")]
    Setup {
        service: &'static str,
        what: &'static str,
        #[source]
        source: Box<ScaffoldError>,
    },
}

/// A hosted service the project can be linked to
pub trait ServiceIntegration: Send + Sync {
    /// Display name ("Hydrogen", "Sanity")
    fn name(&self) -> &'static str;

    /// Command that links or initializes the service; `installed` selects the
    /// local binary over a fetch-and-run invocation
    fn link_command(&self, installed: bool) -> CommandSpec;

    /// Confirm the link from the project state the link command left behind
    fn validate_link(&self, cwd: &Path) -> std::result::Result<(), LinkError>;

    /// Command that writes the service's environment values, if any
    fn pull_command(&self, _installed: bool) -> Option<CommandSpec> {
        None
    }

    /// Derive and merge values into the project's `.env`
    fn import_env(&self, cwd: &Path) -> std::result::Result<(), LinkError>;

    /// Post-link setup commands, each with what it creates; only run when
    /// dependencies are installed
    fn setup_commands(&self) -> Vec<(&'static str, CommandSpec)> {
        Vec::new()
    }
}

/// Run the link sequence for one integration
///
/// Each command and each state check is its own failure point, reported as
/// a [`LinkError`].
pub async fn link_service(
    integration: &dyn ServiceIntegration,
    shell: &dyn Shell,
    reporter: &dyn Reporter,
    cwd: &Path,
    installed: bool,
) -> Result<()> {
    let service = integration.name();
    let link = integration.link_command(installed);
    debug!(service, command = %link, "Linking service");

    run_checked(shell, &link, &RunOptions::inherit(cwd))
        .await
        .map_err(|e| LinkError::LinkFailed {
            service,
            source: Box::new(e),
        })?;

    integration.validate_link(cwd)?;

    if let Some(pull) = integration.pull_command(installed) {
        run_checked(shell, &pull, &RunOptions::inherit(cwd))
            .await
            .map_err(|e| LinkError::EnvPull {
                service,
                reason: e.to_string(),
            })?;
    }

    integration.import_env(cwd)?;

    let setup = integration.setup_commands();
    if setup.is_empty() {
        return Ok(());
    }

    if !installed {
        let names: Vec<&str> = setup.iter().map(|(what, _)| *what).collect();
        reporter.log(&format!(
            "Skipping {} creation as dependencies are not installed...",
            names.join(" and ")
        ));
        return Ok(());
    }

    for (what, command) in setup {
        reporter.log(&format!("Creating {}...", what));
        run_checked(shell, &command, &RunOptions::ignore(cwd))
            .await
            .map_err(|e| LinkError::Setup {
                service,
                what,
                source: Box::new(e),
            })?;
    }

    Ok(())
}

/// Map a filesystem failure during env import
pub(crate) fn env_pull_error(service: &'static str, err: impl std::fmt::Display) -> LinkError {
    LinkError::EnvPull {
        service,
        reason: err.to_string(),
    }
}
