//! Sanity project linking

use super::{env_pull_error, EnvFile, LinkError, ServiceIntegration};
use crate::shell::CommandSpec;
use std::path::Path;

/// Side file `sanity init` stages its values into
pub const SANITY_ENV_FILE: &str = ".env.sanity";

const DATASET_KEY: &str = "PUBLIC_SANITY_DATASET";
const PROJECT_ID_KEY: &str = "PUBLIC_SANITY_PROJECT_ID";

#[derive(Debug, Clone, Copy, Default)]
pub struct Sanity;

impl ServiceIntegration for Sanity {
    fn name(&self) -> &'static str {
        "Sanity"
    }

    fn link_command(&self, installed: bool) -> CommandSpec {
        if installed {
            CommandSpec::new("npm", ["exec", "--", "sanity", "init", "--env", SANITY_ENV_FILE])
        } else {
            CommandSpec::new("npx", ["sanity@latest", "init", "--env", SANITY_ENV_FILE])
        }
    }

    fn validate_link(&self, cwd: &Path) -> Result<(), LinkError> {
        if cwd.join(SANITY_ENV_FILE).is_file() {
            Ok(())
        } else {
            Err(env_pull_error(
                self.name(),
                format!("{} was not written", SANITY_ENV_FILE),
            ))
        }
    }

    fn import_env(&self, cwd: &Path) -> Result<(), LinkError> {
        let staged_path = cwd.join(SANITY_ENV_FILE);
        let env_path = cwd.join(".env");

        let staged = EnvFile::read(&staged_path).map_err(|e| env_pull_error(self.name(), e))?;
        let mut env =
            EnvFile::read_or_default(&env_path).map_err(|e| env_pull_error(self.name(), e))?;

        let lookup = |key: &str| {
            staged
                .get(key)
                .map(str::to_string)
                .ok_or_else(|| env_pull_error(self.name(), format!("{} missing from {}", key, SANITY_ENV_FILE)))
        };
        let dataset = lookup(DATASET_KEY)?;
        let project_id = lookup(PROJECT_ID_KEY)?;

        env.set("PUBLIC_SANITY_STUDIO_DATASET", &dataset);
        env.set("PUBLIC_SANITY_STUDIO_PROJECT_ID", &project_id);
        env.set("SANITY_STUDIO_USE_PREVIEW_MODE", "true");
        env.write(&env_path)
            .map_err(|e| env_pull_error(self.name(), e))?;

        std::fs::remove_file(&staged_path).map_err(|e| env_pull_error(self.name(), e))
    }

    fn setup_commands(&self) -> Vec<(&'static str, CommandSpec)> {
        vec![
            ("CORS", CommandSpec::new("npm", ["run", "create:cors"])),
            ("token", CommandSpec::new("npm", ["run", "create:token"])),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linker::link_service;
    use crate::shell::Stdio;
    use crate::test_support::{RecordingReporter, RecordingShell, ReportEvent};
    use crate::ScaffoldError;

    fn stage_values(cwd: &Path) {
        std::fs::write(
            cwd.join(SANITY_ENV_FILE),
            "PUBLIC_SANITY_PROJECT_ID=abc123\nPUBLIC_SANITY_DATASET=production\n",
        )
        .unwrap();
    }

    #[tokio::test]
    async fn test_link_merges_staged_values_and_deletes_side_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".env"), "PUBLIC_STORE_DOMAIN=example.com\n").unwrap();
        let shell = RecordingShell::new().on_run("npx sanity@latest init --env .env.sanity", stage_values);
        let reporter = RecordingReporter::default();

        link_service(&Sanity, &shell, &reporter, dir.path(), false)
            .await
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(dir.path().join(".env")).unwrap(),
            "PUBLIC_STORE_DOMAIN=example.com\n\
             PUBLIC_SANITY_STUDIO_DATASET=production\n\
             PUBLIC_SANITY_STUDIO_PROJECT_ID=abc123\n\
             SANITY_STUDIO_USE_PREVIEW_MODE=true\n"
        );
        assert!(!dir.path().join(SANITY_ENV_FILE).exists());
        // Setup commands need installed dependencies
        assert_eq!(shell.commands(), vec!["npx sanity@latest init --env .env.sanity"]);
        assert!(reporter.events().contains(&ReportEvent::Log(
            "Skipping CORS and token creation as dependencies are not installed...".into()
        )));
    }

    #[tokio::test]
    async fn test_link_without_env_file_creates_it() {
        let dir = tempfile::tempdir().unwrap();
        let shell = RecordingShell::new().on_run("npx sanity@latest init --env .env.sanity", stage_values);

        link_service(&Sanity, &shell, &RecordingReporter::default(), dir.path(), false)
            .await
            .unwrap();

        let env = EnvFile::read(&dir.path().join(".env")).unwrap();
        assert_eq!(env.get("PUBLIC_SANITY_STUDIO_PROJECT_ID"), Some("abc123"));
    }

    #[tokio::test]
    async fn test_installed_runs_setup_commands_quietly() {
        let dir = tempfile::tempdir().unwrap();
        let shell =
            RecordingShell::new().on_run("npm exec -- sanity init --env .env.sanity", stage_values);

        link_service(&Sanity, &shell, &RecordingReporter::default(), dir.path(), true)
            .await
            .unwrap();

        assert_eq!(
            shell.commands(),
            vec![
                "npm exec -- sanity init --env .env.sanity",
                "npm run create:cors",
                "npm run create:token"
            ]
        );
        assert_eq!(shell.stdio_of("npm run create:cors"), Some(Stdio::Ignore));
        assert_eq!(
            shell.stdio_of("npm exec -- sanity init --env .env.sanity"),
            Some(Stdio::Inherit)
        );
    }

    #[tokio::test]
    async fn test_missing_side_file_is_env_pull_error() {
        let dir = tempfile::tempdir().unwrap();
        let shell = RecordingShell::new();

        let err = link_service(&Sanity, &shell, &RecordingReporter::default(), dir.path(), false)
            .await
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::Link(LinkError::EnvPull { .. })));
    }

    #[tokio::test]
    async fn test_setup_failure_names_what_failed() {
        let dir = tempfile::tempdir().unwrap();
        let shell = RecordingShell::new()
            .on_run("npm exec -- sanity init --env .env.sanity", stage_values)
            .fail_on("npm run create:token", 1);

        let err = link_service(&Sanity, &shell, &RecordingReporter::default(), dir.path(), true)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Error creating token");
    }
}
