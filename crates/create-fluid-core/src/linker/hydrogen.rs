//! Shopify Hydrogen storefront linking

use super::{env_pull_error, EnvFile, LinkError, ServiceIntegration};
use crate::shell::CommandSpec;
use serde::Deserialize;
use std::path::Path;

/// Project state written by `shopify hydrogen link`
pub const PROJECT_FILE: &str = ".shopify/project.json";

/// Every linked storefront id starts with this
pub const STOREFRONT_ID_PREFIX: &str = "gid://shopify/HydrogenStorefront";

const STORE_DOMAIN_KEY: &str = "PUBLIC_STORE_DOMAIN";
const CHECKOUT_DOMAIN_KEY: &str = "PUBLIC_CHECKOUT_DOMAIN";

#[derive(Debug, Deserialize)]
struct ShopifyProject {
    storefront: Option<Storefront>,
}

#[derive(Debug, Deserialize)]
struct Storefront {
    id: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Hydrogen;

impl Hydrogen {
    fn shopify(installed: bool, args: &[&str]) -> CommandSpec {
        if installed {
            let mut full = vec!["exec", "shopify", "hydrogen"];
            full.extend_from_slice(args);
            CommandSpec::new("npm", full)
        } else {
            let mut full = vec!["shopify@latest", "hydrogen"];
            full.extend_from_slice(args);
            CommandSpec::new("npx", full)
        }
    }
}

impl ServiceIntegration for Hydrogen {
    fn name(&self) -> &'static str {
        "Hydrogen"
    }

    fn link_command(&self, installed: bool) -> CommandSpec {
        Self::shopify(installed, &["link"])
    }

    fn validate_link(&self, cwd: &Path) -> Result<(), LinkError> {
        let not_linked = |reason: &str| LinkError::NotLinked {
            service: self.name(),
            reason: reason.to_string(),
        };

        let content = std::fs::read_to_string(cwd.join(PROJECT_FILE))
            .map_err(|e| not_linked(&format!("cannot read {}: {}", PROJECT_FILE, e)))?;
        let project: ShopifyProject = serde_json::from_str(&content)
            .map_err(|e| not_linked(&format!("malformed {}: {}", PROJECT_FILE, e)))?;

        match project.storefront.and_then(|s| s.id) {
            Some(id) if id.starts_with(STOREFRONT_ID_PREFIX) => Ok(()),
            Some(id) => Err(not_linked(&format!("unexpected storefront id {}", id))),
            None => Err(not_linked("no storefront id")),
        }
    }

    fn pull_command(&self, installed: bool) -> Option<CommandSpec> {
        Some(Self::shopify(installed, &["env", "pull"]))
    }

    fn import_env(&self, cwd: &Path) -> Result<(), LinkError> {
        let path = cwd.join(".env");
        let mut env = EnvFile::read(&path).map_err(|e| env_pull_error(self.name(), e))?;

        let domain = env
            .get(STORE_DOMAIN_KEY)
            .map(str::to_string)
            .ok_or_else(|| env_pull_error(self.name(), format!("{} missing from .env", STORE_DOMAIN_KEY)))?;

        env.set(CHECKOUT_DOMAIN_KEY, &domain);
        env.write(&path).map_err(|e| env_pull_error(self.name(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linker::link_service;
    use crate::test_support::{RecordingReporter, RecordingShell};
    use crate::ScaffoldError;

    fn write_project(dir: &Path, id: &str) {
        std::fs::create_dir_all(dir.join(".shopify")).unwrap();
        std::fs::write(
            dir.join(PROJECT_FILE),
            format!("{{\"storefront\": {{\"id\": \"{}\", \"title\": \"Shop\"}}}}", id),
        )
        .unwrap();
    }

    #[test]
    fn test_commands_depend_on_install_state() {
        assert_eq!(
            Hydrogen.link_command(true).to_string(),
            "npm exec shopify hydrogen link"
        );
        assert_eq!(
            Hydrogen.link_command(false).to_string(),
            "npx shopify@latest hydrogen link"
        );
        assert_eq!(
            Hydrogen.pull_command(false).unwrap().to_string(),
            "npx shopify@latest hydrogen env pull"
        );
    }

    #[test]
    fn test_validate_link_accepts_storefront_id() {
        let dir = tempfile::tempdir().unwrap();
        write_project(dir.path(), "gid://shopify/HydrogenStorefront/123");
        assert!(Hydrogen.validate_link(dir.path()).is_ok());
    }

    #[test]
    fn test_validate_link_rejects_bad_state() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Hydrogen.validate_link(dir.path()),
            Err(LinkError::NotLinked { .. })
        ));

        write_project(dir.path(), "gid://shopify/Shop/1");
        assert!(matches!(
            Hydrogen.validate_link(dir.path()),
            Err(LinkError::NotLinked { .. })
        ));

        std::fs::write(dir.path().join(PROJECT_FILE), "{ nope").unwrap();
        assert!(matches!(
            Hydrogen.validate_link(dir.path()),
            Err(LinkError::NotLinked { .. })
        ));

        std::fs::write(dir.path().join(PROJECT_FILE), "{\"storefront\": null}").unwrap();
        assert!(matches!(
            Hydrogen.validate_link(dir.path()),
            Err(LinkError::NotLinked { .. })
        ));
    }

    #[tokio::test]
    async fn test_link_imports_checkout_domain() {
        let dir = tempfile::tempdir().unwrap();
        let shell = RecordingShell::new()
            .on_run("npx shopify@latest hydrogen link", |cwd| {
                write_project(cwd, "gid://shopify/HydrogenStorefront/42");
            })
            .on_run("npx shopify@latest hydrogen env pull", |cwd| {
                std::fs::write(cwd.join(".env"), "SESSION_SECRET=s\nPUBLIC_STORE_DOMAIN=example.com\n")
                    .unwrap();
            });

        link_service(&Hydrogen, &shell, &RecordingReporter::default(), dir.path(), false)
            .await
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(dir.path().join(".env")).unwrap(),
            "SESSION_SECRET=s\nPUBLIC_STORE_DOMAIN=example.com\nPUBLIC_CHECKOUT_DOMAIN=example.com\n"
        );
        assert_eq!(
            shell.commands(),
            vec!["npx shopify@latest hydrogen link", "npx shopify@latest hydrogen env pull"]
        );
    }

    #[tokio::test]
    async fn test_successful_command_with_wrong_id_is_not_linked() {
        let dir = tempfile::tempdir().unwrap();
        let shell = RecordingShell::new().on_run("npm exec shopify hydrogen link", |cwd| {
            write_project(cwd, "gid://shopify/Other/1");
        });

        let err = link_service(&Hydrogen, &shell, &RecordingReporter::default(), dir.path(), true)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ScaffoldError::Link(LinkError::NotLinked { service: "Hydrogen", .. })
        ));
        assert_eq!(err.to_string(), "Error linking Hydrogen");
        // No env pull after a failed validation
        assert_eq!(shell.commands(), vec!["npm exec shopify hydrogen link"]);
    }

    #[tokio::test]
    async fn test_link_command_failure() {
        let dir = tempfile::tempdir().unwrap();
        let shell = RecordingShell::new().fail_on("npm exec shopify hydrogen link", 1);

        let err = link_service(&Hydrogen, &shell, &RecordingReporter::default(), dir.path(), true)
            .await
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::Link(LinkError::LinkFailed { .. })));
    }

    #[tokio::test]
    async fn test_pull_without_store_domain_fails() {
        let dir = tempfile::tempdir().unwrap();
        let shell = RecordingShell::new()
            .on_run("npm exec shopify hydrogen link", |cwd| {
                write_project(cwd, "gid://shopify/HydrogenStorefront/42");
            })
            .on_run("npm exec shopify hydrogen env pull", |cwd| {
                std::fs::write(cwd.join(".env"), "SESSION_SECRET=s\n").unwrap();
            });

        let err = link_service(&Hydrogen, &shell, &RecordingReporter::default(), dir.path(), true)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Error pulling environment variables");
    }
}
