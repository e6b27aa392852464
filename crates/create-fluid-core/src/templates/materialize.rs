//! Materializing a template into the target directory

use super::catalog::TemplateLocator;
use super::fetcher::{FetchError, TemplateFetcher};
use super::package_json;
use crate::error::{Result, ScaffoldError};
use std::io;
use std::path::Path;
use tokio::task::JoinSet;
use tracing::debug;

/// Files only needed while authoring the template (online editors, CI, lockfile)
pub const FILES_TO_REMOVE: &[&str] = &["CHANGELOG.md", ".codesandbox", "pnpm-lock.yaml", ".github"];

/// Package manifest rewritten for the new project
pub const MANIFEST_FILE: &str = "package.json";

/// Fetch a template into `target_dir` and prepare it as a new project
///
/// On a fetch failure, a target directory created for this run is removed
/// (only if empty) before the error is returned.
pub async fn materialize(
    fetcher: &dyn TemplateFetcher,
    template: &str,
    locator: &TemplateLocator,
    target_dir: &Path,
    project_name: &str,
    launch_dir: &Path,
) -> Result<()> {
    debug!(template, locator = %locator, target = %target_dir.display(), "Materializing template");

    if let Err(err) = fetcher.fetch(locator, target_dir).await {
        if owns_directory(target_dir, launch_dir) {
            if let Err(cleanup) = std::fs::remove_dir(target_dir) {
                debug!(error = %cleanup, "Could not remove target directory after failed fetch");
            }
        }

        return Err(match err {
            FetchError::NotFound(_) => ScaffoldError::TemplateNotFound(template.to_string()),
            FetchError::Failed(message) => ScaffoldError::Fetch(message),
        });
    }

    // A valid repository with an invalid sub-path fetches nothing without failing
    if is_empty_dir(target_dir)? {
        return Err(ScaffoldError::TemplateEmpty(template.to_string()));
    }

    post_process(target_dir, project_name).await
}

/// Whether `target` was most likely created by this run
///
/// The launch directory itself and anything above it are never owned.
pub fn owns_directory(target: &Path, launch_dir: &Path) -> bool {
    let resolved = if target.is_relative() {
        let raw = target.to_string_lossy();
        if raw.is_empty() || raw == "." || raw == "./" || raw == ".." || raw.starts_with("../") {
            return false;
        }
        launch_dir.join(target)
    } else {
        target.to_path_buf()
    };

    resolved != launch_dir && !launch_dir.starts_with(&resolved)
}

fn is_empty_dir(dir: &Path) -> Result<bool> {
    match std::fs::read_dir(dir) {
        Ok(mut entries) => Ok(entries.next().is_none()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(true),
        Err(e) => Err(e.into()),
    }
}

/// Remove authoring-only files and rewrite the manifest, all concurrently
///
/// Every operation runs to completion; the first failure is returned.
async fn post_process(target_dir: &Path, project_name: &str) -> Result<()> {
    let mut jobs: JoinSet<Result<()>> = JoinSet::new();

    for file in FILES_TO_REMOVE {
        let path = target_dir.join(file);
        jobs.spawn(async move { remove_if_exists(&path).await });
    }

    let manifest = target_dir.join(MANIFEST_FILE);
    let name = project_name.to_string();
    jobs.spawn(async move {
        if tokio::fs::try_exists(&manifest).await? {
            package_json::rewrite_file(&manifest, &name).await?;
        }
        Ok(())
    });

    let mut first_error = None;
    while let Some(joined) = jobs.join_next().await {
        let result = joined.unwrap_or_else(|e| Err(ScaffoldError::Io(io::Error::other(e))));
        if let Err(e) = result {
            first_error.get_or_insert(e);
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

async fn remove_if_exists(path: &Path) -> Result<()> {
    let metadata = match tokio::fs::symlink_metadata(path).await {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.into()),
    };

    if metadata.is_dir() {
        tokio::fs::remove_dir_all(path).await?;
    } else {
        tokio::fs::remove_file(path).await?;
    }
    Ok(())
}
