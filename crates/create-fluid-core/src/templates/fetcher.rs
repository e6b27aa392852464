//! Template fetching from GitHub archives or a local directory
//!
//! Both sources go through zip archives for consistency:
//! - Remote: downloads the repository archive for the locator's ref
//! - Local: packs the template folder into an archive, then uses it
//!
//! This ensures identical behavior between development and production.

use super::archive;
use super::catalog::TemplateLocator;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Host probed by the reachability check
const GITHUB_HOST: &str = "github.com:443";

/// Timeout for the reachability check
const REACHABILITY_TIMEOUT: Duration = Duration::from_secs(5);

/// Failure reported by the fetch layer
#[derive(Debug, Error)]
pub enum FetchError {
    /// The source does not exist (HTTP 404 or missing directory)
    #[error("{0}: 404 not found")]
    NotFound(String),

    #[error("{0}")]
    Failed(String),
}

/// Retrieves template sources and extracts them into a directory
#[async_trait]
pub trait TemplateFetcher: Send + Sync {
    /// Whether the template host can be reached at all
    async fn is_reachable(&self) -> bool;

    /// Whether the locator points at an existing source
    async fn exists(&self, locator: &TemplateLocator) -> Result<bool, FetchError>;

    /// Fetch the source and extract it into `dest`, overwriting existing files
    async fn fetch(&self, locator: &TemplateLocator, dest: &Path) -> Result<(), FetchError>;
}

/// Fetches repository archives over HTTPS
pub struct RemoteFetcher {
    client: reqwest::Client,
}

impl RemoteFetcher {
    /// Create a new fetcher with a custom user agent
    pub fn new(user_agent: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    async fn download(&self, locator: &TemplateLocator) -> Result<Vec<u8>, FetchError> {
        let url = locator
            .archive_url()
            .map_err(|e| FetchError::Failed(e.to_string()))?;
        debug!(url = %url, "Downloading template archive");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Failed(format!("Failed to download {}: {}", locator, e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(locator.to_string()));
        }
        if !status.is_success() {
            return Err(FetchError::Failed(format!(
                "Failed to download {} from {}: HTTP {}",
                locator, url, status
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Failed(format!("Failed to download {}: {}", locator, e)))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl TemplateFetcher for RemoteFetcher {
    async fn is_reachable(&self) -> bool {
        matches!(
            tokio::time::timeout(REACHABILITY_TIMEOUT, tokio::net::TcpStream::connect(GITHUB_HOST))
                .await,
            Ok(Ok(_))
        )
    }

    async fn exists(&self, locator: &TemplateLocator) -> Result<bool, FetchError> {
        let url = locator
            .archive_url()
            .map_err(|e| FetchError::Failed(e.to_string()))?;
        let response = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|e| FetchError::Failed(e.to_string()))?;
        Ok(response.status().is_success())
    }

    async fn fetch(&self, locator: &TemplateLocator, dest: &Path) -> Result<(), FetchError> {
        let bytes = self.download(locator).await?;
        tokio::fs::create_dir_all(dest)
            .await
            .map_err(|e| FetchError::Failed(format!("Failed to create {}: {}", dest.display(), e)))?;

        let written = archive::extract(&bytes, locator.repository.subdir.as_deref(), dest)
            .map_err(|e| FetchError::Failed(format!("Failed to extract {}: {}", locator, e)))?;
        debug!(locator = %locator, files = written, "Template extracted");
        Ok(())
    }
}

/// Serves templates from a local directory (for development use)
///
/// The base template is the directory itself; any other ref is a
/// subdirectory of the same name.
pub struct LocalFetcher {
    root: PathBuf,
}

impl LocalFetcher {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn source_dir(&self, locator: &TemplateLocator) -> PathBuf {
        match &locator.reference {
            Some(reference) => self.root.join(reference),
            None => self.root.clone(),
        }
    }
}

#[async_trait]
impl TemplateFetcher for LocalFetcher {
    async fn is_reachable(&self) -> bool {
        true
    }

    async fn exists(&self, locator: &TemplateLocator) -> Result<bool, FetchError> {
        Ok(self.source_dir(locator).is_dir())
    }

    async fn fetch(&self, locator: &TemplateLocator, dest: &Path) -> Result<(), FetchError> {
        let source = self.source_dir(locator);
        if !source.is_dir() {
            return Err(FetchError::NotFound(source.display().to_string()));
        }

        let top_level = locator.reference.as_deref().unwrap_or("local").replace('/', "-");
        let bytes = archive::pack_dir(&source, &top_level)
            .map_err(|e| FetchError::Failed(format!("Failed to read {}: {}", source.display(), e)))?;

        std::fs::create_dir_all(dest)
            .map_err(|e| FetchError::Failed(format!("Failed to create {}: {}", dest.display(), e)))?;
        archive::extract(&bytes, locator.repository.subdir.as_deref(), dest)
            .map_err(|e| FetchError::Failed(format!("Failed to extract {}: {}", locator, e)))?;
        Ok(())
    }
}
