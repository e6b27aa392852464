//! Template names, repositories and source locators

use crate::error::{Result, ScaffoldError};
use crate::product::ProductConfig;
use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use url::Url;

/// Identifier of the template that maps to the repository root
pub const BASE_TEMPLATE: &str = "base";

/// A GitHub repository, optionally narrowed to a subdirectory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
    pub subdir: Option<String>,
}

impl Repository {
    /// Parse `github:owner/name[/subdir]` (the provider prefix is optional)
    pub fn parse(specifier: &str) -> Result<Self> {
        let trimmed = specifier.trim();
        let path = trimmed.strip_prefix("github:").unwrap_or(trimmed);
        let mut parts = path.trim_matches('/').split('/').filter(|p| !p.is_empty());

        let (owner, name) = match (parts.next(), parts.next()) {
            (Some(owner), Some(name)) => (owner.to_string(), name.to_string()),
            _ => return Err(ScaffoldError::InvalidRepository(specifier.to_string())),
        };

        let subdir: Vec<&str> = parts.collect();
        let subdir = if subdir.is_empty() {
            None
        } else {
            Some(subdir.join("/"))
        };

        Ok(Self {
            owner,
            name,
            subdir,
        })
    }

    /// Browser URL of the repository
    pub fn web_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "github:{}/{}", self.owner, self.name)?;
        if let Some(subdir) = &self.subdir {
            write!(f, "/{}", subdir)?;
        }
        Ok(())
    }
}

/// Fetchable location of a template: a repository plus an optional ref
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateLocator {
    pub repository: Repository,
    pub reference: Option<String>,
}

impl TemplateLocator {
    /// Zip archive URL for this locator (`HEAD` when no ref is set)
    pub fn archive_url(&self) -> Result<Url> {
        let mut url = Url::parse("https://github.com/")
            .map_err(|e| ScaffoldError::Fetch(e.to_string()))?;
        let reference = self.reference.as_deref().unwrap_or("HEAD");
        let mut ref_parts: Vec<&str> = reference.split('/').collect();
        let last = ref_parts.pop().unwrap_or("HEAD");

        url.path_segments_mut()
            .map_err(|_| ScaffoldError::Fetch(format!("URL cannot have path segments: {}", self)))?
            .pop_if_empty()
            .push(&self.repository.owner)
            .push(&self.repository.name)
            .push("archive")
            .extend(ref_parts)
            .push(&format!("{}.zip", last));
        Ok(url)
    }
}

impl fmt::Display for TemplateLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.repository)?;
        if let Some(reference) = &self.reference {
            write!(f, "#{}", reference)?;
        }
        Ok(())
    }
}

/// One entry of the template catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateEntry {
    pub name: String,

    /// Branch, tag or commit holding the template
    #[serde(default, rename = "ref")]
    pub reference: Option<String>,

    #[serde(default)]
    pub description: String,
}

impl TemplateEntry {
    pub fn new(name: &str, reference: Option<&str>, description: &str) -> Self {
        Self {
            name: name.to_string(),
            reference: reference.map(str::to_string),
            description: description.to_string(),
        }
    }
}

/// Local catalog file (`<template-dir>/template.yaml`)
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    templates: Vec<TemplateEntry>,
}

/// Known templates of one repository
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    repository: Repository,
    entries: Vec<TemplateEntry>,
}

impl TemplateCatalog {
    /// Build a catalog; a `base` entry is added when missing
    pub fn new(repository: Repository, mut entries: Vec<TemplateEntry>) -> Self {
        if !entries.iter().any(|e| e.name == BASE_TEMPLATE) {
            entries.insert(
                0,
                TemplateEntry::new(BASE_TEMPLATE, None, "Default storefront"),
            );
        }
        Self {
            repository,
            entries,
        }
    }

    /// Catalog from a product config, honoring the repository override variable
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self> {
        let specifier = std::env::var(config.repository_env())
            .unwrap_or_else(|_| config.default_repository().to_string());
        let repository = Repository::parse(&specifier)?;
        Ok(Self::new(repository, config.templates()))
    }

    /// Catalog for a local template directory, read from its `template.yaml` if present
    pub fn load_local<C: ProductConfig>(config: &C, dir: &Path) -> anyhow::Result<Self> {
        let repository = Repository::parse(config.default_repository())?;
        let manifest_path = dir.join("template.yaml");
        if !manifest_path.exists() {
            return Ok(Self::new(repository, config.templates()));
        }

        let content = std::fs::read_to_string(&manifest_path)
            .with_context(|| format!("Failed to read {}", manifest_path.display()))?;
        let file: CatalogFile = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", manifest_path.display()))?;
        Ok(Self::new(repository, file.templates))
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    pub fn entries(&self) -> &[TemplateEntry] {
        &self.entries
    }

    /// Resolve a template name to its source locator
    ///
    /// `base` is the repository root. Any other name maps to the ref recorded
    /// in the catalog, or to a ref of the same name when it is not listed.
    pub fn resolve(&self, name: &str) -> TemplateLocator {
        let reference = if name == BASE_TEMPLATE {
            None
        } else {
            let entry = self.entries.iter().find(|e| e.name == name);
            Some(
                entry
                    .and_then(|e| e.reference.clone())
                    .unwrap_or_else(|| name.to_string()),
            )
        };

        TemplateLocator {
            repository: self.repository.clone(),
            reference,
        }
    }
}
