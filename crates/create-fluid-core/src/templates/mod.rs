//! Template resolution, fetching and materialization
//!
//! This module provides:
//! - The template catalog and source locators
//! - Template fetching from GitHub archives or a local directory
//! - Materialization into the target directory with post-processing

pub mod archive;
pub mod catalog;
pub mod fetcher;
pub mod materialize;
pub mod package_json;

pub use catalog::{Repository, TemplateCatalog, TemplateEntry, TemplateLocator, BASE_TEMPLATE};
pub use fetcher::{FetchError, LocalFetcher, RemoteFetcher, TemplateFetcher};
pub use materialize::materialize;
