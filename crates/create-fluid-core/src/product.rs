//! Product configuration trait for CLI binaries
//!
//! The binary implements this trait once to give the orchestration core its
//! identity: where templates live, what gets committed, and what to tell the
//! operator at the end.

use crate::templates::catalog::TemplateEntry;

/// Configuration trait for the scaffolded product
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for the CLI command and user agent)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Default template repository (e.g. `github:owner/repo`)
    fn default_repository(&self) -> &'static str;

    /// Environment variable name for overriding the template repository
    fn repository_env(&self) -> &'static str;

    /// Templates offered by the repository; must include `base`
    fn templates(&self) -> Vec<TemplateEntry>;

    /// Directory suggested when the target directory is not usable
    fn default_project_dir(&self) -> &'static str;

    /// Message for the initial git commit
    fn commit_message(&self) -> &'static str;

    /// Author for the initial git commit (`Name <email>`)
    fn commit_author(&self) -> &'static str;

    /// Extra product hints shown in the final "next steps" report
    fn next_steps_hints(&self) -> Vec<String> {
        Vec::new()
    }

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }
}
