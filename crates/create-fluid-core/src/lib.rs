//! Create Fluid Core - Shared library for scaffolding Fluid storefronts
//!
//! A run walks an ordered list of steps over a shared [`Context`]. Steps ask
//! questions and queue deferred [`tasks::Task`]s; once every step has run,
//! the queued tasks execute in order and the next steps are reported.
//!
//! # Architecture
//!
//! - **Layer 1: Core Operations** - Template fetching and extraction, service
//!   linking, `.env` editing, command execution
//! - **Layer 2: Workflow Orchestration** - [`Context`], the step pipeline and
//!   the task queue, driven through the [`Prompter`], [`Shell`],
//!   [`templates::TemplateFetcher`] and [`Reporter`] capabilities
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts and
//!   reporting (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based terminal front end
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use create_fluid_core::{pipeline, Capabilities, Context, ProductSettings, Step};
//!
//! let mut ctx = Context::new(launch_dir, ProductSettings::from_config(&config), catalog, caps);
//! pipeline::scaffold(&mut ctx, &Step::ALL, &Default::default()).await?;
//! ```

pub mod context;
pub mod error;
pub mod linker;
pub mod logging;
pub mod pipeline;
pub mod product;
pub mod prompt;
pub mod report;
pub mod shell;
pub mod steps;
pub mod tasks;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(test)]
mod test_support;

// Re-export main types for convenience
pub use context::{Capabilities, Context, CreateArgs, Decision, PackageManager, ProductSettings};
pub use error::{Result, ScaffoldError};
pub use pipeline::Step;
pub use product::ProductConfig;
pub use prompt::{Answer, Prompter, Question, QuestionKind};
pub use report::Reporter;
pub use shell::{Shell, SystemShell};
pub use templates::{TemplateCatalog, TemplateEntry};

#[cfg(feature = "tui")]
pub use tui::run;
