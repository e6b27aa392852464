//! CLI prompts and progress output using cliclack (Charm-style inline prompts)
//!
//! This module is optional and only available when the `tui` feature is enabled.

mod prompts;
mod reporter;

pub use prompts::TerminalPrompter;
pub use reporter::TerminalReporter;

use crate::context::{Capabilities, Context, CreateArgs, PackageManager, ProductSettings};
use crate::error::{Result, ScaffoldError};
use crate::pipeline::{scaffold, Step};
use crate::product::ProductConfig;
use crate::shell::SystemShell;
use crate::tasks::QueueLabels;
use crate::templates::{LocalFetcher, RemoteFetcher, TemplateCatalog, TemplateFetcher};
use colored::Colorize;
use std::path::Path;
use std::sync::Arc;

/// Restore the cursor on panic, and exit 0 on an interrupt or terminate signal
pub fn install_terminal_guards() {
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(0);
    })
    .ok();
}

fn template_source<C: ProductConfig>(
    config: &C,
    template_dir: Option<&Path>,
) -> Result<(TemplateCatalog, Arc<dyn TemplateFetcher>)> {
    match template_dir {
        Some(dir) => {
            cliclack::log::info(format!("Using local templates from {}", dir.display()))?;
            let catalog = TemplateCatalog::load_local(config, dir)
                .map_err(|e| ScaffoldError::Fetch(format!("{:#}", e)))?;
            Ok((catalog, Arc::new(LocalFetcher::new(dir.to_path_buf()))))
        }
        None => {
            let catalog = TemplateCatalog::from_config(config)?;
            Ok((catalog, Arc::new(RemoteFetcher::new(config.user_agent()))))
        }
    }
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs) -> Result<()> {
    cliclack::intro(format!(" {} ", config.display_name()).black().on_green().to_string())?;

    let launch_dir = std::env::current_dir()?;
    let (catalog, fetcher) = template_source(config, args.template_dir.as_deref())?;

    let capabilities = Capabilities {
        prompter: Box::new(TerminalPrompter),
        shell: Arc::new(SystemShell),
        fetcher,
        reporter: Arc::new(TerminalReporter::new()),
    };
    let mut ctx = Context::new(
        launch_dir,
        ProductSettings::from_config(config),
        catalog,
        capabilities,
    )
    .with_args(args)
    .with_package_manager(PackageManager::detect());

    let result = scaffold(&mut ctx, &Step::ALL, &QueueLabels::default()).await;

    match &result {
        Ok(()) => cliclack::outro("Good luck out there!")?,
        Err(err) => {
            if !err.is_reported() {
                cliclack::log::error(format!("{} {}", "error".red(), err))?;
            }
            cliclack::outro_cancel("Setup aborted.")?;
        }
    }
    let _ = console::Term::stderr().show_cursor();

    result
}
