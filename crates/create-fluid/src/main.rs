//! Create Fluid - Project scaffolding for Fluid storefronts

use clap::Parser;
use create_fluid_core::templates::TemplateEntry;
use create_fluid_core::{logging, CreateArgs, ProductConfig};
use std::path::PathBuf;
use std::process::ExitCode;

/// Fluid product configuration
#[derive(Clone)]
pub struct FluidConfig;

impl ProductConfig for FluidConfig {
    fn name(&self) -> &'static str {
        "create-fluid"
    }

    fn display_name(&self) -> &'static str {
        "Fluid"
    }

    fn default_repository(&self) -> &'static str {
        "github:frontvibe/fluid"
    }

    fn repository_env(&self) -> &'static str {
        "FLUID_TEMPLATE_REPO"
    }

    fn templates(&self) -> Vec<TemplateEntry> {
        vec![TemplateEntry::new(
            "base",
            None,
            "Shopify Hydrogen storefront with Sanity CMS",
        )]
    }

    fn default_project_dir(&self) -> &'static str {
        "./fluid-storefront"
    }

    fn commit_message(&self) -> &'static str {
        "Initial commit from Fluid"
    }

    fn commit_author(&self) -> &'static str {
        "Fluid <fluid@frontvibe.com>"
    }

    fn next_steps_hints(&self) -> Vec<String> {
        vec![
            "Install the Sanity Connect app on your Shopify store to sync products with Sanity: https://apps.shopify.com/sanity-connect"
                .to_string(),
        ]
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-fluid")]
#[command(about = "Create a new Fluid storefront: Shopify Hydrogen with Sanity")]
#[command(version)]
pub struct Args {
    /// Project directory to create
    pub directory: Option<PathBuf>,

    /// Template name to use
    #[arg(short, long)]
    pub template: Option<String>,

    /// Install dependencies
    #[arg(long, overrides_with = "no_install")]
    pub install: bool,

    /// Skip dependency installation
    #[arg(long = "no-install", overrides_with = "install")]
    pub no_install: bool,

    /// Initialize a git repository
    #[arg(long, overrides_with = "no_git")]
    pub git: bool,

    /// Skip git initialization
    #[arg(long = "no-git", overrides_with = "git")]
    pub no_git: bool,

    /// Link a Hydrogen storefront
    #[arg(long, overrides_with = "no_hydrogen")]
    pub hydrogen: bool,

    /// Skip Hydrogen linking
    #[arg(long = "no-hydrogen", overrides_with = "hydrogen")]
    pub no_hydrogen: bool,

    /// Link a Sanity project
    #[arg(long, overrides_with = "no_sanity")]
    pub sanity: bool,

    /// Skip Sanity linking
    #[arg(long = "no-sanity", overrides_with = "sanity")]
    pub no_sanity: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,

    /// Walk through the setup without running anything
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Local directory to use for templates instead of fetching from remote (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Print diagnostic logs (see also FLUID_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

/// Collapse a `--flag` / `--no-flag` pair; neither means "ask"
fn tri(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

impl From<Args> for CreateArgs {
    fn from(args: Args) -> Self {
        CreateArgs {
            directory: args.directory,
            template: args.template,
            install: tri(args.install, args.no_install),
            git: tri(args.git, args.no_git),
            hydrogen: tri(args.hydrogen, args.no_hydrogen),
            sanity: tri(args.sanity, args.no_sanity),
            yes: args.yes,
            dry_run: args.dry_run,
            template_dir: args.template_dir,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    create_fluid_core::tui::install_terminal_guards();

    let args = Args::parse();
    if let Err(e) = logging::init(args.verbose) {
        eprintln!("{:#}", e);
    }

    let config = FluidConfig;
    match create_fluid_core::run(&config, args.into()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1)),
    }
}
