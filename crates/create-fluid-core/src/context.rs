//! The shared state record for one scaffolding run

use crate::error::{Result, ScaffoldError};
use crate::product::ProductConfig;
use crate::prompt::{Answer, Prompter, Question};
use crate::report::Reporter;
use crate::shell::{CommandSpec, Shell};
use crate::tasks::Task;
use crate::templates::{TemplateCatalog, TemplateFetcher};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Package managers the generated project can be driven with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackageManager {
    #[default]
    Npm,
    Pnpm,
    Yarn,
    Bun,
    Cnpm,
}

impl PackageManager {
    /// Detect from the `npm_config_user_agent` variable set by `<pm> create`
    pub fn detect() -> Self {
        Self::from_user_agent(std::env::var("npm_config_user_agent").ok().as_deref())
    }

    /// Parse a user agent such as `pnpm/9.1.0 npm/? node/v20.11.0 linux x64`
    pub fn from_user_agent(user_agent: Option<&str>) -> Self {
        let Some(specifier) = user_agent.and_then(|ua| ua.split(' ').next()) else {
            return Self::default();
        };
        let name = specifier
            .rfind('/')
            .map_or("", |idx| &specifier[..idx]);

        match name {
            "npm" => PackageManager::Npm,
            "pnpm" => PackageManager::Pnpm,
            "yarn" => PackageManager::Yarn,
            "bun" => PackageManager::Bun,
            "cnpm" | "npminstall" => PackageManager::Cnpm,
            _ => Self::default(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bun",
            PackageManager::Cnpm => "cnpm",
        }
    }

    pub fn install_command(&self) -> CommandSpec {
        CommandSpec::new(self.as_str(), ["install"])
    }

    /// Command that starts the dev server
    pub fn dev_command(&self) -> &'static str {
        match self {
            PackageManager::Pnpm => "pnpm dev",
            PackageManager::Yarn => "yarn dev",
            PackageManager::Bun => "bun run dev",
            PackageManager::Npm | PackageManager::Cnpm => "npm run dev",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three-valued decision fields (`None` means ask the operator)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Install,
    Git,
    Hydrogen,
    ConfirmHydrogen,
    Sanity,
}

/// Arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project directory to create
    pub directory: Option<PathBuf>,

    /// Template name to use
    pub template: Option<String>,

    pub install: Option<bool>,
    pub git: Option<bool>,
    pub hydrogen: Option<bool>,
    pub sanity: Option<bool>,

    /// Accept every default without prompting (non-interactive mode)
    pub yes: bool,

    /// Run the setup steps but skip every task
    pub dry_run: bool,

    /// Local directory to use for templates instead of fetching from remote
    pub template_dir: Option<PathBuf>,
}

/// Product values the steps need, copied out of a [`ProductConfig`]
#[derive(Debug, Clone)]
pub struct ProductSettings {
    pub default_project_dir: String,
    pub commit_message: String,
    pub commit_author: String,
    pub next_steps_hints: Vec<String>,
}

impl ProductSettings {
    pub fn from_config<C: ProductConfig>(config: &C) -> Self {
        Self {
            default_project_dir: config.default_project_dir().to_string(),
            commit_message: config.commit_message().to_string(),
            commit_author: config.commit_author().to_string(),
            next_steps_hints: config.next_steps_hints(),
        }
    }
}

/// External collaborators a run talks to
pub struct Capabilities {
    pub prompter: Box<dyn Prompter>,
    pub shell: Arc<dyn Shell>,
    pub fetcher: Arc<dyn TemplateFetcher>,
    pub reporter: Arc<dyn Reporter>,
}

/// Mutable state threaded through every step
pub struct Context {
    /// Working directory of the process at start-up
    pub launch_dir: PathBuf,
    /// Absolute target directory
    pub cwd: PathBuf,
    pub project_name: Option<String>,
    pub package_manager: PackageManager,
    pub template: Option<String>,
    pub install: Option<bool>,
    pub git: Option<bool>,
    pub hydrogen: Option<bool>,
    pub confirm_hydrogen: Option<bool>,
    pub sanity: Option<bool>,
    pub yes: bool,
    pub dry_run: bool,
    pub product: ProductSettings,
    /// Deferred work, append-only during the step pass
    pub tasks: Vec<Task>,
    catalog: Arc<TemplateCatalog>,
    prompter: Box<dyn Prompter>,
    shell: Arc<dyn Shell>,
    fetcher: Arc<dyn TemplateFetcher>,
    reporter: Arc<dyn Reporter>,
}

impl Context {
    pub fn new(
        launch_dir: PathBuf,
        product: ProductSettings,
        catalog: TemplateCatalog,
        capabilities: Capabilities,
    ) -> Self {
        Self {
            cwd: launch_dir.clone(),
            launch_dir,
            project_name: None,
            package_manager: PackageManager::default(),
            template: None,
            install: None,
            git: None,
            hydrogen: None,
            confirm_hydrogen: None,
            sanity: None,
            yes: false,
            dry_run: false,
            product,
            tasks: Vec::new(),
            catalog: Arc::new(catalog),
            prompter: capabilities.prompter,
            shell: capabilities.shell,
            fetcher: capabilities.fetcher,
            reporter: capabilities.reporter,
        }
    }

    /// Apply parsed arguments; unset flags stay unresolved
    pub fn with_args(mut self, args: CreateArgs) -> Self {
        if let Some(dir) = args.directory {
            self.cwd = absolutize(&self.launch_dir, &dir);
        }
        self.template = args.template;
        self.install = args.install;
        self.git = args.git;
        self.hydrogen = args.hydrogen;
        self.sanity = args.sanity;
        self.yes = args.yes;
        self.dry_run = args.dry_run;
        self
    }

    pub fn with_package_manager(mut self, package_manager: PackageManager) -> Self {
        self.package_manager = package_manager;
        self
    }

    pub fn catalog(&self) -> Arc<TemplateCatalog> {
        Arc::clone(&self.catalog)
    }

    pub fn shell(&self) -> Arc<dyn Shell> {
        Arc::clone(&self.shell)
    }

    pub fn fetcher(&self) -> Arc<dyn TemplateFetcher> {
        Arc::clone(&self.fetcher)
    }

    pub fn reporter(&self) -> Arc<dyn Reporter> {
        Arc::clone(&self.reporter)
    }

    pub fn info(&self, prefix: &str, text: &str) {
        self.reporter.info(prefix, text);
    }

    pub fn error(&self, prefix: &str, text: &str) {
        self.reporter.error(prefix, text);
    }

    /// Ask the operator a question
    pub fn prompt(&mut self, question: &Question) -> Result<Answer> {
        debug!(question = question.name, "Prompting");
        self.prompter.ask(question)
    }

    /// Current value of a decision field
    pub fn decision(&self, decision: Decision) -> Option<bool> {
        match decision {
            Decision::Install => self.install,
            Decision::Git => self.git,
            Decision::Hydrogen => self.hydrogen,
            Decision::ConfirmHydrogen => self.confirm_hydrogen,
            Decision::Sanity => self.sanity,
        }
    }

    fn decision_mut(&mut self, decision: Decision) -> &mut Option<bool> {
        match decision {
            Decision::Install => &mut self.install,
            Decision::Git => &mut self.git,
            Decision::Hydrogen => &mut self.hydrogen,
            Decision::ConfirmHydrogen => &mut self.confirm_hydrogen,
            Decision::Sanity => &mut self.sanity,
        }
    }

    /// Resolve a decision field, prompting at most once per run
    ///
    /// A resolved field is returned unchanged. An unset field takes the
    /// question's default under `yes`, otherwise the operator's answer; the
    /// result is stored before returning.
    pub fn decide(&mut self, decision: Decision, question: &Question) -> Result<bool> {
        if let Some(value) = self.decision(decision) {
            return Ok(value);
        }

        let default = question.default.as_bool().unwrap_or(true);
        let value = if self.yes {
            default
        } else {
            self.prompt(question)?.as_bool().unwrap_or(default)
        };

        *self.decision_mut(decision) = Some(value);
        debug!(?decision, value, "Decision resolved");
        Ok(value)
    }

    /// Queue a task for the task pass
    pub fn push_task(&mut self, task: Task) {
        debug!(task = %task.pending, "Task queued");
        self.tasks.push(task);
    }

    /// Terminate the run with `code`; the returned error must be propagated
    pub fn exit(&self, code: i32) -> ScaffoldError {
        debug!(code, "Run terminated by step");
        ScaffoldError::Exit(code)
    }
}

/// Resolve `path` against `base` without touching the filesystem
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            std::path::Component::CurDir => {}
            std::path::Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
