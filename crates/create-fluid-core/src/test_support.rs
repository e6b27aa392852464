//! Scripted fakes of the run's collaborators

use crate::context::{Capabilities, Context, ProductSettings};
use crate::error::{Result, ScaffoldError};
use crate::prompt::{Answer, Prompter, Question};
use crate::report::Reporter;
use crate::shell::{CommandSpec, CommandStatus, RunOptions, Shell, Stdio};
use crate::templates::{LocalFetcher, Repository, TemplateCatalog, TemplateEntry};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

enum Scripted {
    Answer(Answer),
    Interrupt,
}

/// Prompter answering from a script, defaulting when a question is unscripted
#[derive(Clone, Default)]
pub(crate) struct ScriptedPrompter {
    script: Arc<Mutex<VecDeque<(&'static str, Scripted)>>>,
    asked: Arc<Mutex<Vec<&'static str>>>,
}

impl ScriptedPrompter {
    pub fn push(&self, name: &'static str, answer: Answer) {
        self.script
            .lock()
            .unwrap()
            .push_back((name, Scripted::Answer(answer)));
    }

    pub fn interrupt(&self, name: &'static str) {
        self.script
            .lock()
            .unwrap()
            .push_back((name, Scripted::Interrupt));
    }

    /// Names of every question asked, in order
    pub fn asked(&self) -> Vec<&'static str> {
        self.asked.lock().unwrap().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, question: &Question) -> Result<Answer> {
        self.asked.lock().unwrap().push(question.name);

        let mut script = self.script.lock().unwrap();
        let position = script.iter().position(|(name, _)| *name == question.name);
        match position.and_then(|idx| script.remove(idx)) {
            Some((_, Scripted::Answer(answer))) => Ok(answer),
            Some((_, Scripted::Interrupt)) => Err(ScaffoldError::Interrupted),
            None => Ok(question.default.clone()),
        }
    }
}

type Effect = Box<dyn Fn(&Path) + Send + Sync>;

/// Shell that records invocations instead of spawning processes
#[derive(Default)]
pub(crate) struct RecordingShell {
    calls: Mutex<Vec<(String, RunOptions)>>,
    failures: HashMap<String, i32>,
    effects: HashMap<String, Effect>,
}

impl RecordingShell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `command` exit with `code`
    pub fn fail_on(mut self, command: &str, code: i32) -> Self {
        self.failures.insert(command.to_string(), code);
        self
    }

    /// Run `effect` in the command's working directory when `command` is invoked
    pub fn on_run(mut self, command: &str, effect: impl Fn(&Path) + Send + Sync + 'static) -> Self {
        self.effects.insert(command.to_string(), Box::new(effect));
        self
    }

    pub fn commands(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(cmd, _)| cmd.clone())
            .collect()
    }

    pub fn stdio_of(&self, command: &str) -> Option<Stdio> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .find(|(cmd, _)| cmd == command)
            .map(|(_, opts)| opts.stdio)
    }

    pub fn cwd_of(&self, command: &str) -> Option<PathBuf> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .find(|(cmd, _)| cmd == command)
            .map(|(_, opts)| opts.cwd.clone())
    }
}

#[async_trait]
impl Shell for RecordingShell {
    async fn run(
        &self,
        command: &CommandSpec,
        options: &RunOptions,
    ) -> std::io::Result<CommandStatus> {
        let line = command.to_string();
        self.calls
            .lock()
            .unwrap()
            .push((line.clone(), options.clone()));

        if let Some(effect) = self.effects.get(&line) {
            effect(options.cwd.as_path());
        }

        Ok(CommandStatus {
            code: Some(self.failures.get(&line).copied().unwrap_or(0)),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ReportEvent {
    Info(String, String),
    Error(String, String),
    Log(String),
    TasksStarted(String),
    TaskStarted(String, bool),
    TaskFinished(String),
    TaskFailed(String),
    TasksFinished(String, bool),
}

/// Reporter that keeps every event for inspection
#[derive(Default)]
pub(crate) struct RecordingReporter {
    events: Mutex<Vec<ReportEvent>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<ReportEvent> {
        self.events.lock().unwrap().clone()
    }

    fn record(&self, event: ReportEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl Reporter for RecordingReporter {
    fn info(&self, prefix: &str, text: &str) {
        self.record(ReportEvent::Info(prefix.into(), text.into()));
    }

    fn error(&self, prefix: &str, text: &str) {
        self.record(ReportEvent::Error(prefix.into(), text.into()));
    }

    fn log(&self, text: &str) {
        self.record(ReportEvent::Log(text.into()));
    }

    fn tasks_started(&self, label: &str) {
        self.record(ReportEvent::TasksStarted(label.into()));
    }

    fn task_started(&self, _pending: &str, start: &str, interactive: bool) {
        self.record(ReportEvent::TaskStarted(start.into(), interactive));
    }

    fn task_finished(&self, end: &str) {
        self.record(ReportEvent::TaskFinished(end.into()));
    }

    fn task_failed(&self, pending: &str) {
        self.record(ReportEvent::TaskFailed(pending.into()));
    }

    fn tasks_finished(&self, label: &str, success: bool) {
        self.record(ReportEvent::TasksFinished(label.into(), success));
    }
}

pub(crate) fn test_product() -> ProductSettings {
    ProductSettings {
        default_project_dir: "./fluid-storefront".to_string(),
        commit_message: "Initial commit from Fluid".to_string(),
        commit_author: "Fluid <fluid@example.com>".to_string(),
        next_steps_hints: vec!["Add the Sanity Connect app".to_string()],
    }
}

/// Temp directories plus fakes for one scripted run
pub(crate) struct TestRun {
    launch: TempDir,
    templates: TempDir,
    pub prompter: ScriptedPrompter,
    pub shell: Arc<RecordingShell>,
    pub reporter: Arc<RecordingReporter>,
    entries: Vec<TemplateEntry>,
}

impl TestRun {
    pub fn new() -> Self {
        Self {
            launch: tempfile::tempdir().unwrap(),
            templates: tempfile::tempdir().unwrap(),
            prompter: ScriptedPrompter::default(),
            shell: Arc::new(RecordingShell::new()),
            reporter: Arc::new(RecordingReporter::default()),
            entries: vec![TemplateEntry::new("base", None, "Default storefront")],
        }
    }

    pub fn answer(self, name: &'static str, answer: Answer) -> Self {
        self.prompter.push(name, answer);
        self
    }

    pub fn with_shell(mut self, shell: RecordingShell) -> Self {
        self.shell = Arc::new(shell);
        self
    }

    pub fn with_templates(mut self, entries: Vec<TemplateEntry>) -> Self {
        self.entries = entries;
        self
    }

    pub fn launch_dir(&self) -> PathBuf {
        self.launch.path().to_path_buf()
    }

    /// Root served by the local fetcher (the base template)
    pub fn template_root(&self) -> &Path {
        self.templates.path()
    }

    pub fn context(&self) -> Context {
        let catalog = TemplateCatalog::new(
            Repository::parse("github:frontvibe/fluid").unwrap(),
            self.entries.clone(),
        );
        let capabilities = Capabilities {
            prompter: Box::new(self.prompter.clone()),
            shell: Arc::clone(&self.shell) as Arc<dyn Shell>,
            fetcher: Arc::new(LocalFetcher::new(self.templates.path().to_path_buf())),
            reporter: Arc::clone(&self.reporter) as Arc<dyn Reporter>,
        };
        Context::new(self.launch_dir(), test_product(), catalog, capabilities)
    }
}
