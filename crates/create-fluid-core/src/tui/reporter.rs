//! Terminal progress and message output

use crate::report::Reporter;
use cliclack::ProgressBar;
use colored::Colorize;
use std::sync::Mutex;

/// Writes run output through cliclack, with a spinner per running task
///
/// Terminal write failures are dropped; output is informational only.
#[derive(Default)]
pub struct TerminalReporter {
    spinner: Mutex<Option<(ProgressBar, String)>>,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the running spinner, if any, with its start label
    fn take_spinner(&self) -> Option<(ProgressBar, String)> {
        self.spinner.lock().ok().and_then(|mut slot| slot.take())
    }

    /// Stop a running spinner so the next line prints below it
    fn settle(&self) {
        if let Some((spinner, start)) = self.take_spinner() {
            spinner.stop(start);
        }
    }
}

impl Reporter for TerminalReporter {
    fn info(&self, prefix: &str, text: &str) {
        self.settle();
        let _ = cliclack::log::info(format!("{} {}", prefix.cyan().bold(), text));
    }

    fn error(&self, prefix: &str, text: &str) {
        if let Some((spinner, start)) = self.take_spinner() {
            spinner.error(start);
        }
        let _ = cliclack::log::error(format!("{} {}", prefix.red().bold(), text));
    }

    fn log(&self, text: &str) {
        self.settle();
        let _ = cliclack::log::remark(text);
    }

    fn tasks_started(&self, label: &str) {
        let _ = cliclack::log::step(label.bold().to_string());
    }

    fn task_started(&self, pending: &str, start: &str, interactive: bool) {
        self.settle();
        if interactive {
            let _ = cliclack::log::step(format!("{} {}", pending.dimmed(), start));
            return;
        }

        let spinner = cliclack::spinner();
        spinner.start(start);
        if let Ok(mut slot) = self.spinner.lock() {
            *slot = Some((spinner, start.to_string()));
        }
    }

    fn task_finished(&self, end: &str) {
        match self.take_spinner() {
            Some((spinner, _)) => spinner.stop(end),
            None => {
                let _ = cliclack::log::success(end);
            }
        }
    }

    fn task_failed(&self, pending: &str) {
        match self.take_spinner() {
            Some((spinner, _)) => spinner.error(format!("{} did not complete", pending)),
            None => {
                let _ = cliclack::log::warning(format!("{} did not complete", pending));
            }
        }
    }

    fn tasks_finished(&self, label: &str, success: bool) {
        if let Some((spinner, start)) = self.take_spinner() {
            spinner.error(start);
        }
        if success {
            let _ = cliclack::log::success(label.bold().to_string());
        } else {
            let _ = cliclack::log::error(label);
        }
    }
}
