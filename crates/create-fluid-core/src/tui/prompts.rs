//! Charm-style operator prompts

use crate::error::{Result, ScaffoldError};
use crate::prompt::{Answer, Prompter, Question, QuestionKind};
use colored::Colorize;
use std::io;

/// Asks questions on the terminal with cliclack
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompter;

fn interrupted(err: io::Error) -> ScaffoldError {
    if err.kind() == io::ErrorKind::Interrupted {
        ScaffoldError::Interrupted
    } else {
        ScaffoldError::Io(err)
    }
}

fn message(question: &Question) -> String {
    match question.hint {
        Some(hint) => format!("{} {}", question.message, format!("({})", hint).dimmed()),
        None => question.message.clone(),
    }
}

impl Prompter for TerminalPrompter {
    fn ask(&mut self, question: &Question) -> Result<Answer> {
        let message = message(question);

        match &question.kind {
            QuestionKind::Confirm => {
                let initial = question.default.as_bool().unwrap_or(true);
                let value: bool = cliclack::confirm(message)
                    .initial_value(initial)
                    .interact()
                    .map_err(interrupted)?;
                Ok(Answer::Bool(value))
            }
            QuestionKind::Text => {
                let default = question.default.clone().into_text().unwrap_or_default();
                let value: String = cliclack::input(message)
                    .placeholder(&default)
                    .default_input(&default)
                    .interact()
                    .map_err(interrupted)?;
                Ok(Answer::Text(value))
            }
            QuestionKind::Select(options) => {
                let mut select = cliclack::select(message);
                for (value, label) in options {
                    select = select.item(value.clone(), value, label);
                }
                if let Some(default) = question.default.clone().into_text() {
                    select = select.initial_value(default);
                }
                let value: String = select.interact().map_err(interrupted)?;
                Ok(Answer::Text(value))
            }
        }
    }
}
