//! Declarative operator questions

use crate::error::Result;

/// What kind of answer a question expects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    Confirm,
    Text,
    /// Choice between `(value, label)` pairs
    Select(Vec<(String, String)>),
}

/// A single question put to the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: &'static str,
    pub kind: QuestionKind,
    /// Short tag shown beside the message (e.g. "git", "deps")
    pub label: &'static str,
    pub message: String,
    pub default: Answer,
    pub hint: Option<&'static str>,
}

impl Question {
    pub fn confirm(name: &'static str, label: &'static str, message: impl Into<String>) -> Self {
        Self {
            name,
            kind: QuestionKind::Confirm,
            label,
            message: message.into(),
            default: Answer::Bool(true),
            hint: None,
        }
    }

    pub fn text(
        name: &'static str,
        label: &'static str,
        message: impl Into<String>,
        default: impl Into<String>,
    ) -> Self {
        Self {
            name,
            kind: QuestionKind::Text,
            label,
            message: message.into(),
            default: Answer::Text(default.into()),
            hint: None,
        }
    }

    pub fn select(
        name: &'static str,
        label: &'static str,
        message: impl Into<String>,
        options: Vec<(String, String)>,
        default: impl Into<String>,
    ) -> Self {
        Self {
            name,
            kind: QuestionKind::Select(options),
            label,
            message: message.into(),
            default: Answer::Text(default.into()),
            hint: None,
        }
    }

    pub fn with_default(mut self, default: Answer) -> Self {
        self.default = default;
        self
    }

    pub fn with_hint(mut self, hint: &'static str) -> Self {
        self.hint = Some(hint);
        self
    }
}

/// An operator's answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Bool(bool),
    Text(String),
}

impl Answer {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Answer::Bool(b) => Some(*b),
            Answer::Text(_) => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Answer::Text(s) => Some(s),
            Answer::Bool(_) => None,
        }
    }
}

/// Presents a question and blocks until it is answered
///
/// Returns the chosen value, or the question's default if the operator
/// accepts it unmodified. An aborted prompt must map to
/// [`ScaffoldError::Interrupted`](crate::ScaffoldError::Interrupted).
pub trait Prompter: Send {
    fn ask(&mut self, question: &Question) -> Result<Answer>;
}
