//! Order-preserving `.env` file model
//!
//! Only `KEY=value` lines are interpreted. Comments, blank lines and anything
//! else are carried through untouched, so serializing an unmodified file
//! reproduces it exactly.

use std::io;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Entry { key: String, value: String },
    /// Kept verbatim (also used for entries read from disk)
    Raw(String),
}

impl Line {
    fn key(&self) -> Option<&str> {
        match self {
            Line::Entry { key, .. } => Some(key),
            Line::Raw(raw) => {
                if raw.trim_start().starts_with('#') {
                    return None;
                }
                let (key, _) = raw.split_once('=')?;
                let key = key.trim();
                is_key(key).then_some(key)
            }
        }
    }

    fn value(&self) -> Option<&str> {
        match self {
            Line::Entry { value, .. } => Some(value),
            Line::Raw(raw) => {
                self.key()?;
                let (_, value) = raw.split_once('=')?;
                Some(value.trim_end_matches('\r'))
            }
        }
    }

    fn is_blank(&self) -> bool {
        matches!(self, Line::Raw(raw) if raw.is_empty())
    }

    fn render(&self) -> String {
        match self {
            Line::Entry { key, value } => format!("{}={}", key, value),
            Line::Raw(raw) => raw.clone(),
        }
    }
}

fn is_key(key: &str) -> bool {
    !key.is_empty() && !key.chars().any(char::is_whitespace)
}

/// Parsed environment file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvFile {
    lines: Vec<Line>,
}

impl Default for EnvFile {
    fn default() -> Self {
        Self::parse("")
    }
}

impl EnvFile {
    pub fn parse(content: &str) -> Self {
        Self {
            lines: content
                .split('\n')
                .map(|raw| Line::Raw(raw.to_string()))
                .collect(),
        }
    }

    /// Read a file from disk
    pub fn read(path: &Path) -> io::Result<Self> {
        Ok(Self::parse(&std::fs::read_to_string(path)?))
    }

    /// Read a file from disk, treating a missing file as empty
    pub fn read_or_default(path: &Path) -> io::Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Self::parse(&content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    pub fn write(&self, path: &Path) -> io::Result<()> {
        std::fs::write(path, self.to_string())
    }

    /// Value of the first `key=` line
    pub fn get(&self, key: &str) -> Option<&str> {
        self.lines
            .iter()
            .find(|line| line.key() == Some(key))
            .and_then(Line::value)
    }

    /// Replace the value of an existing key, or append a new line at the end
    pub fn set(&mut self, key: &str, value: &str) {
        let entry = Line::Entry {
            key: key.to_string(),
            value: value.to_string(),
        };

        if let Some(line) = self.lines.iter_mut().find(|line| line.key() == Some(key)) {
            *line = entry;
            return;
        }

        // Keep a trailing newline trailing
        match self.lines.last() {
            Some(last) if last.is_blank() => {
                let at = self.lines.len() - 1;
                self.lines.insert(at, entry);
            }
            _ => self.lines.push(entry),
        }
    }
}

impl std::fmt::Display for EnvFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered: Vec<String> = self.lines.iter().map(Line::render).collect();
        write!(f, "{}", rendered.join("\n"))
    }
}
