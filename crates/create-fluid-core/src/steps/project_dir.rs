//! Target directory and project name resolution

use crate::context::{absolutize, Context};
use crate::error::Result;
use crate::prompt::Question;
use std::path::Path;

/// Entries that do not make a directory count as occupied
const IGNORED_ENTRIES: &[&str] = &[
    ".DS_Store",
    ".git",
    ".gitattributes",
    ".gitignore",
    ".gitlab-ci.yml",
    ".hg",
    ".hgcheck",
    ".hgignore",
    ".idea",
    ".npmignore",
    ".travis.yml",
    ".vscode",
    "Thumbs.db",
    "docs",
    "mkdocs.yml",
    "npm-debug.log",
    "yarn-debug.log",
    "yarn-error.log",
    "yarnrc.yml",
    ".yarn",
    "LICENSE",
];

const FALLBACK_NAME: &str = "fluid-storefront";

/// True when `dir` is absent or only holds ignorable entries
pub fn is_empty_dir(dir: &Path) -> bool {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return !dir.exists();
    };

    entries.flatten().all(|entry| {
        entry
            .file_name()
            .to_str()
            .is_some_and(|name| IGNORED_ENTRIES.contains(&name))
    })
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let allowed = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '~';

    allowed(first) && chars.all(|c| allowed(c) || c == '.' || c == '_')
}

/// Normalize a directory name into a valid package name
pub fn to_valid_name(raw: &str) -> String {
    if is_valid_name(raw) {
        return raw.to_string();
    }

    let lowered = raw.trim().to_lowercase();
    let trimmed = lowered
        .strip_prefix(['.', '_'])
        .unwrap_or(&lowered);

    let mut name = String::with_capacity(trimmed.len());
    for c in trimmed.chars() {
        let keep = c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '~';
        if keep {
            name.push(c);
        } else if !name.ends_with('-') {
            name.push('-');
        }
    }

    let name = name.trim_matches('-');
    if name.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        name.to_string()
    }
}

fn is_printable(answer: &str) -> bool {
    answer.chars().all(|c| (' '..='~').contains(&c))
}

fn project_name_of(dir: &Path) -> String {
    let last = dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(FALLBACK_NAME);
    to_valid_name(last)
}

/// Settle on an empty target directory and derive the project name
pub fn project_dir(ctx: &mut Context) -> Result<()> {
    if is_empty_dir(&ctx.cwd) {
        ctx.project_name = Some(project_name_of(&ctx.cwd));
        return Ok(());
    }

    ctx.info("Hmm...", &format!("{} is not empty!", ctx.cwd.display()));

    let default = ctx.product.default_project_dir.clone();
    if ctx.yes {
        let dir = absolutize(&ctx.launch_dir, Path::new(&default));
        if !is_empty_dir(&dir) {
            ctx.error("dir", &format!("{} is not empty!", dir.display()));
            return Err(ctx.exit(1));
        }
        ctx.info("dir", &format!("Project created at {}", default));
        ctx.project_name = Some(project_name_of(&dir));
        ctx.cwd = dir;
        return Ok(());
    }

    loop {
        let question = Question::text(
            "directory",
            "dir",
            "Where should we create your new project?",
            default.clone(),
        );
        let answer = ctx.prompt(&question)?.into_text().unwrap_or_default();
        let answer = answer.trim();
        let answer = if answer.is_empty() { default.as_str() } else { answer };

        if !is_printable(answer) {
            ctx.error("dir", "Invalid non-printable character present!");
            continue;
        }

        let dir = absolutize(&ctx.launch_dir, Path::new(answer));
        if !is_empty_dir(&dir) {
            ctx.error("dir", "Directory is not empty!");
            continue;
        }

        ctx.project_name = Some(project_name_of(&dir));
        ctx.cwd = dir;
        return Ok(());
    }
}
