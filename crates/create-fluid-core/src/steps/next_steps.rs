//! Closing "next steps" report

use crate::context::Context;
use std::path::{Component, Path, PathBuf};

/// `path` relative to `base`, climbing with `..` where they diverge
fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let path_parts: Vec<Component> = path.components().collect();
    let base_parts: Vec<Component> = base.components().collect();
    let common = path_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base_parts.len() {
        relative.push("..");
    }
    for part in &path_parts[common..] {
        relative.push(part.as_os_str());
    }
    relative
}

/// Lines telling the operator how to continue from here
pub fn next_steps(ctx: &Context) -> Vec<String> {
    let mut steps = Vec::new();

    if ctx.cwd != ctx.launch_dir {
        let relative = relative_to(&ctx.cwd, &ctx.launch_dir);
        let dir = if relative.starts_with("..") {
            relative.display().to_string()
        } else {
            format!("./{}", relative.display())
        };
        let dir = if dir.contains(' ') {
            format!("\"{}\"", dir)
        } else {
            dir
        };
        steps.push(format!("Enter your project directory using cd {}", dir));
    }

    if !ctx.cwd.join(".env").exists() {
        steps.push("Create a .env file based on .env.template".to_string());
    }

    steps.extend(ctx.product.next_steps_hints.iter().cloned());

    steps.push(format!(
        "Run {} to start the dev server. CTRL+C to stop.",
        ctx.package_manager.dev_command()
    ));
    steps
}

/// Send the next steps through the reporter
pub fn report(ctx: &Context) {
    let reporter = ctx.reporter();
    reporter.info("next", "Explore your project!");
    for (i, step) in next_steps(ctx).iter().enumerate() {
        reporter.log(&format!("{}. {}", i + 1, step));
    }
}
