//! Template selection and the materialization task

use crate::context::Context;
use crate::error::Result;
use crate::prompt::Question;
use crate::tasks::{Recovery, Task};
use crate::templates::{materialize, BASE_TEMPLATE};

/// Resolve the template and queue its materialization
pub fn template(ctx: &mut Context) -> Result<()> {
    match ctx.template.clone() {
        Some(template) => {
            ctx.info("tmpl", &format!("Using {} as project template", template));
        }
        None => {
            let catalog = ctx.catalog();
            let chosen = if catalog.entries().len() > 1 && !ctx.yes {
                let options = catalog
                    .entries()
                    .iter()
                    .map(|e| (e.name.clone(), e.description.clone()))
                    .collect();
                let question = Question::select(
                    "template",
                    "tmpl",
                    "How would you like to start your new project?",
                    options,
                    BASE_TEMPLATE,
                );
                ctx.prompt(&question)?.into_text().unwrap_or_default()
            } else {
                BASE_TEMPLATE.to_string()
            };
            ctx.template = Some(chosen);
        }
    }

    let Some(template) = ctx.template.clone().filter(|t| !t.trim().is_empty()) else {
        ctx.error("error", "No template selected.");
        return Err(ctx.exit(1));
    };

    let locator = ctx.catalog().resolve(&template);
    let fetcher = ctx.fetcher();
    let target = ctx.cwd.clone();
    let launch_dir = ctx.launch_dir.clone();
    let project_name = ctx
        .project_name
        .clone()
        .unwrap_or_else(|| template.clone());

    ctx.push_task(
        Task::new("Template", "Template copying...", "Template copied", move || async move {
            materialize(
                fetcher.as_ref(),
                &template,
                &locator,
                &target,
                &project_name,
                &launch_dir,
            )
            .await
        })
        .on_error(|err, reporter| {
            reporter.error("error", &err.to_string());
            Recovery::Exit(1)
        }),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::CreateArgs;
    use crate::prompt::Answer;
    use crate::tasks::{run_tasks, QueueLabels};
    use crate::templates::TemplateEntry;
    use crate::test_support::{ReportEvent, TestRun};

    fn target(run: &TestRun) -> std::path::PathBuf {
        run.launch_dir().join("shop")
    }

    #[tokio::test]
    async fn test_single_template_defaults_to_base() {
        let run = TestRun::new();
        std::fs::write(
            run.template_root().join("package.json"),
            "{\n  \"name\": \"fluid\",\n  \"private\": true\n}\n",
        )
        .unwrap();
        let mut ctx = run.context();
        ctx.cwd = target(&run);
        ctx.project_name = Some("shop".to_string());

        template(&mut ctx).unwrap();
        assert_eq!(ctx.template.as_deref(), Some("base"));
        assert!(run.prompter.asked().is_empty());

        let tasks = std::mem::take(&mut ctx.tasks);
        run_tasks(&QueueLabels::default(), tasks, run.reporter.as_ref())
            .await
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(target(&run).join("package.json")).unwrap(),
            "{\n  \"name\": \"shop\"\n}\n"
        );
    }

    #[test]
    fn test_multiple_templates_prompt_for_choice() {
        let run = TestRun::new()
            .with_templates(vec![
                TemplateEntry::new("base", None, "Default storefront"),
                TemplateEntry::new("blog", Some("blog-template"), "Storefront with a blog"),
            ])
            .answer("template", Answer::Text("blog".into()));
        let mut ctx = run.context();

        template(&mut ctx).unwrap();

        assert_eq!(ctx.template.as_deref(), Some("blog"));
        assert_eq!(run.prompter.asked(), vec!["template"]);
        assert_eq!(ctx.tasks.len(), 1);
    }

    #[test]
    fn test_explicit_template_is_reported() {
        let run = TestRun::new();
        let mut ctx = run.context().with_args(CreateArgs {
            template: Some("blog".to_string()),
            ..CreateArgs::default()
        });

        template(&mut ctx).unwrap();

        assert!(run.reporter.events().contains(&ReportEvent::Info(
            "tmpl".into(),
            "Using blog as project template".into()
        )));
    }

    #[test]
    fn test_empty_selection_terminates() {
        let run = TestRun::new()
            .with_templates(vec![
                TemplateEntry::new("base", None, ""),
                TemplateEntry::new("blog", None, ""),
            ])
            .answer("template", Answer::Text(String::new()));
        let mut ctx = run.context();

        let err = template(&mut ctx).unwrap_err();

        assert_eq!(err.exit_code(), 1);
        assert!(ctx.tasks.is_empty());
    }

    #[tokio::test]
    async fn test_missing_template_aborts_task_pass() {
        let run = TestRun::new();
        let mut ctx = run.context().with_args(CreateArgs {
            template: Some("gone".to_string()),
            ..CreateArgs::default()
        });
        ctx.cwd = target(&run);

        template(&mut ctx).unwrap();
        let tasks = std::mem::take(&mut ctx.tasks);
        let err = run_tasks(&QueueLabels::default(), tasks, run.reporter.as_ref())
            .await
            .unwrap_err();

        assert_eq!(err.exit_code(), 1);
        assert!(run.reporter.events().contains(&ReportEvent::Error(
            "error".into(),
            "Template gone does not exist!".into()
        )));
        assert!(!target(&run).exists());
    }
}
