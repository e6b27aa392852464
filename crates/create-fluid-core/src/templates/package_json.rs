//! Rewriting the generated project's package manifest

use crate::error::Result;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};
use std::path::Path;

/// Keys inherited from the template repository that must not leak into a new project
const INHERITED_KEYS: &[&str] = &["private", "packageManager"];

/// Indentation of the first indented line, tab if none
pub fn detect_indent(content: &str) -> &str {
    content
        .lines()
        .find_map(|line| {
            let rest = line.trim_start_matches([' ', '\t']);
            let indent = &line[..line.len() - rest.len()];
            (!indent.is_empty() && !rest.is_empty()).then_some(indent)
        })
        .unwrap_or("\t")
}

/// Set the project name and drop inherited markers, keeping key order and indentation
pub fn rewrite(content: &str, project_name: &str) -> Result<String> {
    let mut value: Value = serde_json::from_str(content)?;

    if let Some(obj) = value.as_object_mut() {
        obj.insert("name".to_string(), Value::String(project_name.to_string()));
        for key in INHERITED_KEYS {
            obj.shift_remove(*key);
        }
    }

    let indent = detect_indent(content);
    let mut buffer = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(indent.as_bytes()));
    value.serialize(&mut serializer)?;

    let mut output = String::from_utf8_lossy(&buffer).into_owned();
    if content.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

/// Rewrite a `package.json` file in place
pub async fn rewrite_file(path: &Path, project_name: &str) -> Result<()> {
    let content = tokio::fs::read_to_string(path).await?;
    let updated = rewrite(&content, project_name)?;
    tokio::fs::write(path, updated).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_indent() {
        assert_eq!(detect_indent("{\n  \"a\": 1\n}"), "  ");
        assert_eq!(detect_indent("{\n\t\"a\": 1\n}"), "\t");
        assert_eq!(detect_indent("{\n    \"a\": 1\n}"), "    ");
        assert_eq!(detect_indent("{}"), "\t");
    }

    #[test]
    fn test_rewrite_sets_name_and_drops_inherited_keys() {
        let content = "{\n  \"name\": \"fluid\",\n  \"private\": true,\n  \"version\": \"1.0.0\",\n  \"packageManager\": \"pnpm@9.0.0\",\n  \"scripts\": {\n    \"dev\": \"shopify hydrogen dev\"\n  }\n}\n";

        let updated = rewrite(content, "my-shop").unwrap();

        assert_eq!(
            updated,
            "{\n  \"name\": \"my-shop\",\n  \"version\": \"1.0.0\",\n  \"scripts\": {\n    \"dev\": \"shopify hydrogen dev\"\n  }\n}\n"
        );
    }

    #[test]
    fn test_rewrite_preserves_tab_indentation() {
        let content = "{\n\t\"version\": \"0.1.0\",\n\t\"name\": \"fluid\"\n}";

        let updated = rewrite(content, "shop").unwrap();

        assert_eq!(updated, "{\n\t\"version\": \"0.1.0\",\n\t\"name\": \"shop\"\n}");
    }

    #[test]
    fn test_rewrite_rejects_invalid_json() {
        assert!(rewrite("{ not json", "shop").is_err());
    }

    #[tokio::test]
    async fn test_rewrite_file_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("package.json");
        std::fs::write(&path, "{\n  \"name\": \"fluid\",\n  \"private\": true\n}").unwrap();

        rewrite_file(&path, "shop").await.unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "{\n  \"name\": \"shop\"\n}"
        );
    }
}
