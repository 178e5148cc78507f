//! Output formatting for snapshots, diffs and reports.

use apidoc_core::{ModelDiff, ModelSnapshot, ObjectType};

use crate::report::NormalizationReport;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Json,
    Yaml,
    Markdown,
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("JSON serialization failed: {e}"))
}

fn to_yaml<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_yaml::to_string(value).map_err(|e| format!("YAML serialization failed: {e}"))
}

/// Formats a model snapshot in the requested output format.
pub fn format_snapshot(snapshot: &ModelSnapshot, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => to_json(snapshot),
        OutputFormat::Yaml => to_yaml(snapshot),
        OutputFormat::Markdown => Ok(snapshot_to_markdown(snapshot)),
    }
}

/// Formats a model diff. Markdown uses the three-section drift report.
pub fn format_diff(diff: &ModelDiff, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => to_json(diff),
        OutputFormat::Yaml => to_yaml(diff),
        OutputFormat::Markdown => Ok(diff.to_markdown()),
    }
}

/// Formats a normalization report in the requested output format.
pub fn format_report(
    report: &NormalizationReport,
    format: OutputFormat,
) -> Result<String, String> {
    match format {
        OutputFormat::Json => to_json(report),
        OutputFormat::Yaml => to_yaml(report),
        OutputFormat::Markdown => Ok(report_to_markdown(report)),
    }
}

fn snapshot_to_markdown(snapshot: &ModelSnapshot) -> String {
    let mut out = String::new();

    let title = snapshot.name.as_deref().unwrap_or("Model");
    out.push_str(&format!("# {title}\n\n"));
    out.push_str(&format!("**Version:** {}\n\n", snapshot.version));
    out.push_str(&format!("**Generated:** {}\n\n", snapshot.generated_at));

    for object in &snapshot.types {
        type_to_markdown(object, &mut out);
    }

    out
}

fn type_to_markdown(object: &ObjectType, out: &mut String) {
    match object.parent() {
        Some(parent) => out.push_str(&format!("## {} (extends `{parent}`)\n\n", object.name)),
        None => out.push_str(&format!("## {}\n\n", object.name)),
    }

    let desc = object.desc.trim();
    if !desc.is_empty() {
        out.push_str(&format!("{}\n\n", desc.replace('\n', " ")));
    }

    if object.is_enum {
        let values: Vec<String> = object.enum_values.iter().map(|v| format!("`{v}`")).collect();
        out.push_str(&format!("**Values:** {}\n\n", values.join(", ")));
        return;
    }

    let fields: Vec<_> = object.props.iter().filter(|p| !p.is_divider()).collect();
    if fields.is_empty() {
        return;
    }

    out.push_str("| Field | Type | Optional | Nullable | Description |\n");
    out.push_str("|-------|------|----------|----------|-------------|\n");
    for prop in fields {
        let type_cell = if prop.is_enum {
            prop.enum_values
                .iter()
                .map(|v| format!("'{v}'"))
                .collect::<Vec<_>>()
                .join(" \\| ")
        } else {
            prop.type_tag.clone()
        };
        let optional = if prop.optional { "yes" } else { "no" };
        let nullable = if prop.may_be_null() { "yes" } else { "no" };
        out.push_str(&format!(
            "| `{}` | {type_cell} | {optional} | {nullable} | {} |\n",
            prop.name,
            prop.desc.replace('\n', " ")
        ));
    }
    out.push('\n');
}

fn report_to_markdown(report: &NormalizationReport) -> String {
    let mut out = String::new();

    out.push_str("# Normalization Report\n\n");
    out.push_str(&format!("- **Rows:** {}\n", report.rows));
    out.push_str(&format!("- **Types:** {}\n", report.types));
    out.push_str(&format!("- **Enum types:** {}\n", report.enum_types));
    out.push_str(&format!("- **Inherited types:** {}\n", report.inherited_types));
    out.push_str(&format!("- **Types with optional divider:** {}\n", report.divider_types));
    out.push_str(&format!("- **Enum fields:** {}\n", report.enum_fields));
    out.push_str(&format!(
        "- **Synthetic types:** {}\n",
        report.synthetic_types.join(", ")
    ));
    out.push_str(&format!("- **Overrides applied:** {}\n", report.overrides_applied));

    if !report.warnings.is_empty() {
        out.push_str("\n## Warnings\n\n");
        for w in &report.warnings {
            out.push_str(&format!("- {w}\n"));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use apidoc_core::{PropType, diff_models};

    use super::*;

    fn sample_snapshot() -> ModelSnapshot {
        ModelSnapshot::with_types(
            "1.0.0",
            "2026-10-17T00:00:00Z",
            vec![
                ObjectType::object("Paint")
                    .with_desc("A solid color, gradient, or image texture")
                    .with_prop(
                        PropType::new("type", "String").with_enum_values(["SOLID", "IMAGE"]),
                    )
                    .with_prop(PropType::new("opacity", "Number").into_optional()),
                ObjectType::object("FRAME").extending("Node"),
                ObjectType::enumeration("StyleType", ["FILL", "TEXT"]),
            ],
        )
    }

    fn sample_report() -> NormalizationReport {
        NormalizationReport {
            rows: 3,
            types: 7,
            enum_types: 1,
            inherited_types: 1,
            divider_types: 0,
            enum_fields: 1,
            synthetic_types: vec!["Path".to_string(), "StyleType".to_string()],
            overrides_applied: 2,
            warnings: vec!["X: inheritance phrase without comma".to_string()],
        }
    }

    #[test]
    fn test_format_snapshot_json() {
        let out = format_snapshot(&sample_snapshot(), OutputFormat::Json).unwrap();
        let parsed: ModelSnapshot = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.type_names(), vec!["Paint", "FRAME", "StyleType"]);
        assert!(out.contains("\"isEnum\""));
    }

    #[test]
    fn test_format_snapshot_yaml() {
        let out = format_snapshot(&sample_snapshot(), OutputFormat::Yaml).unwrap();
        assert!(out.contains("version: 1.0.0"));
        assert!(out.contains("name: Paint"));
    }

    #[test]
    fn test_format_snapshot_markdown() {
        let out = format_snapshot(&sample_snapshot(), OutputFormat::Markdown).unwrap();
        assert!(out.starts_with("# Model\n"));
        assert!(out.contains("## FRAME (extends `Node`)"));
        assert!(out.contains("| `type` | 'SOLID' \\| 'IMAGE' | no | no |"));
        assert!(out.contains("| `opacity` | Number | yes | no |"));
        assert!(out.contains("**Values:** `FILL`, `TEXT`"));
    }

    #[test]
    fn test_format_diff_markdown_matches_report() {
        let old = vec![ObjectType::object("A").with_prop(PropType::new("x", "Number"))];
        let new = vec![ObjectType::object("A").with_prop(PropType::new("x", "String"))];
        let diff = diff_models(&old, &new);

        let out = format_diff(&diff, OutputFormat::Markdown).unwrap();
        assert_eq!(out, "# Added\n\n# Changed\n* `A.props.x.type` = `String`\n# Deleted\n");
    }

    #[test]
    fn test_format_diff_json() {
        let diff = diff_models(&[ObjectType::object("A")], &[]);
        let out = format_diff(&diff, OutputFormat::Json).unwrap();
        let parsed: ModelDiff = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.deleted[0].path, "A");
    }

    #[test]
    fn test_format_report_markdown() {
        let out = format_report(&sample_report(), OutputFormat::Markdown).unwrap();
        assert!(out.contains("# Normalization Report"));
        assert!(out.contains("- **Synthetic types:** Path, StyleType"));
        assert!(out.contains("## Warnings"));
    }

    #[test]
    fn test_format_report_json_omits_empty_warnings() {
        let mut report = sample_report();
        report.warnings.clear();
        let out = format_report(&report, OutputFormat::Json).unwrap();
        assert!(!out.contains("warnings"));
        assert!(out.contains("\"overrides_applied\": 2"));
    }
}
