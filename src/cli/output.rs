//! Output formatting for CLI

use crate::cli::CliError;
use crate::compiler::CompileResult;
use crate::models::{Field, Model};

/// Output format selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Compact,
    Pretty,
    Json,
    Yaml,
}

/// Render a compile result in the requested format
pub fn format_output(result: &CompileResult, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Compact => Ok(format_compact_output(result)),
        OutputFormat::Pretty => Ok(format_pretty_output(result)),
        OutputFormat::Json => serde_json::to_string_pretty(&result.models)
            .map_err(|e| CliError::Serialization(e.to_string())),
        OutputFormat::Yaml => {
            serde_yaml::to_string(&result.models).map_err(|e| CliError::Serialization(e.to_string()))
        }
    }
}

fn format_errors(result: &CompileResult, output: &mut String) {
    if !result.errors.is_empty() {
        output.push_str("\n⚠️  Compile Errors:\n");
        for failure in &result.errors {
            output.push_str(&format!("  - {}: {}\n", failure.name, failure.error));
        }
    }
}

fn field_flags(field: &Field) -> Vec<String> {
    let mut flags = Vec::new();
    if field.primary_key {
        flags.push("pk".to_string());
    }
    if field.timestamp {
        flags.push("timestamp".to_string());
    }
    if !field.nullable {
        flags.push("not null".to_string());
    }
    if field.aliased {
        flags.push(format!("column={}", field.column_name));
    }
    if let Some(raw) = &field.raw_type {
        flags.push(format!("raw={}", raw));
    }
    if let Some(relationship) = &field.relationship {
        flags.push(relationship.to_string());
    }
    flags
}

fn model_options(model: &Model) -> Vec<String> {
    let mut options = Vec::new();
    if let Some(table) = &model.table_name {
        options.push(format!("table={}", table));
    }
    if let Some(alias) = &model.alias {
        options.push(format!("alias={}", alias));
    }
    if model.cached {
        options.push(format!("cached={}s", model.cache_duration));
    }
    if model.dynamic_table_name {
        options.push("dynamic-table-name".to_string());
    }
    if model.role_based {
        options.push("role-based".to_string());
    }
    if model.exclude_media {
        options.push("no-media".to_string());
    }
    options
}

/// Format compile result in compact mode
pub fn format_compact_output(result: &CompileResult) -> String {
    let mut output = String::new();
    format_errors(result, &mut output);

    output.push_str(&format!("\n✅ Compiled {} model(s):\n", result.models.len()));
    for model in &result.models {
        let fields: Vec<String> = model
            .ordered_fields()
            .iter()
            .map(|f| format!("{}:{}", f.name, f.datatype))
            .collect();
        output.push_str(&format!(
            "  {} [pk: {}] {}\n",
            model.name,
            model.primary_key_columns().join(","),
            fields.join(", ")
        ));
    }

    if result.is_success() {
        output.push_str("\n✅ All aggregates compiled!\n");
    }

    output
}

/// Format compile result in pretty mode
pub fn format_pretty_output(result: &CompileResult) -> String {
    let mut output = String::new();
    format_errors(result, &mut output);

    output.push_str(&format!("\n✅ Compiled {} model(s):\n", result.models.len()));
    for model in &result.models {
        output.push_str(&format!("\nModel {}:\n", model.name));
        let options = model_options(model);
        if !options.is_empty() {
            output.push_str(&format!("  Options: {}\n", options.join(", ")));
        }
        output.push_str(&format!("  Fields: {}\n", model.fields.len()));

        for field in model.ordered_fields() {
            output.push_str(&format!("    - {} ({})", field.name, field.datatype));
            let flags = field_flags(field);
            if !flags.is_empty() {
                output.push_str(&format!(" [{}]", flags.join(", ")));
            }
            output.push('\n');
            if let Some(desc) = &field.description {
                output.push_str(&format!("      Comment: {}\n", desc));
            }
        }

        if !model.relationship_names.is_empty() {
            let targets: Vec<&str> = model.relationship_names.all_targets().into_iter().collect();
            output.push_str(&format!("  References: {}\n", targets.join(", ")));
        }
    }

    if result.is_success() {
        output.push_str("\n✅ All aggregates compiled!\n");
    }

    output
}
