//! Format modes, payloads, evaluation reports and provider checks as text.

use crate::agent::{Mode, TemplateRegistry, TemplateSource};
use crate::eval::{CaseOutcome, EvalReport};
use crate::provider::diagnostics::SmokeTestResult;
use crate::provider::ValidationResult;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::Value;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// `built-in` or the override file path.
pub fn source_label(source: &TemplateSource) -> String {
    match source {
        TemplateSource::BuiltIn => "built-in".to_string(),
        TemplateSource::File(path) => path.display().to_string(),
    }
}

/// Format the mode list as a table.
pub fn format_modes_text(templates: &TemplateRegistry) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Modes")));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Mode", "Label", "Template", "Schema keys"]);
    for mode in Mode::ALL {
        table.add_row(vec![
            mode.as_str().to_string(),
            mode.label().to_string(),
            source_label(templates.get(mode).source()),
            mode.schema_keys().join(", "),
        ]);
    }
    out.push_str(&format!("{}\n", table));
    out
}

/// Render a mode payload as headed sections, one per top-level key.
pub fn format_payload_text(mode: Mode, payload: &Value) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading(mode.label())));
    match payload {
        Value::Object(map) => {
            for (key, value) in map {
                out.push_str(&format!("{}\n", key.bold()));
                write_value(&mut out, value, 1);
                out.push('\n');
            }
        }
        other => write_value(&mut out, other, 0),
    }
    out
}

fn write_value(out: &mut String, value: &Value, depth: usize) {
    let indent = "  ".repeat(depth);
    match value {
        Value::Array(items) if items.is_empty() => out.push_str(&format!("{}(none)\n", indent)),
        Value::Array(items) => {
            for item in items {
                match item {
                    Value::Object(_) | Value::Array(_) => {
                        out.push_str(&format!("{}-\n", indent));
                        write_value(out, item, depth + 1);
                    }
                    scalar => out.push_str(&format!("{}- {}\n", indent, scalar_text(scalar))),
                }
            }
        }
        Value::Object(map) => {
            for (key, inner) in map {
                match inner {
                    Value::Object(_) | Value::Array(_) => {
                        out.push_str(&format!("{}{}:\n", indent, key));
                        write_value(out, inner, depth + 1);
                    }
                    scalar => {
                        out.push_str(&format!("{}{}: {}\n", indent, key, scalar_text(scalar)))
                    }
                }
            }
        }
        scalar => out.push_str(&format!("{}{}\n", indent, scalar_text(scalar))),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

/// Format an evaluation report: per-case table then failure details.
pub fn format_eval_report_text(report: &EvalReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Evaluation")));
    out.push_str(&format!(
        "  Provider: {} ({})\n\n",
        report.provider, report.model
    ));

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["#", "Case", "Mode", "Result", "Time (ms)"]);
    for row in &report.results {
        let status = match &row.outcome {
            CaseOutcome::Pass => format!("{}", "PASS".green()),
            CaseOutcome::NotJsonLike { .. } => format!("{}", "FAIL: not JSON-like".red()),
            CaseOutcome::MissingKeys { keys, .. } => {
                format!("{}", format!("FAIL: missing {}", keys.join(", ")).red())
            }
            CaseOutcome::Error { .. } => format!("{}", "ERROR".red()),
        };
        table.add_row(vec![
            row.index.to_string(),
            row.name.clone(),
            row.mode.clone(),
            status,
            row.elapsed_ms.to_string(),
        ]);
    }
    out.push_str(&format!("{}\n", table));

    for row in &report.results {
        let detail = match &row.outcome {
            CaseOutcome::Pass => continue,
            CaseOutcome::NotJsonLike { preview } => {
                format!(
                    "Output not JSON-like (doesn't start/end with {{ }}).\n{}",
                    preview
                )
            }
            CaseOutcome::MissingKeys { keys, preview } => {
                format!("Missing keys: {:?}\n{}", keys, preview)
            }
            CaseOutcome::Error { message } => message.clone(),
        };
        out.push_str(&format!(
            "\n=== Case {}: {} ===\n{}\n",
            row.index, row.name, detail
        ));
    }

    let summary = report.summary_line();
    if report.all_passed() {
        out.push_str(&format!("\n{}\n", summary.green()));
    } else {
        out.push_str(&format!("\n{}\n", summary.yellow()));
    }
    out
}

/// Format a provider check, with the smoke test when one ran.
pub fn format_check_text(
    validation: &ValidationResult,
    model: &str,
    api_key_status: &str,
    smoke: Option<&SmokeTestResult>,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Provider")));
    out.push_str(&format!("  Provider: {}\n", validation.provider));
    out.push_str(&format!("  Model: {}\n", model));
    out.push_str(&format!("  API key: {}\n\n", api_key_status));

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Check", "Result"]);
    for (check, passed) in &validation.checks {
        let mark = if *passed {
            format!("{}", "ok".green())
        } else {
            format!("{}", "fail".red())
        };
        table.add_row(vec![check.clone(), mark]);
    }
    out.push_str(&format!("{}\n", table));

    for error in &validation.errors {
        out.push_str(&format!("  {} {}\n", "error:".red(), error));
    }
    for warning in &validation.warnings {
        out.push_str(&format!("  {} {}\n", "warning:".yellow(), warning));
    }
    out.push_str(&format!(
        "\n{}/{} checks passed.\n",
        validation.passed_checks(),
        validation.total_checks()
    ));

    if let Some(smoke) = smoke {
        out.push_str(&format!(
            "\n{}\n\n",
            format_section_heading("Connectivity")
        ));
        out.push_str(&format!(
            "  Reply: {} chars in {} ms\n",
            smoke.reply_chars, smoke.elapsed_ms
        ));
        out.push_str(&format!("  Preview: {}\n", smoke.preview.trim()));
    }
    out
}
