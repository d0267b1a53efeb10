//! Rendering of validation results for the command line.

use anyhow::Result;

use crate::config::OutputFormat;
use crate::validation::{Diagnostic, Severity, ValidationResult};

/// Render a result in the requested format
pub fn render(result: &ValidationResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(result)),
        OutputFormat::Json => render_json(result),
    }
}

/// One line per diagnostic followed by a summary line
pub fn render_text(result: &ValidationResult) -> String {
    let mut out = String::new();

    for diagnostic in result.diagnostics() {
        out.push_str(&format_diagnostic(diagnostic));
        out.push('\n');
    }

    let high = result
        .diagnostics()
        .iter()
        .filter(|d| d.severity == Severity::High)
        .count();
    let normal = result.diagnostics().len() - high;

    if result.success() {
        out.push_str(&format!("ok: {} warning(s)\n", normal));
    } else {
        out.push_str(&format!(
            "failed: {} error(s), {} warning(s)\n",
            high, normal
        ));
    }

    out
}

/// `<file>:<line>: <severity>: <message>`, without the line for file-level entries
pub fn format_diagnostic(diagnostic: &Diagnostic) -> String {
    match diagnostic.line {
        Some(line) => format!(
            "{}:{}: {}: {}",
            diagnostic.file, line, diagnostic.severity, diagnostic.message
        ),
        None => format!(
            "{}: {}: {}",
            diagnostic.file, diagnostic.severity, diagnostic.message
        ),
    }
}

pub fn render_json(result: &ValidationResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}
