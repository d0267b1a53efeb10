//! Validation Engine
//!
//! Line, document and file validation built on the field grammar.
//! Every finding is returned as a value; nothing here prints or aborts.

use std::fmt;
use std::fs;
use std::ops::Range;
use std::path::Path;

use serde::Serialize;

use crate::parser::{parse_line, CronEntry, CronLine, FieldKind, ParsedLine, SCHEDULE_FIELDS};
use crate::validation::grammar::{command_overflows, validate_token};

/// Severity of a diagnostic
///
/// Only `High` fails a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Normal => f.write_str("normal"),
            Severity::High => f.write_str("high"),
        }
    }
}

/// What a diagnostic is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The file is absent or could not be read
    MissingFile,
    /// A schedule sub-value does not match its field grammar
    MalformedField,
    /// Fewer than five schedule fields
    MalformedLine,
    /// The command looks like an extra schedule field
    MalformedCommand,
}

/// A validation finding tagged with its location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
    pub file: String,
    /// 1-based line, `None` for file-level diagnostics
    pub line: Option<usize>,
}

impl Diagnostic {
    fn missing_file(file: &str, message: String) -> Self {
        Self {
            severity: Severity::Normal,
            kind: DiagnosticKind::MissingFile,
            message,
            file: file.to_string(),
            line: None,
        }
    }

    fn from_line_error(line: &CronLine<'_>, error: &LineError) -> Self {
        Self {
            severity: Severity::High,
            kind: error.kind(),
            message: error.to_string(),
            file: line.source.to_string(),
            line: Some(line.number),
        }
    }
}

/// Ordered diagnostics of one run plus its overall outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    success: bool,
    diagnostics: Vec<Diagnostic>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            success: true,
            diagnostics: Vec::new(),
        }
    }

    /// Append a diagnostic; a `High` one marks the run as failed
    pub fn push(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity == Severity::High {
            self.success = false;
        }
        self.diagnostics.push(diagnostic);
    }

    /// True when no `High` diagnostic was recorded
    pub fn success(&self) -> bool {
        self.success
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// Switches for checks that are off by default
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LintOptions {
    /// Check the month column against its grammar
    pub validate_month: bool,
}

/// An error found on a single line
#[derive(Debug, Clone, PartialEq)]
pub enum LineError {
    InvalidValue {
        kind: FieldKind,
        index: usize,
        value: String,
        span: Range<usize>,
    },
    InsufficientFields {
        found: usize,
    },
    InvalidCommand {
        command: String,
        span: Range<usize>,
    },
}

impl LineError {
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            LineError::InvalidValue { .. } => DiagnosticKind::MalformedField,
            LineError::InsufficientFields { .. } => DiagnosticKind::MalformedLine,
            LineError::InvalidCommand { .. } => DiagnosticKind::MalformedCommand,
        }
    }

    /// Byte span in the line, `None` when the error covers the whole line
    pub fn span(&self) -> Option<Range<usize>> {
        match self {
            LineError::InvalidValue { span, .. } | LineError::InvalidCommand { span, .. } => {
                Some(span.clone())
            }
            LineError::InsufficientFields { .. } => None,
        }
    }
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineError::InvalidValue {
                kind, index, value, ..
            } => write!(f, "{}[{}] invalid value: {}", kind.label(), index, value),
            LineError::InsufficientFields { found } => write!(
                f,
                "Line has insufficient fields: expected at least {}, found {}",
                SCHEDULE_FIELDS, found
            ),
            LineError::InvalidCommand { command, .. } => {
                write!(f, "Cmd starts with invalid character: {}", command)
            }
        }
    }
}

/// Validate one crontab line with default options
pub fn validate_line(text: &str) -> Vec<LineError> {
    validate_line_with(text, &LintOptions::default())
}

/// Validate one crontab line
///
/// Empty lines and lines starting with '#' never produce errors.
pub fn validate_line_with(text: &str, options: &LintOptions) -> Vec<LineError> {
    match parse_line(text) {
        ParsedLine::Empty | ParsedLine::Comment(_) => Vec::new(),
        ParsedLine::Malformed { tokens } => vec![LineError::InsufficientFields { found: tokens }],
        ParsedLine::Entry(entry) => validate_entry(&entry, options),
    }
}

fn validate_entry(entry: &CronEntry<'_>, options: &LintOptions) -> Vec<LineError> {
    let mut errors = Vec::new();

    for field in &entry.fields {
        if field.kind == FieldKind::Month && !options.validate_month {
            continue;
        }

        for value in field.values() {
            if !validate_token(field.kind, value.text) {
                errors.push(LineError::InvalidValue {
                    kind: field.kind,
                    index: value.index,
                    value: value.text.to_string(),
                    span: value.span,
                });
            }
        }
    }

    if let Some(span) = &entry.command_span {
        if command_overflows(&entry.command) {
            errors.push(LineError::InvalidCommand {
                command: entry.command.clone(),
                span: span.clone(),
            });
        }
    }

    errors
}

/// Validate a whole crontab, pairing each error with its 1-based line
pub fn validate_document(content: &str, options: &LintOptions) -> Vec<(usize, LineError)> {
    CronLine::split("", content)
        .flat_map(|line| {
            validate_line_with(line.text, options)
                .into_iter()
                .map(move |error| (line.number, error))
        })
        .collect()
}

/// Check that a crontab file exists
pub fn validate_file(path: impl AsRef<Path>) -> bool {
    path.as_ref().exists()
}

/// Validate crontab files with default options
pub fn execute<S: AsRef<str>>(files: &[S], build_dir: &str) -> ValidationResult {
    execute_with(files, build_dir, &LintOptions::default())
}

/// Validate crontab files in order
///
/// Each path is `build_dir` immediately followed by the file name; no
/// separator is inserted. Missing or unreadable files are reported with
/// `Normal` severity and skipped.
pub fn execute_with<S: AsRef<str>>(
    files: &[S],
    build_dir: &str,
    options: &LintOptions,
) -> ValidationResult {
    let mut result = ValidationResult::new();

    for file_name in files {
        let file_name = file_name.as_ref();
        let cron_file = format!("{}{}", build_dir, file_name);

        if !validate_file(&cron_file) {
            log::debug!("cron file not found: {}", cron_file);
            result.push(Diagnostic::missing_file(
                file_name,
                format!("Missing Cron File: {}", file_name),
            ));
            continue;
        }

        let content = match fs::read(&cron_file) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                log::warn!("failed to read cron file {}: {}", cron_file, e);
                result.push(Diagnostic::missing_file(
                    file_name,
                    format!("Unreadable Cron File: {}: {}", file_name, e),
                ));
                continue;
            }
        };

        log::debug!("validating cron file {}", cron_file);
        for line in CronLine::split(file_name, &content) {
            for error in validate_line_with(line.text, options) {
                result.push(Diagnostic::from_line_error(&line, &error));
            }
        }
    }

    result
}
