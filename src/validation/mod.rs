//! Validation Engine
//!
//! Field grammar plus line and file orchestration, separate from parsing
//! and from the CLI/LSP front ends.

pub mod engine;
pub mod grammar;

pub use engine::{
    execute, execute_with, validate_document, validate_file, validate_line, validate_line_with,
    Diagnostic, DiagnosticKind, LineError, LintOptions, Severity,
};
pub use grammar::{accepted_forms, validate_token};

// Re-export common types
pub use engine::ValidationResult;
