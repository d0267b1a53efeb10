//! Crontab Linter
//!
//! Validates crontab schedule lines and reports position-addressable
//! diagnostics.
//!
//! This library provides:
//! - Crontab line parsing
//! - Per-field grammar validation
//! - File validation producing ordered diagnostics
//! - An LSP front end publishing those diagnostics
//! - Configuration management

pub mod config;
pub mod lsp;
pub mod parser;
pub mod report;
pub mod validation;

// Re-exports for clean public API
pub use config::Config;
pub use parser::{parse_line, ParsedLine};
pub use validation::{
    execute, execute_with, validate_line, validate_token, Diagnostic, LintOptions, Severity,
    ValidationResult,
};
