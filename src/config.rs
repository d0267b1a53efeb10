//! Configuration management for cron-lint.
//!
//! Handles:
//! - Command-line argument parsing for both binaries
//! - Layered TOML configuration (user file, then project file)

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Deserialize;

use crate::validation::LintOptions;

/// Project configuration file looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = ".cron-lint.toml";

/// How the CLI renders a validation result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Command-line arguments for the crontab linter
#[derive(Debug, Parser)]
#[command(name = "cron-lint")]
#[command(about = "Validate crontab schedule lines")]
#[command(version)]
pub struct Args {
    /// Crontab files to lint, relative to the build directory
    #[arg(help = "Crontab files to lint")]
    pub files: Vec<String>,

    /// Prefix prepended verbatim to each file name
    #[arg(long, help = "Directory prefix for file names (include the trailing '/')")]
    pub build_dir: Option<String>,

    /// Also check the month column
    #[arg(long, help = "Validate the month field")]
    pub validate_month: bool,

    #[arg(long, value_enum, help = "Output format")]
    pub format: Option<OutputFormat>,

    /// Explicit configuration file, replaces the project file lookup
    #[arg(long, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        default_value = "warn",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Command-line arguments for the crontab language server
#[derive(Debug, Parser)]
#[command(name = "cron-ls")]
#[command(about = "Language server for crontab files")]
#[command(version)]
pub struct ServerArgs {
    #[arg(long, help = "Validate the month field")]
    pub validate_month: bool,

    #[arg(long, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Contents of a TOML configuration file; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub build_dir: Option<String>,
    pub files: Option<Vec<String>>,
    pub validate_month: Option<bool>,
    pub format: Option<OutputFormat>,
}

impl FileConfig {
    /// Read and parse a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Overlay `other` on top of `self`
    fn merge(self, other: FileConfig) -> Self {
        Self {
            build_dir: other.build_dir.or(self.build_dir),
            files: other.files.or(self.files),
            validate_month: other.validate_month.or(self.validate_month),
            format: other.format.or(self.format),
        }
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub files: Vec<String>,
    pub build_dir: String,
    pub validate_month: bool,
    pub format: OutputFormat,
    pub log_level: String,
}

impl Config {
    /// Create configuration from explicit arguments
    pub fn from_args(args: Args) -> Result<Self> {
        let layers = load_layers(args.config.as_deref())?;
        Ok(Self::resolve(args, layers))
    }

    /// Apply command-line arguments over already loaded file layers
    ///
    /// Layers are ordered lowest priority first.
    pub fn resolve(args: Args, layers: Vec<FileConfig>) -> Self {
        let file = layers
            .into_iter()
            .fold(FileConfig::default(), FileConfig::merge);

        // Files on the command line replace configured ones
        let files = if args.files.is_empty() {
            file.files.unwrap_or_default()
        } else {
            args.files
        };

        Config {
            files,
            build_dir: args.build_dir.or(file.build_dir).unwrap_or_default(),
            validate_month: args.validate_month || file.validate_month.unwrap_or(false),
            format: args.format.or(file.format).unwrap_or_default(),
            log_level: args.log_level,
        }
    }

    /// Create language server configuration
    pub fn from_server_args(args: ServerArgs) -> Result<Self> {
        let layers = load_layers(args.config.as_deref())?;
        let file = layers
            .into_iter()
            .fold(FileConfig::default(), FileConfig::merge);

        Ok(Config {
            files: Vec::new(),
            build_dir: String::new(),
            validate_month: args.validate_month || file.validate_month.unwrap_or(false),
            format: OutputFormat::default(),
            log_level: args.log_level,
        })
    }

    pub fn lint_options(&self) -> LintOptions {
        LintOptions {
            validate_month: self.validate_month,
        }
    }
}

/// User configuration file, e.g. ~/.config/cron-lint/config.toml
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cron-lint").join("config.toml"))
}

fn load_layers(explicit: Option<&Path>) -> Result<Vec<FileConfig>> {
    let mut layers = Vec::new();

    if let Some(path) = user_config_path().filter(|p| p.is_file()) {
        log::debug!("loading user config {}", path.display());
        layers.push(FileConfig::load(&path)?);
    }

    match explicit {
        Some(path) => layers.push(FileConfig::load(path)?),
        None => {
            let project = Path::new(PROJECT_CONFIG_FILE);
            if project.is_file() {
                log::debug!("loading project config {}", project.display());
                layers.push(FileConfig::load(project)?);
            }
        }
    }

    Ok(layers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["cron-lint"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_defaults() {
        let config = Config::resolve(args(&[]), Vec::new());

        assert!(config.files.is_empty());
        assert_eq!(config.build_dir, "");
        assert!(!config.validate_month);
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_later_layers_win() {
        let user = FileConfig::parse("build_dir = \"/user/\"\nvalidate_month = true\n").unwrap();
        let project = FileConfig::parse("build_dir = \"/project/\"\nformat = \"json\"\n").unwrap();

        let config = Config::resolve(args(&[]), vec![user, project]);

        assert_eq!(config.build_dir, "/project/");
        assert!(config.validate_month);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_command_line_overrides_files() {
        let project = FileConfig::parse(
            "build_dir = \"/project/\"\nfiles = [\"a\", \"b\"]\nformat = \"json\"\n",
        )
        .unwrap();

        let config = Config::resolve(
            args(&["--build-dir", "/cli/", "--format", "text", "crontab"]),
            vec![project],
        );

        assert_eq!(config.build_dir, "/cli/");
        assert_eq!(config.files, vec!["crontab".to_string()]);
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn test_configured_files_used_without_arguments() {
        let project = FileConfig::parse("files = [\"cron/a\", \"cron/b\"]\n").unwrap();
        let config = Config::resolve(args(&[]), vec![project]);
        assert_eq!(config.files, vec!["cron/a", "cron/b"]);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(FileConfig::parse("validate_months = true\n").is_err());
    }

    #[test]
    fn test_lint_options() {
        let config = Config::resolve(args(&["--validate-month"]), Vec::new());
        assert!(config.lint_options().validate_month);
    }
}
