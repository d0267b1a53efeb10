use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;

use cron_lint::config::{Args, Config};
use cron_lint::report;
use cron_lint::validation::execute_with;

fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level.as_str()))
        .init();

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Lint the configured files, returning whether the run succeeded
fn run(args: Args) -> Result<bool> {
    let config = Config::from_args(args)?;

    if config.files.is_empty() {
        log::info!("no crontab files given, nothing to lint");
    }

    let result = execute_with(&config.files, &config.build_dir, &config.lint_options());
    print!("{}", report::render(&result, config.format)?);

    Ok(result.success())
}
