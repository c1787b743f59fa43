//! bugsweep CLI entry point.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use bugsweep::cli::commands::{self, analyze, check_classpath, spec};
use bugsweep::cli::{handle_error, Cli, Commands};
use bugsweep::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli.command, cli.config.as_deref(), cli.debug, cli.json).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => handle_error(&err, cli.json),
    }
}

async fn run(
    command: Commands,
    config_path: Option<&std::path::Path>,
    debug: bool,
    json_mode: bool,
) -> Result<()> {
    let config = commands::load_config(config_path)?;
    let _logger = LoggerImpl::init(&LogConfig::from_settings(&config.logging, debug)?)?;

    match command {
        Commands::Analyze(args) => analyze::execute(args, config, debug, json_mode).await,
        Commands::CheckClasspath(args) => {
            check_classpath::execute(args, config, debug, json_mode).await
        }
        Commands::Spec(args) => spec::execute(args, config, debug, json_mode).await,
    }
}
