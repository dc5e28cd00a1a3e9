//! Command-line interface.

pub mod commands;
pub mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::infrastructure::config::{ConfigLoader, DEFAULT_CONFIG_PATH};
use crate::infrastructure::logging::LoggerImpl;

/// Run xcodebuild under a pseudo-terminal and derive a pass/fail verdict
#[derive(Parser, Debug)]
#[command(name = "xcodebuild-runner", version, about, long_about = None)]
pub struct Cli {
    /// CI file holding the xcode_* and clang_analyzer settings
    #[arg(long, short, global = true, default_value = DEFAULT_CONFIG_PATH, env = "XCODEBUILD_RUNNER_CONFIG")]
    pub config: PathBuf,

    /// Print reports as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the build and exit with its verdict
    Run(commands::run::RunArgs),
    /// Print the composed build command without running it
    Command,
    /// Extract analyzer alerts from a saved build log
    Alerts(commands::alerts::AlertsArgs),
}

/// Load configuration, set up logging and dispatch.
///
/// Returns the exit code the process should terminate with.
pub async fn execute(cli: Cli) -> Result<i32> {
    let config = ConfigLoader::extract(&cli.config)?;
    ConfigLoader::validate_logging(&config)?;
    let _logger = LoggerImpl::init(&config.logging)?;

    match cli.command {
        Commands::Run(args) => commands::run::execute(args, config, cli.json).await,
        Commands::Command => commands::command::execute(&config, cli.json),
        Commands::Alerts(args) => commands::alerts::execute(args, cli.json).await,
    }
}

/// Report an error that stopped the program before a verdict was reached.
pub fn handle_error(err: &anyhow::Error, json_mode: bool) {
    if json_mode {
        let chain: Vec<String> = err.chain().map(ToString::to_string).collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "error": err.to_string(),
                "causes": chain.get(1..).unwrap_or_default(),
            }))
            .unwrap_or_default()
        );
    } else {
        eprintln!("{} {err:#}", console::style("Error:").red().bold());
    }
}
