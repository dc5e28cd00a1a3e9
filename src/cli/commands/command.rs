//! Implementation of the `xcodebuild-runner command` command.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;
use crate::services::command_builder::build_command;

#[derive(Debug, Serialize)]
pub struct ComposedCommand {
    pub command: String,
}

impl CommandOutput for ComposedCommand {
    fn to_human(&self) -> String {
        self.command.clone()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(config: &Config, json_mode: bool) -> Result<i32> {
    ConfigLoader::validate(config).context("Invalid configuration")?;
    let command = build_command(config).context("Failed to compose build command")?;
    output(&ComposedCommand { command }, json_mode);
    Ok(0)
}
