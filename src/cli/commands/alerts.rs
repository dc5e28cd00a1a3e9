//! Implementation of the `xcodebuild-runner alerts` command.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tokio::fs;

use crate::cli::output::{bullet_list, output, CommandOutput};
use crate::domain::models::OutputLog;
use crate::services::alert_extractor::extract_alerts;

#[derive(Args, Debug)]
pub struct AlertsArgs {
    /// Saved build log (raw or already sanitized)
    pub log_file: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct AlertsOutput {
    pub log_file: PathBuf,
    pub lines_scanned: usize,
    pub analyzer_alerts: Vec<String>,
}

impl CommandOutput for AlertsOutput {
    fn to_human(&self) -> String {
        bullet_list(
            "Analyzer alerts",
            &self.analyzer_alerts,
            "No analyzer alerts found",
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Read a log file and extract its analyzer alerts as a live run would.
pub async fn scan_log_file(log_file: PathBuf) -> Result<AlertsOutput> {
    let contents = fs::read(&log_file)
        .await
        .with_context(|| format!("Failed to read {}", log_file.display()))?;
    let text = String::from_utf8_lossy(&contents);
    let log = OutputLog::from_raw_lines(text.lines());

    Ok(AlertsOutput {
        analyzer_alerts: extract_alerts(log.lines()),
        lines_scanned: log.len(),
        log_file,
    })
}

pub async fn execute(args: AlertsArgs, json_mode: bool) -> Result<i32> {
    let result = scan_log_file(args.log_file).await?;
    output(&result, json_mode);
    Ok(0)
}
