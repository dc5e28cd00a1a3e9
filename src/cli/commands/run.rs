//! Implementation of the `xcodebuild-runner run` command.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use console::style;
use serde::Serialize;
use std::sync::Arc;

use crate::adapters::process::{PtyConfig, PtyProcessRunner};
use crate::application::{BuildRunner, RunReport};
use crate::cli::output::{bullet_list, output, CommandOutput};
use crate::domain::models::{Config, ExitStatus, Verdict};
use crate::infrastructure::config::ConfigLoader;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Run this shell command instead of the composed xcodebuild pipeline
    #[arg(long)]
    pub command: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RunOutput {
    pub command: String,
    pub verdict: Verdict,
    pub exit_code: i32,
    pub exit_status: ExitStatus,
    pub pid: Option<u32>,
    pub lines_captured: usize,
    pub analyzer_alerts: Vec<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub duration_ms: i64,
}

impl From<&RunReport> for RunOutput {
    fn from(report: &RunReport) -> Self {
        let run = &report.run;
        Self {
            command: report.command.clone(),
            verdict: report.verdict,
            exit_code: report.verdict.exit_code(),
            exit_status: run.exit_status(),
            pid: run.pid(),
            lines_captured: run.log().len(),
            analyzer_alerts: run.analyzer_alerts().to_vec(),
            started_at: run.started_at(),
            finished_at: run.finished_at(),
            duration_ms: (run.finished_at() - run.started_at()).num_milliseconds(),
        }
    }
}

impl CommandOutput for RunOutput {
    fn to_human(&self) -> String {
        let verdict = if self.verdict.is_passed() {
            style(self.verdict.to_string()).green().bold()
        } else {
            style(self.verdict.to_string()).red().bold()
        };
        let status = self
            .exit_status
            .code()
            .map_or_else(|| "unknown".to_string(), |code| code.to_string());

        [
            String::new(),
            format!("{} {verdict}", style("Verdict:").bold()),
            format!("Exit status: {status} (exiting with {})", self.exit_code),
            format!(
                "Captured {} line(s) in {:.1}s",
                self.lines_captured,
                self.duration_ms as f64 / 1000.0
            ),
            bullet_list("Analyzer alerts", &self.analyzer_alerts, "Analyzer alerts: none"),
        ]
        .join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: RunArgs, config: Config, json_mode: bool) -> Result<i32> {
    if args.command.is_some() {
        ConfigLoader::validate_runner(&config).context("Invalid runner configuration")?;
    } else {
        ConfigLoader::validate(&config).context("Invalid configuration")?;
    }

    let pty = PtyProcessRunner::new(PtyConfig::default().with_shell(config.runner.shell.clone()));
    let runner = BuildRunner::new(Arc::new(pty), config);

    // Child output goes to stderr in JSON mode so stdout stays parseable.
    let mut mirror = |line: &str| {
        if json_mode {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    };

    let report = match args.command {
        Some(command) => runner.run_command(&command, &mut mirror).await?,
        None => runner.run(&mut mirror).await?,
    };

    output(&RunOutput::from(&report), json_mode);
    Ok(report.verdict.exit_code())
}
