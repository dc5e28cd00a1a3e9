//! One supervised build: compose, run, classify.

use anyhow::{Context, Result};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::models::{CompletedRun, Config, Verdict};
use crate::domain::ports::{LineSink, ProcessRunner};
use crate::infrastructure::config::ConfigError;
use crate::services::command_builder::build_command;
use crate::services::verdict_resolver::VerdictResolver;

/// Everything known about a finished run.
#[derive(Debug)]
pub struct RunReport {
    pub command: String,
    pub run: CompletedRun,
    pub verdict: Verdict,
}

/// Drives a [`ProcessRunner`] and resolves the verdict of its output.
pub struct BuildRunner {
    runner: Arc<dyn ProcessRunner>,
    config: Config,
    resolver: VerdictResolver,
}

impl BuildRunner {
    pub fn new(runner: Arc<dyn ProcessRunner>, config: Config) -> Self {
        let resolver = VerdictResolver::new(config.clang_analyzer.clone());
        Self {
            runner,
            config,
            resolver,
        }
    }

    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The command a run would execute.
    pub fn command(&self) -> Result<String, ConfigError> {
        build_command(&self.config)
    }

    /// Run the configured build command.
    pub async fn run(&self, on_line: LineSink<'_>) -> Result<RunReport> {
        let command = self.command().context("Failed to compose build command")?;
        self.run_command(&command, on_line).await
    }

    /// Run an explicit command string under the same supervision and policy.
    pub async fn run_command(&self, command: &str, on_line: LineSink<'_>) -> Result<RunReport> {
        let started_at = Utc::now();
        let captured = self
            .runner
            .run(command, on_line)
            .await
            .with_context(|| format!("{} runner failed to run `{command}`", self.runner.name()))?;
        let run = CompletedRun::new(captured, started_at, Utc::now());

        info!(
            lines = run.log().len(),
            exit_status = ?run.exit_status(),
            pid = ?run.pid(),
            "run finished"
        );

        let alert_count = run.analyzer_alerts().len();
        if alert_count > 0 {
            warn!(alerts = alert_count, "analyzer reported issues");
        }

        let verdict = self.resolver.resolve(&run);
        Ok(RunReport {
            command: command.to_string(),
            run,
            verdict,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::process::ScriptedRunner;
    use crate::domain::models::{ExitStatus, FailureReason, PassBasis};

    fn config() -> Config {
        Config {
            xcode_project: Some("Demo.xcodeproj".to_string()),
            xcode_scheme: Some("Demo".to_string()),
            xcode_sdk: Some("macosx10.9".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_run_passes_composed_command_to_runner() {
        let scripted = Arc::new(ScriptedRunner::new(["** TEST SUCCEEDED **"]));
        let runner = BuildRunner::new(scripted.clone(), config());

        let mut sink = |_: &str| {};
        let report = runner.run(&mut sink).await.unwrap();

        assert_eq!(report.verdict, Verdict::passed(PassBasis::ExitCode));
        assert_eq!(
            scripted.commands().await,
            std::slice::from_ref(&report.command)
        );
        assert!(report.command.starts_with("xcodebuild -project Demo.xcodeproj"));
    }

    #[tokio::test]
    async fn test_run_rejects_invalid_config_before_spawning() {
        let scripted = Arc::new(ScriptedRunner::new(Vec::<String>::new()));
        let mut config = config();
        config.xcode_sdk = None;
        let runner = BuildRunner::new(scripted.clone(), config);

        let mut sink = |_: &str| {};
        assert!(runner.run(&mut sink).await.is_err());
        assert!(scripted.commands().await.is_empty());
    }

    #[tokio::test]
    async fn test_run_command_applies_analyzer_policy() {
        let scripted = Arc::new(
            ScriptedRunner::new([
                "Analyze A.m",
                "Analyze B.m",
                "(2 commands with analyzer issues)",
                "Test Suite 'All tests' passed with 0 failures",
            ])
            .with_exit_status(ExitStatus::Unknown),
        );
        let mut config = config();
        config.clang_analyzer.fail_build = true;
        config.clang_analyzer.threshold = 1;
        let runner = BuildRunner::new(scripted, config);

        let mut mirrored = Vec::new();
        let mut sink = |line: &str| mirrored.push(line.to_string());
        let report = runner.run_command("./ci.sh", &mut sink).await.unwrap();

        assert_eq!(mirrored.len(), 4);
        assert_eq!(report.run.analyzer_alerts(), ["A.m", "B.m"]);
        assert_eq!(
            report.verdict.failure_reason(),
            Some(FailureReason::AnalyzerThresholdExceeded {
                alerts: 2,
                threshold: 1
            })
        );
    }
}
