//! Scripted process runner for testing.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::errors::{RunnerError, RunnerResult};
use crate::domain::models::{CapturedRun, ExitStatus, OutputLog};
use crate::domain::ports::{LineSink, ProcessRunner};

/// Replays canned raw output instead of spawning anything.
///
/// Raw lines pass through the same recording path as real PTY output, so
/// color codes and blank lines are handled exactly as in a live run.
pub struct ScriptedRunner {
    raw_lines: Vec<String>,
    exit_status: ExitStatus,
    pid: Option<u32>,
    commands: RwLock<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new<I, S>(raw_lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            raw_lines: raw_lines.into_iter().map(Into::into).collect(),
            exit_status: ExitStatus::Known(0),
            pid: None,
            commands: RwLock::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_exit_status(mut self, exit_status: ExitStatus) -> Self {
        self.exit_status = exit_status;
        self
    }

    #[must_use]
    pub fn with_pid(mut self, pid: u32) -> Self {
        self.pid = Some(pid);
        self
    }

    /// Commands received so far, in call order.
    pub async fn commands(&self) -> Vec<String> {
        self.commands.read().await.clone()
    }
}

#[async_trait]
impl ProcessRunner for ScriptedRunner {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn run(&self, command: &str, on_line: LineSink<'_>) -> RunnerResult<CapturedRun> {
        if command.trim().is_empty() {
            return Err(RunnerError::EmptyCommand);
        }
        self.commands.write().await.push(command.to_string());

        let mut log = OutputLog::new();
        for raw in &self.raw_lines {
            if let Some(line) = log.record(raw) {
                on_line(line);
            }
        }

        Ok(CapturedRun {
            log,
            exit_status: self.exit_status,
            pid: self.pid,
        })
    }
}
