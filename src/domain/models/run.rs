//! Results of a supervised run.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::OnceLock;

use super::output_log::OutputLog;
use crate::services::alert_extractor::extract_alerts;

/// Exit status of the supervised child.
///
/// `Unknown` is not an error: the pseudo-terminal can close before the
/// status is collected, in which case the verdict falls back to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "code", rename_all = "snake_case")]
pub enum ExitStatus {
    Known(i32),
    Unknown,
}

impl ExitStatus {
    pub const fn code(self) -> Option<i32> {
        match self {
            Self::Known(code) => Some(code),
            Self::Unknown => None,
        }
    }
}

/// What a process runner hands back once the child's output has closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRun {
    pub log: OutputLog,
    pub exit_status: ExitStatus,
    pub pid: Option<u32>,
}

/// A finished run, read-only from here on.
#[derive(Debug)]
pub struct CompletedRun {
    log: OutputLog,
    exit_status: ExitStatus,
    pid: Option<u32>,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
    alerts: OnceLock<Vec<String>>,
}

impl CompletedRun {
    pub fn new(
        captured: CapturedRun,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        Self {
            log: captured.log,
            exit_status: captured.exit_status,
            pid: captured.pid,
            started_at,
            finished_at,
            alerts: OnceLock::new(),
        }
    }

    pub const fn log(&self) -> &OutputLog {
        &self.log
    }

    pub const fn exit_status(&self) -> ExitStatus {
        self.exit_status
    }

    pub const fn pid(&self) -> Option<u32> {
        self.pid
    }

    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub const fn finished_at(&self) -> DateTime<Utc> {
        self.finished_at
    }

    /// Analyzer alerts found in the log, extracted on first access.
    pub fn analyzer_alerts(&self) -> &[String] {
        self.alerts.get_or_init(|| extract_alerts(self.log.lines()))
    }
}
