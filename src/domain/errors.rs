//! Domain errors for the build runner.

use thiserror::Error;

/// Errors raised while supervising a child process.
///
/// Build and test failures are not errors; they are reported through
/// [`Verdict`](crate::domain::models::Verdict).
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Command is empty")]
    EmptyCommand,

    #[error("A run is already in progress on this supervisor")]
    AlreadyRunning,

    #[error("Failed to allocate pseudo-terminal: {0}")]
    PtyAllocation(String),

    #[error("Failed to spawn `{command}`: {reason}")]
    Spawn { command: String, reason: String },

    #[error("Failed to read child output: {0}")]
    OutputRead(#[from] std::io::Error),

    #[error("Output reader task failed: {0}")]
    ReaderTask(String),
}

pub type RunnerResult<T> = Result<T, RunnerError>;
