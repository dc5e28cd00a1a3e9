use async_trait::async_trait;

use crate::domain::errors::RunnerResult;
use crate::domain::models::CapturedRun;

/// Callback invoked synchronously with every recorded line.
///
/// It runs on the capture path, so it must return quickly.
pub type LineSink<'a> = &'a mut (dyn FnMut(&str) + Send);

/// Trait for process runner implementations.
///
/// A runner executes a single shell command, records its sanitized output
/// into an [`OutputLog`](crate::domain::models::OutputLog), forwards each
/// recorded line to `on_line` as it arrives, and reports the child's exit
/// status once the output stream has closed.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Get the runner type name.
    fn name(&self) -> &'static str;

    /// Run `command` to natural completion.
    async fn run(&self, command: &str, on_line: LineSink<'_>) -> RunnerResult<CapturedRun>;
}
