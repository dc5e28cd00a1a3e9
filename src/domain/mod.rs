//! Domain layer for the build runner
//!
//! Pure types shared by the supervisor, the output classifiers and the CLI:
//! the captured output log, exit status, verdicts, configuration records and
//! the process-runner port.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{RunnerError, RunnerResult};
