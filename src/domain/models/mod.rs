pub mod config;
pub mod output_log;
pub mod run;
pub mod verdict;

pub use config::{ClangAnalyzerConfig, Config, LoggingConfig, RunnerConfig};
pub use output_log::OutputLog;
pub use run::{CapturedRun, CompletedRun, ExitStatus};
pub use verdict::{FailureReason, PassBasis, Verdict};
