//! xcodebuild-runner - supervised xcodebuild runs for CI
//!
//! Runs an `xcodebuild` pipeline under a pseudo-terminal, mirrors its output
//! line by line, and derives a single pass/fail verdict from the exit status,
//! the test summary markers and the clang static analyzer's report.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): Run, log and verdict models, the process runner port
//! - **Service Layer** (`services`): Sanitizer, alert extractor, verdict resolver, command builder
//! - **Adapters** (`adapters`): PTY-backed and scripted process runners
//! - **Application Layer** (`application`): One supervised build, end to end
//! - **Infrastructure Layer** (`infrastructure`): Configuration loading and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use xcodebuild_runner::{BuildRunner, ConfigLoader, PtyConfig, PtyProcessRunner};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load(".travis.yml")?;
//!     let runner = BuildRunner::new(Arc::new(PtyProcessRunner::new(PtyConfig::default())), config);
//!     let report = runner.run(&mut |line: &str| println!("{line}")).await?;
//!     std::process::exit(report.verdict.exit_code());
//! }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

pub use adapters::process::{PtyConfig, PtyProcessRunner, ScriptedRunner};
pub use application::{BuildRunner, RunReport};
pub use domain::models::{
    CapturedRun, ClangAnalyzerConfig, CompletedRun, Config, ExitStatus, FailureReason,
    LoggingConfig, OutputLog, PassBasis, RunnerConfig, Verdict,
};
pub use domain::ports::{LineSink, ProcessRunner};
pub use domain::{RunnerError, RunnerResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{build_command, extract_alerts, sanitize, VerdictResolver};
