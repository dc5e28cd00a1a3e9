//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - Human or JSON diagnostics on stderr (stdout carries the build output)
//! - Optional rolling JSON log files

pub mod logger;

pub use logger::LoggerImpl;
