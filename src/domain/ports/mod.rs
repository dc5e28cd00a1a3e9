//! Port trait definitions (Hexagonal Architecture)
//!
//! - ProcessRunner: runs one command to completion, streaming its output

pub mod process_runner;

pub use process_runner::{LineSink, ProcessRunner};
