//! Application layer: use case orchestration.

pub mod build_runner;

pub use build_runner::{BuildRunner, RunReport};
