//! CLI command implementations.

pub mod alerts;
pub mod command;
pub mod run;
