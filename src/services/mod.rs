//! Service layer: pure processing of captured build output.
//!
//! - `sanitizer`: strips terminal color codes from raw lines
//! - `alert_extractor`: recovers analyzer alert groups from the log
//! - `verdict_resolver`: turns exit status and log into a verdict
//! - `command_builder`: composes the supervised command from configuration

pub mod alert_extractor;
pub mod command_builder;
pub mod sanitizer;
pub mod verdict_resolver;

pub use alert_extractor::extract_alerts;
pub use command_builder::build_command;
pub use sanitizer::sanitize;
pub use verdict_resolver::VerdictResolver;
