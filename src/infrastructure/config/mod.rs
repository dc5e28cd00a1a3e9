//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - YAML file loading (the project's CI file)
//! - Environment variable overrides
//! - Configuration validation

pub mod loader;

pub use loader::{ConfigError, ConfigLoader, DEFAULT_CONFIG_PATH, ENV_PREFIX};
