use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::Config;

/// CI file read when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = ".travis.yml";

/// Prefix for environment overrides; nested keys are split on `__`.
pub const ENV_PREFIX: &str = "XCODEBUILD_RUNNER_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("xcode_workspace and xcode_project are mutually exclusive")]
    ConflictingTargets,

    #[error("xcode_sdk is required to choose a build destination")]
    MissingSdk,

    #[error("runner.shell cannot be empty")]
    EmptyShell,

    #[error("runner.build_tool cannot be empty")]
    EmptyBuildTool,

    #[error("runner.actions must name at least one build action")]
    NoActions,

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty, compact")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. The CI file at `path`, when it exists
    /// 3. Environment variables (`XCODEBUILD_RUNNER_*`, highest priority)
    pub fn load(path: impl AsRef<Path>) -> Result<Config> {
        let config = Self::extract(path)?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Merge all sources without validating the result.
    ///
    /// Commands that only need part of the configuration validate that part
    /// themselves.
    pub fn extract(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        Self::figment(path)
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))
    }

    fn figment(path: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.xcode_workspace.is_some() && config.xcode_project.is_some() {
            return Err(ConfigError::ConflictingTargets);
        }

        if config.xcode_sdk.is_none() {
            return Err(ConfigError::MissingSdk);
        }

        Self::validate_runner(config)?;
        Self::validate_logging(config)
    }

    /// Validate only the runner section.
    pub fn validate_runner(config: &Config) -> Result<(), ConfigError> {
        let runner = &config.runner;
        if runner.shell.trim().is_empty() {
            return Err(ConfigError::EmptyShell);
        }
        if runner.build_tool.trim().is_empty() {
            return Err(ConfigError::EmptyBuildTool);
        }
        if runner.actions.is_empty() {
            return Err(ConfigError::NoActions);
        }
        Ok(())
    }

    /// Validate only the logging section.
    ///
    /// Logging is initialized before the rest of the file is validated so
    /// that later failures can still be reported through it.
    pub fn validate_logging(config: &Config) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty", "compact"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        Ok(())
    }
}
