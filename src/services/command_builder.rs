//! Composition of the supervised build command from run configuration.

use regex::Regex;
use std::fmt::Write as _;
use std::sync::LazyLock;

use crate::domain::models::Config;
use crate::infrastructure::config::ConfigError;

/// First `major.minor` version in an SDK identifier.
static SDK_VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\d+").expect("SDK version pattern is valid"));

const DESKTOP_SDK_PREFIX: &str = "macosx";

/// Compose the full shell command for a run.
///
/// When a formatter is configured the build tool is piped through it and the
/// command exits with the build tool's own status (`PIPESTATUS[0]`), since
/// the formatter's status says nothing about the build.
pub fn build_command(config: &Config) -> Result<String, ConfigError> {
    let runner = &config.runner;

    let mut parts = vec![runner.build_tool.clone()];
    let target = target_selector(config)?;
    if !target.is_empty() {
        parts.push(target);
    }
    parts.push(destination_selector(config)?);
    parts.extend(runner.actions.iter().cloned());
    let invocation = parts.join(" ");

    let formatter = runner.formatter.trim();
    if formatter.is_empty() {
        return Ok(invocation);
    }
    Ok(format!("{invocation} | {formatter}; exit ${{PIPESTATUS[0]}}"))
}

/// `-workspace`/`-project` selector followed by the scheme, if any.
pub fn target_selector(config: &Config) -> Result<String, ConfigError> {
    let mut selector = match (&config.xcode_workspace, &config.xcode_project) {
        (Some(_), Some(_)) => return Err(ConfigError::ConflictingTargets),
        (Some(workspace), None) => format!("-workspace {workspace}"),
        (None, Some(project)) => format!("-project {project}"),
        (None, None) => String::new(),
    };

    if let Some(scheme) = &config.xcode_scheme {
        if !selector.is_empty() {
            selector.push(' ');
        }
        let _ = write!(selector, "-scheme {scheme}");
    }
    Ok(selector)
}

/// `-destination` selector derived from the SDK.
pub fn destination_selector(config: &Config) -> Result<String, ConfigError> {
    let sdk = config.xcode_sdk.as_deref().ok_or(ConfigError::MissingSdk)?;
    Ok(format!(
        "-destination '{}'",
        platform_string(sdk, &config.runner.simulator)
    ))
}

fn platform_string(sdk: &str, simulator: &str) -> String {
    if sdk.starts_with(DESKTOP_SDK_PREFIX) {
        return "platform=OS X".to_string();
    }

    let mut platform = format!("platform=iOS Simulator,name={simulator}");
    if let Some(version) = SDK_VERSION_PATTERN.find(sdk) {
        platform.push_str(",OS=");
        platform.push_str(version.as_str());
    }
    platform
}
