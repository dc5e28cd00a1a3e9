use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Run configuration, read once from the project's CI file.
///
/// Unknown keys are ignored so the whole CI file can be handed to the loader.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Workspace passed as `-workspace` (exclusive with `xcode_project`)
    #[serde(default)]
    pub xcode_workspace: Option<String>,

    /// Project passed as `-project` (exclusive with `xcode_workspace`)
    #[serde(default)]
    pub xcode_project: Option<String>,

    /// Scheme passed as `-scheme`
    #[serde(default)]
    pub xcode_scheme: Option<String>,

    /// SDK identifier, e.g. `macosx10.9` or `iphonesimulator7.0`
    #[serde(default)]
    pub xcode_sdk: Option<String>,

    /// Static analyzer gating
    #[serde(default)]
    pub clang_analyzer: ClangAnalyzerConfig,

    /// How the build command is assembled and launched
    #[serde(default)]
    pub runner: RunnerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Analyzer gating policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ClangAnalyzerConfig {
    /// Fail the run when the alert count exceeds `threshold`
    #[serde(default)]
    pub fail_build: bool,

    /// Number of alerts tolerated before failing
    #[serde(default)]
    pub threshold: usize,
}

/// Command composition and launch settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RunnerConfig {
    /// Shell used to run the composed command; must understand `PIPESTATUS`
    #[serde(default = "default_shell")]
    pub shell: String,

    /// Build tool binary
    #[serde(default = "default_build_tool")]
    pub build_tool: String,

    /// Output formatter the build tool is piped through (empty disables the pipe)
    #[serde(default = "default_formatter")]
    pub formatter: String,

    /// Build actions, in order
    #[serde(default = "default_actions")]
    pub actions: Vec<String>,

    /// Simulator device name for non-desktop SDKs
    #[serde(default = "default_simulator")]
    pub simulator: String,
}

fn default_shell() -> String {
    "bash".to_string()
}

fn default_build_tool() -> String {
    "xcodebuild".to_string()
}

fn default_formatter() -> String {
    "xcpretty -c".to_string()
}

fn default_actions() -> Vec<String> {
    vec!["clean".to_string(), "analyze".to_string(), "test".to_string()]
}

fn default_simulator() -> String {
    "iPad".to_string()
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            shell: default_shell(),
            build_tool: default_build_tool(),
            formatter: default_formatter(),
            actions: default_actions(),
            simulator: default_simulator(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: pretty, compact or json
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling JSON log files (stderr only when unset)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// File rotation: daily, hourly or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}
