//! Configuration loading traits and types.
//!
//! Two things live here: the TOML loader shared by every binary in the
//! workspace, and the runtime settings the router queries on each signal
//! (reporting mask, log/display switches, decoration strings).
//!
//! # Usage
//!
//! ```rust,no_run
//! use err2exc_common::config::{ConfigLoader, Err2ExcConfig, ConfigError};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = Err2ExcConfig::load(Path::new("err2exc.toml"))?;
//!     config.validate()?;
//!     println!("Service: {}", config.shared.service_name);
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::format::DEFAULT_RUNTIME_LABEL;
use crate::kind::ErrorKind;

/// Error type for configuration loading operations.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Log level for application logging.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, detailed tracing information.
    Trace,
    /// Debug information useful during development.
    Debug,
    /// General information about application operation.
    #[default]
    Info,
    /// Warning messages for potentially problematic situations.
    Warn,
    /// Error messages for serious problems.
    Error,
}

impl LogLevel {
    /// Matching `tracing` level.
    pub fn as_tracing(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

/// Common configuration fields shared across binaries.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// log_level = "debug"
/// service_name = "err2exc-worker-01"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SharedConfig {
    /// Logging verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Application instance identifier.
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

fn default_service_name() -> String {
    "err2exc".to_string()
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            service_name: default_service_name(),
        }
    }
}

impl SharedConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if `service_name` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "service_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Where reportable signals are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DisplayErrors {
    /// No display output.
    #[default]
    Off,
    /// Standard output.
    Stdout,
    /// Standard error.
    Stderr,
}

impl DisplayErrors {
    /// True unless display is off.
    #[inline]
    pub fn is_enabled(self) -> bool {
        self != Self::Off
    }
}

/// Runtime settings queried by the router for every signal.
///
/// These mirror the host runtime's own switches; the router never changes
/// them.
pub trait ConfigProvider {
    /// Kinds eligible for any recording at all.
    fn reporting_mask(&self) -> ErrorKind;

    /// Whether the log channel is enabled.
    fn log_errors(&self) -> bool;

    /// Display destination, or off.
    fn display_errors(&self) -> DisplayErrors;

    /// Text written before each displayed line.
    fn prepend_string(&self) -> &str;

    /// Text written after each displayed line.
    fn append_string(&self) -> &str;

    /// Prefix of every formatted line.
    fn runtime_label(&self) -> &str {
        DEFAULT_RUNTIME_LABEL
    }
}

/// `[runtime]` section.
///
/// ```toml
/// [runtime]
/// error_reporting = "ALL"
/// log_errors = true
/// display_errors = "stderr"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Reporting mask.
    pub error_reporting: ErrorKind,
    /// Log channel switch.
    pub log_errors: bool,
    /// Display destination.
    pub display_errors: DisplayErrors,
    /// Display prefix decoration.
    pub error_prepend_string: String,
    /// Display suffix decoration.
    pub error_append_string: String,
    /// Line prefix. Empty drops it.
    pub runtime_label: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            error_reporting: ErrorKind::ALL,
            log_errors: true,
            display_errors: DisplayErrors::Off,
            error_prepend_string: String::new(),
            error_append_string: String::new(),
            runtime_label: DEFAULT_RUNTIME_LABEL.to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if `runtime_label` contains a
    /// line break. Tooling reads one record per line.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.runtime_label.contains(['\n', '\r']) {
            return Err(ConfigError::ValidationError(
                "runtime_label must be a single line".to_string(),
            ));
        }
        Ok(())
    }
}

impl ConfigProvider for RuntimeConfig {
    fn reporting_mask(&self) -> ErrorKind {
        self.error_reporting
    }

    fn log_errors(&self) -> bool {
        self.log_errors
    }

    fn display_errors(&self) -> DisplayErrors {
        self.display_errors
    }

    fn prepend_string(&self) -> &str {
        &self.error_prepend_string
    }

    fn append_string(&self) -> &str {
        &self.error_append_string
    }

    fn runtime_label(&self) -> &str {
        &self.runtime_label
    }
}

/// `[policy]` section: routing masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyConfig {
    /// Kinds converted to an exception.
    pub rethrow: ErrorKind,
    /// Kinds that end the process.
    pub terminate: ErrorKind,
    /// Also log kinds that are rethrown.
    pub log_rethrown: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            rethrow: ErrorKind::DEFAULT_RETHROW,
            terminate: ErrorKind::DEFAULT_TERMINATE,
            log_rethrown: false,
        }
    }
}

/// Complete configuration file.
///
/// Every section is optional and defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Err2ExcConfig {
    /// Common fields.
    pub shared: SharedConfig,
    /// Host runtime switches.
    pub runtime: RuntimeConfig,
    /// Routing masks.
    pub policy: PolicyConfig,
}

impl Err2ExcConfig {
    /// Validate all sections.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        self.runtime.validate()
    }
}

/// Trait for loading configuration from TOML files.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

// Any serde-deserializable struct can use ConfigLoader.
impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}
