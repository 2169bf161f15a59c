//! CLI configuration management.
//!
//! Settings are layered, lowest priority first:
//! 1. Built-in defaults
//! 2. Optional TOML file (`pathpricer.toml` unless `--config` says otherwise)
//! 3. `PATHPRICER_*` environment variables
//! 4. Command-line flags

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};

/// Prefix for environment overrides, e.g. `PATHPRICER_N_PATHS=50000`.
pub const ENV_PREFIX: &str = "PATHPRICER";

/// Log levels accepted by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(CliError::InvalidArgument(format!(
                "log level '{}' must be one of: trace, debug, info, warn, error",
                s
            ))),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Result rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Boxed two-column table
    #[default]
    Table,
    /// Pretty-printed JSON object
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Resolved CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Tracing filter used when `RUST_LOG` is unset
    pub log_level: LogLevel,
    /// Default RNG seed; entropy-seeded when absent
    pub seed: Option<u64>,
    /// Default Monte Carlo path count
    pub n_paths: usize,
    /// Default time steps per path
    pub n_steps: usize,
    /// Default output rendering
    pub output_format: OutputFormat,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            seed: None,
            n_paths: 100_000,
            n_steps: 252,
            output_format: OutputFormat::default(),
        }
    }
}

impl CliConfig {
    /// Loads defaults, then the file at `path` if it exists, then the
    /// environment.
    ///
    /// # Errors
    /// `CliError::Config` if the file is malformed or a value has the wrong type.
    pub fn load(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?;
        let loaded: CliConfig = settings.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Applies flag overrides (flags win over file and environment).
    pub fn merge_with_cli(&mut self, log_level: Option<LogLevel>, format: Option<OutputFormat>) {
        if let Some(level) = log_level {
            self.log_level = level;
        }
        if let Some(format) = format {
            self.output_format = format;
        }
    }

    /// Validate the configuration.
    ///
    /// Only zero counts are caught here; upper bounds are enforced by the
    /// pricing library when the simulation is configured.
    pub fn validate(&self) -> Result<()> {
        if self.n_paths == 0 {
            return Err(CliError::InvalidArgument("n_paths must be positive".to_string()));
        }
        if self.n_steps == 0 {
            return Err(CliError::InvalidArgument("n_steps must be positive".to_string()));
        }
        Ok(())
    }
}
