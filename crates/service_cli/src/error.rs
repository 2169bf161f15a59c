//! CLI error types.

use pricer_core::types::PricingError;
use pricer_risk::RiskError;
use thiserror::Error;

/// Errors surfaced by `pathpricer` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Pricing library rejected the inputs.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Risk statistics could not be computed.
    #[error(transparent)]
    Risk(#[from] RiskError),

    /// Configuration file or environment could not be read.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// JSON output failed.
    #[error("Serialisation error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Flags are individually valid but inconsistent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
