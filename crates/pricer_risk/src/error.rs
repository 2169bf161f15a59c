//! Risk error types.
//!
//! Structured errors for metric evaluation, ledger updates and backtests,
//! derived with `thiserror`.

use thiserror::Error;

/// Errors raised by the risk collaborators.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RiskError {
    /// A statistic was requested over an empty series.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// The statistic's denominator is zero (flat series, no downside).
    #[error("Zero denominator: {0}")]
    ZeroDenominator(String),

    /// Paired series differ in length.
    #[error("Length mismatch: {left} vs {right}")]
    LengthMismatch {
        /// Length of the first series
        left: usize,
        /// Length of the second series
        right: usize,
    },

    /// A parameter lies outside its valid domain.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A sale exceeds the quantity held.
    #[error("Insufficient quantity of {asset}: held {held}, requested {requested}")]
    InsufficientQuantity {
        /// Asset identifier
        asset: String,
        /// Quantity currently held
        held: f64,
        /// Quantity the caller tried to remove
        requested: f64,
    },
}
