//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors raised before simulation or induction begins

use thiserror::Error;

/// Categorised pricing errors.
///
/// Every check that can fail runs synchronously before any path is simulated
/// or any lattice level is rolled back, so a returned error never follows a
/// partial computation.
///
/// # Variants
/// - `InvalidSpecification`: Unrecognised option-type or barrier tag
/// - `InvalidModelParameters`: Market, discretisation or lattice parameters
///   outside their valid domain
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidSpecification("option type 'straddle'".to_string());
/// assert_eq!(format!("{}", err), "Invalid specification: option type 'straddle'");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Unrecognised option-type or barrier-direction tag.
    #[error("Invalid specification: {0}")]
    InvalidSpecification(String),

    /// Parameters outside their valid domain (non-positive spot, strike,
    /// maturity or counts, missing strike, or an arbitrage-inconsistent
    /// lattice probability).
    #[error("Invalid model parameters: {0}")]
    InvalidModelParameters(String),
}

impl PricingError {
    /// Shorthand for an [`InvalidModelParameters`](Self::InvalidModelParameters) error.
    #[inline]
    pub fn model(message: impl Into<String>) -> Self {
        PricingError::InvalidModelParameters(message.into())
    }

    /// Shorthand for an [`InvalidSpecification`](Self::InvalidSpecification) error.
    #[inline]
    pub fn specification(message: impl Into<String>) -> Self {
        PricingError::InvalidSpecification(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_error_display() {
        let err = PricingError::model("spot must be positive, got -1");
        assert_eq!(
            err.to_string(),
            "Invalid model parameters: spot must be positive, got -1"
        );

        let err = PricingError::specification("barrier type 'sideways-and-out'");
        assert!(err.to_string().contains("sideways-and-out"));
    }

    #[test]
    fn test_pricing_error_is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&PricingError::model("x"));
    }

    #[test]
    fn test_pricing_error_equality() {
        assert_eq!(PricingError::model("a"), PricingError::model("a"));
        assert_ne!(PricingError::model("a"), PricingError::specification("a"));
    }
}
