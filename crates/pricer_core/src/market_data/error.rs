//! Discounting errors.

use crate::types::PricingError;
use num_traits::Float;
use thiserror::Error;

/// Errors raised when a curve is queried outside its domain.
///
/// They surface to pricing callers as
/// [`PricingError::InvalidModelParameters`].
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketDataError;
/// use pricer_core::types::PricingError;
///
/// let err: PricingError = MarketDataError::InvalidMaturity { t: -1.0 }.into();
/// assert!(err.to_string().contains("t = -1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Negative or undefined time.
    #[error("Invalid maturity: t = {t}")]
    InvalidMaturity {
        /// Requested time in years
        t: f64,
    },

    /// Interval ending before it starts.
    #[error("Invalid interval: [{start}, {end}]")]
    InvalidInterval {
        /// Interval start in years
        start: f64,
        /// Interval end in years
        end: f64,
    },
}

impl MarketDataError {
    /// Builds an [`InvalidMaturity`](Self::InvalidMaturity) error from any float.
    pub fn maturity<T: Float>(t: T) -> Self {
        MarketDataError::InvalidMaturity {
            t: t.to_f64().unwrap_or(f64::NAN),
        }
    }
}

impl From<MarketDataError> for PricingError {
    fn from(err: MarketDataError) -> Self {
        PricingError::model(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            MarketDataError::InvalidMaturity { t: -0.5 }.to_string(),
            "Invalid maturity: t = -0.5"
        );
        assert_eq!(
            MarketDataError::InvalidInterval { start: 2.0, end: 1.0 }.to_string(),
            "Invalid interval: [2, 1]"
        );
    }

    #[test]
    fn test_maturity_helper_widens_f32() {
        assert_eq!(
            MarketDataError::maturity(-2.0_f32),
            MarketDataError::InvalidMaturity { t: -2.0 }
        );
    }

    #[test]
    fn test_converts_to_model_parameter_error() {
        let err: PricingError = MarketDataError::InvalidMaturity { t: -2.0 }.into();
        assert!(matches!(err, PricingError::InvalidModelParameters(_)));
    }
}
