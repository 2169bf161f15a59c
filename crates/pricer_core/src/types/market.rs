//! Validated market inputs.
//!
//! [`MarketParameters`] carries the constant-parameter market state every
//! pricer consumes. It is validated once at construction and is `Copy`, so
//! each component receives it by value and none can mutate the caller's copy.

use super::error::PricingError;

/// Immutable market and contract parameters.
///
/// # Invariants
///
/// - `spot > 0`, finite
/// - `strike > 0`, finite, when present (path-only simulations omit it)
/// - `maturity > 0`, finite (years)
/// - `rate` finite (continuously compounded, annualised)
/// - `volatility >= 0`, finite (annualised; 0 degenerates to deterministic drift)
///
/// # Examples
/// ```
/// use pricer_core::types::MarketParameters;
///
/// let params = MarketParameters::new(100.0, 1.0, 0.05, 0.2).unwrap();
/// assert_eq!(params.strike(), None);
///
/// let params = params.with_strike(95.0).unwrap();
/// assert_eq!(params.strike(), Some(95.0));
///
/// // Non-positive spot is rejected at construction
/// assert!(MarketParameters::new(0.0, 1.0, 0.05, 0.2).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MarketParameters {
    spot: f64,
    strike: Option<f64>,
    maturity: f64,
    rate: f64,
    volatility: f64,
}

impl MarketParameters {
    /// Creates market parameters without a strike.
    ///
    /// # Arguments
    /// * `spot` - Initial value of the underlying (must be positive)
    /// * `maturity` - Horizon in years (must be positive)
    /// * `rate` - Risk-free rate (must be finite)
    /// * `volatility` - Volatility (must be non-negative)
    ///
    /// # Errors
    /// `PricingError::InvalidModelParameters` naming the first offending field.
    pub fn new(spot: f64, maturity: f64, rate: f64, volatility: f64) -> Result<Self, PricingError> {
        if !(spot.is_finite() && spot > 0.0) {
            return Err(PricingError::model(format!(
                "spot must be positive and finite, got {}",
                spot
            )));
        }
        if !(maturity.is_finite() && maturity > 0.0) {
            return Err(PricingError::model(format!(
                "maturity must be positive and finite, got {}",
                maturity
            )));
        }
        if !rate.is_finite() {
            return Err(PricingError::model(format!(
                "rate must be finite, got {}",
                rate
            )));
        }
        if !(volatility.is_finite() && volatility >= 0.0) {
            return Err(PricingError::model(format!(
                "volatility must be non-negative and finite, got {}",
                volatility
            )));
        }

        Ok(Self {
            spot,
            strike: None,
            maturity,
            rate,
            volatility,
        })
    }

    /// Creates market parameters including a strike.
    ///
    /// # Errors
    /// `PricingError::InvalidModelParameters` if any field is invalid.
    pub fn with_contract(
        spot: f64,
        strike: f64,
        maturity: f64,
        rate: f64,
        volatility: f64,
    ) -> Result<Self, PricingError> {
        Self::new(spot, maturity, rate, volatility)?.with_strike(strike)
    }

    /// Returns a copy carrying the given strike.
    ///
    /// # Errors
    /// `PricingError::InvalidModelParameters` if `strike` is not positive and finite.
    pub fn with_strike(self, strike: f64) -> Result<Self, PricingError> {
        if !(strike.is_finite() && strike > 0.0) {
            return Err(PricingError::model(format!(
                "strike must be positive and finite, got {}",
                strike
            )));
        }
        Ok(Self {
            strike: Some(strike),
            ..self
        })
    }

    /// Returns a copy with a different volatility.
    ///
    /// # Errors
    /// `PricingError::InvalidModelParameters` if `volatility` is negative or not finite.
    pub fn with_volatility(self, volatility: f64) -> Result<Self, PricingError> {
        let mut bumped = Self::new(self.spot, self.maturity, self.rate, volatility)?;
        bumped.strike = self.strike;
        Ok(bumped)
    }

    /// Returns the initial value of the underlying.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the strike, if one was supplied.
    #[inline]
    pub fn strike(&self) -> Option<f64> {
        self.strike
    }

    /// Returns the strike or an error naming the operation that needed it.
    ///
    /// # Errors
    /// `PricingError::InvalidModelParameters` if no strike was supplied.
    pub fn require_strike(&self, context: &str) -> Result<f64, PricingError> {
        self.strike
            .ok_or_else(|| PricingError::model(format!("{} requires a strike", context)))
    }

    /// Returns the horizon in years.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }
}
