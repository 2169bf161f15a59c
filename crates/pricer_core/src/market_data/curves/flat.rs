//! Constant-rate discounting.

use super::YieldCurve;
use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Discount curve with a single continuously compounded rate,
/// `D(t) = exp(-r t)`.
///
/// Both pricers discount through this curve when handed only
/// [`MarketParameters`](crate::types::MarketParameters).
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{FlatCurve, YieldCurve};
///
/// let curve = FlatCurve::new(0.05_f64);
/// assert!((curve.discount_factor(1.0).unwrap() - 0.951229).abs() < 1e-5);
/// assert_eq!(curve.zero_rate(5.0).unwrap(), 0.05);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlatCurve<T: Float> {
    rate: T,
}

impl<T: Float> FlatCurve<T> {
    /// Creates the curve. Negative rates are allowed.
    #[inline]
    pub fn new(rate: T) -> Self {
        Self { rate }
    }

    /// Returns the continuously compounded rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }
}

impl<T: Float> YieldCurve<T> for FlatCurve<T> {
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() || t.is_nan() {
            return Err(MarketDataError::maturity(t));
        }
        Ok((-self.rate * t).exp())
    }

    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if !(t > T::zero()) {
            return Err(MarketDataError::maturity(t));
        }
        Ok(self.rate)
    }

    fn forward_discount_factor(&self, start: T, end: T) -> Result<T, MarketDataError> {
        if start < T::zero() || start.is_nan() {
            return Err(MarketDataError::maturity(start));
        }
        if !(end >= start) {
            return Err(MarketDataError::InvalidInterval {
                start: start.to_f64().unwrap_or(f64::NAN),
                end: end.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok((-self.rate * (end - start)).exp())
    }
}
