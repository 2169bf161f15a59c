//! Discount function abstraction.

use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Discount function consumed by the pricers.
///
/// Implementors supply [`discount_factor`](YieldCurve::discount_factor);
/// the remaining methods are derived from it.
///
/// # Invariants
///
/// - `discount_factor(0) == 1`
/// - `discount_factor(t) > 0` for every admissible `t`
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{FlatCurve, YieldCurve};
///
/// let curve = FlatCurve::new(0.05_f64);
///
/// // Payoff of 10 paid in two years
/// let pv = curve.discount(10.0, 2.0).unwrap();
/// assert!((pv - 10.0 * (-0.1_f64).exp()).abs() < 1e-12);
///
/// // One year of discounting starting in one year
/// let fwd = curve.forward_discount_factor(1.0, 2.0).unwrap();
/// assert!((fwd - (-0.05_f64).exp()).abs() < 1e-12);
/// ```
pub trait YieldCurve<T: Float> {
    /// Discount factor from time 0 to `t` (years).
    ///
    /// # Errors
    /// `MarketDataError::InvalidMaturity` if `t` is negative.
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError>;

    /// Continuously compounded zero rate to `t`, `-ln(D(t)) / t`.
    ///
    /// # Errors
    /// `MarketDataError::InvalidMaturity` unless `t > 0`.
    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if !(t > T::zero()) {
            return Err(MarketDataError::maturity(t));
        }
        Ok(-self.discount_factor(t)?.ln() / t)
    }

    /// Discount factor between two future instants, `D(end) / D(start)`.
    ///
    /// # Errors
    /// `MarketDataError::InvalidInterval` if `end < start`, or
    /// `InvalidMaturity` if `start` is negative.
    fn forward_discount_factor(&self, start: T, end: T) -> Result<T, MarketDataError> {
        if end < start {
            return Err(MarketDataError::InvalidInterval {
                start: start.to_f64().unwrap_or(f64::NAN),
                end: end.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(self.discount_factor(end)? / self.discount_factor(start)?)
    }

    /// Present value of `amount` paid at `t`.
    ///
    /// # Errors
    /// Same as [`discount_factor`](YieldCurve::discount_factor).
    fn discount(&self, amount: T, t: T) -> Result<T, MarketDataError> {
        Ok(amount * self.discount_factor(t)?)
    }
}
