//! Black-Scholes pricing model for European options.
//!
//! This module provides the Black-Scholes model for pricing European
//! call and put options with analytical Greeks calculations.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T

use pricer_core::types::{MarketParameters, PricingError};

use super::distributions::{norm_cdf, norm_pdf};
use crate::instruments::OptionType;

/// Expiries at or below this are treated as already expired.
const EXPIRY_EPSILON: f64 = 1e-10;

/// Analytical sensitivities of a European option.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks {
    /// ∂V/∂S
    pub delta: f64,
    /// ∂²V/∂S²
    pub gamma: f64,
    /// ∂V/∂σ
    pub vega: f64,
    /// ∂V/∂t (calendar time; usually negative)
    pub theta: f64,
    /// ∂V/∂r
    pub rho: f64,
}

/// Black-Scholes model for European option pricing.
///
/// Provides closed-form pricing and Greeks calculations for European
/// options under lognormal dynamics.
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
/// let call_price = bs.price_call(100.0, 1.0);
/// let put_price = bs.price_put(100.0, 1.0);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call_price - put_price - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes {
    spot: f64,
    rate: f64,
    volatility: f64,
}

impl BlackScholes {
    /// Creates a new Black-Scholes model.
    ///
    /// # Arguments
    /// * `spot` - Current spot price (must be positive)
    /// * `rate` - Risk-free interest rate (annualised)
    /// * `volatility` - Volatility (must be positive)
    ///
    /// # Errors
    /// `PricingError::InvalidModelParameters` if spot or volatility is not
    /// positive and finite, or the rate is not finite.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// assert!(BlackScholes::new(-100.0, 0.05, 0.2).is_err());
    /// assert!(BlackScholes::new(100.0, 0.05, 0.0).is_err());
    /// ```
    pub fn new(spot: f64, rate: f64, volatility: f64) -> Result<Self, PricingError> {
        if !(spot.is_finite() && spot > 0.0) {
            return Err(PricingError::model(format!(
                "spot must be positive and finite, got {}",
                spot
            )));
        }
        if !rate.is_finite() {
            return Err(PricingError::model(format!(
                "rate must be finite, got {}",
                rate
            )));
        }
        if !(volatility.is_finite() && volatility > 0.0) {
            return Err(PricingError::model(format!(
                "closed-form volatility must be positive and finite, got {}",
                volatility
            )));
        }

        Ok(Self {
            spot,
            rate,
            volatility,
        })
    }

    /// Creates a model from validated market parameters.
    ///
    /// # Errors
    /// `PricingError::InvalidModelParameters` if the volatility is zero.
    pub fn from_market(params: &MarketParameters) -> Result<Self, PricingError> {
        Self::new(params.spot(), params.rate(), params.volatility())
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
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

    /// Computes the d1 term of the Black-Scholes formula.
    ///
    /// Returns ±100 (or 0 at the money) once the option has expired.
    #[inline]
    pub fn d1(&self, strike: f64, expiry: f64) -> f64 {
        if expiry <= EXPIRY_EPSILON {
            return if self.spot > strike {
                100.0
            } else if self.spot < strike {
                -100.0
            } else {
                0.0
            };
        }

        let vol_sqrt_t = self.volatility * expiry.sqrt();
        let log_moneyness = (self.spot / strike).ln();
        let drift = (self.rate + 0.5 * self.volatility * self.volatility) * expiry;

        (log_moneyness + drift) / vol_sqrt_t
    }

    /// Computes the d2 term of the Black-Scholes formula.
    #[inline]
    pub fn d2(&self, strike: f64, expiry: f64) -> f64 {
        if expiry <= EXPIRY_EPSILON {
            return self.d1(strike, expiry);
        }
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// Prices a European option of either type.
    #[inline]
    pub fn price(&self, option_type: OptionType, strike: f64, expiry: f64) -> f64 {
        match option_type {
            OptionType::Call => self.price_call(strike, expiry),
            OptionType::Put => self.price_put(strike, expiry),
        }
    }

    /// Computes European call option price.
    ///
    /// C = S·N(d₁) - K·e^(-rT)·N(d₂)
    #[inline]
    pub fn price_call(&self, strike: f64, expiry: f64) -> f64 {
        if expiry <= EXPIRY_EPSILON {
            return OptionType::Call.intrinsic(self.spot, strike);
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let discount = (-self.rate * expiry).exp();

        self.spot * norm_cdf(d1) - strike * discount * norm_cdf(d2)
    }

    /// Computes European put option price.
    ///
    /// P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
    #[inline]
    pub fn price_put(&self, strike: f64, expiry: f64) -> f64 {
        if expiry <= EXPIRY_EPSILON {
            return OptionType::Put.intrinsic(self.spot, strike);
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let discount = (-self.rate * expiry).exp();

        strike * discount * norm_cdf(-d2) - self.spot * norm_cdf(-d1)
    }

    /// Computes Delta (∂V/∂S).
    ///
    /// - Call Delta = N(d₁)
    /// - Put Delta = N(d₁) - 1
    #[inline]
    pub fn delta(&self, option_type: OptionType, strike: f64, expiry: f64) -> f64 {
        if expiry <= EXPIRY_EPSILON {
            return match option_type {
                OptionType::Call if self.spot > strike => 1.0,
                OptionType::Put if self.spot < strike => -1.0,
                _ => 0.0,
            };
        }

        let n_d1 = norm_cdf(self.d1(strike, expiry));
        match option_type {
            OptionType::Call => n_d1,
            OptionType::Put => n_d1 - 1.0,
        }
    }

    /// Computes Gamma (∂²V/∂S²), identical for calls and puts.
    ///
    /// Gamma = φ(d₁) / (S·σ·√T)
    #[inline]
    pub fn gamma(&self, strike: f64, expiry: f64) -> f64 {
        if expiry <= EXPIRY_EPSILON {
            return 0.0;
        }
        let d1 = self.d1(strike, expiry);
        norm_pdf(d1) / (self.spot * self.volatility * expiry.sqrt())
    }

    /// Computes Vega (∂V/∂σ), identical for calls and puts.
    ///
    /// Vega = S·√T·φ(d₁)
    #[inline]
    pub fn vega(&self, strike: f64, expiry: f64) -> f64 {
        if expiry <= EXPIRY_EPSILON {
            return 0.0;
        }
        let d1 = self.d1(strike, expiry);
        self.spot * expiry.sqrt() * norm_pdf(d1)
    }

    /// Computes Theta (∂V/∂t).
    ///
    /// - Call Theta = -(S·σ·φ(d₁))/(2√T) - r·K·e^(-rT)·N(d₂)
    /// - Put Theta = -(S·σ·φ(d₁))/(2√T) + r·K·e^(-rT)·N(-d₂)
    #[inline]
    pub fn theta(&self, option_type: OptionType, strike: f64, expiry: f64) -> f64 {
        if expiry <= EXPIRY_EPSILON {
            return 0.0;
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let discount = (-self.rate * expiry).exp();
        let decay = -(self.spot * self.volatility * norm_pdf(d1)) / (2.0 * expiry.sqrt());

        match option_type {
            OptionType::Call => decay - self.rate * strike * discount * norm_cdf(d2),
            OptionType::Put => decay + self.rate * strike * discount * norm_cdf(-d2),
        }
    }

    /// Computes Rho (∂V/∂r).
    ///
    /// - Call Rho = K·T·e^(-rT)·N(d₂)
    /// - Put Rho = -K·T·e^(-rT)·N(-d₂)
    #[inline]
    pub fn rho(&self, option_type: OptionType, strike: f64, expiry: f64) -> f64 {
        if expiry <= EXPIRY_EPSILON {
            return 0.0;
        }

        let d2 = self.d2(strike, expiry);
        let discount = (-self.rate * expiry).exp();

        match option_type {
            OptionType::Call => strike * expiry * discount * norm_cdf(d2),
            OptionType::Put => -strike * expiry * discount * norm_cdf(-d2),
        }
    }

    /// Computes all five sensitivities at once.
    pub fn greeks(&self, option_type: OptionType, strike: f64, expiry: f64) -> Greeks {
        Greeks {
            delta: self.delta(option_type, strike, expiry),
            gamma: self.gamma(strike, expiry),
            vega: self.vega(strike, expiry),
            theta: self.theta(option_type, strike, expiry),
            rho: self.rho(option_type, strike, expiry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn atm() -> BlackScholes {
        BlackScholes::new(100.0, 0.05, 0.2).unwrap()
    }

    // ==========================================================
    // Constructor Tests
    // ==========================================================

    #[test]
    fn test_new_valid_parameters() {
        let bs = atm();
        assert_eq!(bs.spot(), 100.0);
        assert_eq!(bs.rate(), 0.05);
        assert_eq!(bs.volatility(), 0.2);
    }

    #[test]
    fn test_new_invalid_inputs() {
        for (spot, vol) in [(-100.0, 0.2), (0.0, 0.2), (100.0, -0.2), (100.0, 0.0)] {
            assert!(matches!(
                BlackScholes::new(spot, 0.05, vol),
                Err(PricingError::InvalidModelParameters(_))
            ));
        }
    }

    #[test]
    fn test_new_negative_rate_allowed() {
        assert!(BlackScholes::new(100.0, -0.02, 0.2).is_ok());
    }

    #[test]
    fn test_from_market() {
        let params = MarketParameters::new(100.0, 1.0, 0.05, 0.2).unwrap();
        assert_eq!(BlackScholes::from_market(&params).unwrap(), atm());

        let flat = params.with_volatility(0.0).unwrap();
        assert!(BlackScholes::from_market(&flat).is_err());
    }

    // ==========================================================
    // Price Tests
    // ==========================================================

    #[test]
    fn test_d1_d2_relationship() {
        let bs = atm();
        assert_relative_eq!(bs.d1(100.0, 1.0) - bs.d2(100.0, 1.0), 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_call_price_reference_value() {
        // S=100, K=100, r=0.05, σ=0.2, T=1 → 10.4506
        assert_relative_eq!(atm().price_call(100.0, 1.0), 10.4506, epsilon = 0.001);
    }

    #[test]
    fn test_put_price_reference_value() {
        assert_relative_eq!(atm().price_put(100.0, 1.0), 5.5735, epsilon = 0.001);
    }

    #[test]
    fn test_price_dispatches_on_option_type() {
        let bs = atm();
        assert_eq!(bs.price(OptionType::Call, 95.0, 0.5), bs.price_call(95.0, 0.5));
        assert_eq!(bs.price(OptionType::Put, 95.0, 0.5), bs.price_put(95.0, 0.5));
    }

    #[test]
    fn test_expired_option_is_intrinsic() {
        let bs = BlackScholes::new(110.0, 0.05, 0.2).unwrap();
        assert_relative_eq!(bs.price_call(100.0, 0.0), 10.0, epsilon = 1e-10);
        assert_relative_eq!(bs.price_put(100.0, 0.0), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_deep_otm_call() {
        let bs = BlackScholes::new(50.0, 0.05, 0.2).unwrap();
        assert!(bs.price_call(100.0, 1.0) < 0.01);
    }

    // ==========================================================
    // Put-Call Parity Tests
    // ==========================================================

    #[test]
    fn test_put_call_parity_various_strikes() {
        let bs = atm();
        for strike in [80.0, 90.0, 100.0, 110.0, 120.0] {
            let call = bs.price_call(strike, 1.0);
            let put = bs.price_put(strike, 1.0);
            let forward = 100.0 - strike * (-0.05_f64).exp();
            assert_relative_eq!(call - put, forward, epsilon = 1e-10);
        }
    }

    // ==========================================================
    // Greeks Tests
    // ==========================================================

    #[test]
    fn test_delta_bounds_and_relationship() {
        let bs = atm();
        let call = bs.delta(OptionType::Call, 100.0, 1.0);
        let put = bs.delta(OptionType::Put, 100.0, 1.0);
        assert!((0.0..=1.0).contains(&call));
        assert!((-1.0..=0.0).contains(&put));
        assert_relative_eq!(call - put, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_greeks_vs_finite_difference() {
        let bs = atm();
        let (k, t) = (105.0, 0.75);
        let greeks = bs.greeks(OptionType::Call, k, t);

        let h = 0.01;
        let up = BlackScholes::new(100.0 + h, 0.05, 0.2).unwrap();
        let down = BlackScholes::new(100.0 - h, 0.05, 0.2).unwrap();
        let fd_delta = (up.price_call(k, t) - down.price_call(k, t)) / (2.0 * h);
        let fd_gamma =
            (up.price_call(k, t) - 2.0 * bs.price_call(k, t) + down.price_call(k, t)) / (h * h);
        assert_relative_eq!(greeks.delta, fd_delta, epsilon = 1e-4);
        assert_relative_eq!(greeks.gamma, fd_gamma, epsilon = 1e-3);

        let hv = 1e-4;
        let vol_up = BlackScholes::new(100.0, 0.05, 0.2 + hv).unwrap();
        let vol_down = BlackScholes::new(100.0, 0.05, 0.2 - hv).unwrap();
        let fd_vega = (vol_up.price_call(k, t) - vol_down.price_call(k, t)) / (2.0 * hv);
        assert_relative_eq!(greeks.vega, fd_vega, epsilon = 1e-2);

        let rate_up = BlackScholes::new(100.0, 0.05 + hv, 0.2).unwrap();
        let rate_down = BlackScholes::new(100.0, 0.05 - hv, 0.2).unwrap();
        let fd_rho = (rate_up.price_call(k, t) - rate_down.price_call(k, t)) / (2.0 * hv);
        assert_relative_eq!(greeks.rho, fd_rho, epsilon = 1e-2);

        // Theta is the derivative in calendar time, i.e. minus d/dT
        let fd_theta = -(bs.price_call(k, t + hv) - bs.price_call(k, t - hv)) / (2.0 * hv);
        assert_relative_eq!(greeks.theta, fd_theta, epsilon = 1e-2);
    }

    #[test]
    fn test_expired_greeks() {
        let greeks = atm().greeks(OptionType::Put, 110.0, 0.0);
        assert_eq!(greeks.delta, -1.0);
        assert_eq!(greeks.gamma, 0.0);
        assert_eq!(greeks.vega, 0.0);
        assert_eq!(greeks.theta, 0.0);
        assert_eq!(greeks.rho, 0.0);
    }
}
