//! Cox-Ross-Rubinstein binomial lattice.
//!
//! ```text
//! dt = T / N,  u = exp(σ √dt),  d = 1 / u
//! p  = (exp(r dt) - d) / (u - d)
//! ```
//!
//! Terminal layer `S0 u^k d^(N-k)`, `k = 0..=N`, valued at intrinsic. Each of
//! the `N` levels above is valued from the one below:
//!
//! ```text
//! continuation = e^(-r dt) (p V[k+1] + (1 - p) V[k])
//! American:      V = max(continuation, intrinsic(S))
//! European:      V = continuation
//! ```
//!
//! The lattice is arbitrage-free only when `d < exp(r dt) < u`, i.e.
//! `0 < p < 1`. Parameters violating this are rejected, never clamped.
//!
//! Node prices are computed directly as `S0 exp((2k - level) σ √dt)` rather
//! than by repeated multiplication. The top node `S0 exp(N σ √dt)` must be
//! finite, so lattices whose widest log move exceeds `ln(f64::MAX / S0)`
//! are rejected.

use pricer_core::market_data::curves::{FlatCurve, YieldCurve};
use pricer_core::types::{MarketParameters, PricingError};
use pricer_models::instruments::{ExerciseStyle, OptionType};
use tracing::debug;

/// Maximum number of lattice levels.
pub const MAX_LATTICE_STEPS: usize = 100_000;

/// Binomial lattice over one set of market parameters.
///
/// Construction validates everything; pricing cannot fail.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::MarketParameters;
/// use pricer_models::instruments::{ExerciseStyle, OptionType};
/// use pricer_pricing::lattice::BinomialLattice;
///
/// let params = MarketParameters::with_contract(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
/// let lattice = BinomialLattice::new(&params, 500).unwrap();
///
/// let american = lattice.price(OptionType::Put, ExerciseStyle::American);
/// let european = lattice.price(OptionType::Put, ExerciseStyle::European);
/// assert!(american > european);
/// assert!((american - 6.09).abs() < 0.02);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BinomialLattice {
    spot: f64,
    strike: f64,
    n_steps: usize,
    dt: f64,
    log_step: f64,
    up: f64,
    down: f64,
    probability: f64,
    discount: f64,
}

impl BinomialLattice {
    /// Builds the lattice parameters.
    ///
    /// # Errors
    ///
    /// `PricingError::InvalidModelParameters` if:
    /// - `params` carries no strike
    /// - `n_steps` is 0 or greater than [`MAX_LATTICE_STEPS`]
    /// - `p` falls outside `(0, 1)`, which includes zero volatility and
    ///   rates so large that `exp(r dt) >= u`
    /// - the top terminal node `S0 exp(σ √(T N))` would overflow
    pub fn new(params: &MarketParameters, n_steps: usize) -> Result<Self, PricingError> {
        let strike = params.require_strike("binomial lattice")?;
        if n_steps == 0 || n_steps > MAX_LATTICE_STEPS {
            return Err(PricingError::model(format!(
                "lattice step count {} must be in range [1, {}]",
                n_steps, MAX_LATTICE_STEPS
            )));
        }

        let dt = params.maturity() / n_steps as f64;
        let discount = FlatCurve::new(params.rate()).discount_factor(dt)?;
        let log_step = params.volatility() * dt.sqrt();
        let widest_move = log_step * n_steps as f64;
        let headroom = (f64::MAX / params.spot()).ln();
        if !(widest_move < headroom) {
            return Err(PricingError::model(format!(
                "lattice log range {} exceeds {} for spot {}: top node would overflow",
                widest_move,
                headroom,
                params.spot()
            )));
        }

        let up = log_step.exp();
        let down = 1.0 / up;
        let growth = discount.recip();
        let probability = (growth - down) / (up - down);

        if !(probability > 0.0 && probability < 1.0) {
            return Err(PricingError::model(format!(
                "risk-neutral probability {} outside (0, 1): need d < exp(r dt) < u, got d = {}, exp(r dt) = {}, u = {}",
                probability, down, growth, up
            )));
        }

        debug!(n_steps, dt, up, down, probability, "built binomial lattice");

        Ok(Self {
            spot: params.spot(),
            strike,
            n_steps,
            dt,
            log_step,
            up,
            down,
            probability,
            discount,
        })
    }

    /// Returns the number of levels.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Returns the level spacing in years.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Returns the up factor `u`.
    #[inline]
    pub fn up(&self) -> f64 {
        self.up
    }

    /// Returns the down factor `d = 1 / u`.
    #[inline]
    pub fn down(&self) -> f64 {
        self.down
    }

    /// Returns the risk-neutral up probability `p`.
    #[inline]
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Prices by backward induction from the terminal layer to the root.
    pub fn price(&self, option_type: OptionType, exercise: ExerciseStyle) -> f64 {
        let n = self.n_steps;
        let early = exercise.allows_early_exercise();

        // Level N: S0 u^k d^(N-k)
        let mut value: Vec<f64> = (0..=n)
            .map(|k| option_type.intrinsic(self.node_price(n, k), self.strike))
            .collect();

        let q = 1.0 - self.probability;
        for level in (0..n).rev() {
            for k in 0..=level {
                let continuation =
                    self.discount * (self.probability * value[k + 1] + q * value[k]);
                value[k] = if early {
                    continuation.max(option_type.intrinsic(self.node_price(level, k), self.strike))
                } else {
                    continuation
                };
            }
        }

        value[0]
    }

    /// Underlying price at node `k` of `level`: `S0 exp((2k - level) σ √dt)`.
    #[inline]
    fn node_price(&self, level: usize, k: usize) -> f64 {
        let ups = 2.0 * k as f64 - level as f64;
        self.spot * (ups * self.log_step).exp()
    }

    /// Returns the American value less the European value on this lattice.
    pub fn early_exercise_premium(&self, option_type: OptionType) -> f64 {
        self.price(option_type, ExerciseStyle::American)
            - self.price(option_type, ExerciseStyle::European)
    }
}

/// Prices an American option on an `n_steps` lattice.
///
/// # Errors
///
/// Any error from [`BinomialLattice::new`].
pub fn price_american(
    params: &MarketParameters,
    option_type: OptionType,
    n_steps: usize,
) -> Result<f64, PricingError> {
    Ok(BinomialLattice::new(params, n_steps)?.price(option_type, ExerciseStyle::American))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_models::analytical::BlackScholes;

    fn params() -> MarketParameters {
        MarketParameters::with_contract(100.0, 100.0, 1.0, 0.05, 0.2).unwrap()
    }

    #[test]
    fn test_lattice_parameters() {
        let lattice = BinomialLattice::new(&params(), 4).unwrap();
        assert_relative_eq!(lattice.dt(), 0.25);
        assert_relative_eq!(lattice.up(), 0.1_f64.exp(), epsilon = 1e-15);
        assert_relative_eq!(lattice.up() * lattice.down(), 1.0, epsilon = 1e-15);
        let expected_p = ((0.05 * 0.25_f64).exp() - lattice.down()) / (lattice.up() - lattice.down());
        assert_relative_eq!(lattice.probability(), expected_p, epsilon = 1e-13);
    }

    #[test]
    fn test_single_step_by_hand() {
        let lattice = BinomialLattice::new(&params(), 1).unwrap();
        let (u, d, p) = (lattice.up(), lattice.down(), lattice.probability());
        let disc = (-0.05_f64).exp();

        let call = disc * (p * (100.0 * u - 100.0) + (1.0 - p) * 0.0);
        assert_relative_eq!(
            lattice.price(OptionType::Call, ExerciseStyle::European),
            call,
            epsilon = 1e-12
        );

        // At the root the put is at the money; continuation beats zero intrinsic
        let put = disc * (1.0 - p) * (100.0 - 100.0 * d);
        assert_relative_eq!(
            lattice.price(OptionType::Put, ExerciseStyle::American),
            put,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_european_converges_to_closed_form() {
        let bs = BlackScholes::from_market(&params()).unwrap();
        let lattice = BinomialLattice::new(&params(), 1_000).unwrap();
        assert_relative_eq!(
            lattice.price(OptionType::Call, ExerciseStyle::European),
            bs.price_call(100.0, 1.0),
            epsilon = 0.01
        );
        assert_relative_eq!(
            lattice.price(OptionType::Put, ExerciseStyle::European),
            bs.price_put(100.0, 1.0),
            epsilon = 0.01
        );
    }

    #[test]
    fn test_american_put_reference() {
        // S=K=100, T=1, r=5%, σ=20%: American put ≈ 6.09
        let price = price_american(&params(), OptionType::Put, 2_000).unwrap();
        assert_relative_eq!(price, 6.09, epsilon = 0.01);
    }

    #[test]
    fn test_early_exercise_premium() {
        let lattice = BinomialLattice::new(&params(), 500).unwrap();
        assert!(lattice.early_exercise_premium(OptionType::Put) > 0.4);
        // Without dividends early exercise of a call is never optimal
        assert_relative_eq!(
            lattice.early_exercise_premium(OptionType::Call),
            0.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_deep_itm_put_exercised_immediately() {
        let params = MarketParameters::with_contract(50.0, 100.0, 1.0, 0.05, 0.2).unwrap();
        let price = price_american(&params, OptionType::Put, 200).unwrap();
        assert_relative_eq!(price, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_volatility_rejected() {
        let flat = params().with_volatility(0.0).unwrap();
        assert!(matches!(
            BinomialLattice::new(&flat, 100),
            Err(PricingError::InvalidModelParameters(_))
        ));
    }

    #[test]
    fn test_probability_above_one_rejected() {
        // exp(r dt) >= u once r dt >= σ √dt
        let params = MarketParameters::with_contract(100.0, 100.0, 1.0, 0.5, 0.1).unwrap();
        match BinomialLattice::new(&params, 4) {
            Err(PricingError::InvalidModelParameters(msg)) => assert!(msg.contains("outside (0, 1)")),
            other => panic!("expected probability error, got {:?}", other),
        }
    }

    #[test]
    fn test_probability_below_zero_rejected() {
        let params = MarketParameters::with_contract(100.0, 100.0, 1.0, -0.5, 0.1).unwrap();
        assert!(BinomialLattice::new(&params, 4).is_err());
    }

    #[test]
    fn test_node_prices_recombine() {
        let lattice = BinomialLattice::new(&params(), 4).unwrap();
        assert_relative_eq!(lattice.node_price(0, 0), 100.0, epsilon = 1e-12);
        assert_relative_eq!(lattice.node_price(2, 1), 100.0, epsilon = 1e-12);
        assert_relative_eq!(
            lattice.node_price(4, 4),
            100.0 * lattice.up().powi(4),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            lattice.node_price(3, 0),
            100.0 * lattice.down().powi(3),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_overflowing_top_node_rejected() {
        // σ √(T N) = 1000 > ln(f64::MAX / 100)
        let params = MarketParameters::with_contract(100.0, 100.0, 10.0, 0.05, 1.0).unwrap();
        assert!(BinomialLattice::new(&params, 1_000).is_ok());
        match BinomialLattice::new(&params, MAX_LATTICE_STEPS) {
            Err(PricingError::InvalidModelParameters(msg)) => assert!(msg.contains("overflow")),
            other => panic!("expected overflow error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_strike_and_bad_steps() {
        let no_strike = MarketParameters::new(100.0, 1.0, 0.05, 0.2).unwrap();
        assert!(BinomialLattice::new(&no_strike, 10).is_err());
        assert!(BinomialLattice::new(&params(), 0).is_err());
        assert!(BinomialLattice::new(&params(), MAX_LATTICE_STEPS + 1).is_err());
    }
}
