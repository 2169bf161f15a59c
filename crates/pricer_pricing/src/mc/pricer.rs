//! Monte Carlo pricing engine.
//!
//! Simulate once, evaluate once, discount, then average:
//!
//! ```text
//! estimate  = D(T) · mean(payoff)
//! std_error = D(T) · stdev(payoff) / sqrt(n)     (n - 1 denominator)
//! ```

use pricer_core::market_data::curves::{FlatCurve, YieldCurve};
use pricer_core::types::{MarketParameters, PricingError};
use pricer_models::instruments::PayoffSpec;
use pricer_models::models::StochasticProcess;
use tracing::debug;

use super::config::SimulationConfig;
use super::paths::{simulate, simulate_deterministic, PathEnsemble};
use crate::path_dependent::{evaluate, ResolvedPayoff};
use crate::rng::NormalSource;

/// Result of a Monte Carlo pricing run.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::PricingResult;
///
/// let result = PricingResult {
///     estimate: 10.5,
///     std_error: 0.05,
///     n_paths: 10_000,
/// };
///
/// assert!((result.confidence_95() - 0.098).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PricingResult {
    /// Discounted sample mean of the payoff.
    pub estimate: f64,
    /// Standard error of the estimate. `NaN` when only one path was priced;
    /// `0` when the paths were deterministic.
    pub std_error: f64,
    /// Number of paths the estimate averages over.
    pub n_paths: usize,
}

impl PricingResult {
    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }

    /// Returns the 99% confidence interval half-width.
    #[inline]
    pub fn confidence_99(&self) -> f64 {
        2.576 * self.std_error
    }

    /// Builds a result from discounted per-path values.
    fn from_samples(samples: &[f64]) -> Self {
        let n_paths = samples.len();
        let mean = samples.iter().sum::<f64>() / n_paths as f64;

        let std_error = if n_paths < 2 {
            f64::NAN
        } else {
            let variance = samples.iter().map(|&p| (p - mean).powi(2)).sum::<f64>()
                / (n_paths - 1) as f64;
            variance.sqrt() / (n_paths as f64).sqrt()
        };

        Self {
            estimate: mean,
            std_error,
            n_paths,
        }
    }
}

/// Monte Carlo pricing engine.
///
/// Holds the process and the discretisation; market parameters, payoff and
/// random source are supplied per call. No state is carried between calls.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::MarketParameters;
/// use pricer_models::instruments::{OptionType, PayoffSpec};
/// use pricer_models::models::StochasticProcess;
/// use pricer_pricing::mc::{MonteCarloPricer, SimulationConfig};
/// use pricer_pricing::rng::PricerRng;
///
/// let params = MarketParameters::with_contract(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
/// let config = SimulationConfig::new(20_000, 1).unwrap();
/// let pricer = MonteCarloPricer::new(StochasticProcess::Geometric, config).unwrap();
///
/// let mut rng = PricerRng::from_seed(42);
/// let result = pricer
///     .price(&params, &PayoffSpec::european(OptionType::Call), &mut rng)
///     .unwrap();
///
/// assert!((result.estimate - 10.45).abs() < 4.0 * result.std_error);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonteCarloPricer {
    process: StochasticProcess,
    config: SimulationConfig,
}

impl MonteCarloPricer {
    /// Creates a pricer.
    ///
    /// # Errors
    ///
    /// `PricingError::InvalidModelParameters` if the configuration or the
    /// process parameters are invalid.
    pub fn new(process: StochasticProcess, config: SimulationConfig) -> Result<Self, PricingError> {
        config.validate()?;
        process.validate()?;
        Ok(Self { process, config })
    }

    /// Returns the simulated process.
    #[inline]
    pub fn process(&self) -> &StochasticProcess {
        &self.process
    }

    /// Returns the simulation configuration.
    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Prices `spec`, discounting at the flat market rate.
    ///
    /// # Errors
    ///
    /// - `PricingError::InvalidModelParameters` for a missing or invalid
    ///   strike, an invalid barrier level or drift override
    ///
    /// Errors are raised before any variate is drawn.
    pub fn price<R>(
        &self,
        params: &MarketParameters,
        spec: &PayoffSpec,
        rng: &mut R,
    ) -> Result<PricingResult, PricingError>
    where
        R: NormalSource + ?Sized,
    {
        let curve = FlatCurve::new(params.rate());
        self.price_with_curve(params, spec, &curve, rng)
    }

    /// Prices `spec`, discounting with `curve` at the maturity.
    ///
    /// The drift still uses `params.rate()` (or the configured override).
    ///
    /// # Errors
    ///
    /// As [`price`](Self::price), plus any discount-curve failure.
    pub fn price_with_curve<R, C>(
        &self,
        params: &MarketParameters,
        spec: &PayoffSpec,
        curve: &C,
        rng: &mut R,
    ) -> Result<PricingResult, PricingError>
    where
        R: NormalSource + ?Sized,
        C: YieldCurve<f64>,
    {
        let payoff = ResolvedPayoff::resolve(spec, params.strike())?;
        let discount = curve.discount_factor(params.maturity())?;

        if self.process.is_deterministic(params) {
            debug!(
                payoff = %spec,
                "zero volatility: pricing the single deterministic path"
            );
            let ensemble = simulate_deterministic(&self.process, params, &self.config)?;
            let value = payoff.payoff(ensemble.path(0));
            return Ok(PricingResult {
                estimate: discount * value,
                std_error: 0.0,
                n_paths: 1,
            });
        }

        let ensemble = simulate(&self.process, params, &self.config, rng)?;
        let result = discounted_statistics(&ensemble, &payoff, discount);

        debug!(
            payoff = %spec,
            estimate = result.estimate,
            std_error = result.std_error,
            n_paths = result.n_paths,
            "priced"
        );
        Ok(result)
    }

    /// Prices several payoffs against one already simulated ensemble.
    ///
    /// Every payoff sees the same paths, so differences between results
    /// carry no independent sampling noise. Discounting uses the flat market
    /// rate to the ensemble's horizon.
    ///
    /// # Errors
    ///
    /// The first payoff that fails to resolve aborts the call; nothing is
    /// evaluated before every payoff has resolved.
    pub fn price_ensemble(
        ensemble: &PathEnsemble,
        params: &MarketParameters,
        specs: &[PayoffSpec],
    ) -> Result<Vec<PricingResult>, PricingError> {
        let resolved = specs
            .iter()
            .map(|spec| ResolvedPayoff::resolve(spec, params.strike()))
            .collect::<Result<Vec<_>, _>>()?;

        let curve = FlatCurve::new(params.rate());
        let discount = curve.discount_factor(ensemble.time_grid().maturity())?;

        Ok(resolved
            .iter()
            .map(|payoff| discounted_statistics(ensemble, payoff, discount))
            .collect())
    }
}

fn discounted_statistics(
    ensemble: &PathEnsemble,
    payoff: &ResolvedPayoff,
    discount: f64,
) -> PricingResult {
    let mut samples = evaluate(ensemble, payoff);
    for value in samples.iter_mut() {
        *value *= discount;
    }
    PricingResult::from_samples(&samples)
}

/// Prices `spec` in one call.
///
/// Equivalent to `MonteCarloPricer::new(*process, *config)?.price(params, spec, rng)`.
///
/// # Errors
///
/// Any error from [`MonteCarloPricer::new`] or [`MonteCarloPricer::price`].
pub fn price<R>(
    process: &StochasticProcess,
    params: &MarketParameters,
    spec: &PayoffSpec,
    config: &SimulationConfig,
    rng: &mut R,
) -> Result<PricingResult, PricingError>
where
    R: NormalSource + ?Sized,
{
    MonteCarloPricer::new(*process, *config)?.price(params, spec, rng)
}
