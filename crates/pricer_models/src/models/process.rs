//! Geometric and mean-reverting processes.
//!
//! ## Geometric (log-normal)
//!
//! ```text
//! dS = μ S dt + σ S dW
//! S(t+dt) = S(t) * exp((μ - σ²/2) dt + σ sqrt(dt) Z)
//! ```
//!
//! The log-space step is exact in distribution for any `dt`.
//!
//! ## Mean-reverting (Ornstein-Uhlenbeck)
//!
//! ```text
//! dX = θ (m - X) dt + σ dW
//! X(t+dt) = X(t) + θ (m - X(t)) dt + σ sqrt(dt) Z
//! ```
//!
//! Euler-Maruyama; the value is additive and may become negative.

use std::fmt;
use std::str::FromStr;

use pricer_core::types::{MarketParameters, PricingError};

/// Process family tag, parsed from configuration and command-line input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ProcessKind {
    /// Multiplicative log-normal increments
    Geometric,
    /// Additive normal increments pulled towards a long-run level
    MeanReverting,
}

impl FromStr for ProcessKind {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "geometric" | "gbm" => Ok(ProcessKind::Geometric),
            "mean-reverting" | "mean_reverting" | "ou" => Ok(ProcessKind::MeanReverting),
            other => Err(PricingError::specification(format!(
                "unknown process '{}': expected 'geometric' or 'mean-reverting'",
                other
            ))),
        }
    }
}

impl fmt::Display for ProcessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessKind::Geometric => write!(f, "geometric"),
            ProcessKind::MeanReverting => write!(f, "mean-reverting"),
        }
    }
}

/// Single-factor stochastic process driving the underlying.
///
/// Volatility and the risk-free rate come from `MarketParameters`; only
/// parameters specific to the dynamics live here.
///
/// # Examples
/// ```
/// use pricer_core::types::MarketParameters;
/// use pricer_models::models::StochasticProcess;
///
/// let params = MarketParameters::new(100.0, 1.0, 0.05, 0.2).unwrap();
/// let step = StochasticProcess::Geometric
///     .discretise(&params, 0.01, None)
///     .unwrap();
///
/// // Zero shock: pure drift
/// let next = step.advance(100.0, 0.0);
/// assert!((next - 100.0 * ((0.05 - 0.02) * 0.01_f64).exp()).abs() < 1e-12);
///
/// assert!(StochasticProcess::mean_reverting(-1.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StochasticProcess {
    /// Risk-neutral geometric Brownian motion.
    #[default]
    Geometric,
    /// Ornstein-Uhlenbeck process.
    MeanReverting {
        /// Reversion speed θ (per year, non-negative)
        speed: f64,
        /// Long-run level m
        long_run_mean: f64,
    },
}

impl StochasticProcess {
    /// Creates a validated mean-reverting process.
    ///
    /// # Errors
    /// `PricingError::InvalidModelParameters` if `speed` is negative or
    /// either parameter is not finite.
    pub fn mean_reverting(speed: f64, long_run_mean: f64) -> Result<Self, PricingError> {
        let process = StochasticProcess::MeanReverting {
            speed,
            long_run_mean,
        };
        process.validate()?;
        Ok(process)
    }

    /// Returns the process family.
    #[inline]
    pub fn kind(&self) -> ProcessKind {
        match self {
            StochasticProcess::Geometric => ProcessKind::Geometric,
            StochasticProcess::MeanReverting { .. } => ProcessKind::MeanReverting,
        }
    }

    /// Checks the process parameters.
    ///
    /// # Errors
    /// `PricingError::InvalidModelParameters` naming the offending parameter.
    pub fn validate(&self) -> Result<(), PricingError> {
        if let StochasticProcess::MeanReverting {
            speed,
            long_run_mean,
        } = self
        {
            if !(speed.is_finite() && *speed >= 0.0) {
                return Err(PricingError::model(format!(
                    "mean-reversion speed must be non-negative and finite, got {}",
                    speed
                )));
            }
            if !long_run_mean.is_finite() {
                return Err(PricingError::model(format!(
                    "long-run mean must be finite, got {}",
                    long_run_mean
                )));
            }
        }
        Ok(())
    }

    /// Returns the level the drift pulls towards: the risk-free rate for the
    /// geometric process, the long-run mean for the mean-reverting one.
    /// `drift_override` replaces either.
    #[inline]
    pub fn drift_target(&self, params: &MarketParameters, drift_override: Option<f64>) -> f64 {
        drift_override.unwrap_or(match self {
            StochasticProcess::Geometric => params.rate(),
            StochasticProcess::MeanReverting { long_run_mean, .. } => *long_run_mean,
        })
    }

    /// Returns whether every path collapses onto the same trajectory.
    #[inline]
    pub fn is_deterministic(&self, params: &MarketParameters) -> bool {
        params.volatility() == 0.0
    }

    /// Resolves the per-step coefficients for a time step `dt`.
    ///
    /// # Errors
    /// `PricingError::InvalidModelParameters` if the process parameters,
    /// the drift override or `dt` are invalid.
    pub fn discretise(
        &self,
        params: &MarketParameters,
        dt: f64,
        drift_override: Option<f64>,
    ) -> Result<Discretisation, PricingError> {
        self.validate()?;
        if !(dt.is_finite() && dt > 0.0) {
            return Err(PricingError::model(format!(
                "time step must be positive and finite, got {}",
                dt
            )));
        }
        if let Some(drift) = drift_override {
            if !drift.is_finite() {
                return Err(PricingError::model(format!(
                    "drift override must be finite, got {}",
                    drift
                )));
            }
        }

        let sigma = params.volatility();
        let target = self.drift_target(params, drift_override);
        let diffusion = sigma * dt.sqrt();

        Ok(match self {
            StochasticProcess::Geometric => Discretisation::Multiplicative {
                drift: (target - 0.5 * sigma * sigma) * dt,
                diffusion,
            },
            StochasticProcess::MeanReverting { speed, .. } => Discretisation::Additive {
                reversion: speed * dt,
                level: target,
                diffusion,
            },
        })
    }
}

/// Per-step update rule with coefficients fixed for one simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Discretisation {
    /// `x * exp(drift + diffusion * z)`
    Multiplicative {
        /// `(μ - σ²/2) dt`
        drift: f64,
        /// `σ sqrt(dt)`
        diffusion: f64,
    },
    /// `x + reversion * (level - x) + diffusion * z`
    Additive {
        /// `θ dt`
        reversion: f64,
        /// Long-run level
        level: f64,
        /// `σ sqrt(dt)`
        diffusion: f64,
    },
}

impl Discretisation {
    /// Advances one sample by one step given a standard normal shock.
    #[inline]
    pub fn advance(&self, x: f64, z: f64) -> f64 {
        match *self {
            Discretisation::Multiplicative { drift, diffusion } => x * (drift + diffusion * z).exp(),
            Discretisation::Additive {
                reversion,
                level,
                diffusion,
            } => x + reversion * (level - x) + diffusion * z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params() -> MarketParameters {
        MarketParameters::new(100.0, 1.0, 0.05, 0.2).unwrap()
    }

    #[test]
    fn test_geometric_step_positive_shock() {
        let step = StochasticProcess::Geometric
            .discretise(&params(), 0.25, None)
            .unwrap();
        let expected = 100.0 * ((0.05 - 0.5 * 0.04) * 0.25 + 0.2 * 0.5 * 1.0_f64).exp();
        assert_relative_eq!(step.advance(100.0, 1.0), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_geometric_stays_positive() {
        let step = StochasticProcess::Geometric
            .discretise(&params(), 1.0, None)
            .unwrap();
        assert!(step.advance(100.0, -10.0) > 0.0);
    }

    #[test]
    fn test_drift_override_geometric() {
        let step = StochasticProcess::Geometric
            .discretise(&params(), 1.0, Some(0.0))
            .unwrap();
        match step {
            Discretisation::Multiplicative { drift, .. } => {
                assert_relative_eq!(drift, -0.02, epsilon = 1e-15)
            }
            other => panic!("unexpected discretisation {:?}", other),
        }
    }

    #[test]
    fn test_mean_reverting_pulls_towards_level() {
        let process = StochasticProcess::mean_reverting(2.0, 50.0).unwrap();
        let step = process.discretise(&params(), 0.1, None).unwrap();

        // From 100 with no shock: 100 + 0.2 * (50 - 100) = 90
        assert_relative_eq!(step.advance(100.0, 0.0), 90.0, epsilon = 1e-12);
        // Shock adds σ sqrt(dt) z
        assert_relative_eq!(
            step.advance(100.0, 1.0),
            90.0 + 0.2 * 0.1_f64.sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_mean_reverting_drift_override_replaces_level() {
        let process = StochasticProcess::mean_reverting(1.0, 50.0).unwrap();
        assert_eq!(process.drift_target(&params(), None), 50.0);
        assert_eq!(process.drift_target(&params(), Some(80.0)), 80.0);
    }

    #[test]
    fn test_zero_speed_is_random_walk() {
        let process = StochasticProcess::mean_reverting(0.0, 50.0).unwrap();
        let step = process.discretise(&params(), 0.5, None).unwrap();
        assert_relative_eq!(step.advance(100.0, 0.0), 100.0, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_process_parameters() {
        assert!(matches!(
            StochasticProcess::mean_reverting(-0.5, 1.0),
            Err(PricingError::InvalidModelParameters(_))
        ));
        assert!(StochasticProcess::mean_reverting(f64::NAN, 1.0).is_err());
        assert!(StochasticProcess::mean_reverting(1.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_invalid_dt_and_override() {
        let process = StochasticProcess::Geometric;
        assert!(process.discretise(&params(), 0.0, None).is_err());
        assert!(process.discretise(&params(), 0.1, Some(f64::NAN)).is_err());
    }

    #[test]
    fn test_deterministic_detection() {
        let flat = params().with_volatility(0.0).unwrap();
        assert!(StochasticProcess::Geometric.is_deterministic(&flat));
        assert!(!StochasticProcess::Geometric.is_deterministic(&params()));
    }

    #[test]
    fn test_process_kind_parse() {
        assert_eq!(
            "mean-reverting".parse::<ProcessKind>().unwrap(),
            ProcessKind::MeanReverting
        );
        assert_eq!("GBM".parse::<ProcessKind>().unwrap(), ProcessKind::Geometric);
        assert!(matches!(
            "heston".parse::<ProcessKind>(),
            Err(PricingError::InvalidSpecification(_))
        ));
        assert_eq!(StochasticProcess::Geometric.kind(), ProcessKind::Geometric);
    }
}
