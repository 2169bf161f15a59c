//! Path generation for Monte Carlo simulation.
//!
//! This module discretises a [`StochasticProcess`] over an equally spaced
//! [`TimeGrid`] and produces a read-only [`PathEnsemble`].
//!
//! # Draw Order
//!
//! All `n_steps × n_paths` shocks are drawn from the source before any path
//! is advanced, in step-major order: the `n_paths` shocks of step 1, then
//! those of step 2, and so on. Paths are then advanced in parallel. The
//! ensemble is therefore a pure function of the shock sequence and does not
//! depend on the size of the rayon thread pool.
//!
//! # Memory Layout
//!
//! Paths are stored in row-major order: `values[path_idx * (n_steps + 1) + step_idx]`
//! where `step_idx = 0` contains the initial value.

use pricer_core::types::{MarketParameters, PricingError};
use pricer_models::models::{Discretisation, StochasticProcess};
use rayon::prelude::*;
use tracing::debug;

use super::config::SimulationConfig;
use crate::rng::NormalSource;

/// Equally spaced observation instants `0, dt, ..., maturity`.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::TimeGrid;
///
/// let grid = TimeGrid::new(1.0, 4).unwrap();
/// assert_eq!(grid.dt(), 0.25);
/// assert_eq!(grid.times(), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeGrid {
    maturity: f64,
    n_steps: usize,
}

impl TimeGrid {
    /// Creates a grid of `n_steps` intervals covering `[0, maturity]`.
    ///
    /// # Errors
    /// `PricingError::InvalidModelParameters` if `maturity` is not positive
    /// and finite or `n_steps` is zero.
    pub fn new(maturity: f64, n_steps: usize) -> Result<Self, PricingError> {
        if !(maturity.is_finite() && maturity > 0.0) {
            return Err(PricingError::model(format!(
                "maturity must be positive and finite, got {}",
                maturity
            )));
        }
        if n_steps == 0 {
            return Err(PricingError::model("step count must be at least 1"));
        }
        Ok(Self { maturity, n_steps })
    }

    /// Returns the horizon.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Returns the number of intervals.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Returns the number of instants, `n_steps + 1`.
    #[inline]
    pub fn n_points(&self) -> usize {
        self.n_steps + 1
    }

    /// Returns the interval length.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.maturity / self.n_steps as f64
    }

    /// Returns instant `index`; the last instant is exactly `maturity`.
    #[inline]
    pub fn time(&self, index: usize) -> f64 {
        if index >= self.n_steps {
            self.maturity
        } else {
            index as f64 * self.dt()
        }
    }

    /// Returns every instant.
    pub fn times(&self) -> Vec<f64> {
        (0..self.n_points()).map(|i| self.time(i)).collect()
    }
}

/// Simulated trajectories with their time grid.
///
/// Every path holds `n_steps + 1` samples and starts at the initial value.
/// The buffer is fixed once simulated; no mutable access is exposed.
#[derive(Clone, Debug, PartialEq)]
pub struct PathEnsemble {
    values: Vec<f64>,
    n_paths: usize,
    grid: TimeGrid,
}

impl PathEnsemble {
    /// Returns the number of paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Returns the number of steps per path.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.grid.n_steps()
    }

    /// Returns the time grid the paths were sampled on.
    #[inline]
    pub fn time_grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// Returns path `index` (`n_steps + 1` samples).
    ///
    /// # Panics
    /// Panics if `index >= n_paths`.
    #[inline]
    pub fn path(&self, index: usize) -> &[f64] {
        let width = self.grid.n_points();
        &self.values[index * width..(index + 1) * width]
    }

    /// Iterates over the paths in order.
    pub fn paths(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        self.values.chunks_exact(self.grid.n_points())
    }

    /// Iterates over the paths in parallel.
    pub fn par_paths(&self) -> impl IndexedParallelIterator<Item = &[f64]> + '_ {
        self.values.par_chunks_exact(self.grid.n_points())
    }

    /// Returns the full row-major buffer.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Returns the last sample of every path.
    pub fn terminal_values(&self) -> Vec<f64> {
        let last = self.grid.n_steps();
        self.paths().map(|path| path[last]).collect()
    }

    /// Advances every path from `initial` using the step-major `shocks` buffer.
    fn evolve(
        initial: f64,
        step: Discretisation,
        shocks: &[f64],
        n_paths: usize,
        grid: TimeGrid,
    ) -> Self {
        let n_steps = grid.n_steps();
        debug_assert_eq!(shocks.len(), n_paths * n_steps);

        let mut values = vec![0.0; n_paths * grid.n_points()];
        values
            .par_chunks_mut(grid.n_points())
            .enumerate()
            .for_each(|(path_idx, row)| {
                row[0] = initial;
                for s in 0..n_steps {
                    let z = shocks[s * n_paths + path_idx];
                    row[s + 1] = step.advance(row[s], z);
                }
            });

        Self {
            values,
            n_paths,
            grid,
        }
    }
}

/// Simulates `config.n_paths()` paths of `process`.
///
/// Draws exactly `n_steps × n_paths` variates from `rng`.
///
/// # Errors
///
/// `PricingError::InvalidModelParameters` if the configuration, the
/// process parameters or the drift override are invalid. Nothing is drawn
/// from `rng` in that case.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::MarketParameters;
/// use pricer_models::models::StochasticProcess;
/// use pricer_pricing::mc::{simulate, SimulationConfig};
/// use pricer_pricing::rng::PricerRng;
///
/// let params = MarketParameters::new(100.0, 1.0, 0.05, 0.2).unwrap();
/// let config = SimulationConfig::new(1_000, 12).unwrap();
/// let mut rng = PricerRng::from_seed(42);
///
/// let ensemble = simulate(&StochasticProcess::Geometric, &params, &config, &mut rng).unwrap();
/// assert_eq!(ensemble.n_paths(), 1_000);
/// assert_eq!(ensemble.path(0).len(), 13);
/// assert!(ensemble.paths().all(|p| p[0] == 100.0));
/// ```
pub fn simulate<R>(
    process: &StochasticProcess,
    params: &MarketParameters,
    config: &SimulationConfig,
    rng: &mut R,
) -> Result<PathEnsemble, PricingError>
where
    R: NormalSource + ?Sized,
{
    config.validate()?;
    let grid = TimeGrid::new(params.maturity(), config.n_steps())?;
    let step = process.discretise(params, grid.dt(), config.drift_override())?;

    let n_paths = config.n_paths();
    debug!(
        process = %process.kind(),
        n_paths,
        n_steps = grid.n_steps(),
        dt = grid.dt(),
        "simulating paths"
    );

    let mut shocks = vec![0.0; n_paths * grid.n_steps()];
    rng.fill_normal(&mut shocks);

    Ok(PathEnsemble::evolve(
        params.spot(),
        step,
        &shocks,
        n_paths,
        grid,
    ))
}

/// Simulates the single path obtained with every shock set to zero.
///
/// This is the exact ensemble when the volatility is zero, since every
/// path would coincide with it. No randomness is consumed.
///
/// # Errors
///
/// Same conditions as [`simulate`]. The configured path count is
/// validated but ignored.
pub fn simulate_deterministic(
    process: &StochasticProcess,
    params: &MarketParameters,
    config: &SimulationConfig,
) -> Result<PathEnsemble, PricingError> {
    config.validate()?;
    let grid = TimeGrid::new(params.maturity(), config.n_steps())?;
    let step = process.discretise(params, grid.dt(), config.drift_override())?;

    let shocks = vec![0.0; grid.n_steps()];
    Ok(PathEnsemble::evolve(params.spot(), step, &shocks, 1, grid))
}
