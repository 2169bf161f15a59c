//! PathObserver: Streaming statistics accumulation for path-dependent options.
//!
//! Statistics are accumulated incrementally as samples are observed:
//!
//! - **Arithmetic average**: Running sum / count
//! - **Maximum**: Running maximum
//! - **Minimum**: Running minimum
//! - **Terminal**: Last sample
//!
//! Samples may be negative (mean-reverting paths), so no logarithmic
//! statistics are kept.

/// Streaming path observation statistics.
///
/// # Example
///
/// ```
/// use pricer_pricing::path_dependent::PathObserver;
///
/// let observer = PathObserver::from_path(&[100.0, 105.0, 110.0, 95.0, 100.0]);
///
/// assert_eq!(observer.count(), 5);
/// assert_eq!(observer.arithmetic_average(), 102.0);
/// assert_eq!(observer.maximum(), 110.0);
/// assert_eq!(observer.minimum(), 95.0);
/// assert_eq!(observer.terminal(), 100.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathObserver {
    /// Running sum for arithmetic average: Σ S_i
    running_sum: f64,
    /// Running maximum observed
    running_max: f64,
    /// Running minimum observed
    running_min: f64,
    /// Number of observations
    count: usize,
    /// Most recent observation
    terminal: f64,
}

impl PathObserver {
    /// Creates a new empty path observer.
    #[inline]
    pub fn new() -> Self {
        Self {
            running_sum: 0.0,
            running_max: f64::NEG_INFINITY,
            running_min: f64::INFINITY,
            count: 0,
            terminal: 0.0,
        }
    }

    /// Observes every sample of `path` in order.
    #[inline]
    pub fn from_path(path: &[f64]) -> Self {
        let mut observer = Self::new();
        for &value in path {
            observer.observe(value);
        }
        observer
    }

    /// Observes a new sample and updates running statistics.
    ///
    /// The sample also becomes the terminal value.
    #[inline]
    pub fn observe(&mut self, value: f64) {
        self.running_sum += value;
        self.running_max = self.running_max.max(value);
        self.running_min = self.running_min.min(value);
        self.count += 1;
        self.terminal = value;
    }

    /// Resets all statistics to initial state.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Returns `Σ S_i / n`, or `0` before any observation.
    #[inline]
    pub fn arithmetic_average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.running_sum / self.count as f64
        }
    }

    /// Returns the largest sample (`-inf` before any observation).
    #[inline]
    pub fn maximum(&self) -> f64 {
        self.running_max
    }

    /// Returns the smallest sample (`+inf` before any observation).
    #[inline]
    pub fn minimum(&self) -> f64 {
        self.running_min
    }

    /// Returns the last sample.
    #[inline]
    pub fn terminal(&self) -> f64 {
        self.terminal
    }

    /// Returns the number of observations.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }
}

impl Default for PathObserver {
    fn default() -> Self {
        Self::new()
    }
}
