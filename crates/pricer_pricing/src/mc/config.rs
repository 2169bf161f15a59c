//! Discretisation settings.
//!
//! One [`SimulationConfig`] is shared by the path simulator and the Monte
//! Carlo pricer; it is validated once when built.

use pricer_core::types::PricingError;

/// Upper bound on the path count.
pub const MAX_PATHS: usize = 10_000_000;

/// Upper bound on the step count.
pub const MAX_STEPS: usize = 10_000;

/// Path count, step count and optional drift override.
///
/// Built through [`SimulationConfigBuilder`] or [`SimulationConfig::new`];
/// there are no setters, so a built value is always valid.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .n_paths(20_000)
///     .n_steps(12)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.n_paths(), 20_000);
/// assert_eq!(config.n_steps(), 12);
/// assert_eq!(config.drift_override(), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SimulationConfig {
    n_paths: usize,
    n_steps: usize,
    /// Replacement for the process drift target.
    drift_override: Option<f64>,
}

impl SimulationConfig {
    /// Starts an empty builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Creates a validated configuration without a drift override.
    ///
    /// # Errors
    /// `PricingError::InvalidModelParameters` if either count is out of range.
    pub fn new(n_paths: usize, n_steps: usize) -> Result<Self, PricingError> {
        Self::builder().n_paths(n_paths).n_steps(n_steps).build()
    }

    /// Returns the path count.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Returns the steps per path; each path holds `n_steps + 1` samples.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Returns the drift override, if any.
    ///
    /// For the geometric process it replaces the risk-free rate in the
    /// drift; for the mean-reverting process it replaces the long-run level.
    /// Discounting always uses the market rate.
    #[inline]
    pub fn drift_override(&self) -> Option<f64> {
        self.drift_override
    }

    /// Returns a copy with a different path count.
    ///
    /// # Errors
    /// `PricingError::InvalidModelParameters` if `n_paths` is out of range.
    pub fn with_paths(self, n_paths: usize) -> Result<Self, PricingError> {
        let config = Self { n_paths, ..self };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidModelParameters` if:
    /// - `n_paths` is 0 or greater than 10,000,000
    /// - `n_steps` is 0 or greater than 10,000
    /// - `drift_override` is present but not finite
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.n_paths == 0 || self.n_paths > MAX_PATHS {
            return Err(PricingError::model(format!(
                "path count {} must be in range [1, {}]",
                self.n_paths, MAX_PATHS
            )));
        }
        if self.n_steps == 0 || self.n_steps > MAX_STEPS {
            return Err(PricingError::model(format!(
                "step count {} must be in range [1, {}]",
                self.n_steps, MAX_STEPS
            )));
        }
        if let Some(drift) = self.drift_override {
            if !drift.is_finite() {
                return Err(PricingError::model(format!(
                    "drift override must be finite, got {}",
                    drift
                )));
            }
        }
        Ok(())
    }
}

/// Fluent builder for [`SimulationConfig`]; both counts are mandatory.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .n_paths(50_000)
///     .n_steps(52)
///     .drift_override(0.0)
///     .build()
///     .unwrap();
/// assert_eq!(config.drift_override(), Some(0.0));
///
/// assert!(SimulationConfig::builder().n_paths(1).build().is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    n_paths: Option<usize>,
    n_steps: Option<usize>,
    drift_override: Option<f64>,
}

impl SimulationConfigBuilder {
    /// Sets the number of simulation paths, in [1, 10_000_000].
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the number of time steps per path, in [1, 10_000].
    #[inline]
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = Some(n_steps);
        self
    }

    /// Sets the drift override.
    #[inline]
    pub fn drift_override(mut self, drift: f64) -> Self {
        self.drift_override = Some(drift);
        self
    }

    /// Sets or clears the drift override.
    #[inline]
    pub fn maybe_drift_override(mut self, drift: Option<f64>) -> Self {
        self.drift_override = drift;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidModelParameters` if:
    /// - `n_paths` not set or invalid
    /// - `n_steps` not set or invalid
    /// - the drift override is not finite
    pub fn build(self) -> Result<SimulationConfig, PricingError> {
        let n_paths = self
            .n_paths
            .ok_or_else(|| PricingError::model("n_paths must be specified"))?;
        let n_steps = self
            .n_steps
            .ok_or_else(|| PricingError::model("n_steps must be specified"))?;

        let config = SimulationConfig {
            n_paths,
            n_steps,
            drift_override: self.drift_override,
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder_valid() {
        let config = SimulationConfig::builder()
            .n_paths(10_000)
            .n_steps(252)
            .build()
            .unwrap();

        assert_eq!(config.n_paths(), 10_000);
        assert_eq!(config.n_steps(), 252);
        assert_eq!(config.drift_override(), None);
    }

    #[test]
    fn test_config_builder_with_drift() {
        let config = SimulationConfig::builder()
            .n_paths(1000)
            .n_steps(100)
            .drift_override(0.08)
            .build()
            .unwrap();

        assert_eq!(config.drift_override(), Some(0.08));

        let cleared = SimulationConfig::builder()
            .n_paths(1000)
            .n_steps(100)
            .drift_override(0.08)
            .maybe_drift_override(None)
            .build()
            .unwrap();
        assert_eq!(cleared.drift_override(), None);
    }

    #[test]
    fn test_config_invalid_zero_paths() {
        let result = SimulationConfig::new(0, 100);
        assert!(matches!(result, Err(PricingError::InvalidModelParameters(_))));
    }

    #[test]
    fn test_config_invalid_too_many_paths() {
        assert!(SimulationConfig::new(MAX_PATHS + 1, 100).is_err());
    }

    #[test]
    fn test_config_invalid_zero_steps() {
        match SimulationConfig::new(1000, 0) {
            Err(PricingError::InvalidModelParameters(msg)) => assert!(msg.contains("step count 0")),
            other => panic!("expected step count error, got {:?}", other),
        }
    }

    #[test]
    fn test_config_invalid_too_many_steps() {
        assert!(SimulationConfig::new(1000, MAX_STEPS + 1).is_err());
    }

    #[test]
    fn test_config_missing_counts() {
        assert!(SimulationConfig::builder().n_steps(100).build().is_err());
        assert!(SimulationConfig::builder().n_paths(1000).build().is_err());
    }

    #[test]
    fn test_config_non_finite_drift() {
        let result = SimulationConfig::builder()
            .n_paths(10)
            .n_steps(10)
            .drift_override(f64::NAN)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_config_boundaries_accepted() {
        assert!(SimulationConfig::new(1, 1).is_ok());
        assert!(SimulationConfig::new(MAX_PATHS, MAX_STEPS).is_ok());
    }

    #[test]
    fn test_with_paths() {
        let config = SimulationConfig::new(100, 10).unwrap();
        assert_eq!(config.with_paths(400).unwrap().n_paths(), 400);
        assert!(config.with_paths(0).is_err());
    }
}
