//! Monte Carlo simulation and pricing.
//!
//! # Architecture
//!
//! ```text
//! MonteCarloPricer
//! ├── StochasticProcess  (dynamics, from pricer_models)
//! ├── SimulationConfig   (paths, steps, drift override)
//! └── per call
//!     ├── ResolvedPayoff::resolve()   validate and resolve tags
//!     ├── simulate()                  draw shocks, advance paths in parallel
//!     ├── evaluate()                  one payoff per path
//!     └── discount and average        estimate and standard error
//! ```
//!
//! All validation happens before the first variate is drawn.
//!
//! # Examples
//!
//! ```rust
//! use pricer_core::types::MarketParameters;
//! use pricer_models::instruments::{BarrierType, OptionType, PayoffSpec};
//! use pricer_models::models::StochasticProcess;
//! use pricer_pricing::mc::{price, SimulationConfig};
//! use pricer_pricing::rng::PricerRng;
//!
//! let params = MarketParameters::with_contract(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
//! let config = SimulationConfig::new(10_000, 52).unwrap();
//! let spec = PayoffSpec::barrier(OptionType::Call, 130.0, BarrierType::UpOut);
//!
//! let result = price(
//!     &StochasticProcess::Geometric,
//!     &params,
//!     &spec,
//!     &config,
//!     &mut PricerRng::from_seed(42),
//! )
//! .unwrap();
//!
//! println!("{:.4} +/- {:.4}", result.estimate, result.confidence_95());
//! ```

mod config;
mod paths;
mod pricer;

pub use config::{SimulationConfig, SimulationConfigBuilder, MAX_PATHS, MAX_STEPS};
pub use paths::{simulate, simulate_deterministic, PathEnsemble, TimeGrid};
pub use pricer::{price, MonteCarloPricer, PricingResult};
