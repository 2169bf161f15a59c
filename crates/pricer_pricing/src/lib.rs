//! # Pricer Pricing (Layer 3: Numerical Engines)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing turns the specifications of `pricer_models` into prices:
//! - [`rng`]: seedable standard normal streams ([`PricerRng`](rng::PricerRng))
//! - [`mc`]: path simulation and the Monte Carlo pricer
//! - [`path_dependent`]: per-path payoff evaluation (European, Asian,
//!   lookback, barrier)
//! - [`lattice`]: Cox-Ross-Rubinstein binomial lattice for early exercise
//!
//! ## Determinism
//!
//! A pricing call is a pure function of its inputs and the variates drawn
//! from the supplied source. Paths are advanced and evaluated on the rayon
//! pool, but every variate is drawn before the parallel section, so the
//! result does not depend on the number of threads.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::types::MarketParameters;
//! use pricer_models::instruments::{OptionType, PayoffSpec};
//! use pricer_models::models::StochasticProcess;
//! use pricer_pricing::lattice::price_american;
//! use pricer_pricing::mc::{MonteCarloPricer, SimulationConfig};
//! use pricer_pricing::rng::PricerRng;
//!
//! let params = MarketParameters::with_contract(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
//!
//! let pricer = MonteCarloPricer::new(
//!     StochasticProcess::Geometric,
//!     SimulationConfig::new(10_000, 52).unwrap(),
//! )
//! .unwrap();
//! let asian = pricer
//!     .price(&params, &PayoffSpec::asian(OptionType::Call), &mut PricerRng::from_seed(42))
//!     .unwrap();
//! assert!(asian.estimate > 0.0);
//!
//! let american_put = price_american(&params, OptionType::Put, 500).unwrap();
//! assert!(american_put > 5.5);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod lattice;
pub mod mc;
pub mod path_dependent;
pub mod rng;

// Re-export commonly used items for convenience
pub use lattice::{price_american, BinomialLattice};
pub use mc::{MonteCarloPricer, PricingResult, SimulationConfig};
pub use rng::{NormalSource, PricerRng};
