//! # Random Number Generation Infrastructure
//!
//! This module provides the standard normal streams that drive the path
//! simulator.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: every generator is seeded; an unseeded generator
//!   draws its seed from OS entropy and still reports it through
//!   [`PricerRng::seed`], so any run can be replayed
//! - **Explicit ownership**: the source is passed to the simulator as
//!   `&mut impl NormalSource`; there is no global generator
//! - **Efficiency**: zero-allocation batch operations via `&mut [f64]` slices
//!
//! ## Module Structure
//!
//! - [`prng`]: Pseudo-random number generator wrapper with seed management
//! - [`source`]: The [`NormalSource`] trait consumed by the simulator
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::{NormalSource, PricerRng};
//!
//! let mut rng = PricerRng::from_seed(12345);
//! let z = rng.next_normal();
//! assert!(z.is_finite());
//!
//! let mut buffer = vec![0.0; 1000];
//! rng.fill_normal(&mut buffer);
//! ```

pub mod prng;
pub mod source;

pub use prng::PricerRng;
pub use source::NormalSource;
