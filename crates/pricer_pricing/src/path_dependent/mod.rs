//! Path-dependent payoff evaluation.
//!
//! # Key Components
//!
//! - [`PathObserver`]: Streaming statistics (sum, max, min, terminal) over one path
//! - [`BarrierPolicy`]: The barrier rule for one [`BarrierType`](pricer_models::instruments::BarrierType)
//! - [`ResolvedPayoff`]: A `PayoffSpec` reduced to numeric coefficients
//! - [`evaluate`]: One undiscounted payoff per path of an ensemble
//!
//! # Design Philosophy
//!
//! - **Resolve once**: tags are turned into signs and policies before any
//!   path is touched; evaluation is branch-light arithmetic
//! - **Static dispatch**: Enum-based dispatch for payoff types
//! - **Parallel evaluation**: paths are independent and evaluated with rayon;
//!   output order always matches path order

mod barrier;
mod observer;
mod payoff;

pub use barrier::{BarrierPolicy, Extremum};
pub use observer::PathObserver;
pub use payoff::{evaluate, ResolvedPayoff};
