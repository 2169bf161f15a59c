//! Recombining lattice engines for early-exercise options.
//!
//! The lattice never touches a simulated ensemble; it is an independent
//! pricer for American (and, for comparison, European) exercise.

mod binomial;

pub use binomial::{price_american, BinomialLattice, MAX_LATTICE_STEPS};
