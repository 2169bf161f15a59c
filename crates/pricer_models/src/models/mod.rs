//! Stochastic process definitions.
//!
//! A [`StochasticProcess`] names the dynamics of the underlying. Before a
//! simulation it is resolved against market parameters and a time step into
//! a [`Discretisation`], which holds the per-step coefficients so the inner
//! loop is a single multiply-add (or exponential) per sample.

mod process;

pub use process::{Discretisation, ProcessKind, StochasticProcess};
