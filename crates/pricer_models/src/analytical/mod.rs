//! Analytical pricing formulas for European options.
//!
//! This module provides closed-form solutions used as reference values for
//! the Monte Carlo and lattice engines:
//! - Black-Scholes model for lognormal dynamics
//! - Analytical Greeks (Delta, Gamma, Vega, Theta, Rho)
//! - Standard normal CDF and PDF
//!
//! ## Design Principles
//!
//! - **Validated construction**: invalid inputs fail with `PricingError`
//! - **Numerical Stability**: Uses erfc-based CDF for accuracy

pub mod black_scholes;
pub mod distributions;

// Re-export main types at module level
pub use black_scholes::{BlackScholes, Greeks};
pub use distributions::{norm_cdf, norm_pdf};
