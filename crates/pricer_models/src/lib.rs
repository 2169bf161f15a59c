//! # Pricer Models (L2: Business Logic)
//!
//! Contract specifications, stochastic process definitions, and closed-form
//! benchmarks.
//!
//! This crate provides:
//! - Payoff specifications (European, Asian, lookback, barrier) and their
//!   call/put, barrier and exercise tags
//! - Stochastic process definitions (geometric Brownian motion,
//!   Ornstein-Uhlenbeck mean reversion)
//! - Black-Scholes closed-form prices and Greeks, used as ground truth for
//!   the numerical engines
//!
//! ## Design Principles
//!
//! - **Enum-based specifications** for static dispatch
//! - **Fail-fast parsing**: string tags are parsed once at the boundary and an
//!   unknown tag is an `InvalidSpecification` error, never a default

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
pub mod models;
