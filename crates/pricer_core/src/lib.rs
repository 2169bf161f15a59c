//! # pricer_core: Foundation Types for Path-Dependent Option Pricing
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace and provides:
//! - Validated market inputs: [`MarketParameters`](types::MarketParameters)
//! - The shared error taxonomy: [`PricingError`](types::PricingError)
//! - Discounting: the [`YieldCurve`](market_data::curves::YieldCurve) trait and
//!   its constant-rate implementation [`FlatCurve`](market_data::curves::FlatCurve)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::market_data::curves::{FlatCurve, YieldCurve};
//! use pricer_core::types::MarketParameters;
//!
//! let params = MarketParameters::new(100.0, 1.0, 0.05, 0.2)
//!     .unwrap()
//!     .with_strike(100.0)
//!     .unwrap();
//!
//! let curve = FlatCurve::new(params.rate());
//! let df = curve.discount_factor(params.maturity()).unwrap();
//! assert!((df - (-0.05_f64).exp()).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for [`MarketParameters`](types::MarketParameters)

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod types;
