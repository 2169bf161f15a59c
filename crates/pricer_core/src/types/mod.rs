//! Core market and error types.
//!
//! This module provides:
//! - `market`: Validated, immutable market inputs shared by every pricer
//! - `error`: Structured error types for pricing operations
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`MarketParameters`] from `market`
//! - [`PricingError`] from `error`

pub mod error;
pub mod market;

// Re-export commonly used types at module level
pub use error::PricingError;
pub use market::MarketParameters;
