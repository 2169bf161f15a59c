//! Discounting for the pricers.
//!
//! - [`curves`]: the [`YieldCurve`] trait and [`FlatCurve`]
//! - [`error`]: [`MarketDataError`] for out-of-domain queries
//!
//! Curves are generic over `T: Float`, so `f32` and `f64` inputs share the
//! same implementation.

pub mod curves;
pub mod error;

pub use curves::{FlatCurve, YieldCurve};
pub use error::MarketDataError;
