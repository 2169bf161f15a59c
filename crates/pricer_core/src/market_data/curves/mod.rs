//! Discount curves.

mod flat;
mod traits;

pub use flat::FlatCurve;
pub use traits::YieldCurve;
