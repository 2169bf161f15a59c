//! Contract specifications.
//!
//! # Architecture
//!
//! Uses enum dispatch (NOT trait objects): a [`PayoffSpec`] is a closed set of
//! variants, each carrying an [`OptionType`] and, for barriers, a level and a
//! [`BarrierType`]. String tags from configuration files or the command line
//! are parsed through `FromStr`, which rejects anything unrecognised with
//! `PricingError::InvalidSpecification`.
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::{BarrierType, OptionType, PayoffSpec};
//!
//! let spec = PayoffSpec::Barrier {
//!     option_type: "call".parse().unwrap(),
//!     barrier_level: 120.0,
//!     barrier_type: "up-and-out".parse().unwrap(),
//! };
//! assert_eq!(spec.option_type(), OptionType::Call);
//! assert!(spec.requires_strike());
//!
//! assert!("up-and-sideways".parse::<BarrierType>().is_err());
//! ```

mod barrier;
mod exercise;
mod payoff;

pub use barrier::{BarrierDirection, BarrierType, KnockType};
pub use exercise::ExerciseStyle;
pub use payoff::{OptionType, PayoffKind, PayoffSpec};
