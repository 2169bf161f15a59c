//! Barrier direction and knock type.

use std::fmt;
use std::str::FromStr;

use pricer_core::types::PricingError;

/// Side from which the barrier is approached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BarrierDirection {
    /// Barrier above spot; monitored against the path maximum
    Up,
    /// Barrier below spot; monitored against the path minimum
    Down,
}

/// Whether crossing the barrier activates or cancels the option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KnockType {
    /// Pays only if the barrier was reached
    In,
    /// Pays only if the barrier was never reached
    Out,
}

/// Barrier type enumeration.
///
/// The four direction × knock combinations. Tags parse from the hyphenated
/// market names (`up-and-in`, `down-and-out`, ...) and from the short forms
/// `up-in`, `down-out`, ...
///
/// # Examples
/// ```
/// use pricer_models::instruments::{BarrierDirection, BarrierType, KnockType};
///
/// let barrier: BarrierType = "down-and-in".parse().unwrap();
/// assert_eq!(barrier, BarrierType::DownIn);
/// assert_eq!(barrier.direction(), BarrierDirection::Down);
/// assert_eq!(barrier.knock(), KnockType::In);
/// assert_eq!(barrier.complement(), BarrierType::DownOut);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BarrierType {
    /// Up-and-In: activates when price crosses barrier from below
    UpIn,
    /// Up-and-Out: deactivates when price crosses barrier from below
    UpOut,
    /// Down-and-In: activates when price crosses barrier from above
    DownIn,
    /// Down-and-Out: deactivates when price crosses barrier from above
    DownOut,
}

impl BarrierType {
    /// All four combinations.
    pub const ALL: [BarrierType; 4] = [
        BarrierType::UpIn,
        BarrierType::UpOut,
        BarrierType::DownIn,
        BarrierType::DownOut,
    ];

    /// Builds a barrier type from its two components.
    #[inline]
    pub fn from_parts(direction: BarrierDirection, knock: KnockType) -> Self {
        match (direction, knock) {
            (BarrierDirection::Up, KnockType::In) => BarrierType::UpIn,
            (BarrierDirection::Up, KnockType::Out) => BarrierType::UpOut,
            (BarrierDirection::Down, KnockType::In) => BarrierType::DownIn,
            (BarrierDirection::Down, KnockType::Out) => BarrierType::DownOut,
        }
    }

    /// Returns true if this is an "up" barrier (uses path maximum).
    #[inline]
    pub fn is_up(&self) -> bool {
        matches!(self, BarrierType::UpIn | BarrierType::UpOut)
    }

    /// Returns true if this is an "in" barrier (knock-in).
    #[inline]
    pub fn is_in(&self) -> bool {
        matches!(self, BarrierType::UpIn | BarrierType::DownIn)
    }

    /// Returns the direction component.
    #[inline]
    pub fn direction(&self) -> BarrierDirection {
        if self.is_up() {
            BarrierDirection::Up
        } else {
            BarrierDirection::Down
        }
    }

    /// Returns the knock component.
    #[inline]
    pub fn knock(&self) -> KnockType {
        if self.is_in() {
            KnockType::In
        } else {
            KnockType::Out
        }
    }

    /// Returns the barrier with the same direction and the opposite knock type.
    ///
    /// A knock-in and its complementary knock-out together replicate the
    /// vanilla option on every path.
    #[inline]
    pub fn complement(&self) -> Self {
        match self {
            BarrierType::UpIn => BarrierType::UpOut,
            BarrierType::UpOut => BarrierType::UpIn,
            BarrierType::DownIn => BarrierType::DownOut,
            BarrierType::DownOut => BarrierType::DownIn,
        }
    }
}

impl FromStr for BarrierType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_lowercase().replace('_', "-");
        match normalised.as_str() {
            "up-and-in" | "up-in" | "upin" => Ok(BarrierType::UpIn),
            "up-and-out" | "up-out" | "upout" => Ok(BarrierType::UpOut),
            "down-and-in" | "down-in" | "downin" => Ok(BarrierType::DownIn),
            "down-and-out" | "down-out" | "downout" => Ok(BarrierType::DownOut),
            _ => Err(PricingError::specification(format!(
                "unknown barrier type '{}': expected up-and-in, up-and-out, down-and-in or down-and-out",
                s.trim()
            ))),
        }
    }
}

impl fmt::Display for BarrierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BarrierType::UpIn => "up-and-in",
            BarrierType::UpOut => "up-and-out",
            BarrierType::DownIn => "down-and-in",
            BarrierType::DownOut => "down-and-out",
        };
        f.write_str(name)
    }
}
