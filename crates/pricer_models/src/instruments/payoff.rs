//! Option type and payoff specification.

use std::fmt;
use std::str::FromStr;

use pricer_core::types::PricingError;

use super::barrier::BarrierType;

/// Call or put.
///
/// The numeric form is a sign `ω`: every vanilla-style payoff in the
/// workspace is `max(ω (x - K), 0)`, so pricing loops never branch on the tag.
///
/// # Examples
/// ```
/// use pricer_models::instruments::OptionType;
///
/// assert_eq!(OptionType::Call.sign(), 1.0);
/// assert_eq!(OptionType::Put.intrinsic(90.0, 100.0), 10.0);
/// assert_eq!("PUT".parse::<OptionType>().unwrap(), OptionType::Put);
/// assert!("straddle".parse::<OptionType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// Right to buy: max(S - K, 0)
    Call,
    /// Right to sell: max(K - S, 0)
    Put,
}

impl OptionType {
    /// Returns `+1.0` for a call and `-1.0` for a put.
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }

    /// Returns whether this is a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionType::Call)
    }

    /// Immediate exercise value `max(ω (spot - strike), 0)`.
    #[inline]
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        (self.sign() * (spot - strike)).max(0.0)
    }
}

impl FromStr for OptionType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            other => Err(PricingError::specification(format!(
                "unknown option type '{}': expected 'call' or 'put'",
                other
            ))),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

/// Payoff family without its parameters.
///
/// Used where the family arrives as a tag (command line, configuration) and
/// the remaining fields are supplied separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PayoffKind {
    /// Terminal value against a strike
    European,
    /// Arithmetic path average against a strike
    Asian,
    /// Floating-strike lookback
    Lookback,
    /// Vanilla payoff conditioned on a barrier crossing
    Barrier,
}

impl FromStr for PayoffKind {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "european" | "vanilla" => Ok(PayoffKind::European),
            "asian" => Ok(PayoffKind::Asian),
            "lookback" => Ok(PayoffKind::Lookback),
            "barrier" => Ok(PayoffKind::Barrier),
            other => Err(PricingError::specification(format!(
                "unknown payoff '{}': expected european, asian, lookback or barrier",
                other
            ))),
        }
    }
}

impl fmt::Display for PayoffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PayoffKind::European => "european",
            PayoffKind::Asian => "asian",
            PayoffKind::Lookback => "lookback",
            PayoffKind::Barrier => "barrier",
        };
        f.write_str(name)
    }
}

/// Payoff specification consumed by the Monte Carlo pricer.
///
/// The strike is not part of the specification; it travels in
/// `MarketParameters` and is checked against [`requires_strike`](Self::requires_strike)
/// when the payoff is resolved.
///
/// # Variants
/// - `European`: `max(ω (S_T - K), 0)`
/// - `Asian`: `max(ω (A - K), 0)` where `A` is the arithmetic mean of every
///   sample including the initial one
/// - `Lookback`: call `S_T - min(S)`, put `max(S) - S_T`; no strike
/// - `Barrier`: European payoff kept or zeroed by the path extremum relative
///   to `barrier_level`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PayoffSpec {
    /// Plain vanilla on the terminal sample.
    European {
        /// Call or put
        option_type: OptionType,
    },
    /// Arithmetic-average price option.
    Asian {
        /// Call or put
        option_type: OptionType,
    },
    /// Floating-strike lookback option.
    Lookback {
        /// Call or put
        option_type: OptionType,
    },
    /// Knock-in or knock-out barrier option.
    Barrier {
        /// Call or put
        option_type: OptionType,
        /// Barrier level
        barrier_level: f64,
        /// Direction and knock type
        barrier_type: BarrierType,
    },
}

impl PayoffSpec {
    /// Creates a European specification.
    #[inline]
    pub fn european(option_type: OptionType) -> Self {
        PayoffSpec::European { option_type }
    }

    /// Creates an arithmetic Asian specification.
    #[inline]
    pub fn asian(option_type: OptionType) -> Self {
        PayoffSpec::Asian { option_type }
    }

    /// Creates a floating-strike lookback specification.
    #[inline]
    pub fn lookback(option_type: OptionType) -> Self {
        PayoffSpec::Lookback { option_type }
    }

    /// Creates a barrier specification.
    #[inline]
    pub fn barrier(option_type: OptionType, barrier_level: f64, barrier_type: BarrierType) -> Self {
        PayoffSpec::Barrier {
            option_type,
            barrier_level,
            barrier_type,
        }
    }

    /// Returns the call/put flag.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        match self {
            PayoffSpec::European { option_type }
            | PayoffSpec::Asian { option_type }
            | PayoffSpec::Lookback { option_type }
            | PayoffSpec::Barrier { option_type, .. } => *option_type,
        }
    }

    /// Returns the payoff family.
    #[inline]
    pub fn kind(&self) -> PayoffKind {
        match self {
            PayoffSpec::European { .. } => PayoffKind::European,
            PayoffSpec::Asian { .. } => PayoffKind::Asian,
            PayoffSpec::Lookback { .. } => PayoffKind::Lookback,
            PayoffSpec::Barrier { .. } => PayoffKind::Barrier,
        }
    }

    /// Returns whether the payoff needs a strike. Lookbacks use the path
    /// extremum as their effective strike.
    #[inline]
    pub fn requires_strike(&self) -> bool {
        !matches!(self, PayoffSpec::Lookback { .. })
    }

    /// Returns whether the payoff depends on the path beyond its terminal sample.
    #[inline]
    pub fn is_path_dependent(&self) -> bool {
        !matches!(self, PayoffSpec::European { .. })
    }
}

impl fmt::Display for PayoffSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayoffSpec::Barrier {
                option_type,
                barrier_level,
                barrier_type,
            } => write!(f, "{} {} @ {}", barrier_type, option_type, barrier_level),
            other => write!(f, "{} {}", other.kind(), other.option_type()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_type_sign() {
        assert_eq!(OptionType::Call.sign(), 1.0);
        assert_eq!(OptionType::Put.sign(), -1.0);
    }

    #[test]
    fn test_intrinsic() {
        assert_eq!(OptionType::Call.intrinsic(110.0, 100.0), 10.0);
        assert_eq!(OptionType::Call.intrinsic(90.0, 100.0), 0.0);
        assert_eq!(OptionType::Put.intrinsic(90.0, 100.0), 10.0);
        assert_eq!(OptionType::Put.intrinsic(110.0, 100.0), 0.0);
    }

    #[test]
    fn test_option_type_parse() {
        assert_eq!("call".parse::<OptionType>().unwrap(), OptionType::Call);
        assert_eq!(" Put ".parse::<OptionType>().unwrap(), OptionType::Put);
        assert_eq!("c".parse::<OptionType>().unwrap(), OptionType::Call);
    }

    #[test]
    fn test_option_type_parse_rejects_unknown() {
        let err = "binary".parse::<OptionType>().unwrap_err();
        assert!(matches!(err, PricingError::InvalidSpecification(_)));
        assert!(err.to_string().contains("binary"));

        // No silent default to call
        assert!("".parse::<OptionType>().is_err());
    }

    #[test]
    fn test_option_type_display_round_trip() {
        for option_type in [OptionType::Call, OptionType::Put] {
            let parsed: OptionType = option_type.to_string().parse().unwrap();
            assert_eq!(parsed, option_type);
        }
    }

    #[test]
    fn test_payoff_kind_parse() {
        assert_eq!("Asian".parse::<PayoffKind>().unwrap(), PayoffKind::Asian);
        assert_eq!("vanilla".parse::<PayoffKind>().unwrap(), PayoffKind::European);
        assert!(matches!(
            "digital".parse::<PayoffKind>(),
            Err(PricingError::InvalidSpecification(_))
        ));
    }

    #[test]
    fn test_requires_strike() {
        assert!(PayoffSpec::european(OptionType::Call).requires_strike());
        assert!(PayoffSpec::asian(OptionType::Put).requires_strike());
        assert!(!PayoffSpec::lookback(OptionType::Call).requires_strike());
        assert!(PayoffSpec::barrier(OptionType::Call, 120.0, BarrierType::UpOut).requires_strike());
    }

    #[test]
    fn test_spec_accessors() {
        let spec = PayoffSpec::barrier(OptionType::Put, 80.0, BarrierType::DownIn);
        assert_eq!(spec.option_type(), OptionType::Put);
        assert_eq!(spec.kind(), PayoffKind::Barrier);
        assert!(spec.is_path_dependent());
        assert!(!PayoffSpec::european(OptionType::Put).is_path_dependent());
    }

    #[test]
    fn test_spec_display() {
        let spec = PayoffSpec::barrier(OptionType::Call, 120.0, BarrierType::UpOut);
        assert_eq!(spec.to_string(), "up-and-out call @ 120");
        assert_eq!(PayoffSpec::asian(OptionType::Put).to_string(), "asian put");
    }
}
