//! Barrier monitoring policy.
//!
//! Each [`BarrierType`] maps to one row of a fixed table: which path
//! extremum to watch and whether crossing the level activates or cancels the
//! option. The row is looked up once per pricing call.
//!
//! | Type         | Extremum | Crossed when | Pays when   |
//! |--------------|----------|--------------|-------------|
//! | up-and-in    | max      | max >= B     | crossed     |
//! | up-and-out   | max      | max >= B     | not crossed |
//! | down-and-in  | min      | min <= B     | crossed     |
//! | down-and-out | min      | min <= B     | not crossed |
//!
//! Monitoring is discrete: only grid samples are compared with the level, so
//! a crossing between two samples goes unseen. Knock-out values are biased
//! upwards (and knock-in values downwards) by an amount that shrinks as the
//! step count grows.

use pricer_core::types::PricingError;
use pricer_models::instruments::{BarrierType, KnockType};

use super::observer::PathObserver;

/// Path statistic a barrier is compared against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extremum {
    /// Running maximum (up barriers)
    Maximum,
    /// Running minimum (down barriers)
    Minimum,
}

impl Extremum {
    /// Reads this statistic from `observer`.
    #[inline]
    pub fn read(self, observer: &PathObserver) -> f64 {
        match self {
            Extremum::Maximum => observer.maximum(),
            Extremum::Minimum => observer.minimum(),
        }
    }
}

/// Resolved barrier rule.
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::BarrierType;
/// use pricer_pricing::path_dependent::{BarrierPolicy, PathObserver};
///
/// let policy = BarrierPolicy::new(BarrierType::UpOut, 120.0).unwrap();
/// let touched = PathObserver::from_path(&[100.0, 120.0, 110.0]);
/// let clear = PathObserver::from_path(&[100.0, 119.9, 110.0]);
///
/// assert!(!policy.is_active(&touched));
/// assert!(policy.is_active(&clear));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarrierPolicy {
    extremum: Extremum,
    level: f64,
    knock: KnockType,
}

impl BarrierPolicy {
    /// Looks up the rule for `barrier_type` at `level`.
    ///
    /// # Errors
    /// `PricingError::InvalidModelParameters` if `level` is not positive and finite.
    pub fn new(barrier_type: BarrierType, level: f64) -> Result<Self, PricingError> {
        if !(level.is_finite() && level > 0.0) {
            return Err(PricingError::model(format!(
                "barrier level must be positive and finite, got {}",
                level
            )));
        }

        let (extremum, knock) = match barrier_type {
            BarrierType::UpIn => (Extremum::Maximum, KnockType::In),
            BarrierType::UpOut => (Extremum::Maximum, KnockType::Out),
            BarrierType::DownIn => (Extremum::Minimum, KnockType::In),
            BarrierType::DownOut => (Extremum::Minimum, KnockType::Out),
        };

        Ok(Self {
            extremum,
            level,
            knock,
        })
    }

    /// Returns the barrier level.
    #[inline]
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Returns the monitored extremum.
    #[inline]
    pub fn extremum(&self) -> Extremum {
        self.extremum
    }

    /// Returns the knock type.
    #[inline]
    pub fn knock(&self) -> KnockType {
        self.knock
    }

    /// Returns whether the path reached the barrier at some grid point.
    #[inline]
    pub fn is_crossed(&self, observer: &PathObserver) -> bool {
        match self.extremum {
            Extremum::Maximum => observer.maximum() >= self.level,
            Extremum::Minimum => observer.minimum() <= self.level,
        }
    }

    /// Returns whether the option pays on this path.
    #[inline]
    pub fn is_active(&self, observer: &PathObserver) -> bool {
        match self.knock {
            KnockType::In => self.is_crossed(observer),
            KnockType::Out => !self.is_crossed(observer),
        }
    }
}
