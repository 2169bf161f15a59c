//! Payoff resolution and per-path evaluation.

use pricer_core::types::PricingError;
use pricer_models::instruments::PayoffSpec;
use rayon::prelude::*;

use super::barrier::{BarrierPolicy, Extremum};
use super::observer::PathObserver;
use crate::mc::PathEnsemble;

/// A payoff specification with its tags turned into numbers.
///
/// Call/put becomes the sign `ω` in `max(ω (x - K), 0)`, a lookback's
/// reference becomes an [`Extremum`] and a barrier becomes a
/// [`BarrierPolicy`]. Resolution runs once per pricing call, and
/// [`evaluate`] dispatches on the variant once per ensemble.
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::{OptionType, PayoffSpec};
/// use pricer_pricing::path_dependent::ResolvedPayoff;
///
/// let asian = ResolvedPayoff::resolve(&PayoffSpec::asian(OptionType::Call), Some(100.0)).unwrap();
/// // Mean of (90, 100, 110, 120) is 105
/// assert_eq!(asian.payoff(&[90.0, 100.0, 110.0, 120.0]), 5.0);
///
/// // Strike-based payoffs refuse to resolve without a strike
/// assert!(ResolvedPayoff::resolve(&PayoffSpec::european(OptionType::Put), None).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ResolvedPayoff {
    /// `max(ω (S_T - K), 0)`
    European {
        /// +1 call, -1 put
        sign: f64,
        /// Strike
        strike: f64,
    },
    /// `max(ω (A - K), 0)` with `A` the mean of every sample
    Asian {
        /// +1 call, -1 put
        sign: f64,
        /// Strike
        strike: f64,
    },
    /// `ω (S_T - R)`: call against the minimum, put against the maximum
    Lookback {
        /// +1 call, -1 put
        sign: f64,
        /// Reference extremum `R`
        reference: Extremum,
    },
    /// European payoff paid only on paths the policy keeps active
    Barrier {
        /// +1 call, -1 put
        sign: f64,
        /// Strike
        strike: f64,
        /// Extremum and knock rule
        policy: BarrierPolicy,
    },
}

impl ResolvedPayoff {
    /// Resolves `spec` against an optional strike.
    ///
    /// A lookback ignores any strike supplied.
    ///
    /// # Errors
    ///
    /// `PricingError::InvalidModelParameters` if a European, Asian or
    /// barrier payoff has no strike, if the strike is not positive and
    /// finite, or if the barrier level is invalid.
    pub fn resolve(spec: &PayoffSpec, strike: Option<f64>) -> Result<Self, PricingError> {
        let sign = spec.option_type().sign();
        let strike = if spec.requires_strike() {
            let strike = strike.ok_or_else(|| {
                PricingError::model(format!("{} payoff requires a strike", spec.kind()))
            })?;
            if !(strike.is_finite() && strike > 0.0) {
                return Err(PricingError::model(format!(
                    "strike must be positive and finite, got {}",
                    strike
                )));
            }
            strike
        } else {
            0.0
        };

        Ok(match *spec {
            PayoffSpec::European { .. } => ResolvedPayoff::European { sign, strike },
            PayoffSpec::Asian { .. } => ResolvedPayoff::Asian { sign, strike },
            PayoffSpec::Lookback { .. } => ResolvedPayoff::Lookback {
                sign,
                reference: if sign > 0.0 {
                    Extremum::Minimum
                } else {
                    Extremum::Maximum
                },
            },
            PayoffSpec::Barrier {
                barrier_level,
                barrier_type,
                ..
            } => ResolvedPayoff::Barrier {
                sign,
                strike,
                policy: BarrierPolicy::new(barrier_type, barrier_level)?,
            },
        })
    }

    /// Computes the undiscounted payoff of one path.
    #[inline]
    pub fn payoff(&self, path: &[f64]) -> f64 {
        let observer = PathObserver::from_path(path);
        self.payoff_from(&observer)
    }

    /// Computes the undiscounted payoff from accumulated path statistics.
    #[inline]
    pub fn payoff_from(&self, observer: &PathObserver) -> f64 {
        match *self {
            ResolvedPayoff::European { sign, strike } => vanilla(sign, strike, observer),
            ResolvedPayoff::Asian { sign, strike } => asian(sign, strike, observer),
            ResolvedPayoff::Lookback { sign, reference } => lookback(sign, reference, observer),
            ResolvedPayoff::Barrier {
                sign,
                strike,
                policy,
            } => barrier(sign, strike, &policy, observer),
        }
    }
}

#[inline]
fn vanilla(sign: f64, strike: f64, observer: &PathObserver) -> f64 {
    (sign * (observer.terminal() - strike)).max(0.0)
}

#[inline]
fn asian(sign: f64, strike: f64, observer: &PathObserver) -> f64 {
    (sign * (observer.arithmetic_average() - strike)).max(0.0)
}

#[inline]
fn lookback(sign: f64, reference: Extremum, observer: &PathObserver) -> f64 {
    (sign * (observer.terminal() - reference.read(observer))).max(0.0)
}

#[inline]
fn barrier(sign: f64, strike: f64, policy: &BarrierPolicy, observer: &PathObserver) -> f64 {
    if policy.is_active(observer) {
        vanilla(sign, strike, observer)
    } else {
        0.0
    }
}

/// Evaluates `payoff` on every path of `ensemble`.
///
/// Returns one undiscounted value per path, in path order. The variant is
/// matched once; each path then runs the arithmetic of that variant only.
pub fn evaluate(ensemble: &PathEnsemble, payoff: &ResolvedPayoff) -> Vec<f64> {
    match *payoff {
        ResolvedPayoff::European { sign, strike } => {
            map_paths(ensemble, |o| vanilla(sign, strike, o))
        }
        ResolvedPayoff::Asian { sign, strike } => map_paths(ensemble, |o| asian(sign, strike, o)),
        ResolvedPayoff::Lookback { sign, reference } => {
            map_paths(ensemble, |o| lookback(sign, reference, o))
        }
        ResolvedPayoff::Barrier {
            sign,
            strike,
            policy,
        } => map_paths(ensemble, |o| barrier(sign, strike, &policy, o)),
    }
}

fn map_paths<F>(ensemble: &PathEnsemble, per_path: F) -> Vec<f64>
where
    F: Fn(&PathObserver) -> f64 + Sync,
{
    ensemble
        .par_paths()
        .map(|path| per_path(&PathObserver::from_path(path)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_models::instruments::{BarrierType, OptionType};

    const PATH: [f64; 5] = [100.0, 115.0, 92.0, 104.0, 108.0];

    fn resolve(spec: PayoffSpec) -> ResolvedPayoff {
        ResolvedPayoff::resolve(&spec, Some(100.0)).unwrap()
    }

    #[test]
    fn test_european() {
        assert_eq!(resolve(PayoffSpec::european(OptionType::Call)).payoff(&PATH), 8.0);
        assert_eq!(resolve(PayoffSpec::european(OptionType::Put)).payoff(&PATH), 0.0);
    }

    #[test]
    fn test_asian_includes_initial_sample() {
        // (100 + 115 + 92 + 104 + 108) / 5 = 103.8
        assert_relative_eq!(
            resolve(PayoffSpec::asian(OptionType::Call)).payoff(&PATH),
            3.8,
            epsilon = 1e-12
        );
        assert_eq!(resolve(PayoffSpec::asian(OptionType::Put)).payoff(&PATH), 0.0);
    }

    #[test]
    fn test_lookback() {
        // Call: 108 - 92, Put: 115 - 108
        assert_eq!(resolve(PayoffSpec::lookback(OptionType::Call)).payoff(&PATH), 16.0);
        assert_eq!(resolve(PayoffSpec::lookback(OptionType::Put)).payoff(&PATH), 7.0);
    }

    #[test]
    fn test_lookback_reference_resolved_once() {
        assert_eq!(
            resolve(PayoffSpec::lookback(OptionType::Call)),
            ResolvedPayoff::Lookback {
                sign: 1.0,
                reference: Extremum::Minimum
            }
        );
        assert_eq!(
            resolve(PayoffSpec::lookback(OptionType::Put)),
            ResolvedPayoff::Lookback {
                sign: -1.0,
                reference: Extremum::Maximum
            }
        );
    }

    #[test]
    fn test_lookback_ignores_strike() {
        let spec = PayoffSpec::lookback(OptionType::Call);
        let without = ResolvedPayoff::resolve(&spec, None).unwrap();
        let with = ResolvedPayoff::resolve(&spec, Some(1_000.0)).unwrap();
        assert_eq!(without.payoff(&PATH), with.payoff(&PATH));
    }

    #[test]
    fn test_barrier_knock_out_and_in() {
        let up_out = resolve(PayoffSpec::barrier(OptionType::Call, 110.0, BarrierType::UpOut));
        let up_in = resolve(PayoffSpec::barrier(OptionType::Call, 110.0, BarrierType::UpIn));
        assert_eq!(up_out.payoff(&PATH), 0.0);
        assert_eq!(up_in.payoff(&PATH), 8.0);

        let down_out = resolve(PayoffSpec::barrier(OptionType::Call, 90.0, BarrierType::DownOut));
        let down_in = resolve(PayoffSpec::barrier(OptionType::Call, 90.0, BarrierType::DownIn));
        assert_eq!(down_out.payoff(&PATH), 8.0);
        assert_eq!(down_in.payoff(&PATH), 0.0);
    }

    #[test]
    fn test_out_of_money_barrier_pays_zero_either_way() {
        let spec = PayoffSpec::barrier(OptionType::Put, 120.0, BarrierType::UpOut);
        assert_eq!(resolve(spec).payoff(&PATH), 0.0);
    }

    #[test]
    fn test_missing_strike() {
        for spec in [
            PayoffSpec::european(OptionType::Call),
            PayoffSpec::asian(OptionType::Call),
            PayoffSpec::barrier(OptionType::Call, 120.0, BarrierType::UpOut),
        ] {
            match ResolvedPayoff::resolve(&spec, None) {
                Err(PricingError::InvalidModelParameters(msg)) => {
                    assert!(msg.contains("requires a strike"))
                }
                other => panic!("expected missing strike error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_invalid_strike_and_barrier() {
        let spec = PayoffSpec::european(OptionType::Call);
        assert!(ResolvedPayoff::resolve(&spec, Some(-1.0)).is_err());

        let spec = PayoffSpec::barrier(OptionType::Call, f64::NAN, BarrierType::DownIn);
        assert!(ResolvedPayoff::resolve(&spec, Some(100.0)).is_err());
    }

    #[test]
    fn test_single_sample_path() {
        let payoff = resolve(PayoffSpec::asian(OptionType::Call));
        assert_eq!(payoff.payoff(&[104.0]), 4.0);
    }
}
