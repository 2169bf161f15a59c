//! Return-series statistics.
//!
//! All functions take periodic returns as a slice and use population
//! moments unless stated otherwise. Empty input and zero denominators are
//! reported as [`RiskError`] rather than producing `NaN` or infinities.
//!
//! # Examples
//!
//! ```
//! use pricer_risk::metrics::{conditional_value_at_risk, value_at_risk};
//!
//! let returns = [-0.05, -0.03, -0.02, -0.01, 0.0, 0.01, 0.02, 0.03, 0.04, 0.05];
//! let var = value_at_risk(&returns, 0.95).unwrap();
//! let cvar = conditional_value_at_risk(&returns, 0.95).unwrap();
//!
//! assert!((var - (-0.041)).abs() < 1e-12);
//! assert!(cvar <= var);
//! ```

use crate::error::RiskError;

/// Trading days used to annualise daily volatility.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

fn require_non_empty(returns: &[f64], what: &str) -> Result<(), RiskError> {
    if returns.is_empty() {
        return Err(RiskError::EmptyInput(format!("{} needs at least one return", what)));
    }
    Ok(())
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_variance(values: &[f64]) -> f64 {
    let m = mean(values);
    values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64
}

/// Percentile with linear interpolation between closest ranks.
///
/// `quantile` is in `[0, 1]`; the rank is `quantile * (n - 1)` over the
/// sorted sample.
fn percentile(values: &[f64], quantile: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let rank = quantile * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;

    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

/// Historical Value at Risk.
///
/// Returns the `1 - confidence` percentile of the return distribution, so a
/// loss shows up as a negative number.
///
/// # Errors
/// - `EmptyInput` for an empty series
/// - `InvalidParameter` unless `0 < confidence < 1`
pub fn value_at_risk(returns: &[f64], confidence: f64) -> Result<f64, RiskError> {
    require_non_empty(returns, "value at risk")?;
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(RiskError::InvalidParameter(format!(
            "confidence {} must lie in (0, 1)",
            confidence
        )));
    }
    Ok(percentile(returns, 1.0 - confidence))
}

/// Conditional Value at Risk (expected shortfall).
///
/// Mean of every return at or below [`value_at_risk`]. The tail is never
/// empty because the sample minimum always qualifies.
///
/// # Errors
/// Same as [`value_at_risk`].
pub fn conditional_value_at_risk(returns: &[f64], confidence: f64) -> Result<f64, RiskError> {
    let var = value_at_risk(returns, confidence)?;
    let tail: Vec<f64> = returns.iter().copied().filter(|&r| r <= var).collect();
    Ok(mean(&tail))
}

/// Sharpe ratio of excess returns over the population standard deviation.
///
/// # Errors
/// - `EmptyInput` for an empty series
/// - `ZeroDenominator` for a constant series
pub fn sharpe_ratio(returns: &[f64], risk_free_rate: f64) -> Result<f64, RiskError> {
    require_non_empty(returns, "Sharpe ratio")?;
    let excess: Vec<f64> = returns.iter().map(|r| r - risk_free_rate).collect();
    let std_dev = population_variance(&excess).sqrt();
    if std_dev == 0.0 {
        return Err(RiskError::ZeroDenominator(
            "Sharpe ratio of a constant series".to_string(),
        ));
    }
    Ok(mean(&excess) / std_dev)
}

/// Sortino ratio: mean excess return over downside deviation.
///
/// Downside deviation is `sqrt(mean(min(excess, 0)^2))` taken over the full
/// sample, not just the negative observations.
///
/// # Errors
/// - `EmptyInput` for an empty series
/// - `ZeroDenominator` when no excess return is negative
pub fn sortino_ratio(returns: &[f64], risk_free_rate: f64) -> Result<f64, RiskError> {
    require_non_empty(returns, "Sortino ratio")?;
    let excess: Vec<f64> = returns.iter().map(|r| r - risk_free_rate).collect();
    let downside = excess
        .iter()
        .map(|e| e.min(0.0).powi(2))
        .sum::<f64>()
        / excess.len() as f64;
    if downside == 0.0 {
        return Err(RiskError::ZeroDenominator(
            "Sortino ratio without downside returns".to_string(),
        ));
    }
    Ok(mean(&excess) / downside.sqrt())
}

/// Market beta of a portfolio.
///
/// The covariance uses the sample (`n - 1`) denominator while the market
/// variance uses the population (`n`) denominator, so for a portfolio that
/// is an exact multiple `k` of the market the result is `k * n / (n - 1)`.
///
/// # Errors
/// - `LengthMismatch` when the series differ in length
/// - `EmptyInput` for fewer than two observations
/// - `ZeroDenominator` for a constant market series
pub fn beta(portfolio_returns: &[f64], market_returns: &[f64]) -> Result<f64, RiskError> {
    if portfolio_returns.len() != market_returns.len() {
        return Err(RiskError::LengthMismatch {
            left: portfolio_returns.len(),
            right: market_returns.len(),
        });
    }
    let n = market_returns.len();
    if n < 2 {
        return Err(RiskError::EmptyInput(format!(
            "beta needs at least two observations, got {}",
            n
        )));
    }

    let market_variance = population_variance(market_returns);
    if market_variance == 0.0 {
        return Err(RiskError::ZeroDenominator(
            "beta against a constant market series".to_string(),
        ));
    }

    let mean_p = mean(portfolio_returns);
    let mean_m = mean(market_returns);
    let covariance = portfolio_returns
        .iter()
        .zip(market_returns)
        .map(|(p, m)| (p - mean_p) * (m - mean_m))
        .sum::<f64>()
        / (n - 1) as f64;

    Ok(covariance / market_variance)
}

/// Population standard deviation of returns, optionally scaled by
/// `sqrt(252)`.
///
/// # Errors
/// `EmptyInput` for an empty series.
pub fn historical_volatility(returns: &[f64], annualised: bool) -> Result<f64, RiskError> {
    require_non_empty(returns, "historical volatility")?;
    let volatility = population_variance(returns).sqrt();
    Ok(if annualised {
        volatility * TRADING_DAYS_PER_YEAR.sqrt()
    } else {
        volatility
    })
}

/// Mean return less the risk-free rate.
///
/// # Errors
/// `EmptyInput` for an empty series.
pub fn adjusted_return(returns: &[f64], risk_free_rate: f64) -> Result<f64, RiskError> {
    require_non_empty(returns, "adjusted return")?;
    Ok(mean(returns) - risk_free_rate)
}

/// Summary of the standard statistics over one return series.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RiskSummary {
    /// Value at Risk at the summary's confidence
    pub value_at_risk: f64,
    /// Conditional Value at Risk at the summary's confidence
    pub conditional_value_at_risk: f64,
    /// Sharpe ratio, `None` for a constant series
    pub sharpe_ratio: Option<f64>,
    /// Sortino ratio, `None` without downside returns
    pub sortino_ratio: Option<f64>,
    /// Annualised historical volatility
    pub annualised_volatility: f64,
    /// Mean return less the risk-free rate
    pub adjusted_return: f64,
}

impl RiskSummary {
    /// Computes every statistic over `returns`.
    ///
    /// Ratios whose denominator vanishes are reported as `None` instead of
    /// failing the whole summary.
    ///
    /// # Errors
    /// `EmptyInput` for an empty series, `InvalidParameter` for a confidence
    /// outside `(0, 1)`.
    pub fn from_returns(
        returns: &[f64],
        confidence: f64,
        risk_free_rate: f64,
    ) -> Result<Self, RiskError> {
        Ok(Self {
            value_at_risk: value_at_risk(returns, confidence)?,
            conditional_value_at_risk: conditional_value_at_risk(returns, confidence)?,
            sharpe_ratio: optional_ratio(sharpe_ratio(returns, risk_free_rate))?,
            sortino_ratio: optional_ratio(sortino_ratio(returns, risk_free_rate))?,
            annualised_volatility: historical_volatility(returns, true)?,
            adjusted_return: adjusted_return(returns, risk_free_rate)?,
        })
    }
}

fn optional_ratio(result: Result<f64, RiskError>) -> Result<Option<f64>, RiskError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(RiskError::ZeroDenominator(_)) => Ok(None),
        Err(err) => Err(err),
    }
}
