//! Backtesting loop.
//!
//! A [`Backtester`] owns a [`Portfolio`] and a [`Strategy`]. [`Backtester::run`]
//! hands each [`MarketRow`] to the strategy in date order and marks the
//! portfolio to market after every row.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::RiskError;
use crate::portfolio::Portfolio;

/// One dated row of closing prices.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketRow {
    /// Observation date
    pub date: NaiveDate,
    /// Price per asset identifier
    pub prices: BTreeMap<String, f64>,
}

impl MarketRow {
    /// Creates a row with no prices.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            prices: BTreeMap::new(),
        }
    }

    /// Adds a price, builder style.
    pub fn with_price(mut self, asset: &str, price: f64) -> Self {
        self.prices.insert(asset.to_string(), price);
        self
    }

    /// Returns the price of `asset` on this row.
    pub fn price(&self, asset: &str) -> Option<f64> {
        self.prices.get(asset).copied()
    }
}

/// Trading rule invoked once per row.
///
/// Closures with the matching signature implement the trait directly.
pub trait Strategy {
    /// Reacts to `row`, trading through `portfolio`.
    ///
    /// # Errors
    /// Any error aborts the backtest and is returned from [`Backtester::run`].
    fn execute(&mut self, portfolio: &mut Portfolio, row: &MarketRow) -> Result<(), RiskError>;
}

impl<F> Strategy for F
where
    F: FnMut(&mut Portfolio, &MarketRow) -> Result<(), RiskError>,
{
    fn execute(&mut self, portfolio: &mut Portfolio, row: &MarketRow) -> Result<(), RiskError> {
        self(portfolio, row)
    }
}

/// Buys a fixed quantity on the first row quoting the asset and holds it.
#[derive(Debug, Clone)]
pub struct BuyAndHold {
    asset: String,
    quantity: f64,
    invested: bool,
}

impl BuyAndHold {
    /// Creates the strategy for `quantity` units of `asset`.
    pub fn new(asset: &str, quantity: f64) -> Self {
        Self {
            asset: asset.to_string(),
            quantity,
            invested: false,
        }
    }
}

impl Strategy for BuyAndHold {
    fn execute(&mut self, portfolio: &mut Portfolio, row: &MarketRow) -> Result<(), RiskError> {
        if self.invested {
            return Ok(());
        }
        if let Some(price) = row.price(&self.asset) {
            portfolio.add_position(&self.asset, self.quantity, price)?;
            self.invested = true;
        }
        Ok(())
    }
}

/// Portfolio value recorded after a row was processed.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ValuationPoint {
    /// Row date
    pub date: NaiveDate,
    /// Mark-to-market value after the strategy ran
    pub value: f64,
}

/// Outcome of a backtest run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BacktestReport {
    initial_value: f64,
    points: Vec<ValuationPoint>,
}

impl BacktestReport {
    /// Portfolio value before the first row, at that row's prices.
    pub fn initial_value(&self) -> f64 {
        self.initial_value
    }

    /// Valuations, one per row.
    pub fn points(&self) -> &[ValuationPoint] {
        &self.points
    }

    /// Value after the last row, `None` for an empty run.
    pub fn final_value(&self) -> Option<f64> {
        self.points.last().map(|p| p.value)
    }

    /// Simple returns between consecutive valuations, starting from
    /// [`initial_value`](Self::initial_value).
    ///
    /// A zero starting value yields no return for that period.
    pub fn returns(&self) -> Vec<f64> {
        std::iter::once(self.initial_value)
            .chain(self.points.iter().map(|p| p.value))
            .collect::<Vec<_>>()
            .windows(2)
            .filter(|w| w[0] != 0.0)
            .map(|w| w[1] / w[0] - 1.0)
            .collect()
    }

    /// Return over the whole run, `None` for an empty run or a zero start.
    pub fn total_return(&self) -> Option<f64> {
        match self.final_value() {
            Some(last) if self.initial_value != 0.0 => Some(last / self.initial_value - 1.0),
            _ => None,
        }
    }
}

/// Drives a strategy over historical rows.
#[derive(Debug)]
pub struct Backtester<S: Strategy> {
    portfolio: Portfolio,
    strategy: S,
}

impl<S: Strategy> Backtester<S> {
    /// Creates a backtester from a starting portfolio and a strategy.
    pub fn new(portfolio: Portfolio, strategy: S) -> Self {
        Self {
            portfolio,
            strategy,
        }
    }

    /// Returns the current portfolio.
    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    /// Consumes the backtester, returning its portfolio and strategy.
    pub fn into_parts(self) -> (Portfolio, S) {
        (self.portfolio, self.strategy)
    }

    /// Runs the strategy over `rows`.
    ///
    /// The portfolio persists across calls, so a second run continues from
    /// the state the first one left.
    ///
    /// # Errors
    /// - `InvalidParameter` if a row's date precedes the previous row's
    /// - any error the strategy returns; rows before it stay applied
    pub fn run(&mut self, rows: &[MarketRow]) -> Result<BacktestReport, RiskError> {
        for pair in rows.windows(2) {
            if pair[1].date < pair[0].date {
                return Err(RiskError::InvalidParameter(format!(
                    "rows out of order: {} follows {}",
                    pair[1].date, pair[0].date
                )));
            }
        }

        let initial_value = rows
            .first()
            .map_or(self.portfolio.cash(), |row| self.portfolio.value(&row.prices));

        let mut points = Vec::with_capacity(rows.len());
        for row in rows {
            self.strategy.execute(&mut self.portfolio, row)?;
            let value = self.portfolio.value(&row.prices);
            debug!(date = %row.date, value, cash = self.portfolio.cash(), "backtest row");
            points.push(ValuationPoint {
                date: row.date,
                value,
            });
        }

        Ok(BacktestReport {
            initial_value,
            points,
        })
    }
}
