//! # Pricer Risk (L4: Application)
//!
//! Statistics over return series, a cash-and-positions ledger and a
//! backtesting loop that drives a pluggable strategy over dated price rows.
//!
//! This crate provides:
//! - [`metrics`]: VaR, CVaR, Sharpe, Sortino, beta, historical volatility
//!   and risk-adjusted return
//! - [`portfolio`]: [`Portfolio`] with cash accounting
//! - [`backtest`]: the [`Strategy`] trait and the [`Backtester`] loop
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            pricer_risk (L4)             │
//! ├─────────────────────────────────────────┤
//! │  metrics/    - return statistics        │
//! │  portfolio/  - cash + position ledger   │
//! │  backtest/   - Strategy, Backtester     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use pricer_risk::backtest::{Backtester, BuyAndHold, MarketRow};
//! use pricer_risk::portfolio::Portfolio;
//!
//! let rows = vec![
//!     MarketRow::new(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()).with_price("SPY", 100.0),
//!     MarketRow::new(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()).with_price("SPY", 110.0),
//! ];
//!
//! let mut backtester = Backtester::new(Portfolio::new(1_000.0), BuyAndHold::new("SPY", 5.0));
//! let report = backtester.run(&rows).unwrap();
//!
//! assert_eq!(report.final_value(), Some(1_050.0));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod backtest;
pub mod error;
pub mod metrics;
pub mod portfolio;

pub use backtest::{BacktestReport, Backtester, MarketRow, Strategy};
pub use error::RiskError;
pub use portfolio::Portfolio;
