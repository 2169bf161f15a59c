//! Cash-and-positions ledger.
//!
//! Buying debits cash by `quantity * price` and selling credits it; the cash
//! balance may go negative (no financing constraint is enforced).

use std::collections::BTreeMap;

use crate::error::RiskError;

/// Starting cash used by [`Portfolio::default`].
pub const DEFAULT_INITIAL_CASH: f64 = 100_000.0;

/// Position ledger with a single cash balance.
///
/// Positions are keyed by asset identifier and kept in a `BTreeMap` so that
/// iteration and valuation order are deterministic.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use pricer_risk::portfolio::Portfolio;
///
/// let mut portfolio = Portfolio::new(10_000.0);
/// portfolio.add_position("AAPL", 10.0, 150.0).unwrap();
/// assert_eq!(portfolio.cash(), 8_500.0);
///
/// let prices = BTreeMap::from([("AAPL".to_string(), 160.0)]);
/// assert_eq!(portfolio.value(&prices), 10_100.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Portfolio {
    cash: f64,
    positions: BTreeMap<String, f64>,
}

impl Default for Portfolio {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_CASH)
    }
}

impl Portfolio {
    /// Creates an empty portfolio holding `initial_cash`.
    pub fn new(initial_cash: f64) -> Self {
        Self {
            cash: initial_cash,
            positions: BTreeMap::new(),
        }
    }

    /// Returns the cash balance.
    #[inline]
    pub fn cash(&self) -> f64 {
        self.cash
    }

    /// Returns the quantity held of `asset`, zero when absent.
    pub fn position(&self, asset: &str) -> f64 {
        self.positions.get(asset).copied().unwrap_or(0.0)
    }

    /// Iterates over open positions in asset order.
    pub fn positions(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.positions.iter().map(|(asset, &qty)| (asset.as_str(), qty))
    }

    /// Buys `quantity` of `asset` at `price`.
    ///
    /// # Errors
    /// `InvalidParameter` if `quantity` is not positive or `price` is
    /// negative or not finite.
    pub fn add_position(&mut self, asset: &str, quantity: f64, price: f64) -> Result<(), RiskError> {
        validate_trade(quantity, price)?;
        *self.positions.entry(asset.to_string()).or_insert(0.0) += quantity;
        self.cash -= quantity * price;
        Ok(())
    }

    /// Sells `quantity` of `asset` at `price`.
    ///
    /// A position sold down to zero is removed from the ledger.
    ///
    /// # Errors
    /// - `InvalidParameter` as for [`add_position`](Self::add_position)
    /// - `InsufficientQuantity` if less than `quantity` is held
    pub fn remove_position(
        &mut self,
        asset: &str,
        quantity: f64,
        price: f64,
    ) -> Result<(), RiskError> {
        validate_trade(quantity, price)?;

        let held = self.position(asset);
        if held < quantity {
            return Err(RiskError::InsufficientQuantity {
                asset: asset.to_string(),
                held,
                requested: quantity,
            });
        }

        let remaining = held - quantity;
        if remaining == 0.0 {
            self.positions.remove(asset);
        } else {
            self.positions.insert(asset.to_string(), remaining);
        }
        self.cash += quantity * price;
        Ok(())
    }

    /// Marks the portfolio to market.
    ///
    /// Assets without a quoted price contribute zero.
    pub fn value(&self, prices: &BTreeMap<String, f64>) -> f64 {
        self.cash
            + self
                .positions
                .iter()
                .map(|(asset, qty)| qty * prices.get(asset).copied().unwrap_or(0.0))
                .sum::<f64>()
    }
}

fn validate_trade(quantity: f64, price: f64) -> Result<(), RiskError> {
    if !(quantity.is_finite() && quantity > 0.0) {
        return Err(RiskError::InvalidParameter(format!(
            "quantity must be positive and finite, got {}",
            quantity
        )));
    }
    if !(price.is_finite() && price >= 0.0) {
        return Err(RiskError::InvalidParameter(format!(
            "price must be non-negative and finite, got {}",
            price
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prices(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
        entries.iter().map(|(a, p)| (a.to_string(), *p)).collect()
    }

    #[test]
    fn test_default_cash() {
        let portfolio = Portfolio::default();
        assert_eq!(portfolio.cash(), DEFAULT_INITIAL_CASH);
        assert_eq!(portfolio.positions().count(), 0);
    }

    #[test]
    fn test_add_accumulates_and_debits_cash() {
        let mut portfolio = Portfolio::new(1_000.0);
        portfolio.add_position("A", 2.0, 100.0).unwrap();
        portfolio.add_position("A", 3.0, 50.0).unwrap();

        assert_eq!(portfolio.position("A"), 5.0);
        assert_eq!(portfolio.cash(), 650.0);
    }

    #[test]
    fn test_cash_may_go_negative() {
        let mut portfolio = Portfolio::new(100.0);
        portfolio.add_position("A", 10.0, 50.0).unwrap();
        assert_eq!(portfolio.cash(), -400.0);
    }

    #[test]
    fn test_remove_credits_cash() {
        let mut portfolio = Portfolio::new(1_000.0);
        portfolio.add_position("A", 4.0, 100.0).unwrap();
        portfolio.remove_position("A", 1.0, 120.0).unwrap();

        assert_eq!(portfolio.position("A"), 3.0);
        assert_eq!(portfolio.cash(), 720.0);
    }

    #[test]
    fn test_remove_to_zero_drops_position() {
        let mut portfolio = Portfolio::new(0.0);
        portfolio.add_position("A", 1.0, 10.0).unwrap();
        portfolio.remove_position("A", 1.0, 10.0).unwrap();
        assert_eq!(portfolio.positions().count(), 0);
        assert_eq!(portfolio.cash(), 0.0);
    }

    #[test]
    fn test_remove_insufficient_quantity() {
        let mut portfolio = Portfolio::new(1_000.0);
        portfolio.add_position("A", 2.0, 10.0).unwrap();
        let before = portfolio.clone();

        let err = portfolio.remove_position("A", 3.0, 10.0).unwrap_err();
        assert_eq!(
            err,
            RiskError::InsufficientQuantity {
                asset: "A".to_string(),
                held: 2.0,
                requested: 3.0,
            }
        );
        assert_eq!(portfolio, before);

        assert!(matches!(
            portfolio.remove_position("B", 1.0, 10.0),
            Err(RiskError::InsufficientQuantity { .. })
        ));
    }

    #[test]
    fn test_invalid_trades_rejected() {
        let mut portfolio = Portfolio::new(1_000.0);
        assert!(portfolio.add_position("A", 0.0, 10.0).is_err());
        assert!(portfolio.add_position("A", -1.0, 10.0).is_err());
        assert!(portfolio.add_position("A", 1.0, f64::NAN).is_err());
        assert_eq!(portfolio.cash(), 1_000.0);
    }

    #[test]
    fn test_value_missing_price_counts_zero() {
        let mut portfolio = Portfolio::new(500.0);
        portfolio.add_position("A", 2.0, 100.0).unwrap();
        portfolio.add_position("B", 1.0, 100.0).unwrap();

        assert_eq!(portfolio.value(&prices(&[("A", 110.0)])), 420.0);
        assert_eq!(portfolio.value(&prices(&[("A", 110.0), ("B", 90.0)])), 510.0);
    }
}
