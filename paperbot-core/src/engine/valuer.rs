//! Portfolio valuation and the buy-and-hold baseline.

use crate::domain::{Portfolio, Symbol};
use std::collections::HashMap;

/// Mark the portfolio to the supplied prices.
///
/// worth = cash + sum over non-flat positions of
/// - long: quantity * price
/// - short: quantity * (cost_basis - price) + quantity * cost_basis
///
/// The short term jointly encodes the cash debited at open and the
/// mark-to-market move; the executor's round trips only balance with it
/// intact (see DESIGN.md).
pub fn portfolio_worth(portfolio: &Portfolio, prices: &HashMap<Symbol, f64>) -> f64 {
    let position_value: f64 = portfolio
        .positions
        .iter()
        .filter(|(_, pos)| !pos.is_flat())
        .map(|(symbol, pos)| {
            let price = prices.get(symbol).copied().unwrap_or(0.0);
            if pos.is_long() {
                pos.quantity * price
            } else {
                let cost_basis = pos.cost_basis.unwrap_or(price);
                pos.quantity * (cost_basis - price) + pos.quantity * cost_basis
            }
        })
        .sum();
    portfolio.cash + position_value
}

/// Static equal-weight buy-and-hold allocation, never rebalanced.
///
/// Fixed at construction from the first common timestamp's prices and
/// re-valued at each step's prices for comparison against the equity curve.
/// Frictionless by definition — it is a reference line, not a trade.
#[derive(Debug, Clone)]
pub struct Baseline {
    shares: HashMap<Symbol, f64>,
}

impl Baseline {
    /// Split `capital` equally across the instruments at their first prices.
    pub fn equal_weight(capital: f64, first_prices: &HashMap<Symbol, f64>) -> Self {
        let allocation = capital / first_prices.len().max(1) as f64;
        let shares = first_prices
            .iter()
            .map(|(symbol, &price)| (symbol.clone(), allocation / price))
            .collect();
        Self { shares }
    }

    /// Value the fixed allocation at the supplied prices.
    pub fn value(&self, prices: &HashMap<Symbol, f64>) -> f64 {
        self.shares
            .iter()
            .map(|(symbol, qty)| qty * prices.get(symbol).copied().unwrap_or(0.0))
            .sum()
    }
}
