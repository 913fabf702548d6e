//! Portfolio — cash plus all open positions.

use super::position::Position;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Aggregate portfolio state.
///
/// Created once at run start with cash = starting capital and no positions,
/// exclusively owned by one simulation run, and mutated only by the order
/// executor. Cash is not guarded against going negative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    pub cash: f64,
    pub initial_capital: f64,
    pub positions: HashMap<String, Position>,
}

impl Portfolio {
    pub fn new(initial_capital: f64) -> Self {
        Self {
            cash: initial_capital,
            initial_capital,
            positions: HashMap::new(),
        }
    }

    /// Signed quantity held in `symbol` (0.0 when no entry exists).
    pub fn quantity(&self, symbol: &str) -> f64 {
        self.positions.get(symbol).map_or(0.0, |p| p.quantity)
    }

    /// Whether a symbol has a non-flat position.
    pub fn has_position(&self, symbol: &str) -> bool {
        self.positions.get(symbol).is_some_and(|p| !p.is_flat())
    }

    /// Get a position by symbol (if it exists and is not flat).
    pub fn get_position(&self, symbol: &str) -> Option<&Position> {
        self.positions.get(symbol).filter(|p| !p.is_flat())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_portfolio_is_all_cash() {
        let portfolio = Portfolio::new(10_000.0);
        assert_eq!(portfolio.cash, 10_000.0);
        assert_eq!(portfolio.initial_capital, 10_000.0);
        assert!(portfolio.positions.is_empty());
    }

    #[test]
    fn quantity_defaults_to_zero() {
        let portfolio = Portfolio::new(10_000.0);
        assert_eq!(portfolio.quantity("AAPL"), 0.0);
        assert!(!portfolio.has_position("AAPL"));
    }

    #[test]
    fn has_position_ignores_flat_entries() {
        let mut portfolio = Portfolio::new(10_000.0);
        portfolio
            .positions
            .insert("AAPL".into(), Position::long(0.0));
        assert!(!portfolio.has_position("AAPL"));
        assert!(portfolio.get_position("AAPL").is_none());
    }
}
