//! Order — an immutable trading intent issued by a strategy.

use serde::{Deserialize, Serialize};

/// Which way the order goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

/// How much to transact, in cash terms.
///
/// `All` spends all available cash on a buy and liquidates the whole
/// position on a sell. A `Notional` with a negative amount on a sell against
/// a flat position expresses short-open intent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Size {
    All,
    Notional(f64),
}

/// A single trading intent: side, instrument, and size.
///
/// Orders are immutable once issued; the executor never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub side: OrderSide,
    pub symbol: String,
    pub size: Size,
}

impl Order {
    /// Buy with all available cash.
    pub fn buy_all(symbol: impl Into<String>) -> Self {
        Self {
            side: OrderSide::Buy,
            symbol: symbol.into(),
            size: Size::All,
        }
    }

    /// Buy a fixed notional amount of cash.
    pub fn buy(symbol: impl Into<String>, notional: f64) -> Self {
        Self {
            side: OrderSide::Buy,
            symbol: symbol.into(),
            size: Size::Notional(notional),
        }
    }

    /// Sell the whole position (or close an open short in full).
    pub fn sell_all(symbol: impl Into<String>) -> Self {
        Self {
            side: OrderSide::Sell,
            symbol: symbol.into(),
            size: Size::All,
        }
    }

    /// Sell a fixed notional amount of cash.
    pub fn sell(symbol: impl Into<String>, notional: f64) -> Self {
        Self {
            side: OrderSide::Sell,
            symbol: symbol.into(),
            size: Size::Notional(notional),
        }
    }

    /// Open a short worth `notional` cash, expressed as a sell with negative
    /// notional against a flat position. To short the whole bankroll, pass
    /// the portfolio's current cash.
    pub fn short(symbol: impl Into<String>, notional: f64) -> Self {
        Self {
            side: OrderSide::Sell,
            symbol: symbol.into(),
            size: Size::Notional(-notional.abs()),
        }
    }
}
