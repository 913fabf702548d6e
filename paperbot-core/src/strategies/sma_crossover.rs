//! Moving-average crossover strategy.
//!
//! Classic trend-following decision rule on one instrument:
//! - fast SMA above slow SMA and flat → buy with all cash
//! - fast SMA below slow SMA and long → sell everything
//!
//! Long-only; it never opens shorts.

use crate::domain::{Order, Portfolio};
use crate::engine::{MarketView, Strategy};
use crate::indicators::sma_close;

#[derive(Debug, Clone)]
pub struct SmaCrossover {
    symbol: String,
    fast_period: usize,
    slow_period: usize,
}

impl SmaCrossover {
    pub fn new(symbol: impl Into<String>, fast_period: usize, slow_period: usize) -> Self {
        assert!(fast_period > 0, "fast_period must be > 0");
        assert!(
            slow_period > fast_period,
            "slow_period must be > fast_period"
        );
        Self {
            symbol: symbol.into(),
            fast_period,
            slow_period,
        }
    }
}

impl Strategy for SmaCrossover {
    fn decide(&mut self, view: &MarketView<'_>, portfolio: &Portfolio, _worth: f64) -> Vec<Order> {
        let Some(history) = view.history(&self.symbol) else {
            return Vec::new();
        };
        let (Some(fast), Some(slow)) = (
            sma_close(history, self.fast_period),
            sma_close(history, self.slow_period),
        ) else {
            return Vec::new(); // not enough history yet
        };

        let quantity = portfolio.quantity(&self.symbol);
        if fast > slow && quantity == 0.0 {
            vec![Order::buy_all(&self.symbol)]
        } else if fast < slow && quantity > 0.0 {
            vec![Order::sell_all(&self.symbol)]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::AlignedSeries;
    use crate::domain::Bar;
    use crate::engine::{run, SimConfig};
    use chrono::NaiveDate;

    fn series(closes: &[f64]) -> AlignedSeries {
        let base_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let bars: Vec<Bar> = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                adj_close: close,
                volume: 1_000,
            })
            .collect();
        AlignedSeries::single("AAPL", bars).unwrap()
    }

    #[test]
    fn buys_into_a_rally_and_exits_the_reversal() {
        // Flat, then a rally that lifts the fast SMA over the slow one, then
        // a slump that drops it back below.
        let mut closes = vec![100.0; 6];
        closes.extend((0..8).map(|i| 101.0 + 2.0 * i as f64));
        closes.extend((0..10).map(|i| 114.0 - 3.0 * i as f64));

        let mut strategy = SmaCrossover::new("AAPL", 2, 5);
        let result = run(&series(&closes), &mut strategy, &SimConfig::default()).unwrap();

        // One entry, one exit.
        assert_eq!(result.orders_applied, 2);
        assert_eq!(result.portfolio.quantity("AAPL"), 0.0);
        assert!(result.portfolio.cash > 0.0);
    }

    #[test]
    fn stays_out_without_enough_history() {
        let mut strategy = SmaCrossover::new("AAPL", 5, 20);
        let result = run(&series(&[100.0; 10]), &mut strategy, &SimConfig::default()).unwrap();
        assert_eq!(result.orders_applied, 0);
    }

    #[test]
    fn never_rebuys_while_holding() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let mut strategy = SmaCrossover::new("AAPL", 2, 5);
        let result = run(&series(&closes), &mut strategy, &SimConfig::default()).unwrap();
        assert_eq!(result.orders_applied, 1);
        assert!(result.portfolio.has_position("AAPL"));
    }
}
