//! Buy-and-hold: spend all cash on the first bar and never trade again.

use crate::domain::{Order, Portfolio};
use crate::engine::{MarketView, Strategy};

#[derive(Debug, Clone)]
pub struct BuyAndHold {
    symbol: String,
    entered: bool,
}

impl BuyAndHold {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            entered: false,
        }
    }
}

impl Strategy for BuyAndHold {
    fn decide(&mut self, _view: &MarketView<'_>, _portfolio: &Portfolio, _worth: f64) -> Vec<Order> {
        if self.entered {
            return Vec::new();
        }
        self.entered = true;
        vec![Order::buy_all(&self.symbol)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::AlignedSeries;
    use crate::domain::Bar;
    use crate::engine::{run, SimConfig};
    use chrono::NaiveDate;

    #[test]
    fn enters_once_and_tracks_the_market() {
        let base_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let bars: Vec<Bar> = [100.0, 110.0, 120.0]
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                adj_close: close,
                volume: 0,
            })
            .collect();
        let series = AlignedSeries::single("AAPL", bars).unwrap();

        let mut strategy = BuyAndHold::new("AAPL");
        let result = run(&series, &mut strategy, &SimConfig::default()).unwrap();

        assert_eq!(result.orders_applied, 1);
        // (10_000 - 50) / 100 shares, marked at 120.
        let expected = 9_950.0 / 100.0 * 120.0;
        assert!((result.final_worth - expected).abs() < 1e-9);
    }
}
