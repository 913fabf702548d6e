//! Multi-symbol time alignment.
//!
//! The simulation runs over the timestamps *common to all* instruments, so
//! alignment takes the intersection of each symbol's dates and drops the
//! rest. There is no forward-fill and no void-bar concept: a date survives
//! only if every instrument has a real bar for it.

use crate::domain::{Bar, Symbol};
use crate::engine::SimError;
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

/// Bar data for one or more symbols on a shared timeline.
///
/// Each per-symbol `Vec<Bar>` has the same length as `dates` and the same
/// ordering, so index `t` addresses the same timestamp everywhere.
#[derive(Debug, Clone)]
pub struct AlignedSeries {
    /// The common date axis (sorted ascending).
    pub dates: Vec<NaiveDate>,
    /// Bars per symbol, restricted to the common timeline.
    pub bars: HashMap<Symbol, Vec<Bar>>,
    /// Symbols included (sorted, for deterministic iteration).
    pub symbols: Vec<Symbol>,
}

impl AlignedSeries {
    /// Align symbols to the intersection of their timestamps.
    pub fn align(symbol_bars: HashMap<Symbol, Vec<Bar>>) -> Result<Self, SimError> {
        if symbol_bars.is_empty() {
            return Err(SimError::Configuration("no instruments supplied".into()));
        }
        for (symbol, bars) in &symbol_bars {
            if bars.is_empty() {
                return Err(SimError::Configuration(format!(
                    "no data for instrument '{symbol}'"
                )));
            }
        }

        // Intersect all symbols' date sets.
        let mut iter = symbol_bars.values();
        let mut common: BTreeSet<NaiveDate> = iter
            .next()
            .map(|bars| bars.iter().map(|b| b.date).collect())
            .unwrap_or_default();
        for bars in iter {
            let dates: BTreeSet<NaiveDate> = bars.iter().map(|b| b.date).collect();
            common = common.intersection(&dates).copied().collect();
        }
        if common.is_empty() {
            return Err(SimError::Configuration(
                "instruments share no common timestamps".into(),
            ));
        }
        let dates: Vec<NaiveDate> = common.iter().copied().collect();

        let mut symbols: Vec<Symbol> = symbol_bars.keys().cloned().collect();
        symbols.sort();

        let mut aligned: HashMap<Symbol, Vec<Bar>> = HashMap::new();
        for (symbol, bars) in symbol_bars {
            let mut kept: Vec<Bar> = bars
                .into_iter()
                .filter(|b| common.contains(&b.date))
                .collect();
            kept.sort_by_key(|b| b.date);
            kept.dedup_by_key(|b| b.date);
            aligned.insert(symbol, kept);
        }

        Ok(Self {
            dates,
            bars: aligned,
            symbols,
        })
    }

    /// Convenience constructor for a single symbol.
    pub fn single(symbol: impl Into<Symbol>, bars: Vec<Bar>) -> Result<Self, SimError> {
        let mut map = HashMap::new();
        map.insert(symbol.into(), bars);
        Self::align(map)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(date: &str, close: f64) -> Bar {
        Bar {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            open: close - 1.0,
            high: close + 1.0,
            low: close - 2.0,
            close,
            adj_close: close,
            volume: 1_000,
        }
    }

    #[test]
    fn align_keeps_only_common_dates() {
        let mut input = HashMap::new();
        input.insert(
            "AAPL".to_string(),
            vec![
                bar("2024-01-02", 100.0),
                bar("2024-01-03", 101.0),
                bar("2024-01-04", 102.0),
            ],
        );
        input.insert(
            "MSFT".to_string(),
            vec![
                bar("2024-01-02", 200.0),
                // MSFT missing 2024-01-03
                bar("2024-01-04", 202.0),
            ],
        );

        let aligned = AlignedSeries::align(input).unwrap();
        assert_eq!(aligned.dates.len(), 2);
        assert_eq!(aligned.bars["AAPL"].len(), 2);
        assert_eq!(aligned.bars["AAPL"][1].close, 102.0);
        assert_eq!(aligned.bars["MSFT"][1].close, 202.0);
        assert_eq!(aligned.symbols, vec!["AAPL".to_string(), "MSFT".to_string()]);
    }

    #[test]
    fn align_rejects_empty_universe() {
        let err = AlignedSeries::align(HashMap::new()).unwrap_err();
        assert!(matches!(err, SimError::Configuration(_)));
    }

    #[test]
    fn align_rejects_symbol_without_data() {
        let mut input = HashMap::new();
        input.insert("AAPL".to_string(), vec![bar("2024-01-02", 100.0)]);
        input.insert("MSFT".to_string(), vec![]);
        let err = AlignedSeries::align(input).unwrap_err();
        assert!(matches!(err, SimError::Configuration(_)));
    }

    #[test]
    fn align_rejects_disjoint_timelines() {
        let mut input = HashMap::new();
        input.insert("AAPL".to_string(), vec![bar("2024-01-02", 100.0)]);
        input.insert("MSFT".to_string(), vec![bar("2024-01-03", 200.0)]);
        let err = AlignedSeries::align(input).unwrap_err();
        assert!(matches!(err, SimError::Configuration(_)));
    }

    #[test]
    fn single_sorts_out_of_order_bars() {
        let series = AlignedSeries::single(
            "AAPL",
            vec![bar("2024-01-03", 101.0), bar("2024-01-02", 100.0)],
        )
        .unwrap();
        assert_eq!(series.bars["AAPL"][0].close, 100.0);
        assert_eq!(series.len(), 2);
    }
}
