//! The simulation loop — sequential replay of a strategy over aligned bars.
//!
//! Per timestamp:
//! 1. Build a no-lookahead view (history truncated to <= current)
//! 2. Ask the strategy for orders
//! 3. Apply them sequentially through the executor
//! 4. Record equity and baseline samples per the sampling policy

use crate::data::AlignedSeries;
use crate::domain::{Bar, Order, Portfolio, Symbol};
use crate::engine::error::SimError;
use crate::engine::executor::execute;
use crate::engine::valuer::{portfolio_worth, Baseline};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// When equity/baseline samples are appended.
///
/// The reference behavior appends one sample pair per *applied order*, so a
/// step that issues two orders contributes two points and a quiet step
/// contributes none. `PerBar` instead samples once per timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplePolicy {
    #[default]
    PerOrder,
    PerBar,
}

/// Configuration for a single simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    pub initial_capital: f64,
    /// Fixed fraction of each transaction's notional charged as commission.
    pub commission_rate: f64,
    pub sample_policy: SamplePolicy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            initial_capital: 10_000.0,
            commission_rate: 0.005,
            sample_policy: SamplePolicy::PerOrder,
        }
    }
}

/// Read-only market snapshot handed to the strategy each step.
///
/// Always symbol-keyed, even for a single instrument. `history` slices end
/// at the current timestamp, so the strategy cannot look ahead.
pub struct MarketView<'a> {
    pub current: HashMap<&'a str, &'a Bar>,
    pub history: HashMap<&'a str, &'a [Bar]>,
}

impl<'a> MarketView<'a> {
    /// Current bar for a symbol.
    pub fn bar(&self, symbol: &str) -> Option<&'a Bar> {
        self.current.get(symbol).copied()
    }

    /// History up to and including the current bar.
    pub fn history(&self, symbol: &str) -> Option<&'a [Bar]> {
        self.history.get(symbol).copied()
    }

    /// Current close price for a symbol.
    pub fn close(&self, symbol: &str) -> Option<f64> {
        self.bar(symbol).map(|b| b.close)
    }
}

/// The decision seam: market view in, orders out.
///
/// Implementations must not assume the portfolio snapshot is mutable; all
/// state changes go through the returned orders.
pub trait Strategy {
    fn decide(&mut self, view: &MarketView<'_>, portfolio: &Portfolio, worth: f64) -> Vec<Order>;
}

impl<F> Strategy for F
where
    F: FnMut(&MarketView<'_>, &Portfolio, f64) -> Vec<Order>,
{
    fn decide(&mut self, view: &MarketView<'_>, portfolio: &Portfolio, worth: f64) -> Vec<Order> {
        self(view, portfolio, worth)
    }
}

/// Result of a complete simulation run.
#[derive(Debug)]
pub struct RunResult {
    /// Portfolio worth samples, per the configured sampling policy.
    pub equity_curve: Vec<f64>,
    /// Equal-weight buy-and-hold worth, sampled in lockstep with the equity curve.
    pub baseline_curve: Vec<f64>,
    /// Worth at the final timestamp's prices.
    pub final_worth: f64,
    /// Total commission paid across the run.
    pub fees_paid: f64,
    /// Orders applied over the whole run.
    pub orders_applied: usize,
    /// Timestamps processed.
    pub bar_count: usize,
    /// Final portfolio state.
    pub portfolio: Portfolio,
}

/// Run a strategy over the aligned series.
///
/// Strictly sequential and single-threaded; the run either completes or
/// aborts on the first error with no partial results.
pub fn run(
    series: &AlignedSeries,
    strategy: &mut dyn Strategy,
    config: &SimConfig,
) -> Result<RunResult, SimError> {
    if series.is_empty() || series.symbols.is_empty() {
        return Err(SimError::Configuration(
            "aligned series has no timestamps".into(),
        ));
    }

    let mut portfolio = Portfolio::new(config.initial_capital);

    let first_prices = prices_at(series, 0);
    let baseline = Baseline::equal_weight(config.initial_capital, &first_prices);

    let mut equity_curve = Vec::new();
    let mut baseline_curve = Vec::new();
    let mut fees_paid = 0.0;
    let mut orders_applied = 0;

    for t in 0..series.len() {
        let mut current: HashMap<&str, &Bar> = HashMap::new();
        let mut history: HashMap<&str, &[Bar]> = HashMap::new();
        for symbol in &series.symbols {
            let bars = &series.bars[symbol];
            current.insert(symbol.as_str(), &bars[t]);
            history.insert(symbol.as_str(), &bars[..=t]);
        }
        let view = MarketView { current, history };
        let prices = prices_at(series, t);

        let worth = portfolio_worth(&portfolio, &prices);
        let orders = strategy.decide(&view, &portfolio, worth);

        for order in &orders {
            let price = *prices.get(&order.symbol).ok_or_else(|| {
                SimError::ContractViolation(format!(
                    "order for '{}', which is not in the simulated universe",
                    order.symbol
                ))
            })?;

            fees_paid += execute(order, price, &mut portfolio, config.commission_rate)?;
            orders_applied += 1;

            if config.sample_policy == SamplePolicy::PerOrder {
                equity_curve.push(portfolio_worth(&portfolio, &prices));
                baseline_curve.push(baseline.value(&prices));
            }
        }

        if config.sample_policy == SamplePolicy::PerBar {
            equity_curve.push(portfolio_worth(&portfolio, &prices));
            baseline_curve.push(baseline.value(&prices));
        }
    }

    let final_prices = prices_at(series, series.len() - 1);
    let final_worth = portfolio_worth(&portfolio, &final_prices);

    Ok(RunResult {
        equity_curve,
        baseline_curve,
        final_worth,
        fees_paid,
        orders_applied,
        bar_count: series.len(),
        portfolio,
    })
}

/// Close prices of every symbol at timestamp index `t`.
fn prices_at(series: &AlignedSeries, t: usize) -> HashMap<Symbol, f64> {
    series
        .symbols
        .iter()
        .map(|symbol| (symbol.clone(), series.bars[symbol][t].close))
        .collect()
}
