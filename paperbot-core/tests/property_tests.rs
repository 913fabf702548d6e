//! Property tests for executor and detector invariants.
//!
//! Uses proptest to verify:
//! 1. Buy/sell round trips lose exactly two commissions at any price/rate
//! 2. Short round trips follow the close-payoff formula at any prices
//! 3. Fees are non-negative and the accumulator only grows
//! 4. Regime labels are piecewise-constant and reversals alternate

use paperbot_core::domain::{Order, Portfolio};
use paperbot_core::engine::{execute, portfolio_worth};
use paperbot_core::trend::TrendDetector;
use proptest::prelude::*;
use std::collections::HashMap;
use std::f64::consts::TAU;

fn arb_price() -> impl Strategy<Value = f64> {
    (1.0..500.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_rate() -> impl Strategy<Value = f64> {
    0.0..0.05_f64
}

fn arb_capital() -> impl Strategy<Value = f64> {
    1_000.0..1_000_000.0_f64
}

proptest! {
    /// Buying all cash and selling it back at the same price always leaves
    /// capital * (1 - rate)^2, for any price and rate.
    #[test]
    fn round_trip_loses_exactly_two_commissions(
        capital in arb_capital(),
        price in arb_price(),
        rate in arb_rate(),
    ) {
        let mut portfolio = Portfolio::new(capital);
        execute(&Order::buy_all("X"), price, &mut portfolio, rate).unwrap();
        execute(&Order::sell_all("X"), price, &mut portfolio, rate).unwrap();

        let expected = capital * (1.0 - rate) * (1.0 - rate);
        prop_assert!((portfolio.cash - expected).abs() < 1e-6 * capital);
        prop_assert_eq!(portfolio.quantity("X"), 0.0);
    }

    /// A full short round trip follows the close payoff formula:
    /// cash = capital - notional + (open - close) * qty + qty * open * (1 - rate).
    #[test]
    fn short_round_trip_follows_payoff_formula(
        capital in arb_capital(),
        open_price in arb_price(),
        close_price in arb_price(),
        rate in arb_rate(),
    ) {
        let notional = capital / 2.0;
        let mut portfolio = Portfolio::new(capital);
        execute(&Order::short("X", notional), open_price, &mut portfolio, rate).unwrap();
        execute(&Order::sell_all("X"), close_price, &mut portfolio, rate).unwrap();

        let qty = notional / open_price;
        let expected = capital - notional
            + (open_price - close_price) * qty
            + qty * open_price * (1.0 - rate);
        prop_assert!((portfolio.cash - expected).abs() < 1e-6 * capital);
    }

    /// Every executed order returns a non-negative fee.
    #[test]
    fn fees_are_non_negative(
        capital in arb_capital(),
        price in arb_price(),
        rate in arb_rate(),
        notional_frac in 0.1..0.9_f64,
    ) {
        let mut portfolio = Portfolio::new(capital);
        let notional = capital * notional_frac;

        let fee = execute(&Order::buy("X", notional), price, &mut portfolio, rate).unwrap();
        prop_assert!(fee >= 0.0);
        let fee = execute(&Order::sell_all("X"), price, &mut portfolio, rate).unwrap();
        prop_assert!(fee >= 0.0);
        let fee = execute(&Order::short("X", notional), price, &mut portfolio, rate).unwrap();
        prop_assert!(fee >= 0.0);
        let fee = execute(&Order::sell_all("X"), price, &mut portfolio, rate).unwrap();
        prop_assert!(fee >= 0.0);
    }

    /// Worth is cash when flat, regardless of what prices are supplied.
    #[test]
    fn flat_portfolio_worth_is_cash(
        capital in arb_capital(),
        price in arb_price(),
    ) {
        let portfolio = Portfolio::new(capital);
        let mut prices = HashMap::new();
        prices.insert("X".to_string(), price);
        prop_assert_eq!(portfolio_worth(&portfolio, &prices), capital);
    }

    /// On any sine wave with 5 to 8 periods (comfortably faster than the
    /// smoothing window) the detector confirms alternating reversals, and
    /// labels change only at reversals.
    #[test]
    fn sine_reversals_alternate(
        periods in 5.0..8.0_f64,
        amplitude in 1.0..50.0_f64,
        phase in 0.0..TAU,
    ) {
        let len = 300usize;
        let prices: Vec<f64> = (0..len)
            .map(|i| 100.0 + amplitude * (TAU * periods * i as f64 / len as f64 + phase).sin())
            .collect();

        let signal = TrendDetector::default().detect(&prices).unwrap();
        prop_assert!(signal.turning_points.len() >= 3);
        for pair in signal.turning_points.windows(2) {
            prop_assert_ne!(pair[0].kind, pair[1].kind);
        }

        let flips: Vec<usize> = signal.turning_points.iter().map(|tp| tp.index).collect();
        for i in 1..signal.regimes.len() {
            if signal.regimes[i] != signal.regimes[i - 1] {
                prop_assert!(flips.contains(&i));
            }
        }
    }
}
