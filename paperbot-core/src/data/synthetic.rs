//! Synthetic bar series for tests, demos, and fixtures.
//!
//! Deterministic: every generator takes an explicit seed or is seed-free,
//! so runs are reproducible.

use crate::domain::Bar;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

fn bar(date: NaiveDate, close: f64) -> Bar {
    Bar {
        date,
        open: close,
        high: close * 1.01,
        low: close * 0.99,
        close,
        adj_close: close,
        volume: 1_000,
    }
}

fn dates_from(start: NaiveDate, len: usize) -> impl Iterator<Item = NaiveDate> {
    (0..len).map(move |i| start + chrono::Duration::days(i as i64))
}

/// Sine wave around `level` with the given amplitude and number of full periods.
pub fn sine_series(
    start: NaiveDate,
    len: usize,
    level: f64,
    amplitude: f64,
    periods: f64,
) -> Vec<Bar> {
    dates_from(start, len)
        .enumerate()
        .map(|(i, date)| {
            let close = level + amplitude * (TAU * periods * i as f64 / len as f64).sin();
            bar(date, close)
        })
        .collect()
}

/// Straight line from `from` to `to` over `len` bars.
pub fn linear_series(start: NaiveDate, len: usize, from: f64, to: f64) -> Vec<Bar> {
    let step = if len > 1 {
        (to - from) / (len - 1) as f64
    } else {
        0.0
    };
    dates_from(start, len)
        .enumerate()
        .map(|(i, date)| bar(date, from + step * i as f64))
        .collect()
}

/// Geometric random walk with per-step drift and volatility.
pub fn random_walk(
    start: NaiveDate,
    len: usize,
    initial: f64,
    drift: f64,
    volatility: f64,
    seed: u64,
) -> Vec<Bar> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut close = initial;
    dates_from(start, len)
        .map(|date| {
            let shock: f64 = rng.gen_range(-1.0..1.0);
            close *= 1.0 + drift + volatility * shock;
            bar(date, close)
        })
        .collect()
}
