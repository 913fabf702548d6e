//! Trend/regime detection — offline labeling of uptrends and downtrends.
//!
//! Smooths a price series, finds confirmed local extrema with a
//! minimum-separation debounce, and emits a piecewise-constant regime label
//! between confirmed turning points.
//!
//! The smoothing window spans the whole series (non-causal), so this is an
//! offline analysis/backtesting tool, not a live lookahead-free signal.

pub mod savgol;

use crate::domain::Bar;
use savgol::savgol_cubic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shortest series the default window/distance fractions make sense for.
const MIN_SERIES_LEN: usize = 30;

#[derive(Debug, Error)]
pub enum TrendError {
    #[error("series too short for trend detection: {len} samples (minimum {min})")]
    SeriesTooShort { len: usize, min: usize },

    #[error("adjusted close is not a number at index {index}")]
    MissingPrice { index: usize },

    #[error("not enough turning points found: {found} (need at least 3)")]
    NotEnoughTurningPoints { found: usize },
}

/// Regime label for one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    /// +1 for up, -1 for down.
    pub fn as_i8(self) -> i8 {
        match self {
            Trend::Up => 1,
            Trend::Down => -1,
        }
    }
}

/// Which kind of extremum a turning point is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtremumKind {
    Maximum,
    Minimum,
}

/// A confirmed trend reversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurningPoint {
    pub index: usize,
    pub kind: ExtremumKind,
}

/// Output of one detection pass.
#[derive(Debug, Clone)]
pub struct TrendSignal {
    /// One regime label per input sample.
    pub regimes: Vec<Trend>,
    /// Confirmed reversals, in index order, alternating in kind.
    pub turning_points: Vec<TurningPoint>,
    /// The smoothed series the extrema were taken from.
    pub smoothed: Vec<f64>,
}

/// Extrema-based trend detector.
///
/// Holds no state between invocations; each call recomputes its signal from
/// the supplied series.
#[derive(Debug, Clone)]
pub struct TrendDetector {
    /// Smoothing window = series length / this divisor.
    window_divisor: usize,
    /// Debounce distance = series length / this divisor.
    min_distance_divisor: usize,
}

impl Default for TrendDetector {
    /// The empirically tuned fractions: window = len/5, distance = len/15.
    fn default() -> Self {
        Self {
            window_divisor: 5,
            min_distance_divisor: 15,
        }
    }
}

impl TrendDetector {
    pub fn new(window_divisor: usize, min_distance_divisor: usize) -> Self {
        assert!(window_divisor >= 1, "window_divisor must be >= 1");
        assert!(
            min_distance_divisor >= 1,
            "min_distance_divisor must be >= 1"
        );
        Self {
            window_divisor,
            min_distance_divisor,
        }
    }

    /// Label regimes from a bar series, pricing at `adj_close`.
    pub fn detect_bars(&self, bars: &[Bar]) -> Result<TrendSignal, TrendError> {
        let prices = bars
            .iter()
            .enumerate()
            .map(|(index, bar)| {
                if bar.adj_close.is_nan() {
                    Err(TrendError::MissingPrice { index })
                } else {
                    Ok(bar.adj_close)
                }
            })
            .collect::<Result<Vec<f64>, _>>()?;
        self.detect(&prices)
    }

    /// Label regimes from a raw price series.
    pub fn detect(&self, prices: &[f64]) -> Result<TrendSignal, TrendError> {
        let n = prices.len();
        if n < MIN_SERIES_LEN {
            return Err(TrendError::SeriesTooShort {
                len: n,
                min: MIN_SERIES_LEN,
            });
        }

        let smoothed = savgol_cubic(prices, n / self.window_divisor);
        let (maxima, minima) = local_extrema(&smoothed);
        if maxima.is_empty() || minima.is_empty() {
            return Err(TrendError::NotEnoughTurningPoints { found: 0 });
        }

        // Initial direction: whichever extremum type occurs first. A leading
        // minimum means the series starts by falling toward it.
        let mut current = if minima[0] < maxima[0] {
            Trend::Down
        } else {
            Trend::Up
        };

        let min_distance = n as f64 / self.min_distance_divisor as f64;
        let is_max = index_set(&maxima, n);
        let is_min = index_set(&minima, n);

        let mut regimes = Vec::with_capacity(n);
        let mut turning_points = Vec::new();
        let mut since_last_flip = 0usize;

        for i in 0..n {
            if since_last_flip as f64 > min_distance {
                // Only the extremum type expected next in alternation may
                // flip the signal; the rest are debounced away.
                if is_min[i] && current == Trend::Down {
                    current = Trend::Up;
                    turning_points.push(TurningPoint {
                        index: i,
                        kind: ExtremumKind::Minimum,
                    });
                    since_last_flip = 0;
                } else if is_max[i] && current == Trend::Up {
                    current = Trend::Down;
                    turning_points.push(TurningPoint {
                        index: i,
                        kind: ExtremumKind::Maximum,
                    });
                    since_last_flip = 0;
                }
            }
            since_last_flip += 1;
            regimes.push(current);
        }

        if turning_points.len() < 3 {
            return Err(TrendError::NotEnoughTurningPoints {
                found: turning_points.len(),
            });
        }

        Ok(TrendSignal {
            regimes,
            turning_points,
            smoothed,
        })
    }
}

/// Strict local maxima and minima of `values` (endpoints excluded).
fn local_extrema(values: &[f64]) -> (Vec<usize>, Vec<usize>) {
    let mut maxima = Vec::new();
    let mut minima = Vec::new();
    for i in 1..values.len().saturating_sub(1) {
        if values[i] > values[i - 1] && values[i] > values[i + 1] {
            maxima.push(i);
        } else if values[i] < values[i - 1] && values[i] < values[i + 1] {
            minima.push(i);
        }
    }
    (maxima, minima)
}

fn index_set(indices: &[usize], n: usize) -> Vec<bool> {
    let mut set = vec![false; n];
    for &i in indices {
        set[i] = true;
    }
    set
}
