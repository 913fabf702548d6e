//! PaperBot Core — deterministic strategy backtesting and regime labeling.
//!
//! This crate contains:
//! - Domain types (bars, orders, positions, the portfolio)
//! - The order executor with long and short accounting
//! - The sequential simulation loop with no-lookahead market views
//! - Portfolio valuation and an equal-weight buy-and-hold baseline
//! - The extrema-based trend/regime detector
//! - CSV ingest, multi-symbol alignment, and synthetic fixtures
//!
//! Everything is single-threaded and synchronous: a run either completes or
//! aborts on the first fatal error.

pub mod data;
pub mod domain;
pub mod engine;
pub mod indicators;
pub mod strategies;
pub mod trend;

pub use domain::{Bar, Order, OrderSide, Portfolio, Position, Size, Symbol};
pub use engine::{run, MarketView, RunResult, SamplePolicy, SimConfig, SimError, Strategy};
pub use trend::{Trend, TrendDetector, TrendError, TrendSignal};
