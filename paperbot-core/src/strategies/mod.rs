//! Example strategies implementing the [`Strategy`](crate::engine::Strategy) seam.

pub mod buy_and_hold;
pub mod sma_crossover;

pub use buy_and_hold::BuyAndHold;
pub use sma_crossover::SmaCrossover;
