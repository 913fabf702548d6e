//! The simulation engine: executor, valuer, and the sequential loop.

pub mod error;
pub mod executor;
pub mod sim;
pub mod valuer;

pub use error::SimError;
pub use executor::execute;
pub use sim::{run, MarketView, RunResult, SamplePolicy, SimConfig, Strategy};
pub use valuer::{portfolio_worth, Baseline};
