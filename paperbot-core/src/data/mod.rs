//! Bar ingest, alignment, and synthetic fixtures.

pub mod csv;
pub mod series;
pub mod synthetic;

pub use csv::{load_bars, write_curve, CsvError};
pub use series::AlignedSeries;
