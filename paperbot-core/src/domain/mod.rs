//! Domain types for PaperBot.

pub mod bar;
pub mod order;
pub mod portfolio;
pub mod position;

pub use bar::Bar;
pub use order::{Order, OrderSide, Size};
pub use portfolio::Portfolio;
pub use position::Position;

/// Symbol type alias
pub type Symbol = String;
