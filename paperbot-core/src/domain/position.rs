//! Position — signed holding in one instrument.

use serde::{Deserialize, Serialize};

/// Signed quantity plus, for open shorts, the entry price.
///
/// Positive quantity = long, negative = open short, zero = flat.
/// `cost_basis` is `Some` exactly while the quantity is negative and is
/// cleared when the short closes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub quantity: f64,
    pub cost_basis: Option<f64>,
}

impl Position {
    pub fn long(quantity: f64) -> Self {
        Self {
            quantity,
            cost_basis: None,
        }
    }

    pub fn short(quantity: f64, cost_basis: f64) -> Self {
        Self {
            quantity: -quantity.abs(),
            cost_basis: Some(cost_basis),
        }
    }

    pub fn is_flat(&self) -> bool {
        self.quantity == 0.0
    }

    pub fn is_long(&self) -> bool {
        self.quantity > 0.0
    }

    pub fn is_short(&self) -> bool {
        self.quantity < 0.0
    }
}
