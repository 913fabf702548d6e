//! Engine error types.
//!
//! Every variant is fatal within a run: the error propagates to the caller
//! and the run stops with no partial results.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("strategy contract violation: {0}")]
    ContractViolation(String),

    #[error("invalid state transition for '{symbol}': {reason}")]
    InvalidStateTransition { symbol: String, reason: String },
}

impl SimError {
    pub(crate) fn invalid(symbol: &str, reason: impl Into<String>) -> Self {
        Self::InvalidStateTransition {
            symbol: symbol.to_string(),
            reason: reason.into(),
        }
    }
}
