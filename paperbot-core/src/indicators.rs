//! Indicator helpers for strategies.
//!
//! The engine deliberately does not precompute indicators — strategies
//! derive what they need from the history view. Only the moving average the
//! example strategies use lives here.

/// Simple moving average of the last `period` values, or `None` when the
/// slice is too short.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let recent = &values[values.len() - period..];
    Some(recent.iter().sum::<f64>() / period as f64)
}

/// SMA over the closes of a bar slice.
pub fn sma_close(bars: &[crate::domain::Bar], period: usize) -> Option<f64> {
    if period == 0 || bars.len() < period {
        return None;
    }
    let recent = &bars[bars.len() - period..];
    Some(recent.iter().map(|b| b.close).sum::<f64>() / period as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sma_basic() {
        let values = [10.0, 11.0, 12.0, 13.0, 14.0];
        assert_eq!(sma(&values, 5), Some(12.0));
        assert_eq!(sma(&values, 2), Some(13.5));
    }

    #[test]
    fn sma_too_few_values() {
        assert_eq!(sma(&[1.0, 2.0], 5), None);
        assert_eq!(sma(&[], 1), None);
    }

    #[test]
    fn sma_zero_period() {
        assert_eq!(sma(&[1.0, 2.0], 0), None);
    }
}
