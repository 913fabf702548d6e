//! Savitzky–Golay smoothing (cubic).
//!
//! Least-squares fit of a cubic polynomial over a sliding symmetric window,
//! evaluated at the window center. For smoothing (not derivatives) the
//! degree-3 coefficients coincide with the degree-2 ones and have the closed
//! form
//!
//!   c_j = (3(3m^2 + 3m - 1) - 15 j^2) / ((2m-1)(2m+1)(2m+3)),  j = -m..=m
//!
//! where m is the window half-width. Near the edges the window shrinks to
//! stay symmetric; the first and last two samples pass through unchanged.

/// Smooth `values` with a symmetric cubic Savitzky–Golay kernel.
///
/// `window` is the full window size; the effective half-width is
/// `max(window / 2, 2)`.
pub fn savgol_cubic(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    let m = (window / 2).max(2);
    let mut out = vec![0.0; n];

    for i in 0..n {
        let half = m.min(i).min(n - 1 - i);
        if half < 2 {
            out[i] = values[i];
            continue;
        }
        out[i] = convolve_center(values, i, half);
    }

    out
}

/// Apply the closed-form kernel of half-width `half` centered at `i`.
fn convolve_center(values: &[f64], i: usize, half: usize) -> f64 {
    let m = half as i64;
    let denom = ((2 * m - 1) * (2 * m + 1) * (2 * m + 3)) as f64;
    let a = (3 * (3 * m * m + 3 * m - 1)) as f64;

    let mut acc = 0.0;
    for j in -m..=m {
        let coeff = (a - (15 * j * j) as f64) / denom;
        acc += coeff * values[(i as i64 + j) as usize];
    }
    acc
}
