//! Descriptive statistics over a slice of observations.
//!
//! The empty slice is a valid input: every field of the resulting summary is
//! zero. A single observation pins all percentiles to that value with a
//! standard deviation of zero. "No data" is a state the caller reports on,
//! not an error.

use serde::Serialize;

/// Descriptive summary of one numeric field across stores.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Summary {
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation (ddof = 0).
    pub std: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
}

/// Compute mean, median, population std, and the p25/p50/p75/p90 percentiles.
pub fn describe(values: &[f64]) -> Summary {
    if values.is_empty() {
        return Summary::default();
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    Summary {
        mean,
        median: percentile_sorted(&sorted, 50.0),
        std: variance.sqrt(),
        p25: percentile_sorted(&sorted, 25.0),
        p50: percentile_sorted(&sorted, 50.0),
        p75: percentile_sorted(&sorted, 75.0),
        p90: percentile_sorted(&sorted, 90.0),
    }
}

/// Percentile of an unsorted slice, linear interpolation between ranks.
///
/// Empty input returns 0. `q` is clamped to [0, 100].
pub fn percentile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    percentile_sorted(&sorted, q)
}

/// Ratio of summed parts, as a percentage.
///
/// `weighted_ratio(sum_profit, sum_revenue)` is the fleet-wide margin: the
/// ratio of totals, not the mean of per-store ratios. A non-positive
/// denominator yields 0.
pub fn weighted_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator * 100.0
    } else {
        0.0
    }
}

/// Linear-interpolation percentile over an already-sorted slice.
/// Rank = q/100 × (n − 1), interpolated between the two bracketing values.
fn percentile_sorted(sorted: &[f64], q: f64) -> f64 {
    let q = q.clamp(0.0, 100.0);
    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = rank - lo as f64;
        sorted[lo] + (sorted[hi] - sorted[lo]) * frac
    }
}
