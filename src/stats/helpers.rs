//! Shared moment helpers for the statistics modules.
//!
//! All helpers assume validated, non-empty input and are not part of the
//! public API.

use crate::stats::errors::{AnalysisError, AnalysisResult};

/// Arithmetic mean. NaN for an empty slice; callers guard the length first.
#[inline]
pub(crate) fn calc_mean(data: &[f64]) -> f64 {
    data.iter().sum::<f64>() / data.len() as f64
}

/// Σ(xᵢ − mean)².
#[inline]
pub(crate) fn sum_sq_dev(data: &[f64], mean: f64) -> f64 {
    data.iter().map(|x| (x - mean).powi(2)).sum()
}

/// Σ(xᵢ − x̄)(yᵢ − ȳ) over index-aligned slices.
#[inline]
pub(crate) fn sum_cross_dev(x: &[f64], y: &[f64], mean_x: f64, mean_y: f64) -> f64 {
    x.iter().zip(y).map(|(xi, yi)| (xi - mean_x) * (yi - mean_y)).sum()
}

/// Bessel-corrected sample variance Σ(xᵢ − x̄)² / (n − 1). Requires n ≥ 2.
#[inline]
pub(crate) fn sample_variance(data: &[f64], mean: f64) -> f64 {
    sum_sq_dev(data, mean) / (data.len() - 1) as f64
}

/// Whether every observation equals the first.
///
/// Compares the data itself: a sum of squared deviations around a rounded
/// mean can be a few ulps above zero for a constant series.
#[inline]
pub(crate) fn is_constant(data: &[f64]) -> bool {
    data.windows(2).all(|pair| pair[0] == pair[1])
}

/// Pass a sum of squares through, or fail when it overflowed to ±∞ or NaN.
#[inline]
pub(crate) fn ensure_finite_sum(sum: f64) -> AnalysisResult<f64> {
    if sum.is_finite() {
        Ok(sum)
    } else {
        tracing::warn!(sum, "sum of squares is not finite");
        Err(AnalysisError::DegenerateInput { reason: "sum of squares overflowed" })
    }
}
