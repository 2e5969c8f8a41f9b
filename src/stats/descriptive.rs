//! stats::descriptive — summary statistics for one measurement series.
//!
//! Purpose
//! -------
//! Summarize a single [`Sample`] (evaluation results, comparison results, or
//! their differences) by size, location and spread. Every other component
//! that reports sample size or spread builds on the same definitions.
//!
//! Key behaviors
//! -------------
//! - Compute n, mean, median, min and max for any non-empty sample.
//! - Compute the Bessel-corrected variance Σ(x − x̄)² / (n − 1) and its
//!   square root when n ≥ 2.
//! - Sort a **copy** of the data for the median; the caller's sample is
//!   never reordered.
//!
//! Invariants & assumptions
//! ------------------------
//! - Input comes from a validated [`Sample`], so all values are finite.
//! - For n = 1 the unbiased variance is undefined; `variance` and `std_dev`
//!   are `None` rather than NaN.
//! - `std_dev² == variance` up to floating-point rounding.
//!
//! Testing notes
//! -------------
//! - Unit tests cover odd/even medians, the n = 1 and empty cases,
//!   agreement of variance and standard deviation, and variance overflow.

use crate::stats::{
    data::Sample,
    errors::AnalysisResult,
    helpers::{calc_mean, ensure_finite_sum, sample_variance},
    validation::{MIN_DESCRIPTIVE, validate_min_len},
};
use serde::{Deserialize, Serialize};

/// DescriptiveResult — size, location and spread of one sample.
///
/// Fields
/// ------
/// - `n`: `usize` — number of observations (≥ 1).
/// - `mean`: `f64` — arithmetic mean.
/// - `median`: `f64` — middle order statistic (mean of the two middle ones
///   for even n).
/// - `std_dev`: `Option<f64>` — √variance; `None` when n < 2.
/// - `variance`: `Option<f64>` — Bessel-corrected variance; `None` when
///   n < 2.
/// - `min`, `max`: `f64` — extreme observations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveResult {
    pub n: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: Option<f64>,
    pub variance: Option<f64>,
    pub min: f64,
    pub max: f64,
}

/// Compute descriptive statistics for one sample.
///
/// Parameters
/// ----------
/// - `sample`: `&Sample`
///   Validated observations; must be non-empty.
///
/// Returns
/// -------
/// `AnalysisResult<DescriptiveResult>`
///   - `Ok(result)` for n ≥ 1.
///   - `Err(AnalysisError::InsufficientData { required: 1, actual: 0 })`
///     for an empty sample, with no partial computation.
///   - `Err(AnalysisError::DegenerateInput { .. })` when the sum of squares
///     overflows.
///
/// Examples
/// --------
/// ```rust
/// use method_agreement::stats::{Sample, describe};
///
/// let sample = Sample::from_slice(&[1.0, 2.0, 3.0, 4.0]).unwrap();
/// let summary = describe(&sample).unwrap();
/// assert_eq!(summary.median, 2.5);
/// assert_eq!(summary.n, 4);
/// ```
pub fn describe(sample: &Sample) -> AnalysisResult<DescriptiveResult> {
    let data = sample.as_slice();
    validate_min_len(data.len(), MIN_DESCRIPTIVE)?;
    tracing::debug!(n = data.len(), "computing descriptive statistics");

    let n = data.len();
    let mean = calc_mean(data);
    let variance = (n >= 2).then(|| ensure_finite_sum(sample_variance(data, mean))).transpose()?;
    let std_dev = variance.map(f64::sqrt);
    let (min, max) = data
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| (lo.min(x), hi.max(x)));

    Ok(DescriptiveResult { n, mean, median: calc_median(data), std_dev, variance, min, max })
}

/// Median of a non-empty slice, computed on a sorted copy.
#[inline]
fn calc_median(data: &[f64]) -> f64 {
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    if n % 2 == 0 { (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0 } else { sorted[n / 2] }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::errors::AnalysisError;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Median for odd and even n.
    // - Bessel-corrected variance and its relation to the standard deviation.
    // - The empty and single-observation edge cases.
    // - That the caller's sample is not reordered.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the median convention for even and odd n.
    //
    // Given
    // -----
    // - [4, 1, 3, 2] (even, unsorted) and [3, 1, 2] (odd, unsorted).
    //
    // Expect
    // ------
    // - Medians 2.5 and 2.0.
    fn describe_median_even_and_odd() {
        // Arrange
        let even = Sample::from_slice(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        let odd = Sample::from_slice(&[3.0, 1.0, 2.0]).unwrap();

        // Act
        let even_res = describe(&even).unwrap();
        let odd_res = describe(&odd).unwrap();

        // Assert
        assert_eq!(even_res.median, 2.5);
        assert_eq!(odd_res.median, 2.0);
    }

    #[test]
    // Purpose
    // -------
    // Check every field on a textbook series.
    //
    // Given
    // -----
    // - [2, 4, 4, 4, 5, 5, 7, 9]: mean 5, Σ(x − x̄)² = 32.
    //
    // Expect
    // ------
    // - variance = 32 / 7, std_dev² = variance, min 2, max 9, median 4.5.
    fn describe_textbook_series() {
        // Arrange
        let sample = Sample::from_slice(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();

        // Act
        let res = describe(&sample).unwrap();

        // Assert
        let variance = res.variance.expect("n >= 2");
        let std_dev = res.std_dev.expect("n >= 2");
        assert_eq!(res.n, 8);
        assert_relative_eq!(res.mean, 5.0);
        assert_relative_eq!(variance, 32.0 / 7.0);
        assert_relative_eq!(std_dev * std_dev, variance, epsilon = 1e-12);
        assert_eq!(res.median, 4.5);
        assert_eq!((res.min, res.max), (2.0, 9.0));
    }

    #[test]
    // Purpose
    // -------
    // Ensure an empty sample is rejected and a single observation yields no
    // variance rather than NaN.
    //
    // Expect
    // ------
    // - Empty → InsufficientData { required: 1, actual: 0 }.
    // - [7] → n 1, mean/median/min/max 7, variance and std_dev None.
    fn describe_empty_and_single_observation() {
        // Arrange
        let empty = Sample::from_slice(&[]).unwrap();
        let single = Sample::from_slice(&[7.0]).unwrap();

        // Act
        let empty_res = describe(&empty);
        let single_res = describe(&single).unwrap();

        // Assert
        assert_eq!(empty_res, Err(AnalysisError::InsufficientData { required: 1, actual: 0 }));
        assert_eq!(single_res.n, 1);
        assert_eq!((single_res.mean, single_res.median), (7.0, 7.0));
        assert_eq!((single_res.min, single_res.max), (7.0, 7.0));
        assert!(single_res.variance.is_none() && single_res.std_dev.is_none());
    }

    #[test]
    // Purpose
    // -------
    // Verify the median is computed on a copy.
    //
    // Expect
    // ------
    // - The sample keeps its original order after `describe`.
    fn describe_does_not_reorder_input() {
        // Arrange
        let sample = Sample::from_slice(&[3.0, 1.0, 2.0]).unwrap();

        // Act
        let _ = describe(&sample).unwrap();

        // Assert
        assert_eq!(sample.as_slice(), &[3.0, 1.0, 2.0]);
    }

    #[test]
    // Purpose
    // -------
    // Ensure an overflowing variance is an error rather than ∞.
    //
    // Given
    // -----
    // - [1e160, 2e160, 3e160]: finite, but squared deviations exceed f64::MAX.
    fn describe_rejects_overflowing_variance() {
        // Arrange
        let sample = Sample::from_slice(&[1e160, 2e160, 3e160]).unwrap();

        // Act
        let res = describe(&sample);

        // Assert
        assert_eq!(res, Err(AnalysisError::DegenerateInput { reason: "sum of squares overflowed" }));
    }
}
