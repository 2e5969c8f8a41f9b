//! stats::agreement — Bland-Altman agreement between two methods.
//!
//! Purpose
//! -------
//! Describe how far evaluation results deviate from comparison results on
//! a per-pair basis: the mean difference (bias), its spread, the limits of
//! agreement, and which pairs fall outside those limits.
//!
//! Key behaviors
//! -------------
//! - dᵢ = xᵢ − yᵢ and mᵢ = (xᵢ + yᵢ) / 2 for every pair, in storage order.
//! - mean_diff = mean(d), sd_diff = Bessel-corrected SD of d.
//! - limits = mean_diff ± z · sd_diff with z = `options.limits_multiplier`.
//! - A point is an outlier when its difference lies **strictly** outside
//!   the limits; boundary values are inside.
//! - One computation serves both the plain summary and the plot data;
//!   [`AgreementResult::summary`] drops the per-point flags.
//!
//! Invariants & assumptions
//! ------------------------
//! - Requires n ≥ 3 pairs.
//! - `lower ≤ upper` always, with equality iff sd_diff = 0.
//! - `outlier_count` equals the number of flagged points and
//!   `outlier_ratio = outlier_count / n`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover a constant offset (zero spread), a single flagged
//!   outlier, boundary handling, the limits multiplier and small input.

use crate::stats::{
    data::PairedSample,
    errors::AnalysisResult,
    helpers::{calc_mean, ensure_finite_sum, sample_variance},
    options::AnalysisOptions,
    validation::{MIN_PAIRED, validate_min_len},
};
use serde::{Deserialize, Serialize};

/// LimitsOfAgreement — mean_diff ± z · sd_diff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LimitsOfAgreement {
    pub upper: f64,
    pub lower: f64,
}

impl LimitsOfAgreement {
    /// Whether `difference` lies strictly outside the limits.
    pub fn excludes(&self, difference: f64) -> bool {
        difference > self.upper || difference < self.lower
    }
}

/// One Bland-Altman plot point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgreementPoint {
    pub mean: f64,
    pub difference: f64,
    pub is_outlier: bool,
}

/// AgreementResult — full Bland-Altman analysis.
///
/// Fields
/// ------
/// - `differences`: `Vec<f64>` — dᵢ = xᵢ − yᵢ, storage order.
/// - `means`: `Vec<f64>` — mᵢ = (xᵢ + yᵢ) / 2, storage order.
/// - `mean_diff`, `sd_diff`: `f64` — bias and its sample SD.
/// - `limits`: [`LimitsOfAgreement`].
/// - `points`: `Vec<AgreementPoint>` — (mean, difference, flag) per pair.
/// - `outlier_count`: `usize`; `outlier_ratio`: `f64` in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgreementResult {
    pub differences: Vec<f64>,
    pub means: Vec<f64>,
    pub mean_diff: f64,
    pub sd_diff: f64,
    pub limits: LimitsOfAgreement,
    pub points: Vec<AgreementPoint>,
    pub outlier_count: usize,
    pub outlier_ratio: f64,
}

/// Flag-free projection of an [`AgreementResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgreementSummary {
    pub differences: Vec<f64>,
    pub means: Vec<f64>,
    pub mean_diff: f64,
    pub sd_diff: f64,
    pub limits: LimitsOfAgreement,
}

impl AgreementResult {
    pub fn summary(&self) -> AgreementSummary {
        AgreementSummary {
            differences: self.differences.clone(),
            means: self.means.clone(),
            mean_diff: self.mean_diff,
            sd_diff: self.sd_diff,
            limits: self.limits,
        }
    }

    /// Points flagged as outliers, in storage order.
    pub fn outliers(&self) -> impl Iterator<Item = &AgreementPoint> {
        self.points.iter().filter(|p| p.is_outlier)
    }
}

/// Compute the Bland-Altman analysis for paired results.
///
/// Parameters
/// ----------
/// - `paired`: `&PairedSample`
///   n ≥ 3 pairs.
/// - `options`: `&AnalysisOptions`
///   Only `limits_multiplier` is consulted.
///
/// Returns
/// -------
/// `AnalysisResult<AgreementResult>`
///   - `Err(InsufficientData { required: 3, .. })` when n < 3.
///   - `Err(NonFiniteData)` if a difference overflows to ±∞.
///   - `Err(DegenerateInput)` if the variance of the differences overflows.
///
/// Examples
/// --------
/// ```rust
/// use method_agreement::stats::{AnalysisOptions, PairedSample, agreement};
///
/// let paired = PairedSample::from_slices(&[10.0, 12.0, 14.0], &[9.0, 11.0, 13.0]).unwrap();
/// let res = agreement(&paired, &AnalysisOptions::default()).unwrap();
/// assert_eq!(res.mean_diff, 1.0);
/// assert_eq!(res.outlier_count, 0);
/// ```
pub fn agreement(
    paired: &PairedSample, options: &AnalysisOptions,
) -> AnalysisResult<AgreementResult> {
    validate_min_len(paired.len(), MIN_PAIRED)?;
    tracing::debug!(
        n = paired.len(),
        multiplier = options.limits_multiplier,
        "computing Bland-Altman agreement"
    );

    let differences = paired.differences()?.as_slice().to_vec();
    let means: Vec<f64> = paired
        .evaluation()
        .as_slice()
        .iter()
        .zip(paired.comparison().as_slice())
        .map(|(x, y)| (x + y) / 2.0)
        .collect();

    let mean_diff = calc_mean(&differences);
    let sd_diff = ensure_finite_sum(sample_variance(&differences, mean_diff))?.sqrt();
    let half_width = options.limits_multiplier * sd_diff;
    let limits = LimitsOfAgreement { upper: mean_diff + half_width, lower: mean_diff - half_width };

    let points: Vec<AgreementPoint> = means
        .iter()
        .zip(&differences)
        .map(|(&mean, &difference)| AgreementPoint {
            mean,
            difference,
            is_outlier: limits.excludes(difference),
        })
        .collect();
    let outlier_count = points.iter().filter(|p| p.is_outlier).count();
    let outlier_ratio = outlier_count as f64 / points.len() as f64;
    if outlier_count > 0 {
        tracing::debug!(outlier_count, "pairs outside the limits of agreement");
    }

    Ok(AgreementResult {
        differences,
        means,
        mean_diff,
        sd_diff,
        limits,
        points,
        outlier_count,
        outlier_ratio,
    })
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
    // - A constant offset with zero spread.
    // - A single outlier and the count/ratio bookkeeping.
    // - Strict inequality at the limits.
    // - The effect of the limits multiplier.
    // - InsufficientData for n < 3.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify a constant offset collapses the limits onto the bias.
    //
    // Given
    // -----
    // - x = [10, 12, 14], y = [9, 11, 13].
    //
    // Expect
    // ------
    // - differences [1, 1, 1], means [9.5, 11.5, 13.5].
    // - mean_diff 1, sd_diff 0, upper = lower = 1.
    // - No outliers: boundary values are inside the limits.
    fn agreement_constant_offset() {
        // Arrange
        let paired = PairedSample::from_slices(&[10.0, 12.0, 14.0], &[9.0, 11.0, 13.0]).unwrap();

        // Act
        let res = agreement(&paired, &AnalysisOptions::default()).unwrap();

        // Assert
        assert_eq!(res.differences, vec![1.0, 1.0, 1.0]);
        assert_eq!(res.means, vec![9.5, 11.5, 13.5]);
        assert_eq!(res.mean_diff, 1.0);
        assert_eq!(res.sd_diff, 0.0);
        assert_eq!(res.limits, LimitsOfAgreement { upper: 1.0, lower: 1.0 });
        assert_eq!(res.outlier_count, 0);
        assert_eq!(res.outlier_ratio, 0.0);
        assert!(res.points.iter().all(|p| !p.is_outlier));
    }

    #[test]
    // Purpose
    // -------
    // Check a single large difference is flagged and counted.
    //
    // Given
    // -----
    // - Nine pairs with difference 0 and one with difference 10.
    //   mean_diff = 1, sd_diff = √10, upper ≈ 7.198.
    //
    // Expect
    // ------
    // - Only the last point is an outlier; count 1, ratio 0.1.
    fn agreement_flags_single_outlier() {
        // Arrange
        let x: Vec<f64> = (0..10).map(|i| 50.0 + i as f64).collect();
        let mut y = x.clone();
        y[9] -= 10.0;
        let paired = PairedSample::from_slices(&x, &y).unwrap();

        // Act
        let res = agreement(&paired, &AnalysisOptions::default()).unwrap();

        // Assert
        assert_relative_eq!(res.mean_diff, 1.0, epsilon = 1e-12);
        assert_relative_eq!(res.sd_diff, 10.0_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(res.limits.upper, 1.0 + 1.96 * 10.0_f64.sqrt(), epsilon = 1e-12);
        assert_eq!(res.outlier_count, 1);
        assert_relative_eq!(res.outlier_ratio, 0.1);
        let flagged: Vec<&AgreementPoint> = res.outliers().collect();
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].difference, 10.0);
        assert_eq!(res.points.len(), 10);
    }

    #[test]
    // Purpose
    // -------
    // Verify a narrower multiplier flags more points and the summary keeps
    // everything except the flags.
    //
    // Given
    // -----
    // - Differences [−2, 0, 0, 2]: mean 0, sd = √(8/3) ≈ 1.633.
    //
    // Expect
    // ------
    // - z = 1.96: no outliers.
    // - z = 1.0: limits ±1.633, both ±2 flagged.
    fn agreement_multiplier_controls_flags() {
        // Arrange
        let paired =
            PairedSample::from_slices(&[8.0, 10.0, 12.0, 16.0], &[10.0, 10.0, 12.0, 14.0]).unwrap();
        let narrow = AnalysisOptions { limits_multiplier: 1.0, ..Default::default() };

        // Act
        let wide_res = agreement(&paired, &AnalysisOptions::default()).unwrap();
        let narrow_res = agreement(&paired, &narrow).unwrap();

        // Assert
        assert_eq!(wide_res.outlier_count, 0);
        assert_eq!(narrow_res.outlier_count, 2);
        assert_relative_eq!(narrow_res.outlier_ratio, 0.5);
        let summary = narrow_res.summary();
        assert_eq!(summary.differences, narrow_res.differences);
        assert_eq!(summary.limits, narrow_res.limits);
        assert_eq!(summary.mean_diff, wide_res.mean_diff);
    }

    #[test]
    // Purpose
    // -------
    // Ensure fewer than three pairs are rejected.
    fn agreement_rejects_small_input() {
        // Arrange
        let paired = PairedSample::from_slices(&[1.0, 2.0], &[1.0, 2.0]).unwrap();

        // Act & Assert
        assert_eq!(
            agreement(&paired, &AnalysisOptions::default()),
            Err(AnalysisError::InsufficientData { required: 3, actual: 2 })
        );
    }

    #[test]
    // Purpose
    // -------
    // Ensure differences whose squared deviations overflow fail instead of
    // producing infinite limits.
    //
    // Given
    // -----
    // - Differences [1e160, −1e160, 0] from finite pairs.
    fn agreement_rejects_overflowing_spread() {
        // Arrange
        let paired = PairedSample::from_slices(&[1e160, 0.0, 0.0], &[0.0, 1e160, 0.0]).unwrap();

        // Act
        let res = agreement(&paired, &AnalysisOptions::default());

        // Assert
        assert_eq!(res, Err(AnalysisError::DegenerateInput { reason: "sum of squares overflowed" }));
    }
}
