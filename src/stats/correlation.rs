//! stats::correlation — Pearson and Spearman correlation of paired results.
//!
//! Purpose
//! -------
//! Quantify how strongly evaluation and comparison results move together:
//! Pearson's product-moment coefficient for linear association and
//! Spearman's rank coefficient for monotone association.
//!
//! Key behaviors
//! -------------
//! - Pearson: Σ(x − x̄)(y − ȳ) / (√Σ(x − x̄)² · √Σ(y − ȳ)²).
//! - Spearman: rank both samples via [`rank`], then apply the shortcut
//!   1 − 6 Σ d² / (n (n² − 1)) with d the per-index rank difference.
//! - Interpretation bands via [`CorrelationStrength::classify`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Requires n ≥ 3 paired observations.
//! - With the default ordinal ranks ties are **not** averaged, so the
//!   shortcut formula under-handles tied data. `RankMethod::Average` is the
//!   opt-in correction; note the shortcut formula is still used, which is
//!   exact only without ties.
//! - A constant sample makes Pearson undefined (`DegenerateInput`), as does
//!   a sum of squares that overflows.
//! - Pearson is clamped to [−1, 1].
//!
//! Testing notes
//! -------------
//! - Unit tests cover perfect positive/negative association, the band
//!   thresholds, tie handling and degenerate input. Monotone invariance of
//!   Spearman is a property test in `tests/`.

use crate::stats::{
    data::PairedSample,
    errors::{AnalysisError, AnalysisResult},
    helpers::{calc_mean, ensure_finite_sum, is_constant, sum_cross_dev, sum_sq_dev},
    options::AnalysisOptions,
    ranks::rank,
    validation::{MIN_PAIRED, validate_min_len},
};
use serde::{Deserialize, Serialize};

/// CorrelationResult — Pearson and Spearman coefficients for one pairing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    pub pearson: f64,
    pub spearman: f64,
    pub n: usize,
}

impl CorrelationResult {
    /// Whether |Pearson| exceeds |Spearman|, hinting at a linear rather than
    /// a merely monotone relationship.
    pub fn pearson_dominates(&self) -> bool {
        self.pearson.abs() > self.spearman.abs()
    }
}

/// CorrelationStrength — informational interpretation bands.
///
/// |r| ≥ 0.8 `Strong`, ≥ 0.5 `Moderate`, ≥ 0.3 `Weak`, else `Negligible`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrelationStrength {
    Strong,
    Moderate,
    Weak,
    Negligible,
}

impl CorrelationStrength {
    pub fn classify(r: f64) -> CorrelationStrength {
        let abs = r.abs();
        if abs >= 0.8 {
            CorrelationStrength::Strong
        } else if abs >= 0.5 {
            CorrelationStrength::Moderate
        } else if abs >= 0.3 {
            CorrelationStrength::Weak
        } else {
            CorrelationStrength::Negligible
        }
    }
}

/// Compute Pearson and Spearman correlation.
///
/// Parameters
/// ----------
/// - `paired`: `&PairedSample`
///   Evaluation (x) and comparison (y) results, n ≥ 3.
/// - `options`: `&AnalysisOptions`
///   Only `rank_method` is consulted.
///
/// Returns
/// -------
/// `AnalysisResult<CorrelationResult>`
///   - `Ok` with both coefficients in [−1, 1] and n.
///   - `Err(InsufficientData)` when n < 3.
///   - `Err(DegenerateInput)` when either sample is constant or a sum of
///     squares overflows.
///
/// Examples
/// --------
/// ```rust
/// use method_agreement::stats::{AnalysisOptions, PairedSample, correlation};
///
/// let paired = PairedSample::from_slices(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.5]).unwrap();
/// let res = correlation(&paired, &AnalysisOptions::default()).unwrap();
/// assert_eq!(res.spearman, 1.0);
/// ```
pub fn correlation(
    paired: &PairedSample, options: &AnalysisOptions,
) -> AnalysisResult<CorrelationResult> {
    let x = paired.evaluation().as_slice();
    let y = paired.comparison().as_slice();
    validate_min_len(x.len(), MIN_PAIRED)?;
    tracing::debug!(n = x.len(), rank_method = ?options.rank_method, "computing correlation");

    Ok(CorrelationResult {
        pearson: calc_pearson(x, y)?,
        spearman: calc_spearman(x, y, options),
        n: x.len(),
    })
}

/// Pearson product-moment coefficient of index-aligned slices.
fn calc_pearson(x: &[f64], y: &[f64]) -> AnalysisResult<f64> {
    if is_constant(x) || is_constant(y) {
        tracing::warn!(n = x.len(), "constant sample; Pearson correlation undefined");
        return Err(AnalysisError::DegenerateInput {
            reason: "correlation undefined for a sample with zero variance",
        });
    }
    let mean_x = calc_mean(x);
    let mean_y = calc_mean(y);
    let sxx = ensure_finite_sum(sum_sq_dev(x, mean_x))?;
    let syy = ensure_finite_sum(sum_sq_dev(y, mean_y))?;
    // Rounding can push the ratio a few ulps past ±1.
    Ok((sum_cross_dev(x, y, mean_x, mean_y) / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0))
}

/// Spearman coefficient via the rank-difference shortcut.
fn calc_spearman(x: &[f64], y: &[f64], options: &AnalysisOptions) -> f64 {
    let n = x.len() as f64;
    let rx = rank(x, options.rank_method);
    let ry = rank(y, options.rank_method);
    let d_squared: f64 = rx.iter().zip(&ry).map(|(a, b)| (a - b).powi(2)).sum();
    1.0 - (6.0 * d_squared) / (n * (n * n - 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::options::RankMethod;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Perfect positive and negative association.
    // - A hand-computed Pearson value.
    // - Ordinal vs. average ranks on tied data.
    // - Band classification thresholds.
    // - Pearson clamping to [−1, 1].
    // - InsufficientData and DegenerateInput, including rounded constants
    //   and overflowing sums.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify r = 1 for y = x and r = −1 for a decreasing affine transform.
    //
    // Given
    // -----
    // - x = [1.2, 3.4, 2.2, 5.0, 4.1]; y₁ = x; y₂ = 10 − 2x.
    //
    // Expect
    // ------
    // - Pearson and Spearman 1 for y₁, −1 for y₂.
    fn correlation_perfect_positive_and_negative() {
        // Arrange
        let x = [1.2, 3.4, 2.2, 5.0, 4.1];
        let y_neg: Vec<f64> = x.iter().map(|v| 10.0 - 2.0 * v).collect();
        let same = PairedSample::from_slices(&x, &x).unwrap();
        let neg = PairedSample::from_slices(&x, &y_neg).unwrap();
        let opts = AnalysisOptions::default();

        // Act
        let same_res = correlation(&same, &opts).unwrap();
        let neg_res = correlation(&neg, &opts).unwrap();

        // Assert
        assert_relative_eq!(same_res.pearson, 1.0, epsilon = 1e-12);
        assert_relative_eq!(same_res.spearman, 1.0, epsilon = 1e-12);
        assert_relative_eq!(neg_res.pearson, -1.0, epsilon = 1e-12);
        assert_relative_eq!(neg_res.spearman, -1.0, epsilon = 1e-12);
        assert_eq!(same_res.n, 5);
    }

    #[test]
    // Purpose
    // -------
    // Check Pearson on a hand-computed pairing and Spearman with one swap.
    //
    // Given
    // -----
    // - x = [1, 2, 3, 4], y = [2, 1, 4, 3].
    //   Sxy = 3, Sxx = Syy = 5 ⇒ r = 0.6.
    //   Rank differences [−1, 1, −1, 1] ⇒ Σd² = 4 ⇒ ρ = 1 − 24/60 = 0.6.
    fn correlation_hand_computed_values() {
        // Arrange
        let paired = PairedSample::from_slices(&[1.0, 2.0, 3.0, 4.0], &[2.0, 1.0, 4.0, 3.0]).unwrap();

        // Act
        let res = correlation(&paired, &AnalysisOptions::default()).unwrap();

        // Assert
        assert_relative_eq!(res.pearson, 0.6, epsilon = 1e-12);
        assert_relative_eq!(res.spearman, 0.6, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Show that ordinal ranks break ties by storage order while average
    // ranks treat tied values symmetrically.
    //
    // Given
    // -----
    // - x = [1, 2, 3, 4], y = [5, 5, 6, 7].
    //
    // Expect
    // ------
    // - Ordinal: y ranks [1, 2, 3, 4] ⇒ ρ = 1.
    // - Average: y ranks [1.5, 1.5, 3, 4] ⇒ Σd² = 0.5 ⇒ ρ = 1 − 3/60 = 0.95.
    fn correlation_rank_methods_differ_on_ties() {
        // Arrange
        let paired = PairedSample::from_slices(&[1.0, 2.0, 3.0, 4.0], &[5.0, 5.0, 6.0, 7.0]).unwrap();
        let average = AnalysisOptions { rank_method: RankMethod::Average, ..Default::default() };

        // Act
        let ord_res = correlation(&paired, &AnalysisOptions::default()).unwrap();
        let avg_res = correlation(&paired, &average).unwrap();

        // Assert
        assert_relative_eq!(ord_res.spearman, 1.0, epsilon = 1e-12);
        assert_relative_eq!(avg_res.spearman, 0.95, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Check that dominance compares magnitudes, not signed values.
    //
    // Given
    // -----
    // - pearson −0.9 vs. spearman 0.7, and pearson 0.7 vs. spearman 0.9.
    //
    // Expect
    // ------
    // - Pearson dominates only in the first case.
    fn pearson_dominates_compares_magnitudes() {
        // Arrange
        let linear = CorrelationResult { pearson: -0.9, spearman: 0.7, n: 5 };
        let monotone = CorrelationResult { pearson: 0.7, spearman: 0.9, n: 5 };

        // Act & Assert
        assert!(linear.pearson_dominates());
        assert!(!monotone.pearson_dominates());
    }

    #[test]
    // Purpose
    // -------
    // Ensure Pearson never leaves [−1, 1] on perfectly correlated series
    // whose values do not round cleanly.
    //
    // Given
    // -----
    // - x = [0.1, 0.2, …, 2.0] and y = 3x + 0.7, y = −x.
    //
    // Expect
    // ------
    // - |r| ≤ 1 exactly and within 1e-12 of 1.
    fn pearson_stays_within_unit_interval() {
        // Arrange
        let x: Vec<f64> = (1..=20).map(|i| f64::from(i) * 0.1).collect();
        let y_pos: Vec<f64> = x.iter().map(|v| 3.0 * v + 0.7).collect();
        let y_neg: Vec<f64> = x.iter().map(|v| -v).collect();
        let opts = AnalysisOptions::default();

        // Act
        let pos = correlation(&PairedSample::from_slices(&x, &y_pos).unwrap(), &opts).unwrap();
        let neg = correlation(&PairedSample::from_slices(&x, &y_neg).unwrap(), &opts).unwrap();

        // Assert
        assert!(pos.pearson <= 1.0);
        assert!(neg.pearson >= -1.0);
        assert_relative_eq!(pos.pearson, 1.0, epsilon = 1e-12);
        assert_relative_eq!(neg.pearson, -1.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Pin the band thresholds, including negative coefficients.
    fn correlation_strength_bands() {
        // Act & Assert
        assert_eq!(CorrelationStrength::classify(0.8), CorrelationStrength::Strong);
        assert_eq!(CorrelationStrength::classify(-0.95), CorrelationStrength::Strong);
        assert_eq!(CorrelationStrength::classify(0.79), CorrelationStrength::Moderate);
        assert_eq!(CorrelationStrength::classify(-0.5), CorrelationStrength::Moderate);
        assert_eq!(CorrelationStrength::classify(0.3), CorrelationStrength::Weak);
        assert_eq!(CorrelationStrength::classify(0.29), CorrelationStrength::Negligible);
    }

    #[test]
    // Purpose
    // -------
    // Ensure small and constant inputs fail instead of returning NaN.
    //
    // Given
    // -----
    // - Two pairs; y = [4, 4, 4]; y = ten readings of 0.1, whose computed
    //   mean is not exactly 0.1.
    //
    // Expect
    // ------
    // - InsufficientData for two pairs, DegenerateInput for both constants.
    fn correlation_rejects_small_and_constant_inputs() {
        // Arrange
        let small = PairedSample::from_slices(&[1.0, 2.0], &[1.0, 2.0]).unwrap();
        let constant = PairedSample::from_slices(&[1.0, 2.0, 3.0], &[4.0, 4.0, 4.0]).unwrap();
        let x: Vec<f64> = (1..=10).map(f64::from).collect();
        let rounded = PairedSample::from_slices(&x, &[0.1; 10]).unwrap();
        let opts = AnalysisOptions::default();

        // Act & Assert
        assert_eq!(
            correlation(&small, &opts),
            Err(AnalysisError::InsufficientData { required: 3, actual: 2 })
        );
        assert!(matches!(
            correlation(&constant, &opts),
            Err(AnalysisError::DegenerateInput { .. })
        ));
        assert!(matches!(
            correlation(&rounded, &opts),
            Err(AnalysisError::DegenerateInput { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Ensure finite inputs whose squared deviations overflow are rejected
    // instead of yielding NaN.
    //
    // Given
    // -----
    // - x = [1e160, 2e160, 3e160], y = [1e160, 2.5e160, 3e160].
    fn correlation_rejects_overflowing_sums() {
        // Arrange
        let paired =
            PairedSample::from_slices(&[1e160, 2e160, 3e160], &[1e160, 2.5e160, 3e160]).unwrap();

        // Act
        let res = correlation(&paired, &AnalysisOptions::default());

        // Assert
        assert_eq!(res, Err(AnalysisError::DegenerateInput { reason: "sum of squares overflowed" }));
    }
}
