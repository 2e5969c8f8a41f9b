//! stats::normality — approximate normality screens for one series.
//!
//! Purpose
//! -------
//! Screen a measurement series (evaluation, comparison, or differences) for
//! departures from normality before choosing parametric summaries. Two
//! independent heuristics are provided: an approximate Shapiro-Wilk
//! statistic with a step-function p-value, and an approximate D'Agostino
//! omnibus statistic with an exponential p-value.
//!
//! Key behaviors
//! -------------
//! - [`shapiro_wilk_approx`] pairs the ⌊n/2⌋ largest and smallest order
//!   statistics, W = (Σ aᵢ)² / Σ(x − x̄)², and quantizes the p-value to
//!   {0.01, 0.05, 0.10}.
//! - [`d_agostino_approx`] combines sample skewness and excess kurtosis into
//!   Z = √(skew² + kurt²) with p = exp(−Z / 2).
//! - [`normality`] runs both, omitting D'Agostino when n < 8.
//!
//! Invariants & assumptions
//! ------------------------
//! - **Both tests are heuristic.** Neither uses the published coefficient
//!   tables nor a χ² reference distribution; their p-values are coarse and
//!   must not be read as exact significance levels. They are kept as-is so
//!   that reported conclusions stay comparable with earlier reports.
//! - Shapiro-Wilk requires n ≥ 3; D'Agostino requires n ≥ 8.
//! - A constant series has zero spread, which makes both statistics
//!   undefined (`DegenerateInput`). Constancy is checked on the values
//!   themselves; an overflowing sum of squares is also `DegenerateInput`.
//!
//! Conventions
//! -----------
//! - "Normal" means `p_value >= alpha` ([`NormalityResult::is_normal`]);
//!   the threshold is a caller-side interpretation, default 0.05.
//! - Kurtosis is reported as *excess* kurtosis (normal ⇒ 0).
//!
//! Testing notes
//! -------------
//! - Unit tests pin the step-function boundaries, closed-form values on
//!   small symmetric series, the n < 8 omission, and degenerate input.

use crate::stats::{
    data::Sample,
    errors::{AnalysisError, AnalysisResult},
    helpers::{calc_mean, ensure_finite_sum, is_constant, sample_variance, sum_sq_dev},
    validation::{MIN_D_AGOSTINO, MIN_SHAPIRO_WILK, validate_min_len},
};
use serde::{Deserialize, Serialize};

/// NormalityResult — statistic and p-value of one normality screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalityResult {
    pub statistic: f64,
    pub p_value: f64,
}

impl NormalityResult {
    /// Caller-side classification: `p_value >= alpha`.
    pub fn is_normal(&self, alpha: f64) -> bool {
        self.p_value >= alpha
    }
}

/// DAgostinoResult — omnibus screen plus the moments it was built from.
///
/// Fields
/// ------
/// - `test`: [`NormalityResult`] — Z statistic and exp(−Z/2) p-value.
/// - `skewness`: `f64` — mean of standardized cubes.
/// - `kurtosis`: `f64` — mean of standardized fourth powers minus 3.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DAgostinoResult {
    pub test: NormalityResult,
    pub skewness: f64,
    pub kurtosis: f64,
}

/// NormalityReport — both screens for one sample.
///
/// `d_agostino` is `None` when 3 ≤ n < 8.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalityReport {
    pub shapiro_wilk: NormalityResult,
    pub d_agostino: Option<DAgostinoResult>,
}

/// Run both normality screens on one sample.
///
/// Parameters
/// ----------
/// - `sample`: `&Sample`
///   Validated observations, n ≥ 3.
///
/// Returns
/// -------
/// `AnalysisResult<NormalityReport>`
///   - `Ok(report)` with the Shapiro-Wilk screen always present and the
///     D'Agostino screen present iff n ≥ 8.
///   - `Err(InsufficientData)` when n < 3.
///   - `Err(DegenerateInput)` for a constant series.
pub fn normality(sample: &Sample) -> AnalysisResult<NormalityReport> {
    validate_min_len(sample.len(), MIN_SHAPIRO_WILK)?;
    let shapiro_wilk = shapiro_wilk_approx(sample)?;
    let d_agostino = if sample.len() >= MIN_D_AGOSTINO {
        Some(d_agostino_approx(sample)?)
    } else {
        tracing::debug!(n = sample.len(), "sample too small for D'Agostino screen; omitted");
        None
    };
    Ok(NormalityReport { shapiro_wilk, d_agostino })
}

/// Approximate Shapiro-Wilk screen.
///
/// Parameters
/// ----------
/// - `sample`: `&Sample`
///   Validated observations, n ≥ 3.
///
/// Returns
/// -------
/// `AnalysisResult<NormalityResult>`
///   - `statistic`: W = (Σᵢ aᵢ)² / s² with aᵢ = x₍ₙ₋₁₋ᵢ₎ − x₍ᵢ₎ for
///     i = 0..⌊n/2⌋ − 1 and s² = Σ(x − x̄)².
///   - `p_value`: 0.01 if W < 0.90, 0.05 if W < 0.95, otherwise 0.10.
///
/// Errors
/// ------
/// - `InsufficientData { required: 3, .. }` when n < 3.
/// - `DegenerateInput` for a constant series or when s² overflows.
///
/// Notes
/// -----
/// - Heuristic: no Royston coefficients, no continuous p-value.
pub fn shapiro_wilk_approx(sample: &Sample) -> AnalysisResult<NormalityResult> {
    let data = sample.as_slice();
    validate_min_len(data.len(), MIN_SHAPIRO_WILK)?;
    tracing::debug!(n = data.len(), "computing approximate Shapiro-Wilk screen");

    let n = data.len();
    if is_constant(data) {
        tracing::warn!(n, "constant series; Shapiro-Wilk statistic undefined");
        return Err(AnalysisError::DegenerateInput { reason: "sample has zero variance" });
    }
    let s2 = ensure_finite_sum(sum_sq_dev(data, calc_mean(data)))?;

    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    let spread_sum: f64 = (0..n / 2).map(|i| sorted[n - 1 - i] - sorted[i]).sum();
    // Divide before squaring so a large spread cannot overflow.
    let statistic = (spread_sum / s2.sqrt()).powi(2);

    Ok(NormalityResult { statistic, p_value: shapiro_wilk_step_p_value(statistic) })
}

/// Approximate D'Agostino omnibus screen.
///
/// Parameters
/// ----------
/// - `sample`: `&Sample`
///   Validated observations, n ≥ 8.
///
/// Returns
/// -------
/// `AnalysisResult<DAgostinoResult>`
///   - `skewness` = (1/n) Σ((x − x̄)/s)³, `kurtosis` = (1/n) Σ((x − x̄)/s)⁴ − 3,
///     where s uses the (n − 1) denominator.
///   - `test.statistic` = Z = √(skewness² + kurtosis²).
///   - `test.p_value` = exp(−Z / 2).
///
/// Errors
/// ------
/// - `InsufficientData { required: 8, .. }` when n < 8.
/// - `DegenerateInput` for a constant series or when s² overflows.
///
/// Notes
/// -----
/// - Heuristic: Z is not the K² statistic of D'Agostino–Pearson and the
///   p-value is not taken from χ²(2).
pub fn d_agostino_approx(sample: &Sample) -> AnalysisResult<DAgostinoResult> {
    let data = sample.as_slice();
    validate_min_len(data.len(), MIN_D_AGOSTINO)?;
    tracing::debug!(n = data.len(), "computing approximate D'Agostino screen");

    let n = data.len() as f64;
    if is_constant(data) {
        tracing::warn!(n = data.len(), "constant series; D'Agostino statistic undefined");
        return Err(AnalysisError::DegenerateInput { reason: "sample has zero variance" });
    }
    let mean = calc_mean(data);
    let std_dev = ensure_finite_sum(sample_variance(data, mean))?.sqrt();

    let (cubes, fourths) = data.iter().fold((0.0, 0.0), |(c, q), &x| {
        let z = (x - mean) / std_dev;
        (c + z.powi(3), q + z.powi(4))
    });
    let skewness = cubes / n;
    let kurtosis = fourths / n - 3.0;
    let statistic = (skewness * skewness + kurtosis * kurtosis).sqrt();

    Ok(DAgostinoResult {
        test: NormalityResult { statistic, p_value: (-statistic / 2.0).exp() },
        skewness,
        kurtosis,
    })
}

/// Step-function p-value for the approximate Shapiro-Wilk statistic.
#[inline]
fn shapiro_wilk_step_p_value(w: f64) -> f64 {
    if w < 0.90 {
        0.01
    } else if w < 0.95 {
        0.05
    } else {
        0.10
    }
}
