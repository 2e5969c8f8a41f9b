//! stats::regression — OLS regression of comparison on evaluation results.
//!
//! Purpose
//! -------
//! Fit the straight line y = slope · x + intercept by ordinary least squares,
//! with x the evaluation results and y the comparison results, and report
//! the inferential statistics used to judge proportional (slope ≠ 1) and
//! constant (intercept ≠ 0) bias between the two methods.
//!
//! Key behaviors
//! -------------
//! - slope = Sxy / Sxx, intercept = ȳ − slope · x̄.
//! - R² = 1 − SSres / SStot; residual standard error √(SSres / (n − 2)).
//! - t = slope / (SE / √Sxx).
//! - p-value and slope interval per [`PValueMethod`]:
//!   - `Approximate` (default): p = 2 (1 − T(|t|, n − 2)) with the closed-form
//!     pseudo-CDF T(t, df) = 1 − ½ (df / (df + t²))^(df/2), and the interval
//!     slope ± 1.96 · SE.
//!   - `StudentT`: exact Student-t CDF and 0.975 quantile with n − 2
//!     degrees of freedom (`statrs`).
//!
//! Invariants & assumptions
//! ------------------------
//! - Requires n ≥ 3 pairs, so df = n − 2 ≥ 1.
//! - Direction matters: swapping evaluation and comparison changes slope and
//!   intercept.
//! - One residual standard error is shared by the slope and intercept rows
//!   (see [`RegressionResult::coefficient_rows`]). The intercept strictly
//!   needs its own standard error; the shared value is a known
//!   simplification kept for report compatibility.
//! - With `Approximate`, the interval uses the normal critical value and
//!   ignores the degrees of freedom.
//!
//! Testing notes
//! -------------
//! - Unit tests cover a perfect linear fit, a hand-computed noisy fit under
//!   both p-value methods, and the degenerate/insufficient cases.

use crate::stats::{
    data::PairedSample,
    errors::{AnalysisError, AnalysisResult},
    helpers::{calc_mean, ensure_finite_sum, is_constant, sum_cross_dev, sum_sq_dev},
    options::{AnalysisOptions, PValueMethod},
    validation::{MIN_PAIRED, validate_min_len},
};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Fixed two-sided 95 % normal critical value used by the approximate path.
const Z_CRITICAL_95: f64 = 1.96;

/// ConfidenceInterval — closed interval `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

/// RegressionResult — OLS fit of comparison (y) on evaluation (x).
///
/// Fields
/// ------
/// - `slope`, `intercept`: `f64` — fitted line.
/// - `r_squared`: `f64` — coefficient of determination, ≤ 1.
/// - `standard_error`: `f64` — residual standard error √(SSres / (n − 2)).
/// - `t_value`: `f64` — slope / (SE / √Sxx); ±∞ for a perfect fit.
/// - `p_value`: `f64` — two-sided, in [0, 1].
/// - `confidence_interval`: [`ConfidenceInterval`] — 95 % slope interval.
/// - `n`: `usize` — number of pairs.
/// - `method`: [`PValueMethod`] — how `p_value` and the interval were derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub standard_error: f64,
    pub t_value: f64,
    pub p_value: f64,
    pub confidence_interval: ConfidenceInterval,
    pub n: usize,
    pub method: PValueMethod,
}

/// Which coefficient a report row describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegressionTerm {
    Intercept,
    Slope,
}

/// CoefficientRow — one row of the coefficient table handed to reports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoefficientRow {
    pub term: RegressionTerm,
    pub estimate: f64,
    pub standard_error: f64,
    pub t_value: f64,
    pub p_value: f64,
    pub confidence_interval: ConfidenceInterval,
}

impl RegressionResult {
    /// Intercept and slope rows for the coefficient table.
    ///
    /// Both rows carry the shared residual standard error, t, p and slope
    /// interval; only `estimate` differs.
    pub fn coefficient_rows(&self) -> [CoefficientRow; 2] {
        let row = |term, estimate| CoefficientRow {
            term,
            estimate,
            standard_error: self.standard_error,
            t_value: self.t_value,
            p_value: self.p_value,
            confidence_interval: self.confidence_interval,
        };
        [row(RegressionTerm::Intercept, self.intercept), row(RegressionTerm::Slope, self.slope)]
    }

    /// Fitted comparison value for an evaluation result `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit comparison results on evaluation results by OLS.
///
/// Parameters
/// ----------
/// - `paired`: `&PairedSample`
///   x = evaluation, y = comparison; n ≥ 3.
/// - `options`: `&AnalysisOptions`
///   Only `p_value_method` is consulted.
///
/// Returns
/// -------
/// `AnalysisResult<RegressionResult>`
///
/// Errors
/// ------
/// - `InsufficientData { required: 3, .. }` when n < 3.
/// - `DegenerateInput` when all evaluation results are identical (Sxx = 0,
///   slope undefined), all comparison results are identical (SStot = 0,
///   R² undefined), or a sum of squares overflows.
///
/// Examples
/// --------
/// ```rust
/// use method_agreement::stats::{AnalysisOptions, PairedSample, regression};
///
/// let paired = PairedSample::from_slices(&[1.0, 2.0, 3.0, 4.0], &[3.0, 5.0, 7.0, 9.0]).unwrap();
/// let fit = regression(&paired, &AnalysisOptions::default()).unwrap();
/// assert_eq!((fit.slope, fit.intercept, fit.r_squared), (2.0, 1.0, 1.0));
/// ```
pub fn regression(
    paired: &PairedSample, options: &AnalysisOptions,
) -> AnalysisResult<RegressionResult> {
    let x = paired.evaluation().as_slice();
    let y = paired.comparison().as_slice();
    validate_min_len(x.len(), MIN_PAIRED)?;
    tracing::debug!(n = x.len(), method = ?options.p_value_method, "fitting OLS regression");

    let n = x.len();
    if is_constant(x) {
        tracing::warn!(n, "constant evaluation results; regression slope undefined");
        return Err(AnalysisError::DegenerateInput {
            reason: "evaluation sample has zero variance; slope undefined",
        });
    }
    if is_constant(y) {
        tracing::warn!(n, "constant comparison results; R² undefined");
        return Err(AnalysisError::DegenerateInput {
            reason: "comparison sample has zero variance; R² undefined",
        });
    }
    let mean_x = calc_mean(x);
    let mean_y = calc_mean(y);
    let sxx = ensure_finite_sum(sum_sq_dev(x, mean_x))?;
    let ss_tot = ensure_finite_sum(sum_sq_dev(y, mean_y))?;

    let slope = sum_cross_dev(x, y, mean_x, mean_y) / sxx;
    let intercept = mean_y - slope * mean_x;
    let ss_res: f64 =
        x.iter().zip(y).map(|(xi, yi)| (yi - (slope * xi + intercept)).powi(2)).sum();
    let r_squared = 1.0 - ss_res / ss_tot;

    let df = (n - 2) as f64;
    let standard_error = (ss_res / df).sqrt();
    let t_value = slope / (standard_error / sxx.sqrt());

    let (p_value, critical) = match options.p_value_method {
        PValueMethod::Approximate => (approx_two_sided_p(t_value, df), Z_CRITICAL_95),
        PValueMethod::StudentT => student_t_inference(t_value, df)?,
    };

    Ok(RegressionResult {
        slope,
        intercept,
        r_squared,
        standard_error,
        t_value,
        p_value,
        confidence_interval: ConfidenceInterval {
            lower: slope - critical * standard_error,
            upper: slope + critical * standard_error,
        },
        n,
        method: options.p_value_method,
    })
}

/// Closed-form pseudo-CDF T(t, df) = 1 − ½ (df / (df + t²))^(df/2).
///
/// Not the Student-t CDF; monotone in |t| with T(0) = ½ and T(∞) = 1.
#[inline]
fn approx_t_cdf(t: f64, df: f64) -> f64 {
    1.0 - 0.5 * (df / (df + t * t)).powf(df / 2.0)
}

/// Two-sided p-value 2 (1 − T(|t|, df)) under the approximate CDF.
#[inline]
fn approx_two_sided_p(t: f64, df: f64) -> f64 {
    2.0 * (1.0 - approx_t_cdf(t.abs(), df))
}

/// Exact two-sided p-value and 0.975 critical value from Student's t.
fn student_t_inference(t: f64, df: f64) -> AnalysisResult<(f64, f64)> {
    let dist = StudentsT::new(0.0, 1.0, df).map_err(|_| AnalysisError::DegenerateInput {
        reason: "invalid degrees of freedom for Student-t reference",
    })?;
    let p_value = (2.0 * (1.0 - dist.cdf(t.abs()))).clamp(0.0, 1.0);
    Ok((p_value, dist.inverse_cdf(0.975)))
}
