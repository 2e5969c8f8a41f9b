//! stats::validation — shared input guards for method-comparison statistics.
//!
//! Purpose
//! -------
//! Centralize the basic preconditions every statistic checks before doing
//! any arithmetic: minimum sample size, equal pairing, and finiteness. This
//! avoids duplicating the same checks across the descriptive, normality,
//! correlation, regression and agreement modules.
//!
//! Key behaviors
//! -------------
//! - Expose the minimum sample sizes as named constants so callers and docs
//!   refer to one source of truth.
//! - Map violated preconditions into structured [`AnalysisError`] values.
//!
//! Invariants & assumptions
//! ------------------------
//! - Guards are side-effect free and run before any computation, so a
//!   failing call performs no partial work.
//! - Finiteness is normally established once by `Sample::new`; the
//!   standalone [`validate_finite`] exists for raw-slice entry points.
//!
//! Testing notes
//! -------------
//! - Unit tests cover every error branch and a success path.

use crate::stats::errors::{AnalysisError, AnalysisResult};

/// Minimum n for descriptive statistics.
pub const MIN_DESCRIPTIVE: usize = 1;
/// Minimum n for the approximate Shapiro-Wilk test.
pub const MIN_SHAPIRO_WILK: usize = 3;
/// Minimum n for the approximate D'Agostino omnibus test.
pub const MIN_D_AGOSTINO: usize = 8;
/// Minimum n for correlation, regression and agreement analysis.
pub const MIN_PAIRED: usize = 3;

/// Require at least `required` observations.
///
/// Errors
/// ------
/// - `AnalysisError::InsufficientData { required, actual }` when
///   `actual < required`.
#[inline]
pub fn validate_min_len(actual: usize, required: usize) -> AnalysisResult<()> {
    if actual < required {
        return Err(AnalysisError::InsufficientData { required, actual });
    }
    Ok(())
}

/// Require index-aligned samples of equal length.
///
/// Errors
/// ------
/// - `AnalysisError::InvalidPairing { evaluation, comparison }` when the
///   lengths differ.
#[inline]
pub fn validate_pairing(evaluation: usize, comparison: usize) -> AnalysisResult<()> {
    if evaluation != comparison {
        return Err(AnalysisError::InvalidPairing { evaluation, comparison });
    }
    Ok(())
}

/// Require every value to be finite.
///
/// Parameters
/// ----------
/// - `data`: `&[f64]`
///   Raw observations.
///
/// Returns
/// -------
/// `AnalysisResult<()>`
///   - `Ok(())` if no value is NaN or ±∞.
///   - `Err(AnalysisError::NonFiniteData { index, value })` for the first
///     offending entry.
///
/// Panics
/// ------
/// - Never panics.
pub fn validate_finite(data: &[f64]) -> AnalysisResult<()> {
    match data.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(AnalysisError::NonFiniteData { index, value: data[index] }),
        None => Ok(()),
    }
}
