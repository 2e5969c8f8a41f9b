//! stats::options — configuration for method-comparison analyses.
//!
//! Purpose
//! -------
//! Collect the tuning knobs of the statistics engine in one explicit value
//! so call sites pass validated options instead of ad-hoc flags: the
//! normality significance level, the Bland-Altman limits multiplier, the
//! p-value method used by the regression, and the rank method used by the
//! Spearman correlation.
//!
//! Key behaviors
//! -------------
//! - [`AnalysisOptions::default`] reproduces the established behavior:
//!   α = 0.05, limits at ±1.96 SD, the closed-form approximate p-value, and
//!   ordinal (stable-sort) ranks without tie averaging.
//! - [`AnalysisOptions::new`] validates numeric settings.
//! - [`PValueMethod`] and [`RankMethod`] parse from short names so bindings
//!   can accept strings.
//!
//! Invariants & assumptions
//! ------------------------
//! - `normality_alpha` lies in the open interval (0, 1).
//! - `limits_multiplier` is finite and strictly positive.
//!
//! Conventions
//! -----------
//! - The opt-in methods (`PValueMethod::StudentT`, `RankMethod::Average`)
//!   change reported numbers; they are never enabled implicitly.
//!
//! Testing notes
//! -------------
//! - Unit tests check the defaults, each validation branch and string
//!   parsing.

use crate::stats::errors::{AnalysisError, AnalysisResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default significance level for "is normal" classification.
pub const DEFAULT_NORMALITY_ALPHA: f64 = 0.05;
/// Default Bland-Altman limits multiplier (≈ 97.5 % normal quantile).
pub const DEFAULT_LIMITS_MULTIPLIER: f64 = 1.96;

/// PValueMethod — how regression p-values and slope intervals are derived.
///
/// Variants
/// --------
/// - `Approximate`
///   Closed-form pseudo-CDF T(t, df) = 1 − ½·(df / (df + t²))^(df/2) for the
///   p-value and a fixed 1.96 multiplier for the slope interval. Heuristic,
///   kept as the default for continuity with existing reports.
/// - `StudentT`
///   Exact Student-t CDF and 0.975 quantile with n − 2 degrees of freedom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PValueMethod {
    #[default]
    Approximate,
    StudentT,
}

impl FromStr for PValueMethod {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "approximate" | "approx" => Ok(PValueMethod::Approximate),
            "student_t" | "studentt" | "exact" => Ok(PValueMethod::StudentT),
            other => Err(AnalysisError::InvalidOption {
                name: "p_value_method",
                reason: format!("unknown method {other:?} (expected 'approximate' or 'student_t')"),
            }),
        }
    }
}

/// RankMethod — rank assignment for the Spearman correlation.
///
/// Variants
/// --------
/// - `Ordinal`
///   1-based position in a stable ascending sort. Tied values receive
///   distinct consecutive ranks in storage order.
/// - `Average`
///   Tied values share the mean of the positions they occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RankMethod {
    #[default]
    Ordinal,
    Average,
}

impl FromStr for RankMethod {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ordinal" => Ok(RankMethod::Ordinal),
            "average" | "mean" => Ok(RankMethod::Average),
            other => Err(AnalysisError::InvalidOption {
                name: "rank_method",
                reason: format!("unknown method {other:?} (expected 'ordinal' or 'average')"),
            }),
        }
    }
}

/// AnalysisOptions — configuration shared by the paired statistics.
///
/// Fields
/// ------
/// - `normality_alpha`: `f64`
///   Threshold for [`NormalityResult::is_normal`](crate::stats::normality::NormalityResult::is_normal)
///   style classification (`p >= alpha` ⇒ normal).
/// - `limits_multiplier`: `f64`
///   Multiplier z in the limits of agreement mean_diff ± z·sd_diff.
/// - `p_value_method`: [`PValueMethod`]
///   Regression inference method.
/// - `rank_method`: [`RankMethod`]
///   Spearman rank assignment.
///
/// Notes
/// -----
/// - Plain data carrier; fields are public for struct-update syntax, but
///   [`AnalysisOptions::new`] is the validated entry point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    pub normality_alpha: f64,
    pub limits_multiplier: f64,
    pub p_value_method: PValueMethod,
    pub rank_method: RankMethod,
}

impl AnalysisOptions {
    /// Construct validated [`AnalysisOptions`].
    ///
    /// Errors
    /// ------
    /// - `AnalysisError::InvalidOption` when `normality_alpha` is outside
    ///   (0, 1) or `limits_multiplier` is not finite and positive.
    pub fn new(
        normality_alpha: f64, limits_multiplier: f64, p_value_method: PValueMethod,
        rank_method: RankMethod,
    ) -> AnalysisResult<AnalysisOptions> {
        if !(normality_alpha > 0.0 && normality_alpha < 1.0) {
            return Err(AnalysisError::InvalidOption {
                name: "normality_alpha",
                reason: format!("must lie in (0, 1); got {normality_alpha}"),
            });
        }
        if !(limits_multiplier.is_finite() && limits_multiplier > 0.0) {
            return Err(AnalysisError::InvalidOption {
                name: "limits_multiplier",
                reason: format!("must be finite and > 0; got {limits_multiplier}"),
            });
        }
        Ok(AnalysisOptions { normality_alpha, limits_multiplier, p_value_method, rank_method })
    }
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        AnalysisOptions {
            normality_alpha: DEFAULT_NORMALITY_ALPHA,
            limits_multiplier: DEFAULT_LIMITS_MULTIPLIER,
            p_value_method: PValueMethod::Approximate,
            rank_method: RankMethod::Ordinal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Documented defaults.
    // - Validation of alpha and the limits multiplier.
    // - String parsing of the method enums.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that the defaults reproduce the established behavior.
    //
    // Expect
    // ------
    // - α = 0.05, z = 1.96, approximate p-values, ordinal ranks.
    fn default_options_match_established_behavior() {
        // Act
        let opts = AnalysisOptions::default();

        // Assert
        assert_eq!(opts.normality_alpha, 0.05);
        assert_eq!(opts.limits_multiplier, 1.96);
        assert_eq!(opts.p_value_method, PValueMethod::Approximate);
        assert_eq!(opts.rank_method, RankMethod::Ordinal);
    }

    #[test]
    // Purpose
    // -------
    // Ensure out-of-range numeric settings are rejected.
    //
    // Given
    // -----
    // - alpha ∈ {0, 1, NaN}; multiplier ∈ {0, -1, ∞}.
    //
    // Expect
    // ------
    // - Each returns InvalidOption naming the offending field.
    fn new_rejects_out_of_range_settings() {
        // Act & Assert
        for alpha in [0.0, 1.0, f64::NAN] {
            match AnalysisOptions::new(alpha, 1.96, PValueMethod::default(), RankMethod::default())
            {
                Err(AnalysisError::InvalidOption { name, .. }) => {
                    assert_eq!(name, "normality_alpha")
                }
                other => panic!("expected InvalidOption for alpha {alpha}, got {other:?}"),
            }
        }
        for z in [0.0, -1.0, f64::INFINITY] {
            match AnalysisOptions::new(0.05, z, PValueMethod::default(), RankMethod::default()) {
                Err(AnalysisError::InvalidOption { name, .. }) => {
                    assert_eq!(name, "limits_multiplier")
                }
                other => panic!("expected InvalidOption for multiplier {z}, got {other:?}"),
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify case-insensitive parsing of method names and rejection of
    // unknown names.
    fn method_enums_parse_from_str() {
        // Act & Assert
        assert_eq!("Approximate".parse::<PValueMethod>(), Ok(PValueMethod::Approximate));
        assert_eq!("student_t".parse::<PValueMethod>(), Ok(PValueMethod::StudentT));
        assert_eq!("AVERAGE".parse::<RankMethod>(), Ok(RankMethod::Average));
        assert!("dense".parse::<RankMethod>().is_err());
    }
}
