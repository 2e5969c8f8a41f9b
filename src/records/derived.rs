//! records::derived — per-record deviation and ratio fields.
//!
//! Purpose
//! -------
//! Turn one record's raw (evaluation, comparison) result pair into the four
//! derived fields shown next to it: signed deviation, its magnitude, the
//! relative deviation and the evaluation/comparison ratio.
//!
//! Key behaviors
//! -------------
//! - absolute_deviation = evaluation − comparison.
//! - absolute_deviation_value = |absolute_deviation|.
//! - relative_deviation = absolute_deviation_value / evaluation.
//! - evaluation_comparison_ratio = evaluation / comparison.
//!
//! Invariants & assumptions
//! ------------------------
//! - Never fails. A zero divisor or an unparsable raw value yields a
//!   non-finite field (NaN or ±∞) which is kept as-is, never coerced to 0.
//!   [`DerivedRecordFields::is_finite`] lets presentation code decide to
//!   render a placeholder.
//! - The relative deviation divides by the **evaluation** result, not by
//!   the mean of both results. It is asymmetric and undefined for a zero
//!   evaluation result; existing reports depend on this convention.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder rendered for a non-finite derived value.
pub const MISSING_VALUE: &str = "—";

/// DerivedRecordFields — values computed from one record's raw results.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedRecordFields {
    pub absolute_deviation: f64,
    pub absolute_deviation_value: f64,
    pub relative_deviation: f64,
    pub evaluation_comparison_ratio: f64,
}

impl DerivedRecordFields {
    /// Derive the fields from raw textual results.
    ///
    /// Surrounding whitespace is ignored; text that does not parse as a
    /// number becomes NaN and propagates into every dependent field.
    pub fn from_raw(evaluation: &str, comparison: &str) -> DerivedRecordFields {
        compute_derived_fields(parse_lenient(evaluation), parse_lenient(comparison))
    }

    /// Whether all four fields are finite.
    pub fn is_finite(&self) -> bool {
        [
            self.absolute_deviation,
            self.absolute_deviation_value,
            self.relative_deviation,
            self.evaluation_comparison_ratio,
        ]
        .iter()
        .all(|v| v.is_finite())
    }

    /// Fields formatted for display: deviations with 2 decimals, relative
    /// deviation and ratio with 4, [`MISSING_VALUE`] for non-finite values.
    pub fn display_values(&self) -> [String; 4] {
        [
            format_fixed(self.absolute_deviation, 2),
            format_fixed(self.absolute_deviation_value, 2),
            format_fixed(self.relative_deviation, 4),
            format_fixed(self.evaluation_comparison_ratio, 4),
        ]
    }
}

impl fmt::Display for DerivedRecordFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [dev, dev_abs, rel, ratio] = self.display_values();
        write!(f, "deviation {dev} (|{dev_abs}|), relative {rel}, ratio {ratio}")
    }
}

/// Compute the derived fields for one (evaluation, comparison) pair.
///
/// Parameters
/// ----------
/// - `evaluation`: `f64` — result of the method under assessment.
/// - `comparison`: `f64` — result of the reference method.
///
/// Returns
/// -------
/// [`DerivedRecordFields`]; non-finite inputs or zero divisors produce
/// non-finite fields.
///
/// Examples
/// --------
/// ```rust
/// use method_agreement::records::compute_derived_fields;
///
/// let fields = compute_derived_fields(4.0, 2.0);
/// assert_eq!(fields.absolute_deviation, 2.0);
/// assert_eq!(fields.relative_deviation, 0.5);
/// assert_eq!(fields.evaluation_comparison_ratio, 2.0);
/// ```
pub fn compute_derived_fields(evaluation: f64, comparison: f64) -> DerivedRecordFields {
    let absolute_deviation = evaluation - comparison;
    let absolute_deviation_value = absolute_deviation.abs();
    let fields = DerivedRecordFields {
        absolute_deviation,
        absolute_deviation_value,
        relative_deviation: absolute_deviation_value / evaluation,
        evaluation_comparison_ratio: evaluation / comparison,
    };
    if !fields.is_finite() {
        tracing::warn!(evaluation, comparison, "derived record fields are not finite");
    }
    fields
}

/// Trimmed parse; anything that is not a number becomes NaN.
#[inline]
pub(crate) fn parse_lenient(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(f64::NAN)
}

fn format_fixed(value: f64, decimals: usize) -> String {
    if value.is_finite() { format!("{value:.decimals$}") } else { MISSING_VALUE.to_string() }
}
