//! stats::data — validated sample containers for method comparison.
//!
//! Purpose
//! -------
//! Provide small, validated containers for the evaluation and comparison
//! measurement series and the boundary parse step that turns loosely typed
//! record values into them. Downstream statistics rely on these invariants
//! instead of re-checking finiteness and pairing in every routine.
//!
//! Key behaviors
//! -------------
//! - [`Sample`] enforces that every observation is finite.
//! - [`PairedSample`] enforces equal length of the evaluation and comparison
//!   samples; element i of each is one paired observation.
//! - [`parse_measurement`] and [`PairedSample::parse_pairs`] convert raw
//!   strings into finite `f64` values or fail with the offending index.
//!
//! Invariants & assumptions
//! ------------------------
//! - Samples are immutable once constructed; no statistic reorders or
//!   mutates caller data (sorting always happens on a copy).
//! - Samples may be empty. Minimum sample sizes are a per-statistic concern
//!   enforced by `stats::validation`.
//! - Pairing is by position (storage order). The container cannot detect a
//!   misaligned pair; callers must guarantee alignment.
//!
//! Conventions
//! -----------
//! - "Evaluation" is the method under assessment (x), "comparison" the
//!   reference method (y). Differences are always evaluation − comparison.
//!
//! Testing notes
//! -------------
//! - Unit tests cover construction (happy path, non-finite values, unequal
//!   pairing), strict parsing, and the difference series.

use crate::stats::{
    errors::{AnalysisError, AnalysisResult},
    validation::{validate_finite, validate_pairing},
};
use ndarray::Array1;
use serde::Serialize;

/// `Sample` — validated series of finite measurements.
///
/// Fields
/// ------
/// - `data`: `Array1<f64>`
///   Observations in storage order, contiguous in memory.
///
/// Invariants
/// ----------
/// - Every entry is finite.
/// - `data` is in standard (contiguous) layout, so [`Sample::as_slice`]
///   never fails.
///
/// Performance
/// -----------
/// - Validation is a single O(n) scan; non-contiguous input arrays are
///   copied once into standard layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    data: Array1<f64>,
}

impl Sample {
    /// Construct a validated [`Sample`].
    ///
    /// Errors
    /// ------
    /// - `AnalysisError::NonFiniteData { index, value }` for the first NaN
    ///   or ±∞ entry.
    pub fn new(data: Array1<f64>) -> AnalysisResult<Sample> {
        let data = if data.is_standard_layout() {
            data
        } else {
            data.as_standard_layout().into_owned()
        };
        validate_finite(data.as_slice().expect("standard layout is contiguous"))?;
        Ok(Sample { data })
    }

    /// Construct a [`Sample`] by copying a slice.
    pub fn from_slice(data: &[f64]) -> AnalysisResult<Sample> {
        Sample::new(Array1::from(data.to_vec()))
    }

    /// Parse raw textual values into a [`Sample`].
    ///
    /// Errors
    /// ------
    /// - `AnalysisError::UnparsableValue` / `AnalysisError::NonFiniteData`
    ///   as reported by [`parse_measurement`].
    pub fn parse<S: AsRef<str>>(raw: &[S]) -> AnalysisResult<Sample> {
        let values = raw
            .iter()
            .enumerate()
            .map(|(index, value)| parse_measurement(value.as_ref(), index))
            .collect::<AnalysisResult<Vec<f64>>>()?;
        Ok(Sample { data: Array1::from(values) })
    }

    /// Observations as a contiguous slice.
    pub fn as_slice(&self) -> &[f64] {
        self.data.as_slice().expect("Sample storage is contiguous")
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the sample has no observations.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// `PairedSample` — index-aligned evaluation and comparison samples.
///
/// Fields
/// ------
/// - `evaluation`: [`Sample`]
///   Results of the method under assessment (x).
/// - `comparison`: [`Sample`]
///   Results of the reference method (y).
///
/// Invariants
/// ----------
/// - `evaluation.len() == comparison.len()`.
/// - Both samples satisfy the [`Sample`] invariants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairedSample {
    evaluation: Sample,
    comparison: Sample,
}

impl PairedSample {
    /// Pair two validated samples.
    ///
    /// Errors
    /// ------
    /// - `AnalysisError::InvalidPairing` when the lengths differ.
    pub fn new(evaluation: Sample, comparison: Sample) -> AnalysisResult<PairedSample> {
        validate_pairing(evaluation.len(), comparison.len())?;
        Ok(PairedSample { evaluation, comparison })
    }

    /// Validate and pair two raw slices.
    ///
    /// Errors
    /// ------
    /// - `AnalysisError::InvalidPairing` when the lengths differ (checked
    ///   first).
    /// - `AnalysisError::NonFiniteData` for a non-finite value in either
    ///   slice.
    pub fn from_slices(evaluation: &[f64], comparison: &[f64]) -> AnalysisResult<PairedSample> {
        validate_pairing(evaluation.len(), comparison.len())?;
        PairedSample::new(Sample::from_slice(evaluation)?, Sample::from_slice(comparison)?)
    }

    /// Parse `(evaluation, comparison)` pairs of raw record values.
    ///
    /// Parameters
    /// ----------
    /// - `pairs`: `&[(S, S)]`
    ///   Raw values in storage order, e.g. as extracted from stored records
    ///   or a parsed import file.
    ///
    /// Returns
    /// -------
    /// `AnalysisResult<PairedSample>`
    ///   - `Ok` when every value parses to a finite number.
    ///   - `Err(UnparsableValue | NonFiniteData)` naming the pair index of
    ///     the first offending value.
    pub fn parse_pairs<S: AsRef<str>>(pairs: &[(S, S)]) -> AnalysisResult<PairedSample> {
        let mut evaluation = Vec::with_capacity(pairs.len());
        let mut comparison = Vec::with_capacity(pairs.len());
        for (index, (eval_raw, comp_raw)) in pairs.iter().enumerate() {
            evaluation.push(parse_measurement(eval_raw.as_ref(), index)?);
            comparison.push(parse_measurement(comp_raw.as_ref(), index)?);
        }
        Ok(PairedSample {
            evaluation: Sample { data: Array1::from(evaluation) },
            comparison: Sample { data: Array1::from(comparison) },
        })
    }

    /// Evaluation sample (x).
    pub fn evaluation(&self) -> &Sample {
        &self.evaluation
    }

    /// Comparison sample (y).
    pub fn comparison(&self) -> &Sample {
        &self.comparison
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.evaluation.len()
    }

    /// Whether there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.evaluation.is_empty()
    }

    /// Per-pair differences, evaluation − comparison.
    ///
    /// Finite inputs can still overflow to ±∞ for values near `f64::MAX`,
    /// so the result goes through the regular [`Sample::new`] validation.
    pub fn differences(&self) -> AnalysisResult<Sample> {
        let diff = &self.evaluation.data - &self.comparison.data;
        Sample::new(diff)
    }
}

/// Parse one raw measurement into a finite `f64`.
///
/// Parameters
/// ----------
/// - `raw`: `&str`
///   Textual value; surrounding whitespace is ignored.
/// - `index`: `usize`
///   Position of the value in its series, echoed back in errors.
///
/// Returns
/// -------
/// `AnalysisResult<f64>`
///   - `Ok(value)` for a finite number.
///   - `Err(AnalysisError::UnparsableValue { index, raw })` when the text
///     is not a number (including the empty string).
///   - `Err(AnalysisError::NonFiniteData { index, value })` for textual
///     "NaN" / "inf" spellings, which Rust parses successfully.
pub fn parse_measurement(raw: &str, index: usize) -> AnalysisResult<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| AnalysisError::UnparsableValue { index, raw: raw.to_string() })?;
    if !value.is_finite() {
        return Err(AnalysisError::NonFiniteData { index, value });
    }
    Ok(value)
}
