//! PyO3 input conversion helpers shared by the Python-facing classes.
//!
//! Every helper turns loosely typed Python arguments into the validated
//! Rust types of [`crate::stats`], so the binding layer never hands raw
//! Python data to a statistic.

#[cfg(feature = "python-bindings")]
use std::str::FromStr;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyTypeError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use numpy::PyReadonlyArray1;

#[cfg(feature = "python-bindings")]
use crate::stats::{
    data::{PairedSample, Sample},
    options::{AnalysisOptions, DEFAULT_LIMITS_MULTIPLIER, DEFAULT_NORMALITY_ALPHA, PValueMethod, RankMethod},
};

/// Copy a 1-D float input into a `Vec<f64>`.
///
/// Accepts a `numpy.ndarray`, anything with `to_numpy()` (pandas Series),
/// or a plain sequence of floats. Strided arrays are copied element-wise.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_vec<'py>(raw_data: &Bound<'py, PyAny>) -> PyResult<Vec<f64>> {
    if let Ok(arr) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        return Ok(arr.as_array().to_vec());
    }
    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series) = obj.extract::<PyReadonlyArray1<f64>>() {
            return Ok(series.as_array().to_vec());
        }
    }
    raw_data.extract::<Vec<f64>>().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64")
    })
}

/// Convert a Python array-like into a validated [`Sample`].
#[cfg(feature = "python-bindings")]
pub fn extract_sample<'py>(raw_data: &Bound<'py, PyAny>) -> PyResult<Sample> {
    Ok(Sample::from_slice(&extract_f64_vec(raw_data)?)?)
}

/// Convert two Python array-likes into a validated [`PairedSample`].
#[cfg(feature = "python-bindings")]
pub fn extract_paired<'py>(
    evaluation: &Bound<'py, PyAny>, comparison: &Bound<'py, PyAny>,
) -> PyResult<PairedSample> {
    let evaluation = extract_f64_vec(evaluation)?;
    let comparison = extract_f64_vec(comparison)?;
    Ok(PairedSample::from_slices(&evaluation, &comparison)?)
}

/// Build [`AnalysisOptions`] from optional keyword arguments.
///
/// Method names are parsed with the `FromStr` impls of [`PValueMethod`] and
/// [`RankMethod`]; omitted arguments fall back to the defaults.
#[cfg(feature = "python-bindings")]
pub fn extract_analysis_options(
    normality_alpha: Option<f64>, limits_multiplier: Option<f64>, p_value_method: Option<&str>,
    rank_method: Option<&str>,
) -> PyResult<AnalysisOptions> {
    let p_value_method = p_value_method.map(PValueMethod::from_str).transpose()?.unwrap_or_default();
    let rank_method = rank_method.map(RankMethod::from_str).transpose()?.unwrap_or_default();
    Ok(AnalysisOptions::new(
        normality_alpha.unwrap_or(DEFAULT_NORMALITY_ALPHA),
        limits_multiplier.unwrap_or(DEFAULT_LIMITS_MULTIPLIER),
        p_value_method,
        rank_method,
    )?)
}
