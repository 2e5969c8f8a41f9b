//! method_agreement — method-comparison statistics with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the method-comparison statistics to Python via the
//! `_method_agreement` extension module. The engine judges whether a method
//! under evaluation agrees with a comparison method from paired
//! measurements of the same specimens.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules: [`stats`] (descriptive statistics,
//!   normality screens, correlation, regression, Bland-Altman agreement)
//!   and [`records`] (measurement records and their derived fields).
//! - Define `#[pyclass]` wrappers and the `#[pymodule]` initializer for the
//!   `_method_agreement` Python extension when `python-bindings` is enabled.
//! - Register the `statistics` and `records` submodules in `sys.modules` so
//!   dotted imports work from Python.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner modules; the Python classes only
//!   convert inputs (through [`utils`]), dispatch and map errors.
//! - `AnalysisError` values cross the boundary as `ValueError` with the Rust
//!   message preserved.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend on [`stats`] and [`records`] directly
//!   and can ignore the PyO3 items.
//!
//! Testing notes
//! -------------
//! - Numerical behavior is covered by unit tests in the inner modules and
//!   by `tests/integration_method_comparison.rs`.

pub mod records;
pub mod stats;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    records::derived::{DerivedRecordFields, compute_derived_fields},
    stats::{
        agreement::{AgreementResult, agreement},
        correlation::{CorrelationResult, CorrelationStrength, correlation},
        descriptive::{DescriptiveResult, describe},
        normality::{NormalityReport, normality},
        options::DEFAULT_NORMALITY_ALPHA,
        regression::{RegressionResult, regression},
    },
    utils::{extract_analysis_options, extract_paired, extract_sample},
};

/// Descriptive — Python-facing summary statistics of one series.
///
/// Constructed from Python via `Descriptive(data)`, where `data` is any
/// 1-D float array-like with at least one finite value. `std_dev` and
/// `variance` are `None` for a single observation.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "method_agreement.statistics", frozen)]
pub struct Descriptive {
    inner: DescriptiveResult,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl Descriptive {
    #[new]
    #[pyo3(text_signature = "(data, /)")]
    pub fn new<'py>(data: &Bound<'py, PyAny>) -> PyResult<Descriptive> {
        let sample = extract_sample(data)?;
        Ok(Descriptive { inner: describe(&sample)? })
    }

    #[getter]
    pub fn n(&self) -> usize {
        self.inner.n
    }

    #[getter]
    pub fn mean(&self) -> f64 {
        self.inner.mean
    }

    #[getter]
    pub fn median(&self) -> f64 {
        self.inner.median
    }

    #[getter]
    pub fn std_dev(&self) -> Option<f64> {
        self.inner.std_dev
    }

    #[getter]
    pub fn variance(&self) -> Option<f64> {
        self.inner.variance
    }

    #[getter]
    pub fn min(&self) -> f64 {
        self.inner.min
    }

    #[getter]
    pub fn max(&self) -> f64 {
        self.inner.max
    }
}

/// Normality — both approximate normality screens for one series.
///
/// Parameters
/// ----------
/// Constructed from Python via `Normality(data)`:
/// - `data`: 1-D float array-like, n ≥ 3.
///
/// Notes
/// -----
/// - The D'Agostino getters return `None` when n < 8.
/// - Both p-values are heuristic approximations; see
///   [`stats::normality`](crate::stats::normality).
#[cfg(feature = "python-bindings")]
#[pyclass(module = "method_agreement.statistics", frozen)]
pub struct Normality {
    inner: NormalityReport,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl Normality {
    #[new]
    #[pyo3(text_signature = "(data, /)")]
    pub fn new<'py>(data: &Bound<'py, PyAny>) -> PyResult<Normality> {
        let sample = extract_sample(data)?;
        Ok(Normality { inner: normality(&sample)? })
    }

    #[getter]
    pub fn shapiro_wilk_statistic(&self) -> f64 {
        self.inner.shapiro_wilk.statistic
    }

    #[getter]
    pub fn shapiro_wilk_pvalue(&self) -> f64 {
        self.inner.shapiro_wilk.p_value
    }

    #[getter]
    pub fn d_agostino_statistic(&self) -> Option<f64> {
        self.inner.d_agostino.map(|d| d.test.statistic)
    }

    #[getter]
    pub fn d_agostino_pvalue(&self) -> Option<f64> {
        self.inner.d_agostino.map(|d| d.test.p_value)
    }

    #[getter]
    pub fn skewness(&self) -> Option<f64> {
        self.inner.d_agostino.map(|d| d.skewness)
    }

    #[getter]
    pub fn kurtosis(&self) -> Option<f64> {
        self.inner.d_agostino.map(|d| d.kurtosis)
    }

    /// Shapiro-Wilk classification: `pvalue >= alpha`.
    #[pyo3(signature = (alpha = DEFAULT_NORMALITY_ALPHA))]
    pub fn is_normal(&self, alpha: f64) -> bool {
        self.inner.shapiro_wilk.is_normal(alpha)
    }
}

/// Correlation — Pearson and Spearman coefficients of paired results.
///
/// Constructed from Python via
/// `Correlation(evaluation, comparison, rank_method=None)`, where
/// `rank_method` is `"ordinal"` (default) or `"average"`.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "method_agreement.statistics", frozen)]
pub struct Correlation {
    inner: CorrelationResult,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl Correlation {
    #[new]
    #[pyo3(
        text_signature = "(evaluation, comparison, /, rank_method=None)",
        signature = (evaluation, comparison, rank_method = None)
    )]
    pub fn new<'py>(
        evaluation: &Bound<'py, PyAny>, comparison: &Bound<'py, PyAny>, rank_method: Option<&str>,
    ) -> PyResult<Correlation> {
        let paired = extract_paired(evaluation, comparison)?;
        let options = extract_analysis_options(None, None, None, rank_method)?;
        Ok(Correlation { inner: correlation(&paired, &options)? })
    }

    #[getter]
    pub fn pearson(&self) -> f64 {
        self.inner.pearson
    }

    #[getter]
    pub fn spearman(&self) -> f64 {
        self.inner.spearman
    }

    #[getter]
    pub fn n(&self) -> usize {
        self.inner.n
    }

    /// Interpretation band of the Pearson coefficient.
    #[getter]
    pub fn strength(&self) -> &'static str {
        match CorrelationStrength::classify(self.inner.pearson) {
            CorrelationStrength::Strong => "strong",
            CorrelationStrength::Moderate => "moderate",
            CorrelationStrength::Weak => "weak",
            CorrelationStrength::Negligible => "negligible",
        }
    }
}

/// Regression — OLS fit of comparison on evaluation results.
///
/// Constructed from Python via
/// `Regression(evaluation, comparison, p_value_method=None)`, where
/// `p_value_method` is `"approximate"` (default) or `"student_t"`.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "method_agreement.statistics", frozen)]
pub struct Regression {
    inner: RegressionResult,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl Regression {
    #[new]
    #[pyo3(
        text_signature = "(evaluation, comparison, /, p_value_method=None)",
        signature = (evaluation, comparison, p_value_method = None)
    )]
    pub fn new<'py>(
        evaluation: &Bound<'py, PyAny>, comparison: &Bound<'py, PyAny>,
        p_value_method: Option<&str>,
    ) -> PyResult<Regression> {
        let paired = extract_paired(evaluation, comparison)?;
        let options = extract_analysis_options(None, None, p_value_method, None)?;
        Ok(Regression { inner: regression(&paired, &options)? })
    }

    #[getter]
    pub fn slope(&self) -> f64 {
        self.inner.slope
    }

    #[getter]
    pub fn intercept(&self) -> f64 {
        self.inner.intercept
    }

    #[getter]
    pub fn r_squared(&self) -> f64 {
        self.inner.r_squared
    }

    #[getter]
    pub fn standard_error(&self) -> f64 {
        self.inner.standard_error
    }

    #[getter]
    pub fn t_value(&self) -> f64 {
        self.inner.t_value
    }

    #[getter]
    pub fn pvalue(&self) -> f64 {
        self.inner.p_value
    }

    /// 95 % slope interval as `(lower, upper)`.
    #[getter]
    pub fn confidence_interval(&self) -> (f64, f64) {
        (self.inner.confidence_interval.lower, self.inner.confidence_interval.upper)
    }

    #[getter]
    pub fn n(&self) -> usize {
        self.inner.n
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.inner.predict(x)
    }
}

/// Agreement — Bland-Altman analysis of paired results.
///
/// Constructed from Python via
/// `Agreement(evaluation, comparison, limits_multiplier=1.96)`.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "method_agreement.statistics", frozen)]
pub struct Agreement {
    inner: AgreementResult,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl Agreement {
    #[new]
    #[pyo3(
        text_signature = "(evaluation, comparison, /, limits_multiplier=None)",
        signature = (evaluation, comparison, limits_multiplier = None)
    )]
    pub fn new<'py>(
        evaluation: &Bound<'py, PyAny>, comparison: &Bound<'py, PyAny>,
        limits_multiplier: Option<f64>,
    ) -> PyResult<Agreement> {
        let paired = extract_paired(evaluation, comparison)?;
        let options = extract_analysis_options(None, limits_multiplier, None, None)?;
        Ok(Agreement { inner: agreement(&paired, &options)? })
    }

    #[getter]
    pub fn differences(&self) -> Vec<f64> {
        self.inner.differences.clone()
    }

    #[getter]
    pub fn means(&self) -> Vec<f64> {
        self.inner.means.clone()
    }

    #[getter]
    pub fn mean_diff(&self) -> f64 {
        self.inner.mean_diff
    }

    #[getter]
    pub fn sd_diff(&self) -> f64 {
        self.inner.sd_diff
    }

    #[getter]
    pub fn upper_limit(&self) -> f64 {
        self.inner.limits.upper
    }

    #[getter]
    pub fn lower_limit(&self) -> f64 {
        self.inner.limits.lower
    }

    #[getter]
    pub fn outlier_flags(&self) -> Vec<bool> {
        self.inner.points.iter().map(|p| p.is_outlier).collect()
    }

    #[getter]
    pub fn outlier_count(&self) -> usize {
        self.inner.outlier_count
    }

    #[getter]
    pub fn outlier_ratio(&self) -> f64 {
        self.inner.outlier_ratio
    }
}

/// DerivedFields — per-record deviation and ratio fields.
///
/// Constructed from Python via `DerivedFields(evaluation, comparison)` with
/// floats, or `DerivedFields.from_raw(evaluation, comparison)` with strings.
/// Degenerate inputs produce `nan`/`inf` rather than raising.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "method_agreement.records", frozen)]
pub struct DerivedFields {
    inner: DerivedRecordFields,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl DerivedFields {
    #[new]
    #[pyo3(text_signature = "(evaluation, comparison, /)")]
    pub fn new(evaluation: f64, comparison: f64) -> DerivedFields {
        DerivedFields { inner: compute_derived_fields(evaluation, comparison) }
    }

    #[staticmethod]
    #[pyo3(text_signature = "(evaluation, comparison, /)")]
    pub fn from_raw(evaluation: &str, comparison: &str) -> DerivedFields {
        DerivedFields { inner: DerivedRecordFields::from_raw(evaluation, comparison) }
    }

    #[getter]
    pub fn absolute_deviation(&self) -> f64 {
        self.inner.absolute_deviation
    }

    #[getter]
    pub fn absolute_deviation_value(&self) -> f64 {
        self.inner.absolute_deviation_value
    }

    #[getter]
    pub fn relative_deviation(&self) -> f64 {
        self.inner.relative_deviation
    }

    #[getter]
    pub fn evaluation_comparison_ratio(&self) -> f64 {
        self.inner.evaluation_comparison_ratio
    }

    pub fn is_finite(&self) -> bool {
        self.inner.is_finite()
    }

    pub fn __repr__(&self) -> String {
        format!("DerivedFields({})", self.inner)
    }
}

/// Define the `_method_agreement` Python module and register its
/// `statistics` and `records` submodules.
///
/// Errors
/// ------
/// - `PyErr` if creating a submodule or updating `sys.modules` fails.
///
/// Notes
/// -----
/// - Invoked by Python when importing the compiled extension.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _method_agreement<'py>(py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let statistics_mod = PyModule::new(py, "statistics")?;
    let records_mod = PyModule::new(py, "records")?;
    register_statistics(m, &statistics_mod)?;
    register_records(m, &records_mod)?;

    // Register submodules so `import method_agreement.statistics` works.
    let modules = py.import("sys")?.getattr("modules")?;
    modules.set_item("method_agreement.statistics", statistics_mod)?;
    modules.set_item("method_agreement.records", records_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn register_statistics<'py>(parent: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_class::<Descriptive>()?;
    m.add_class::<Normality>()?;
    m.add_class::<Correlation>()?;
    m.add_class::<Regression>()?;
    m.add_class::<Agreement>()?;
    parent.add_submodule(m)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn register_records<'py>(parent: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_class::<DerivedFields>()?;
    parent.add_submodule(m)?;
    Ok(())
}
