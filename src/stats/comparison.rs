//! stats::comparison — the full method-comparison battery in one call.
//!
//! Purpose
//! -------
//! Run every statistic of a method-comparison report over one
//! [`PairedSample`]: descriptive statistics and normality screens for the
//! evaluation, comparison and difference series, plus correlation,
//! regression and Bland-Altman agreement.
//!
//! Key behaviors
//! -------------
//! - Each component keeps its own `AnalysisResult`, so a failing statistic
//!   (e.g. a constant comparison series breaking the regression) does not
//!   hide the others.
//! - With the `parallel` feature the independent components are evaluated
//!   through nested `rayon::join` calls; [`MethodComparison::run_sequential`]
//!   is always available and produces identical values.
//!
//! Invariants & assumptions
//! ------------------------
//! - All components read the same immutable input and options; there is no
//!   shared mutable state between them.

use crate::stats::{
    agreement::{AgreementResult, agreement},
    correlation::{CorrelationResult, correlation},
    data::{PairedSample, Sample},
    descriptive::{DescriptiveResult, describe},
    errors::AnalysisResult,
    normality::{NormalityReport, normality},
    options::AnalysisOptions,
    regression::{RegressionResult, regression},
};

/// SeriesSummary — descriptive statistics and normality for one series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub descriptive: AnalysisResult<DescriptiveResult>,
    pub normality: AnalysisResult<NormalityReport>,
}

impl SeriesSummary {
    fn analyze(sample: &Sample) -> SeriesSummary {
        SeriesSummary { descriptive: describe(sample), normality: normality(sample) }
    }

    /// Shapiro-Wilk classification at `alpha`; `None` if the screen failed.
    pub fn is_normal(&self, alpha: f64) -> Option<bool> {
        self.normality.as_ref().ok().map(|report| report.shapiro_wilk.is_normal(alpha))
    }
}

/// MethodComparison — every report component for one paired sample.
///
/// Fields
/// ------
/// - `evaluation`, `comparison`, `differences`: [`SeriesSummary`] — per
///   series; `differences` is evaluation − comparison.
/// - `correlation`, `regression`, `agreement` — paired statistics.
/// - `options`: [`AnalysisOptions`] the battery was run with.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodComparison {
    pub evaluation: SeriesSummary,
    pub comparison: SeriesSummary,
    pub differences: SeriesSummary,
    pub correlation: AnalysisResult<CorrelationResult>,
    pub regression: AnalysisResult<RegressionResult>,
    pub agreement: AnalysisResult<AgreementResult>,
    pub options: AnalysisOptions,
}

impl MethodComparison {
    /// Run the battery, in parallel when the `parallel` feature is enabled.
    pub fn run(paired: &PairedSample, options: &AnalysisOptions) -> MethodComparison {
        tracing::debug!(n = paired.len(), "running method comparison");
        #[cfg(feature = "parallel")]
        {
            MethodComparison::run_parallel(paired, options)
        }
        #[cfg(not(feature = "parallel"))]
        {
            MethodComparison::run_sequential(paired, options)
        }
    }

    /// Run the battery on the calling thread.
    pub fn run_sequential(paired: &PairedSample, options: &AnalysisOptions) -> MethodComparison {
        MethodComparison {
            evaluation: SeriesSummary::analyze(paired.evaluation()),
            comparison: SeriesSummary::analyze(paired.comparison()),
            differences: difference_summary(paired),
            correlation: correlation(paired, options),
            regression: regression(paired, options),
            agreement: agreement(paired, options),
            options: *options,
        }
    }

    /// Run the battery on the rayon thread pool.
    #[cfg(feature = "parallel")]
    pub fn run_parallel(paired: &PairedSample, options: &AnalysisOptions) -> MethodComparison {
        let ((evaluation, comparison), (differences, (correlation, (regression, agreement)))) =
            rayon::join(
                || {
                    rayon::join(
                        || SeriesSummary::analyze(paired.evaluation()),
                        || SeriesSummary::analyze(paired.comparison()),
                    )
                },
                || {
                    rayon::join(
                        || difference_summary(paired),
                        || {
                            rayon::join(
                                || correlation(paired, options),
                                || {
                                    rayon::join(
                                        || regression(paired, options),
                                        || agreement(paired, options),
                                    )
                                },
                            )
                        },
                    )
                },
            );
        MethodComparison {
            evaluation,
            comparison,
            differences,
            correlation,
            regression,
            agreement,
            options: *options,
        }
    }

    /// Whether the differences look normal at `options.normality_alpha`,
    /// which is the precondition for reading the limits of agreement.
    pub fn differences_normal(&self) -> Option<bool> {
        self.differences.is_normal(self.options.normality_alpha)
    }
}

fn difference_summary(paired: &PairedSample) -> SeriesSummary {
    match paired.differences() {
        Ok(diff) => SeriesSummary::analyze(&diff),
        Err(err) => SeriesSummary { descriptive: Err(err.clone()), normality: Err(err) },
    }
}
