//! stats — method-comparison statistics over paired measurement results.
//!
//! Purpose
//! -------
//! Collect the statistics used to judge whether a method under evaluation
//! agrees with a comparison (reference) method: per-series descriptive
//! statistics and normality screens, and paired correlation, regression
//! and Bland-Altman agreement. Inputs are validated once at the boundary
//! ([`Sample`], [`PairedSample`]) and every routine reports failures via
//! [`AnalysisResult`].
//!
//! Key behaviors
//! -------------
//! - Per-series statistics: [`describe`] and [`normality`] (with the
//!   individual screens [`shapiro_wilk_approx`] and [`d_agostino_approx`]).
//! - Paired statistics: [`correlation`], [`regression`] and [`agreement`],
//!   each configured by [`AnalysisOptions`].
//! - [`MethodComparison`] runs the whole battery and keeps one result per
//!   component.
//!
//! Invariants & assumptions
//! ------------------------
//! - All functions are pure: no I/O, no global state, caller data is never
//!   reordered. Results are plain `Send + Sync` values.
//! - Minimum sizes: n ≥ 1 for descriptive statistics, n ≥ 3 for the
//!   Shapiro-Wilk screen and all paired statistics, n ≥ 8 for the
//!   D'Agostino screen.
//! - Undefined quantities (zero variance where a ratio needs it) are
//!   reported as `AnalysisError::DegenerateInput`, never as NaN.
//!
//! Conventions
//! -----------
//! - x = evaluation results, y = comparison results; differences are
//!   x − y. Regression fits y on x.
//! - The normality p-values and the default regression p-value are
//!   documented approximations; see [`normality`] and [`PValueMethod`].
//! - Routines emit `tracing` events (`debug` on entry, `warn` on degenerate
//!   input). The library never installs a subscriber.
//!
//! Downstream usage
//! ----------------
//! - Typical Rust code imports the main surface as:
//!
//!   ```rust
//!   use method_agreement::stats::prelude::*;
//!
//!   let paired = PairedSample::from_slices(&[1.0, 2.0, 3.1], &[1.1, 2.0, 2.9])?;
//!   let report = MethodComparison::run(&paired, &AnalysisOptions::default());
//!   assert!(report.agreement.is_ok());
//!   # Ok::<(), AnalysisError>(())
//!   ```
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests for its formulas and edge cases.
//! - Cross-cutting properties (Spearman invariance under monotone maps,
//!   idempotence, std² = variance, sequential/parallel equality) live in
//!   `tests/integration_method_comparison.rs`.

pub mod agreement;
pub mod comparison;
pub mod correlation;
pub mod data;
pub mod descriptive;
pub mod errors;
mod helpers;
pub mod normality;
pub mod options;
pub mod ranks;
pub mod regression;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::agreement::{AgreementPoint, AgreementResult, AgreementSummary, LimitsOfAgreement, agreement};
pub use self::comparison::{MethodComparison, SeriesSummary};
pub use self::correlation::{CorrelationResult, CorrelationStrength, correlation};
pub use self::data::{PairedSample, Sample, parse_measurement};
pub use self::descriptive::{DescriptiveResult, describe};
pub use self::errors::{AnalysisError, AnalysisResult};
pub use self::normality::{
    DAgostinoResult, NormalityReport, NormalityResult, d_agostino_approx, normality,
    shapiro_wilk_approx,
};
pub use self::options::{AnalysisOptions, PValueMethod, RankMethod};
pub use self::regression::{
    CoefficientRow, ConfidenceInterval, RegressionResult, RegressionTerm, regression,
};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::comparison::MethodComparison;
    pub use super::data::{PairedSample, Sample};
    pub use super::errors::{AnalysisError, AnalysisResult};
    pub use super::options::AnalysisOptions;
    pub use super::{agreement, correlation, describe, normality, regression};
}
