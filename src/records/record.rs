//! records::record — a measurement record that owns its derived fields.
//!
//! Purpose
//! -------
//! Hold one paired measurement (identity, evaluation result, comparison
//! result) together with its [`DerivedRecordFields`], and keep the two in
//! sync: derived fields are computed when the record is created and
//! recomputed in the same call whenever its results change.
//!
//! Invariants & assumptions
//! ------------------------
//! - `derived() == compute_derived_fields(evaluation(), comparison())` for
//!   every record at every point in time. The fields are private and only
//!   [`MeasurementRecord::update_results`] can change the raw results.
//! - Raw results may be non-finite (e.g. unparsable input); such records
//!   are stored but rejected by [`PairedSample::from_records`].

use crate::records::derived::{DerivedRecordFields, compute_derived_fields, parse_lenient};
use crate::stats::{data::PairedSample, errors::AnalysisResult};
use serde::{Deserialize, Serialize};

/// RecordIdentity — identifying columns of a measurement record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordIdentity {
    pub sequence_number: u32,
    pub enrollment_number: String,
    pub evaluation_blind_number: String,
    pub comparison_blind_number: String,
}

/// MeasurementRecord — one paired measurement and its derived fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementRecord {
    identity: RecordIdentity,
    evaluation: f64,
    comparison: f64,
    derived: DerivedRecordFields,
}

impl MeasurementRecord {
    pub fn new(identity: RecordIdentity, evaluation: f64, comparison: f64) -> MeasurementRecord {
        MeasurementRecord {
            identity,
            evaluation,
            comparison,
            derived: compute_derived_fields(evaluation, comparison),
        }
    }

    /// Build a record from raw textual results.
    ///
    /// Parsing is lenient: text that is not a number is stored as NaN and
    /// surfaces as non-finite derived fields.
    pub fn from_raw(identity: RecordIdentity, evaluation: &str, comparison: &str) -> MeasurementRecord {
        MeasurementRecord::new(identity, parse_lenient(evaluation), parse_lenient(comparison))
    }

    /// Replace both raw results and recompute the derived fields.
    pub fn update_results(&mut self, evaluation: f64, comparison: f64) {
        self.evaluation = evaluation;
        self.comparison = comparison;
        self.derived = compute_derived_fields(evaluation, comparison);
    }

    pub fn identity(&self) -> &RecordIdentity {
        &self.identity
    }

    pub fn evaluation(&self) -> f64 {
        self.evaluation
    }

    pub fn comparison(&self) -> f64 {
        self.comparison
    }

    pub fn derived(&self) -> &DerivedRecordFields {
        &self.derived
    }
}

impl PairedSample {
    /// Extract (evaluation, comparison) pairs from records in storage order.
    ///
    /// Errors
    /// ------
    /// - `AnalysisError::NonFiniteData` naming the index of the first record
    ///   with a non-finite result.
    pub fn from_records(records: &[MeasurementRecord]) -> AnalysisResult<PairedSample> {
        let (evaluation, comparison): (Vec<f64>, Vec<f64>) =
            records.iter().map(|r| (r.evaluation, r.comparison)).unzip();
        PairedSample::from_slices(&evaluation, &comparison)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::errors::AnalysisError;

    fn identity(seq: u32) -> RecordIdentity {
        RecordIdentity {
            sequence_number: seq,
            enrollment_number: format!("E{seq:03}"),
            evaluation_blind_number: format!("A{seq:03}"),
            comparison_blind_number: format!("B{seq:03}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify derived fields are computed at creation and recomputed on
    // update.
    //
    // Given
    // -----
    // - A record created with (4, 2), then updated to (3, 6).
    //
    // Expect
    // ------
    // - Derived fields always equal `compute_derived_fields` of the current
    //   raw results.
    fn record_keeps_derived_fields_in_sync() {
        // Arrange
        let mut record = MeasurementRecord::new(identity(1), 4.0, 2.0);
        assert_eq!(*record.derived(), compute_derived_fields(4.0, 2.0));

        // Act
        record.update_results(3.0, 6.0);

        // Assert
        assert_eq!((record.evaluation(), record.comparison()), (3.0, 6.0));
        assert_eq!(*record.derived(), compute_derived_fields(3.0, 6.0));
        assert_eq!(record.derived().absolute_deviation, -3.0);
        assert_eq!(record.identity().sequence_number, 1);
    }

    #[test]
    // Purpose
    // -------
    // Check raw-text records store NaN for unparsable results and are then
    // rejected when building a paired sample.
    fn record_from_raw_and_pairing() {
        // Arrange
        let records = vec![
            MeasurementRecord::from_raw(identity(1), "10.0", " 9.5"),
            MeasurementRecord::from_raw(identity(2), "12.0", "12.5"),
            MeasurementRecord::from_raw(identity(3), "n/a", "14.0"),
        ];

        // Act
        let result = PairedSample::from_records(&records);
        let ok = PairedSample::from_records(&records[..2]).unwrap();

        // Assert
        assert!(records[2].evaluation().is_nan());
        assert!(!records[2].derived().is_finite());
        assert!(matches!(result, Err(AnalysisError::NonFiniteData { index: 2, .. })));
        assert_eq!(ok.evaluation().as_slice(), &[10.0, 12.0]);
        assert_eq!(ok.comparison().as_slice(), &[9.5, 12.5]);
    }
}
