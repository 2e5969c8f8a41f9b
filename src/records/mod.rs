//! records — measurement records and their per-record derived fields.
//!
//! Purpose
//! -------
//! Model the data-entry side of a method comparison: each record holds one
//! paired measurement and the deviation/ratio fields derived from it. The
//! statistics in [`crate::stats`] consume records through
//! [`PairedSample::from_records`](crate::stats::PairedSample::from_records).
//!
//! Key behaviors
//! -------------
//! - [`compute_derived_fields`] is a pure per-pair transform that never
//!   fails; degenerate inputs surface as non-finite values.
//! - [`MeasurementRecord`] computes its derived fields on creation and on
//!   every [`update_results`](MeasurementRecord::update_results) call, so
//!   stored derived values are never stale.
//!
//! Conventions
//! -----------
//! - Storage of records (ordering, identifiers, persistence) belongs to the
//!   caller; this module only guarantees the per-record invariant.

pub mod derived;
pub mod record;

pub use self::derived::{DerivedRecordFields, MISSING_VALUE, compute_derived_fields};
pub use self::record::{MeasurementRecord, RecordIdentity};
