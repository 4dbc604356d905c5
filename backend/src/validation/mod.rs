//! The reference validation core.
//!
//! Every function here is a pure computation over row slices or a
//! [`CsvData`](common::model::datasource::CsvData) snapshot. Nothing in this
//! module reads or writes the shared store; handlers in `services::files`
//! take the store lock, call into this module and write back the result.
//!
//! - `structure`: required columns and values.
//! - `cross_reference`: exact membership of each strings row in the classifications.
//! - `report`: the grouped report with suggestions and optional row details.
//! - `suggest`: frequency-ranked classification hint for a missing combination.
//! - `stats`: combination counts and duplicates.
//! - `readiness`: whether the stored snapshot can be validated at all.
//! - `reconcile`: accept/reject decision for an in-place update.

pub mod cross_reference;
pub mod key;
pub mod readiness;
pub mod reconcile;
pub mod report;
pub mod stats;
pub mod structure;
pub mod suggest;

pub use cross_reference::validate_cross_references;
pub use key::CombinationKey;
pub use readiness::{check_readiness, validation_status};
pub use reconcile::{reconcile_update, DatasetUpdate, Rejection, UpdateOutcome};
pub use report::build_validation_report;
pub use stats::validation_stats;
pub use structure::{validate_structure, validate_upload_columns};
pub use suggest::suggest_classification;
