//! All-or-nothing acceptance of a proposed dataset replacement.
//!
//! `reconcile_update` never touches shared state. It takes the current
//! snapshot by reference and returns either the candidate snapshot (accepted)
//! or a copy of the original (rejected); the caller writes the result back.

use crate::validation::cross_reference::validate_cross_references;
use crate::validation::structure::validate_structure;
use chrono::{DateTime, Utc};
use common::model::csv::{ClassificationRow, FileType, StringsRow};
use common::model::datasource::{CsvData, Dataset};
use common::model::validation::CrossReferenceResult;
use indexmap::IndexMap;

/// Replacement rows for one dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetUpdate {
    Strings(Vec<StringsRow>),
    Classifications(Vec<ClassificationRow>),
}

impl DatasetUpdate {
    /// Types raw column maps according to the target dataset.
    pub fn from_fields(file_type: FileType, rows: Vec<IndexMap<String, String>>) -> Self {
        match file_type {
            FileType::Strings => DatasetUpdate::Strings(rows.into_iter().map(Into::into).collect()),
            FileType::Classifications => {
                DatasetUpdate::Classifications(rows.into_iter().map(Into::into).collect())
            }
        }
    }

    pub fn file_type(&self) -> FileType {
        match self {
            DatasetUpdate::Strings(_) => FileType::Strings,
            DatasetUpdate::Classifications(_) => FileType::Classifications,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            DatasetUpdate::Strings(rows) => rows.len(),
            DatasetUpdate::Classifications(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Why an update was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Missing columns or blank required values.
    Structure,
    /// At least one strings row references an unknown combination.
    CrossReference,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
    pub success: bool,
    /// The snapshot to store: the candidate when accepted, the original otherwise.
    pub updated: CsvData,
    /// Present whenever the cross-reference check ran, accepted or not.
    pub validation_result: Option<CrossReferenceResult>,
    pub rejection: Option<Rejection>,
    pub errors: Vec<String>,
}

impl UpdateOutcome {
    fn rejected(
        original: &CsvData,
        rejection: Rejection,
        validation_result: Option<CrossReferenceResult>,
        errors: Vec<String>,
    ) -> Self {
        Self {
            success: false,
            updated: original.clone(),
            validation_result,
            rejection: Some(rejection),
            errors,
        }
    }
}

/// Decides whether `update` may replace its dataset in `current`.
pub fn reconcile_update(
    current: &CsvData,
    update: DatasetUpdate,
    validate_references: bool,
) -> UpdateOutcome {
    reconcile_update_at(current, update, validate_references, Utc::now())
}

/// Same as [`reconcile_update`] with an explicit upload timestamp.
pub fn reconcile_update_at(
    current: &CsvData,
    update: DatasetUpdate,
    validate_references: bool,
    now: DateTime<Utc>,
) -> UpdateOutcome {
    let structure = match &update {
        DatasetUpdate::Strings(rows) => validate_structure(rows),
        DatasetUpdate::Classifications(rows) => validate_structure(rows),
    };
    if !structure.is_valid {
        return UpdateOutcome::rejected(current, Rejection::Structure, None, structure.errors);
    }

    let target = update.file_type();
    let mut candidate = current.clone();
    match update {
        DatasetUpdate::Strings(rows) => {
            let filename = current
                .strings
                .as_ref()
                .map_or(FileType::Strings.default_filename(), |d| d.original_filename.as_str());
            candidate.strings = Some(Dataset::new(rows, filename, now));
        }
        DatasetUpdate::Classifications(rows) => {
            let filename = current
                .classifications
                .as_ref()
                .map_or(FileType::Classifications.default_filename(), |d| {
                    d.original_filename.as_str()
                });
            candidate.classifications = Some(Dataset::new(rows, filename, now));
        }
    }

    let mut validation_result = None;
    // Only a strings update can break references; classifications edits are
    // accepted as-is and checked on the next validate call.
    if validate_references && target == FileType::Strings {
        if let (Some(strings), Some(classifications)) =
            (&candidate.strings, &current.classifications)
        {
            let result = validate_cross_references(&strings.data, &classifications.data);
            if !result.is_valid {
                let message = format!(
                    "{} rows have invalid Topic+Subtopic+Industry combinations",
                    result.invalid_row_count
                );
                return UpdateOutcome::rejected(
                    current,
                    Rejection::CrossReference,
                    Some(result),
                    vec![message],
                );
            }
            validation_result = Some(result);
        }
    }

    UpdateOutcome {
        success: true,
        updated: candidate,
        validation_result,
        rejection: None,
        errors: Vec::new(),
    }
}
