use crate::validation::key::CombinationKey;
use common::model::csv::{ClassificationRow, StringsRow};
use common::model::validation::{CrossReferenceResult, DataValidationError};
use log::debug;
use std::collections::HashSet;

pub const COMBINATION_FIELD: &str = "Topic+Subtopic+Industry";
pub const COMBINATION_NOT_FOUND: &str = "Combination not found in classifications data";

/// Checks that every strings row uses a Topic/Subtopic/Industry combination
/// present in the classifications.
///
/// Matching is exact on the normalized [`CombinationKey`]. Every offending row
/// is reported, in row order, with its original (non-normalized) values. With
/// no strings rows the result is trivially valid, whatever the classifications.
pub fn validate_cross_references(
    strings: &[StringsRow],
    classifications: &[ClassificationRow],
) -> CrossReferenceResult {
    let known: HashSet<CombinationKey> = classifications.iter().map(CombinationKey::from).collect();

    let errors: Vec<DataValidationError> = strings
        .iter()
        .enumerate()
        .filter(|(_, row)| !known.contains(&CombinationKey::from(*row)))
        .map(|(index, row)| DataValidationError {
            row: index + 1,
            field: COMBINATION_FIELD.to_string(),
            value: format!("{}, {}, {}", row.topic(), row.subtopic(), row.industry()),
            reason: COMBINATION_NOT_FOUND.to_string(),
        })
        .collect();

    debug!(
        "cross-reference check: {} strings rows, {} known combinations, {} invalid",
        strings.len(),
        known.len(),
        errors.len()
    );

    CrossReferenceResult {
        is_valid: errors.is_empty(),
        valid_row_count: strings.len() - errors.len(),
        invalid_row_count: errors.len(),
        errors,
    }
}
