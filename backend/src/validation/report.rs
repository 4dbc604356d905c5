//! Builds the full validation report served by `POST /api/files/validate`.

use crate::validation::key::CombinationKey;
use crate::validation::suggest::suggest_classification;
use chrono::{DateTime, Utc};
use common::model::csv::{ClassificationRow, StringsRow};
use common::model::validation::{
    ClassificationView, InvalidCombination, MissingClassification, ValidateOptions,
    ValidateResponse, ValidationDetail, ValidationSummary,
};
use indexmap::IndexMap;
use log::debug;
use std::collections::HashMap;

pub const NO_MATCH_ERROR: &str = "No matching classification found";

/// Validates `strings` against `classifications` and assembles the report,
/// stamped with the current time.
pub fn build_validation_report(
    strings: &[StringsRow],
    classifications: &[ClassificationRow],
    options: ValidateOptions,
) -> ValidateResponse {
    build_validation_report_at(strings, classifications, options, Utc::now())
}

/// Same as [`build_validation_report`] with an explicit timestamp.
pub fn build_validation_report_at(
    strings: &[StringsRow],
    classifications: &[ClassificationRow],
    options: ValidateOptions,
    validated_at: DateTime<Utc>,
) -> ValidateResponse {
    // Later rows overwrite earlier ones sharing a key.
    let lookup: HashMap<CombinationKey, &ClassificationRow> = classifications
        .iter()
        .map(|row| (CombinationKey::from(row), row))
        .collect();

    let mut invalid: IndexMap<CombinationKey, InvalidCombination> = IndexMap::new();
    let mut missing: IndexMap<String, MissingClassification> = IndexMap::new();
    let mut details = Vec::new();
    let mut valid_rows = 0;

    for (index, row) in strings.iter().enumerate() {
        let row_number = index + 1;
        let key = CombinationKey::from(row);
        let matched = lookup.get(&key).copied();
        let is_valid = matched.is_some();

        if is_valid {
            valid_rows += 1;
        } else {
            let group = invalid
                .entry(key.clone())
                .or_insert_with(|| InvalidCombination {
                    combination: key.into_string(),
                    count: 0,
                    rows: Vec::new(),
                });
            group.count += 1;
            group.rows.push(row_number);

            let raw_key = format!("{}|{}|{}", row.topic(), row.subtopic(), row.industry());
            missing.entry(raw_key).or_insert_with(|| MissingClassification {
                topic: row.topic().to_string(),
                sub_topic: row.subtopic().to_string(),
                industry: row.industry().to_string(),
                suggested_classification: None,
            });
        }

        if options.include_row_details && (!options.only_show_errors || !is_valid) {
            details.push(ValidationDetail {
                row_index: row_number,
                row_data: row.into(),
                is_valid,
                matched_classification: matched.cloned(),
                error: (!is_valid).then(|| NO_MATCH_ERROR.to_string()),
            });
        }
    }

    let total_rows = strings.len();
    let invalid_rows = total_rows - valid_rows;

    let missing_classifications = missing
        .into_values()
        .map(|mut entry| {
            entry.suggested_classification =
                suggest_classification(&entry.topic, &entry.industry, classifications);
            entry
        })
        .collect::<Vec<_>>();

    debug!(
        "validation report: {}/{} rows valid, {} distinct invalid combinations",
        valid_rows,
        total_rows,
        invalid.len()
    );

    ValidateResponse {
        is_valid: invalid_rows == 0,
        summary: ValidationSummary {
            total_strings_rows: total_rows,
            valid_rows,
            invalid_rows,
            validation_percentage: percentage(valid_rows, total_rows),
        },
        invalid_combinations: invalid.into_values().collect(),
        missing_classifications,
        row_details: options.include_row_details.then_some(details),
        available_classifications: classifications.iter().map(ClassificationView::from).collect(),
        validated_at,
    }
}

/// `part / total` as a percentage rounded to two decimals; zero when `total` is zero.
fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = part as f64 / total as f64 * 100.0;
    (raw * 100.0).round() / 100.0
}
