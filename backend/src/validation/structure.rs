//! Structural checks: are the required columns there, and are the required
//! values filled in.

use common::model::csv::CsvRow;
use common::model::validation::StructureValidation;

/// Checks that `rows` look like a well-formed dataset of type `R`.
///
/// Only the first row's columns are compared against the required column
/// set; rows are assumed to share one shape. Required values are then checked
/// on every row, reporting 1-indexed row numbers. All problems accumulate.
pub fn validate_structure<R: CsvRow>(rows: &[R]) -> StructureValidation {
    let Some(first) = rows.first() else {
        return StructureValidation::from_errors(vec!["Data cannot be empty".to_string()]);
    };

    let mut errors = Vec::new();

    let missing = missing_columns(first);
    if !missing.is_empty() {
        errors.push(format!("Missing required fields: {}", missing.join(", ")));
    }

    for (index, row) in rows.iter().enumerate() {
        for column in R::REQUIRED_VALUES {
            let blank = row.field(column).is_none_or(|value| value.trim().is_empty());
            if blank {
                errors.push(format!("Row {}: {} is required", index + 1, column));
            }
        }
    }

    StructureValidation::from_errors(errors)
}

/// The lighter check applied when a file is first uploaded: the file must
/// have rows and carry every column, but blank values are tolerated.
pub fn validate_upload_columns<R: CsvRow>(rows: &[R]) -> StructureValidation {
    let Some(first) = rows.first() else {
        return StructureValidation::from_errors(vec!["File is empty".to_string()]);
    };

    let missing = missing_columns(first);
    if missing.is_empty() {
        StructureValidation::from_errors(Vec::new())
    } else {
        StructureValidation::from_errors(vec![format!(
            "Missing required fields: {}",
            missing.join(", ")
        )])
    }
}

fn missing_columns<R: CsvRow>(first: &R) -> Vec<&'static str> {
    let present = first.column_names();
    R::COLUMNS
        .iter()
        .copied()
        .filter(|column| !present.iter().any(|p| p == column))
        .collect()
}
