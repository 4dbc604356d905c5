use chrono::{DateTime, Utc};
use common::model::datasource::CsvData;
use common::model::validation::{DataInfo, Readiness, ValidationStatus};

pub const MISSING_BOTH: &str = "No data available for validation. Please upload both files first.";
pub const MISSING_STRINGS: &str = "No strings data available. Please upload strings CSV first.";
pub const MISSING_CLASSIFICATIONS: &str =
    "No classifications data available. Please upload classifications CSV first.";

/// Reports whether the stored snapshot can be validated, and if not, which
/// upload is missing. An uploaded dataset with no rows counts as missing.
pub fn check_readiness(data: &CsvData) -> Readiness {
    let has_strings = data.has_strings();
    let has_classifications = data.has_classifications();

    let error = match (has_strings, has_classifications) {
        (false, false) => Some(MISSING_BOTH),
        (false, true) => Some(MISSING_STRINGS),
        (true, false) => Some(MISSING_CLASSIFICATIONS),
        (true, true) => None,
    };

    Readiness {
        can_validate: error.is_none(),
        has_strings,
        has_classifications,
        error: error.map(str::to_string),
    }
}

pub fn validation_status(data: &CsvData, checked_at: DateTime<Utc>) -> ValidationStatus {
    ValidationStatus {
        readiness: check_readiness(data),
        data_info: DataInfo {
            strings_rows: data.strings.as_ref().map_or(0, |d| d.row_count()),
            classifications_rows: data.classifications.as_ref().map_or(0, |d| d.row_count()),
            strings_filename: data.strings.as_ref().map(|d| d.original_filename.clone()),
            classifications_filename: data
                .classifications
                .as_ref()
                .map(|d| d.original_filename.clone()),
        },
        checked_at,
    }
}
