use crate::model::csv::{ClassificationRow, FileType, StringsRow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of the structural (column and required value) check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl StructureValidation {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// A single row whose combination has no match in the reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataValidationError {
    /// 1-indexed position of the row in the strings dataset.
    pub row: usize,
    pub field: String,
    pub value: String,
    pub reason: String,
}

/// Outcome of matching every strings row against the classifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossReferenceResult {
    pub is_valid: bool,
    pub errors: Vec<DataValidationError>,
    pub valid_row_count: usize,
    pub invalid_row_count: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateOptions {
    #[serde(default)]
    pub include_row_details: bool,
    /// Only meaningful together with `include_row_details`.
    #[serde(default)]
    pub only_show_errors: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub total_strings_rows: usize,
    pub valid_rows: usize,
    pub invalid_rows: usize,
    /// Share of valid rows, rounded to two decimals. Zero for an empty dataset.
    pub validation_percentage: f64,
}

/// Invalid rows grouped by their normalized combination key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidCombination {
    pub combination: String,
    pub count: usize,
    pub rows: Vec<usize>,
}

/// A combination used by the strings data that the classifications lack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingClassification {
    #[serde(rename = "Topic")]
    pub topic: String,
    #[serde(rename = "SubTopic")]
    pub sub_topic: String,
    #[serde(rename = "Industry")]
    pub industry: String,
    #[serde(
        rename = "suggestedClassification",
        skip_serializing_if = "Option::is_none"
    )]
    pub suggested_classification: Option<String>,
}

/// The columns of a strings row that matter when reporting on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowView {
    #[serde(rename = "Topic")]
    pub topic: String,
    #[serde(rename = "Subtopic")]
    pub subtopic: String,
    #[serde(rename = "Industry")]
    pub industry: String,
    #[serde(rename = "Tier", skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    #[serde(rename = "Prompt", skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

impl From<&StringsRow> for RowView {
    fn from(row: &StringsRow) -> Self {
        Self {
            topic: row.topic().to_string(),
            subtopic: row.subtopic().to_string(),
            industry: row.industry().to_string(),
            tier: row.tier.clone(),
            prompt: row.prompt.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationDetail {
    pub row_index: usize,
    pub row_data: RowView,
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_classification: Option<ClassificationRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A classifications row narrowed to its four known columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationView {
    #[serde(rename = "Topic")]
    pub topic: String,
    #[serde(rename = "SubTopic")]
    pub sub_topic: String,
    #[serde(rename = "Industry")]
    pub industry: String,
    #[serde(rename = "Classification")]
    pub classification: String,
}

impl From<&ClassificationRow> for ClassificationView {
    fn from(row: &ClassificationRow) -> Self {
        Self {
            topic: row.topic().to_string(),
            sub_topic: row.sub_topic().to_string(),
            industry: row.industry().to_string(),
            classification: row.classification().to_string(),
        }
    }
}

/// Full validation report. Entirely derived from its two inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    pub is_valid: bool,
    pub summary: ValidationSummary,
    pub invalid_combinations: Vec<InvalidCombination>,
    pub missing_classifications: Vec<MissingClassification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_details: Option<Vec<ValidationDetail>>,
    pub available_classifications: Vec<ClassificationView>,
    pub validated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationStats {
    pub total_combinations: usize,
    pub unique_combinations: usize,
    pub valid_combinations: usize,
    pub invalid_combinations: usize,
    /// Rows beyond the first occurrence of their combination, summed over all combinations.
    pub duplicate_rows: usize,
}

/// Whether the stored data is complete enough to validate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Readiness {
    pub can_validate: bool,
    pub has_strings: bool,
    pub has_classifications: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataInfo {
    pub strings_rows: usize,
    pub classifications_rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strings_filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classifications_filename: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationStatus {
    #[serde(flatten)]
    pub readiness: Readiness,
    pub data_info: DataInfo,
    pub checked_at: DateTime<Utc>,
}

/// Cross-reference outcome flattened for the update response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateValidationSummary {
    pub valid: bool,
    pub errors: Vec<String>,
    pub invalid_rows: Vec<usize>,
}

impl From<&CrossReferenceResult> for UpdateValidationSummary {
    fn from(result: &CrossReferenceResult) -> Self {
        Self {
            valid: result.is_valid,
            errors: result
                .errors
                .iter()
                .map(|e| format!("Row {}: {} - {}", e.row, e.field, e.reason))
                .collect(),
            invalid_rows: result.errors.iter().map(|e| e.row).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDataResponse {
    pub file_type: FileType,
    pub message: String,
    pub updated_rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_results: Option<UpdateValidationSummary>,
    pub data: crate::model::datasource::DatasetRows,
    pub last_modified: DateTime<Utc>,
}
