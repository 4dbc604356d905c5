use crate::model::csv::{ClassificationRow, StringsRow};
use indexmap::IndexMap;
use serde::Deserialize;

/// Request payload for `PUT /api/files/{fileType}`.
///
/// Rows arrive as plain column maps; they are converted to the row type
/// matching the path once the file type is known.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDataRequest {
    pub data: Vec<IndexMap<String, String>>,
    /// Defaults to `true` when omitted.
    pub validate_references: Option<bool>,
}

/// Request payload for `POST /api/files/validate` and `POST /api/files/validate/stats`.
///
/// The inline datasets are only used when both are supplied; otherwise the
/// stored datasets are validated.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    pub strings_data: Option<Vec<StringsRow>>,
    pub classifications_data: Option<Vec<ClassificationRow>>,
    pub include_row_details: Option<bool>,
    pub only_show_errors: Option<bool>,
}

/// Query string accepted by `GET /api/files/export/{fileType}`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportQuery {
    pub filename: Option<String>,
    pub delimiter: Option<String>,
    pub include_headers: Option<bool>,
}
