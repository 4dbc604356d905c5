use crate::model::csv::FileType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Describes one generated CSV document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub filename: String,
    pub row_count: usize,
    /// Size of the generated document in bytes.
    pub file_size: usize,
    pub exported_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_filename: Option<String>,
    pub content_type: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportAvailability {
    pub strings: bool,
    pub classifications: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    pub rows: usize,
    pub filename: String,
    pub last_modified: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strings: Option<DatasetSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classifications: Option<DatasetSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadLinks {
    pub strings: Option<String>,
    pub classifications: Option<String>,
    pub batch: Option<String>,
}

/// Response of `GET /api/files/export`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    pub available: ExportAvailability,
    pub summary: DataSummary,
    pub total_rows: usize,
    pub download_links: DownloadLinks,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchFile {
    pub file_type: FileType,
    pub filename: String,
    pub download_url: String,
    pub metadata: ExportMetadata,
}

/// Response of `GET /api/files/export/batch`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchExport {
    pub success: bool,
    pub files: Vec<BatchFile>,
    pub batch_size: usize,
    pub total_rows: usize,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableFormats {
    pub csv: String,
    pub custom_delimiter: String,
    pub no_headers: String,
}

/// Response of `GET /api/files/export/metadata/{fileType}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDetails {
    pub file_type: FileType,
    pub filename: String,
    pub row_count: usize,
    pub file_size: usize,
    pub headers: Vec<String>,
    pub original_filename: String,
    pub last_modified: DateTime<Utc>,
    pub download_url: String,
    pub available_formats: AvailableFormats,
}
