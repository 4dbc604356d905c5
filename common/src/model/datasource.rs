use crate::model::csv::{ClassificationRow, CsvRow, FileType, StringsRow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One uploaded dataset together with where it came from.
///
/// A dataset is created on the first successful upload of its type and is
/// replaced wholesale on every accepted update. There is no delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset<R> {
    pub data: Vec<R>,
    pub original_filename: String,
    pub uploaded_at: DateTime<Utc>,
}

impl<R: CsvRow> Dataset<R> {
    pub fn new(data: Vec<R>, original_filename: impl Into<String>, uploaded_at: DateTime<Utc>) -> Self {
        Self {
            data,
            original_filename: original_filename.into(),
            uploaded_at,
        }
    }

    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Column names as seen on the first row; empty for an empty dataset.
    pub fn headers(&self) -> Vec<String> {
        self.data
            .first()
            .map(CsvRow::column_names)
            .unwrap_or_default()
    }
}

/// Snapshot of everything the service currently holds.
///
/// The validation core only ever reads a `CsvData` value and returns a new
/// one; writing it back into shared state is left to the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CsvData {
    pub strings: Option<Dataset<StringsRow>>,
    pub classifications: Option<Dataset<ClassificationRow>>,
}

impl CsvData {
    /// True when a strings dataset with at least one row is loaded.
    pub fn has_strings(&self) -> bool {
        self.strings.as_ref().is_some_and(|d| !d.is_empty())
    }

    pub fn has_classifications(&self) -> bool {
        self.classifications.as_ref().is_some_and(|d| !d.is_empty())
    }

    pub fn has(&self, file_type: FileType) -> bool {
        match file_type {
            FileType::Strings => self.has_strings(),
            FileType::Classifications => self.has_classifications(),
        }
    }

    /// Type-erased view of one dataset, used by the read and export surfaces.
    pub fn view(&self, file_type: FileType) -> Option<DatasetView> {
        match file_type {
            FileType::Strings => self.strings.as_ref().map(|d| DatasetView {
                file_type,
                original_filename: d.original_filename.clone(),
                headers: d.headers(),
                row_count: d.row_count(),
                data: DatasetRows::Strings(d.data.clone()),
                last_modified: d.uploaded_at,
            }),
            FileType::Classifications => self.classifications.as_ref().map(|d| DatasetView {
                file_type,
                original_filename: d.original_filename.clone(),
                headers: d.headers(),
                row_count: d.row_count(),
                data: DatasetRows::Classifications(d.data.clone()),
                last_modified: d.uploaded_at,
            }),
        }
    }
}

/// Rows of either dataset type, serialized as a plain JSON array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DatasetRows {
    Strings(Vec<StringsRow>),
    Classifications(Vec<ClassificationRow>),
}

impl DatasetRows {
    pub fn len(&self) -> usize {
        match self {
            DatasetRows::Strings(rows) => rows.len(),
            DatasetRows::Classifications(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What `GET /api/files/{fileType}` returns.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetView {
    pub file_type: FileType,
    pub original_filename: String,
    pub data: DatasetRows,
    pub row_count: usize,
    pub headers: Vec<String>,
    pub last_modified: DateTime<Utc>,
}

/// What `GET /api/files` returns: both slots, either possibly empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllDatasets {
    pub strings: Option<DatasetView>,
    pub classifications: Option<DatasetView>,
}

impl From<&CsvData> for AllDatasets {
    fn from(data: &CsvData) -> Self {
        Self {
            strings: data.view(FileType::Strings),
            classifications: data.view(FileType::Classifications),
        }
    }
}

/// Result of parsing one uploaded file, echoed back to the uploader.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedUpload {
    pub data: DatasetRows,
    pub row_count: usize,
    pub headers: Vec<String>,
    pub original_filename: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UploadResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strings: Option<ParsedUpload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classifications: Option<ParsedUpload>,
}
