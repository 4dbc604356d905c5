use crate::csv_io::CsvError;
use chrono::{DateTime, Utc};
use common::model::csv::{CsvRow, FileType};
use common::model::datasource::{CsvData, Dataset};
use common::model::export::{
    AvailableFormats, BatchExport, BatchFile, DataSummary, DatasetSummary, DownloadLinks,
    ExportAvailability, ExportDetails, ExportMetadata, ExportSummary,
};
use common::requests::ExportQuery;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Where the single-file download endpoints live.
pub const EXPORT_PATH: &str = "/api/files/export";

const CSV_CONTENT_TYPE: &str = "text/csv";

static CSV_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.csv$").expect("static regex is valid")
});

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No {0} data available for export")]
    NoData(FileType),

    #[error("No data available for export")]
    NothingToExport,

    #[error(transparent)]
    Csv(#[from] CsvError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Overrides the generated download name.
    pub filename: Option<String>,
    pub include_headers: bool,
    pub delimiter: u8,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            filename: None,
            include_headers: true,
            delimiter: b',',
        }
    }
}

impl TryFrom<ExportQuery> for ExportOptions {
    type Error = CsvError;

    fn try_from(query: ExportQuery) -> Result<Self, Self::Error> {
        let delimiter = match query.delimiter.as_deref() {
            None | Some("") => b',',
            Some(d) if d.len() == 1 && d.is_ascii() => d.as_bytes()[0],
            Some(d) => return Err(CsvError::InvalidDelimiter(d.to_string())),
        };
        Ok(Self {
            filename: query.filename.filter(|f| !f.trim().is_empty()),
            include_headers: query.include_headers.unwrap_or(true),
            delimiter,
        })
    }
}

/// A rendered CSV document ready to be sent to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedExport {
    pub content: String,
    pub metadata: ExportMetadata,
}

/// Renders rows as CSV text.
///
/// Columns are taken from the first row. Values are quoted only when they
/// contain the delimiter, a quote or a line break. Every line, the last one
/// included, ends with `\n`.
pub fn to_csv<R: CsvRow>(rows: &[R], options: &ExportOptions) -> Result<String, CsvError> {
    let Some(first) = rows.first() else {
        return Ok(if options.include_headers {
            "\n".to_string()
        } else {
            String::new()
        });
    };
    let headers = first.column_names();

    let mut writer = WriterBuilder::new()
        .delimiter(options.delimiter)
        .terminator(Terminator::Any(b'\n'))
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());

    if options.include_headers {
        writer.write_record(&headers).map_err(CsvError::Write)?;
    }
    for row in rows {
        let record = headers.iter().map(|h| row.field(h).unwrap_or_default());
        writer.write_record(record).map_err(CsvError::Write)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CsvError::Flush(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Name offered for a download, e.g. `prompts_updated_2024-06-01_12-30-00.csv`.
pub fn generate_filename(
    file_type: FileType,
    original_filename: Option<&str>,
    now: DateTime<Utc>,
) -> String {
    let date = now.format("%Y-%m-%d");
    let time = now.format("%H-%M-%S");
    match original_filename {
        Some(original) => {
            let base = CSV_SUFFIX.replace(original, "");
            format!("{base}_updated_{date}_{time}.csv")
        }
        None => format!("{file_type}_export_{date}_{time}.csv"),
    }
}

fn render<R: CsvRow>(
    dataset: Option<&Dataset<R>>,
    options: &ExportOptions,
    now: DateTime<Utc>,
) -> Result<GeneratedExport, ExportError> {
    let dataset = dataset
        .filter(|d| !d.is_empty())
        .ok_or(ExportError::NoData(R::FILE_TYPE))?;

    let content = to_csv(&dataset.data, options)?;
    let filename = options.filename.clone().unwrap_or_else(|| {
        generate_filename(R::FILE_TYPE, Some(dataset.original_filename.as_str()), now)
    });

    let metadata = ExportMetadata {
        filename,
        row_count: dataset.row_count(),
        file_size: content.len(),
        exported_at: now,
        original_filename: Some(dataset.original_filename.clone()),
        content_type: CSV_CONTENT_TYPE.to_string(),
    };
    Ok(GeneratedExport { content, metadata })
}

/// Renders one stored dataset. Fails when that dataset is absent or empty.
pub fn generate_export(
    data: &CsvData,
    file_type: FileType,
    options: &ExportOptions,
    now: DateTime<Utc>,
) -> Result<GeneratedExport, ExportError> {
    match file_type {
        FileType::Strings => render(data.strings.as_ref(), options, now),
        FileType::Classifications => render(data.classifications.as_ref(), options, now),
    }
}

fn download_url(file_type: FileType) -> String {
    format!("{EXPORT_PATH}/{file_type}")
}

fn dataset_summary<R: CsvRow>(dataset: Option<&Dataset<R>>) -> Option<DatasetSummary> {
    dataset.filter(|d| !d.is_empty()).map(|d| DatasetSummary {
        rows: d.row_count(),
        filename: d.original_filename.clone(),
        last_modified: d.uploaded_at,
    })
}

/// What can be downloaded right now, and from where.
pub fn export_summary(data: &CsvData, now: DateTime<Utc>) -> ExportSummary {
    let available = ExportAvailability {
        strings: data.has_strings(),
        classifications: data.has_classifications(),
    };
    let summary = DataSummary {
        strings: dataset_summary(data.strings.as_ref()),
        classifications: dataset_summary(data.classifications.as_ref()),
    };
    let total_rows = [&summary.strings, &summary.classifications]
        .into_iter()
        .flatten()
        .map(|s| s.rows)
        .sum();

    let download_links = DownloadLinks {
        strings: available.strings.then(|| download_url(FileType::Strings)),
        classifications: available
            .classifications
            .then(|| download_url(FileType::Classifications)),
        batch: (available.strings || available.classifications)
            .then(|| format!("{EXPORT_PATH}/batch")),
    };

    ExportSummary {
        available,
        summary,
        total_rows,
        download_links,
        generated_at: now,
    }
}

/// Renders every non-empty dataset and reports their metadata.
pub fn batch_export(data: &CsvData, now: DateTime<Utc>) -> Result<BatchExport, ExportError> {
    let options = ExportOptions::default();
    let mut files = Vec::new();
    for file_type in FileType::ALL {
        if !data.has(file_type) {
            continue;
        }
        let export = generate_export(data, file_type, &options, now)?;
        files.push(BatchFile {
            file_type,
            filename: export.metadata.filename.clone(),
            download_url: download_url(file_type),
            metadata: export.metadata,
        });
    }

    if files.is_empty() {
        return Err(ExportError::NothingToExport);
    }

    Ok(BatchExport {
        success: true,
        batch_size: files.len(),
        total_rows: files.iter().map(|f| f.metadata.row_count).sum(),
        files,
        generated_at: now,
    })
}

/// Describes the download of one dataset without sending it.
pub fn export_details(
    data: &CsvData,
    file_type: FileType,
    now: DateTime<Utc>,
) -> Result<ExportDetails, ExportError> {
    let export = generate_export(data, file_type, &ExportOptions::default(), now)?;
    let view = data.view(file_type).ok_or(ExportError::NoData(file_type))?;
    let url = download_url(file_type);

    Ok(ExportDetails {
        file_type,
        filename: export.metadata.filename,
        row_count: export.metadata.row_count,
        file_size: export.metadata.file_size,
        headers: view.headers,
        original_filename: view.original_filename,
        last_modified: view.last_modified,
        available_formats: AvailableFormats {
            csv: url.clone(),
            custom_delimiter: format!("{url}?delimiter=;"),
            no_headers: format!("{url}?includeHeaders=false"),
        },
        download_url: url,
    })
}
