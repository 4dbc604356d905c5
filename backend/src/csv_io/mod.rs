//! CSV ingestion and export.
//!
//! Parsing turns uploaded bytes into trimmed column maps; the validation
//! core never sees raw CSV. Export turns stored datasets back into CSV text
//! along with the metadata the download endpoints report.

mod detector;
mod export;
mod parser;

pub use detector::detect_file_type;
pub use export::{
    batch_export, export_details, export_summary, generate_export, generate_filename, to_csv,
    ExportError, ExportOptions, GeneratedExport, EXPORT_PATH,
};
pub use parser::{parse_rows, ParsedCsv};

use thiserror::Error;

/// Errors raised while reading or writing CSV text.
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("failed to read CSV: {0}")]
    Read(#[source] csv::Error),

    #[error("failed to write CSV: {0}")]
    Write(#[source] csv::Error),

    #[error("failed to flush CSV output: {0}")]
    Flush(#[from] std::io::Error),

    #[error("CSV output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("invalid delimiter '{0}': expected a single ASCII character")]
    InvalidDelimiter(String),
}
