//! # CSV Upload Service
//!
//! Handles `POST /api/files/upload`. Every file part of the multipart body is
//! read, parsed and classified by its header structure; field names and file
//! names play no part in deciding which dataset a file replaces.
//!
//! Files are processed in order. The first failing file aborts the request;
//! files stored before it stay stored.

use crate::csv_io::{detect_file_type, parse_rows, ParsedCsv};
use crate::error::ApiError;
use crate::store::AppState;
use crate::validation::validate_upload_columns;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::model::csv::{ClassificationRow, CsvRow, FileType, StringsRow};
use common::model::datasource::{Dataset, DatasetRows, ParsedUpload, UploadResponse};
use common::responses::{FailureDetails, ServiceResponse};
use futures_util::StreamExt;
use indexmap::IndexMap;
use log::{info, warn};

const ONLY_CSV: &str = "Only CSV files are allowed";
const TOO_LARGE: &str = "File too large";

pub async fn process(
    mut payload: Multipart,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let mut response = UploadResponse::default();
    let mut received = 0;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| ApiError::Upload(e.to_string()))?;
        // Plain form fields carry no file.
        let Some(filename) = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
        else {
            continue;
        };

        if !filename.to_ascii_lowercase().ends_with(".csv") {
            return Err(ApiError::Upload(ONLY_CSV.to_string()));
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| ApiError::Upload(e.to_string()))?;
            if bytes.len() + chunk.len() > state.max_upload_bytes {
                warn!("Rejected upload of {}: exceeds {} bytes", filename, state.max_upload_bytes);
                return Err(ApiError::Upload(TOO_LARGE.to_string()));
            }
            bytes.extend_from_slice(&chunk);
        }

        store_file(&state, &filename, &bytes, &mut response).await?;
        received += 1;
    }

    if received == 0 {
        return Err(ApiError::bad_request("No files uploaded", "Attach at least one CSV file"));
    }

    Ok(HttpResponse::Ok().json(ServiceResponse::success("Files uploaded", response)))
}

/// Parses one file and replaces the dataset matching its structure.
async fn store_file(
    state: &AppState,
    filename: &str,
    bytes: &[u8],
    response: &mut UploadResponse,
) -> Result<(), ApiError> {
    let parsed = parse_rows(bytes)?;
    if parsed.rows.is_empty() {
        return Err(ApiError::bad_request(
            "Empty CSV file",
            format!("File {filename} is empty"),
        ));
    }

    let Some(file_type) = detect_file_type(&parsed.headers) else {
        return Err(ApiError::bad_request(
            "Unrecognized CSV structure",
            format!(
                "File {filename} doesn't match expected structure. Headers found: {}",
                parsed.headers.join(", ")
            ),
        ));
    };

    let ParsedCsv { headers, rows } = parsed;
    let now = Utc::now();
    match file_type {
        FileType::Strings => {
            let rows = typed_rows::<StringsRow>(rows)?;
            response.strings = Some(echo(DatasetRows::Strings(rows.clone()), headers, filename));
            state.write().await.strings = Some(Dataset::new(rows, filename, now));
        }
        FileType::Classifications => {
            let rows = typed_rows::<ClassificationRow>(rows)?;
            response.classifications = Some(echo(
                DatasetRows::Classifications(rows.clone()),
                headers,
                filename,
            ));
            state.write().await.classifications = Some(Dataset::new(rows, filename, now));
        }
    }

    info!("Stored {} as {} data", filename, file_type);
    Ok(())
}

/// Converts parsed rows and checks that every column is present.
fn typed_rows<R: CsvRow>(rows: Vec<IndexMap<String, String>>) -> Result<Vec<R>, ApiError> {
    let rows: Vec<R> = rows.into_iter().map(R::from).collect();

    let structure = validate_upload_columns(&rows);
    if !structure.is_valid {
        return Err(ApiError::BadRequest {
            message: format!("Invalid {} CSV structure", R::FILE_TYPE),
            details: FailureDetails {
                errors: structure.errors,
                ..FailureDetails::default()
            },
        });
    }
    Ok(rows)
}

fn echo(data: DatasetRows, headers: Vec<String>, filename: &str) -> ParsedUpload {
    ParsedUpload {
        row_count: data.len(),
        data,
        headers,
        original_filename: filename.to_string(),
    }
}
