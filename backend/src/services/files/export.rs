//! # Export Service
//!
//! Turns the stored datasets back into CSV.
//!
//! - `GET /api/files/export`: what can be exported and where to get it.
//! - `GET /api/files/export/batch`: metadata for every exportable dataset.
//! - `GET /api/files/export/metadata/{file_type}`: details of one export.
//! - `GET /api/files/export/{file_type}`: the CSV file itself, as an attachment.

use crate::csv_io::{
    batch_export, export_details, export_summary, generate_export, ExportError, ExportOptions,
};
use crate::error::ApiError;
use crate::store::AppState;
use actix_web::http::header;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::model::csv::FileType;
use common::requests::ExportQuery;
use common::responses::ServiceResponse;
use log::info;
use serde_json::json;

pub async fn summary(state: web::Data<AppState>) -> HttpResponse {
    let data = state.read().await;
    HttpResponse::Ok().json(ServiceResponse::success(
        "Successfully generated export summary",
        export_summary(&data, Utc::now()),
    ))
}

pub async fn batch(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let data = state.read().await;
    let batch = batch_export(&data, Utc::now())?;
    Ok(HttpResponse::Ok().json(ServiceResponse::success("Successfully exported all", batch)))
}

pub async fn metadata(
    file_type: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let file_type: FileType = file_type.parse()?;
    let data = state.read().await;
    let details = export_details(&data, file_type, Utc::now()).map_err(|e| match e {
        ExportError::NoData(_) => ApiError::bad_request("No data available", e.to_string()),
        other => other.into(),
    })?;
    Ok(HttpResponse::Ok().json(ServiceResponse::success(
        "Successfully fetched export metadata",
        details,
    )))
}

pub async fn download(
    file_type: web::Path<String>,
    query: web::Query<ExportQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let file_type: FileType = file_type.parse()?;
    let options = ExportOptions::try_from(query.into_inner())
        .map_err(|e| ApiError::bad_request("Invalid export options", e.to_string()))?;

    let export = {
        let data = state.read().await;
        generate_export(&data, file_type, &options, Utc::now())?
    };
    let metadata = &export.metadata;
    info!("Exporting {} rows of {} data as {}", metadata.row_count, file_type, metadata.filename);

    let summary = json!({
        "rowCount": metadata.row_count,
        "exportedAt": metadata.exported_at,
        "originalFilename": metadata.original_filename,
    });

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((header::CONTENT_DISPOSITION, attachment(&metadata.filename)))
        .insert_header(("X-Export-Metadata", ascii_json(&summary)))
        .insert_header((header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"))
        .insert_header((header::PRAGMA, "no-cache"))
        .insert_header((header::EXPIRES, "0"))
        .body(export.content))
}

/// `Content-Disposition` value for a download. Characters that cannot appear
/// in a quoted header parameter are replaced.
fn attachment(filename: &str) -> String {
    let safe: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii() && !c.is_ascii_control() => c,
            _ => '_',
        })
        .collect();
    format!("attachment; filename=\"{safe}\"")
}

/// Serializes `value` with every non-ASCII character escaped, so the result
/// is a valid header value.
fn ascii_json(value: &serde_json::Value) -> String {
    let mut out = String::new();
    for c in value.to_string().chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            for unit in c.encode_utf16(&mut [0; 2]) {
                out.push_str(&format!("\\u{unit:04x}"));
            }
        }
    }
    out
}
