//! # File Service Module
//!
//! HTTP endpoints under `/api/files` for uploading the two CSV datasets,
//! reading and editing them, validating one against the other and exporting
//! them back to CSV.
//!
//! ## Sub-modules:
//! - `upload`: multipart upload, type detection and storage.
//! - `get`: read access to the stored datasets.
//! - `update`: all-or-nothing replacement of one dataset.
//! - `validate`: the validation report, statistics and readiness status.
//! - `export`: CSV downloads and export metadata.

mod body;
mod export;
mod get;
mod update;
mod upload;
mod validate;

use actix_web::web::{get, post, put, scope};
use actix_web::Scope;

/// The base path for all file endpoints.
pub const API_PATH: &str = "/api/files";

/// Configures and returns the Actix `Scope` for the file routes.
///
/// Fixed paths are registered before `/{file_type}` so that segments such as
/// `validate` or `export` are never read as a file type.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/upload", post().to(upload::process))
        .route("/validate", post().to(validate::report))
        .route("/validate/stats", get().to(validate::stored_stats))
        .route("/validate/stats", post().to(validate::stats))
        .route("/validate/status", get().to(validate::status))
        .route("/export", get().to(export::summary))
        .route("/export/batch", get().to(export::batch))
        .route("/export/metadata/{file_type}", get().to(export::metadata))
        .route("/export/{file_type}", get().to(export::download))
        .route("", get().to(get::all))
        .route("/{file_type}", get().to(get::one))
        .route("/{file_type}", put().to(update::process))
}
