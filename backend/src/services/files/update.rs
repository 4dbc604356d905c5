//! # Dataset Update Service
//!
//! `PUT /api/files/{file_type}` replaces one dataset with edited rows.
//!
//! The store's write lock is held from the moment the current snapshot is
//! read until the reconciled snapshot is written back, so two concurrent
//! updates are applied one after the other. A rejected update leaves the
//! store untouched.

use crate::error::ApiError;
use crate::services::files::body;
use crate::store::AppState;
use crate::validation::{reconcile_update, DatasetUpdate, Rejection};
use actix_web::{web, HttpResponse};
use common::model::csv::FileType;
use common::model::validation::{UpdateDataResponse, UpdateValidationSummary};
use common::requests::UpdateDataRequest;
use common::responses::{FailureDetails, ServiceResponse};
use log::{info, warn};

pub async fn process(
    file_type: web::Path<String>,
    payload: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let file_type: FileType = file_type.parse()?;
    let request: UpdateDataRequest = body::required(&payload)?;
    let validate_references = request.validate_references.unwrap_or(true);

    let update = DatasetUpdate::from_fields(file_type, request.data);
    let updated_rows = update.len();

    let mut data = state.write().await;
    let outcome = reconcile_update(&data, update, validate_references);

    if !outcome.success {
        let message = outcome.errors.join("; ");
        warn!("Rejected {} update: {}", file_type, message);
        return Err(match outcome.rejection {
            Some(Rejection::CrossReference) => ApiError::BadRequest {
                message: "Data validation failed".to_string(),
                details: FailureDetails {
                    message: Some(message),
                    field: Some("cross-reference validation".to_string()),
                    ..FailureDetails::default()
                },
            },
            _ => ApiError::bad_request("Update failed", message),
        });
    }

    let validation_results = outcome
        .validation_result
        .as_ref()
        .map(UpdateValidationSummary::from);
    *data = outcome.updated;

    let view = data
        .view(file_type)
        .ok_or_else(|| ApiError::Internal(format!("{file_type} data missing after update")))?;
    info!("Updated {} data: {} rows", file_type, updated_rows);

    let response = UpdateDataResponse {
        file_type,
        message: "Data updated successfully".to_string(),
        updated_rows,
        validation_results,
        data: view.data,
        last_modified: view.last_modified,
    };
    Ok(HttpResponse::Ok().json(ServiceResponse::success("Successfully updated data", response)))
}
