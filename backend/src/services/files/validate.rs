//! # Validation Service
//!
//! - `POST /api/files/validate`: the full report.
//! - `GET /api/files/validate/stats`: combination statistics over the stored data.
//! - `POST /api/files/validate/stats`: the same over inline data, when given.
//! - `GET /api/files/validate/status`: whether validation can run right now.
//!
//! Inline datasets are used only when the body carries both of them.
//! Otherwise the stored datasets are used, provided both are loaded.

use crate::error::ApiError;
use crate::services::files::body;
use crate::store::AppState;
use crate::validation::{
    build_validation_report, check_readiness, validation_stats, validation_status,
};
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::model::csv::{ClassificationRow, StringsRow};
use common::model::datasource::CsvData;
use common::model::validation::{ValidateOptions, ValidationStats};
use common::requests::ValidateRequest;
use common::responses::ServiceResponse;
use log::debug;

/// Borrows both stored datasets, or explains which one is missing.
fn stored_rows(data: &CsvData) -> Result<(&[StringsRow], &[ClassificationRow]), ApiError> {
    let readiness = check_readiness(data);
    match (&data.strings, &data.classifications) {
        (Some(strings), Some(classifications)) if readiness.can_validate => {
            Ok((strings.data.as_slice(), classifications.data.as_slice()))
        }
        _ => Err(ApiError::bad_request(
            "Cannot validate",
            readiness.error.unwrap_or_default(),
        )),
    }
}

pub async fn report(
    payload: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let request: ValidateRequest = body::required(&payload)?;
    let options = ValidateOptions {
        include_row_details: request.include_row_details.unwrap_or(false),
        only_show_errors: request.only_show_errors.unwrap_or(false),
    };

    let report = match (request.strings_data, request.classifications_data) {
        (Some(strings), Some(classifications)) => {
            debug!("Validating {} inline strings rows", strings.len());
            build_validation_report(&strings, &classifications, options)
        }
        _ => {
            let data = state.read().await;
            let (strings, classifications) = stored_rows(&data)?;
            build_validation_report(strings, classifications, options)
        }
    };

    Ok(HttpResponse::Ok().json(ServiceResponse::success(
        "Successfully validated table",
        report,
    )))
}

async fn stats_for(request: ValidateRequest, state: &AppState) -> Result<ValidationStats, ApiError> {
    match (request.strings_data, request.classifications_data) {
        (Some(strings), Some(classifications)) => Ok(validation_stats(&strings, &classifications)),
        _ => {
            let data = state.read().await;
            let (strings, classifications) = stored_rows(&data)?;
            Ok(validation_stats(strings, classifications))
        }
    }
}

pub async fn stored_stats(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let stats = stats_for(ValidateRequest::default(), &state).await?;
    Ok(HttpResponse::Ok().json(ServiceResponse::success("Successfully fetched stats", stats)))
}

pub async fn stats(
    payload: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let request: ValidateRequest = body::optional(&payload)?;
    let stats = stats_for(request, &state).await?;
    Ok(HttpResponse::Ok().json(ServiceResponse::success("Successfully fetched stats", stats)))
}

pub async fn status(state: web::Data<AppState>) -> HttpResponse {
    let data = state.read().await;
    HttpResponse::Ok().json(ServiceResponse::success(
        "Successfully fetched validation status",
        validation_status(&data, Utc::now()),
    ))
}
