//! # Dataset Retrieval Service
//!
//! `GET /api/files` returns both slots of the store, either possibly `null`.
//! `GET /api/files/{file_type}` returns one dataset with its headers, row count
//! and last modification time, and fails when nothing of that type is stored.

use crate::error::ApiError;
use crate::store::AppState;
use actix_web::{web, HttpResponse};
use common::model::csv::FileType;
use common::model::datasource::AllDatasets;
use common::responses::ServiceResponse;

pub async fn all(state: web::Data<AppState>) -> HttpResponse {
    let data = state.read().await;
    HttpResponse::Ok().json(ServiceResponse::success(
        "Successfully retrieved data",
        AllDatasets::from(&*data),
    ))
}

pub async fn one(
    file_type: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let file_type: FileType = file_type.parse()?;
    let data = state.read().await;

    let view = data
        .view(file_type)
        .filter(|view| view.row_count > 0)
        .ok_or_else(|| {
            ApiError::bad_request(
                "No data found",
                format!("No {file_type} data structure has been uploaded yet"),
            )
        })?;

    Ok(HttpResponse::Ok().json(ServiceResponse::success("Successfully retrieved file", view)))
}
