//! Errors surfaced at the HTTP boundary.
//!
//! Domain outcomes (invalid rows, rejected updates) are plain values returned
//! by the validation core. `ApiError` only covers what stops a request from
//! being served, and renders itself as a failure `ServiceResponse`.

use crate::csv_io::{CsvError, ExportError};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::model::csv::UnknownFileType;
use common::responses::{FailureDetails, ServiceResponse};
use log::error;
use thiserror::Error;

pub const FILE_TYPE_HINT: &str = "fileType must be either \"strings\" or \"classifications\"";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    BadRequest {
        message: String,
        details: FailureDetails,
    },

    #[error("Invalid file type")]
    InvalidFileType(String),

    #[error("Not Found")]
    NotFound(String),

    /// The request body did not have the expected shape.
    #[error("{message}")]
    Validation { message: String, errors: Vec<String> },

    #[error("{0}")]
    Upload(String),

    #[error("Failed to parse CSV")]
    Csv(#[from] CsvError),

    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>, detail: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
            details: FailureDetails {
                message: Some(detail.into()),
                ..FailureDetails::default()
            },
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
            errors: Vec::new(),
        }
    }

    fn details(&self) -> FailureDetails {
        match self {
            ApiError::BadRequest { details, .. } => details.clone(),
            ApiError::InvalidFileType(value) => FailureDetails {
                message: Some(FILE_TYPE_HINT.to_string()),
                field: Some(format!("fileType={value}")),
                ..FailureDetails::default()
            },
            ApiError::NotFound(path) => FailureDetails {
                message: Some(format!("No route for {path}")),
                ..FailureDetails::default()
            },
            ApiError::Validation { errors, .. } => FailureDetails {
                errors: errors.clone(),
                ..FailureDetails::default()
            },
            ApiError::Upload(message) => FailureDetails {
                message: Some(message.clone()),
                ..FailureDetails::default()
            },
            ApiError::Csv(e) => FailureDetails {
                message: Some(e.to_string()),
                ..FailureDetails::default()
            },
            // Internal details stay in the log.
            ApiError::Internal(_) => FailureDetails::default(),
        }
    }
}

impl From<UnknownFileType> for ApiError {
    fn from(e: UnknownFileType) -> Self {
        ApiError::InvalidFileType(e.0)
    }
}

impl From<ExportError> for ApiError {
    fn from(e: ExportError) -> Self {
        match e {
            ExportError::NoData(_) => ApiError::bad_request("Export failed", e.to_string()),
            ExportError::NothingToExport => {
                ApiError::bad_request("Batch export failed", e.to_string())
            }
            ExportError::Csv(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest { .. }
            | ApiError::InvalidFileType(_)
            | ApiError::Validation { .. }
            | ApiError::Upload(_)
            | ApiError::Csv(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if let ApiError::Internal(cause) = self {
            error!("Internal error: {}", cause);
        }
        let body = ServiceResponse::failure(self.to_string(), Some(self.details()), status.as_u16());
        HttpResponse::build(status).json(body)
    }
}
