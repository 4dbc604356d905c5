//! HTTP handlers, grouped by route prefix.

pub mod files;
pub mod health;

use crate::error::ApiError;
use actix_web::{HttpRequest, HttpResponse};

/// Fallback for requests no route matched.
pub async fn not_found(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    Err(ApiError::NotFound(req.path().to_string()))
}
