//! Reference-data validation service.
//!
//! Two CSV datasets are uploaded: "strings" rows tagged with a
//! Topic/Subtopic/Industry combination, and "classifications" listing the
//! allowed combinations. The service validates the former against the latter,
//! accepts edits only when they keep the data consistent, and exports both
//! back to CSV.

pub mod config;
pub mod csv_io;
pub mod error;
pub mod services;
pub mod store;
pub mod validation;

use crate::error::ApiError;
use crate::store::AppState;
use actix_web::web::{self, ServiceConfig};

/// Registers shared state, body limits and every route on an app.
///
/// Used by `main` and by the integration tests, so both serve the same
/// surface.
pub fn configure_app(state: AppState, json_limit_bytes: usize) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg: &mut ServiceConfig| {
        cfg.app_data(web::Data::new(state))
            .app_data(web::PayloadConfig::new(json_limit_bytes))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                ApiError::Validation {
                    message: "Validation error".to_string(),
                    errors: vec![err.to_string()],
                }
                .into()
            }))
            .route("/health-check", web::get().to(services::health::process))
            .service(services::files::configure_routes());
    }
}
