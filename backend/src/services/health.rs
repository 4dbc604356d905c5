use actix_web::HttpResponse;
use common::responses::ServiceResponse;

/// Liveness probe for `GET /health-check`.
pub async fn process() -> HttpResponse {
    HttpResponse::Ok().json(ServiceResponse::success("Service is healthy", ()))
}
