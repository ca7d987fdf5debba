use actix_web::{web, HttpResponse, Result};

use product_core::HealthResponse;
use product_openapi::ApiDocuments;

use crate::SERVICE_NAME;

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "Observability",
    security(()),
    responses(
        (status = 200, description = "Process is alive", body = HealthResponse)
    )
)]
pub async fn health() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(HealthResponse::new("healthy", SERVICE_NAME)))
}

/// Readiness check endpoint
///
/// Ready once the API documents have been registered as app data; they are
/// only registered after rendering succeeded.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Observability",
    security(()),
    responses(
        (status = 200, description = "API documents are being served", body = HealthResponse),
        (status = 503, description = "API documents are not available")
    )
)]
pub async fn readiness(docs: Option<web::Data<ApiDocuments>>) -> Result<HttpResponse> {
    match docs {
        Some(_) => {
            Ok(HttpResponse::Ok().json(HealthResponse::new("ready", SERVICE_NAME)))
        }
        _ => Ok(HttpResponse::ServiceUnavailable().json(HealthResponse::new(
            "unavailable",
            SERVICE_NAME,
        ))),
    }
}
