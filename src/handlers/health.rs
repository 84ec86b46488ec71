//! Health check endpoint.

use actix_web::{HttpResponse, Responder};
use serde::Serialize;

/// Health check response structure.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// The status of the service
    pub status: String,
}

/// Liveness probe
///
/// GET /health
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
    })
}
