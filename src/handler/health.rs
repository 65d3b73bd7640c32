use axum::Json;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    status: &'static str,
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthReport> {
    debug!("Health check requested");
    Json(HealthReport { status: "healthy" })
}
