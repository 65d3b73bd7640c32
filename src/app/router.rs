use axum::Router;
use axum::routing::get;

use super::AppState;
use crate::handler::analyze;
use crate::handler::health::health_handler;

/// Build the HTTP router (health + analysis views).
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/analyze/embedded-cluster", get(analyze::embedded_cluster_handler))
        .route("/analyze/pod-logs", get(analyze::pod_logs_handler))
        .route("/analyze/syslog", get(analyze::syslog_handler))
        .route("/analyze/all", get(analyze::all_handler))
        .with_state(state)
}
