use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::adapter::PodFilter;
use crate::app::AppState;
use crate::domain::{AggregateReport, LogFileAnalysis};
use crate::error::AnalyzerError;

const DEFAULT_HOURS: u32 = 24;

fn default_hours() -> u32 {
    DEFAULT_HOURS
}

#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    #[serde(default = "default_hours")]
    pub hours: u32,
}

#[derive(Debug, Deserialize)]
pub struct PodLogsQuery {
    pub namespace: Option<String>,
    pub pod_name: Option<String>,
    #[serde(default = "default_hours")]
    pub hours: u32,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

pub type ApiError = (StatusCode, Json<ErrorBody>);

fn api_error(view: &str, err: &AnalyzerError) -> ApiError {
    error!(view, error = %err, "Analysis failed");
    let status = match err {
        AnalyzerError::InvalidFilter { .. } => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorBody {
            detail: format!("Error analyzing {view}: {err}"),
        }),
    )
}

/// Handler for GET /analyze/embedded-cluster
pub async fn embedded_cluster_handler(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<Vec<LogFileAnalysis>>, ApiError> {
    info!(hours = query.hours, "Embedded-cluster analysis requested");
    state
        .diagnostics
        .analyze_embedded_cluster(query.hours)
        .await
        .map(Json)
        .map_err(|e| api_error("embedded-cluster logs", &e))
}

/// Handler for GET /analyze/pod-logs
pub async fn pod_logs_handler(
    State(state): State<AppState>,
    Query(query): Query<PodLogsQuery>,
) -> Result<Json<Vec<LogFileAnalysis>>, ApiError> {
    info!(hours = query.hours, "Pod log analysis requested");
    let filter = PodFilter::new(query.namespace, query.pod_name);
    state
        .diagnostics
        .analyze_pod_logs(&filter, query.hours)
        .await
        .map(Json)
        .map_err(|e| api_error("pod logs", &e))
}

/// Handler for GET /analyze/syslog
pub async fn syslog_handler(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<LogFileAnalysis>, ApiError> {
    info!(hours = query.hours, "Syslog analysis requested");
    match state.diagnostics.analyze_syslog(query.hours).await {
        Ok(Some(analysis)) => Ok(Json(analysis)),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorBody {
                detail: "Syslog file not found".to_string(),
            }),
        )),
        Err(e) => Err(api_error("syslog", &e)),
    }
}

/// Handler for GET /analyze/all
pub async fn all_handler(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<AggregateReport>, ApiError> {
    info!(hours = query.hours, "Consolidated analysis requested");
    state
        .diagnostics
        .analyze_all(query.hours)
        .await
        .map(Json)
        .map_err(|e| api_error("all logs", &e))
}
