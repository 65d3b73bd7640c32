use std::time::Duration;

use thiserror::Error;

/// Port probed when `HTTP_PORT` is unset
const DEFAULT_HTTP_PORT: u16 = 8000;

#[derive(Debug, Error)]
#[error("Healthcheck failed: {0}")]
pub struct HealthcheckError(String);

/// Probe the port from `HTTP_PORT`, falling back to 8000.
pub async fn healthcheck() -> Result<(), HealthcheckError> {
    let port = std::env::var("HTTP_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_HTTP_PORT);
    healthcheck_with_port(port).await
}

/// Perform a health check against a specific local port
pub async fn healthcheck_with_port(port: u16) -> Result<(), HealthcheckError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build()
        .map_err(|e| HealthcheckError(format!("Failed to create HTTP client: {e}")))?;

    let resp = client
        .get(format!("http://127.0.0.1:{port}/health"))
        .send()
        .await
        .map_err(|e| HealthcheckError(format!("Request failed: {e}")))?;

    if resp.status().is_success() {
        Ok(())
    } else {
        Err(HealthcheckError(format!(
            "Health endpoint returned status: {}",
            resp.status()
        )))
    }
}
