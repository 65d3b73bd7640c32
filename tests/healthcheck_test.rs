use std::net::TcpListener;
use std::time::Duration;
use tokio::time::sleep;

fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// Test that healthcheck succeeds when server is running
#[tokio::test]
async fn test_healthcheck_succeeds_when_server_running() {
    let port = free_port();

    let server = tokio::spawn(async move {
        let app = axum::Router::new().route(
            "/health",
            axum::routing::get(kots_log_analyzer::handler::health::health_handler),
        );
        let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{port}"))
            .await
            .unwrap();
        axum::serve(listener, app).await.unwrap();
    });

    // Wait for server to start
    sleep(Duration::from_millis(100)).await;

    let result = kots_log_analyzer::healthcheck_with_port(port).await;
    assert!(result.is_ok(), "Healthcheck should succeed: {result:?}");

    server.abort();
}

/// Test that healthcheck fails when nothing listens on the port
#[tokio::test]
async fn test_healthcheck_fails_when_server_not_running() {
    let port = free_port();

    let result = kots_log_analyzer::healthcheck_with_port(port).await;
    let err = result.unwrap_err();
    assert!(err.to_string().starts_with("Healthcheck failed"));
}

/// Test that a non-2xx health response is a failure
#[tokio::test]
async fn test_healthcheck_fails_on_error_status() {
    let port = free_port();

    let server = tokio::spawn(async move {
        let app = axum::Router::new().route(
            "/health",
            axum::routing::get(|| async { (axum::http::StatusCode::SERVICE_UNAVAILABLE, "down") }),
        );
        let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{port}"))
            .await
            .unwrap();
        axum::serve(listener, app).await.unwrap();
    });

    sleep(Duration::from_millis(100)).await;

    let result = kots_log_analyzer::healthcheck_with_port(port).await;
    assert!(result.unwrap_err().to_string().contains("503"));

    server.abort();
}
