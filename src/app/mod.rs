mod router;
pub mod server;
mod state;
pub mod tracing;

pub use router::router;
pub use state::AppState;

use crate::config;
use crate::error::AnalyzerError;

/// Application entry point. Initializes tracing, configuration, and starts the server.
pub async fn run() -> Result<(), AnalyzerError> {
    // Handle healthcheck subcommand (for Docker healthcheck in distroless image)
    if std::env::args().nth(1).as_deref() == Some("healthcheck") {
        match crate::healthcheck().await {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1)
            }
        }
    }

    tracing::init_tracing();

    let settings = config::get_configuration()?;
    ::tracing::info!(
        log_root = %settings.log_root.display(),
        classifier_enabled = settings.classifier_enabled,
        "Loaded settings"
    );

    let state = AppState::from_settings(&settings)?;
    server::serve(router(state), settings.http_port).await
}
