use kots_log_analyzer::error::AnalyzerError;

#[tokio::main]
async fn main() -> Result<(), AnalyzerError> {
    kots_log_analyzer::app::run().await
}
