use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Failed to load configuration: {0}")]
    Config(String),

    #[error("Failed to bind to address {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),

    #[error("Invalid fault signature {signature:?}: {source}")]
    Pattern {
        signature: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid log filter {filter:?}: {source}")]
    InvalidFilter {
        filter: String,
        #[source]
        source: globset::Error,
    },

    #[error("Analysis task failed: {0}")]
    Aggregation(String),
}
