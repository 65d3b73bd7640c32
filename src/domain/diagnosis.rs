use chrono::{DateTime, Local, SecondsFormat};
use serde::{Deserialize, Serialize};

/// Verdict for one log source.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Diagnosis {
    pub root_cause: String,
    /// Model confidence rendered with two decimals, `"0.00"` when unavailable.
    pub confidence: String,
    pub next_steps: Vec<String>,
    /// Newline-joined context lines.
    pub context: String,
    pub timestamp: Option<String>,
}

impl Diagnosis {
    /// Attach the time the underlying log was written or captured.
    #[must_use]
    pub fn at(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = Some(timestamp.to_rfc3339_opts(SecondsFormat::Micros, false));
        self
    }
}

/// Response item of the per-source endpoints.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LogFileAnalysis {
    pub filename: String,
    pub analysis: Diagnosis,
}
