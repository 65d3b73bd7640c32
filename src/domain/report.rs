use serde::{Deserialize, Serialize};

use super::{Diagnosis, LogFileAnalysis, SourceCategory};

/// How a diagnosis is surfaced in the consolidated report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Critical,
    Warning,
}

/// Ordered severity rules over the lowercased root cause; the first hit wins.
const SEVERITY_RULES: &[(&str, Severity)] = &[
    ("error", Severity::Critical),
    ("fail", Severity::Critical),
];

impl Severity {
    pub fn classify(root_cause: &str) -> Self {
        let lowered = root_cause.to_lowercase();
        SEVERITY_RULES
            .iter()
            .find(|(marker, _)| lowered.contains(marker))
            .map_or(Self::Warning, |(_, severity)| *severity)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// One entry of `critical_issues` or `warnings`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct IssueRecord {
    pub source: String,
    pub file: String,
    pub issue: String,
    pub confidence: String,
    pub next_steps: Vec<String>,
    /// Only carried for critical issues.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl IssueRecord {
    pub(crate) fn from_analysis(category: SourceCategory, analysis: &LogFileAnalysis, severity: Severity) -> Self {
        let Diagnosis {
            root_cause,
            confidence,
            next_steps,
            context,
            ..
        } = &analysis.analysis;
        Self {
            source: category.to_string(),
            file: analysis.filename.clone(),
            issue: root_cause.clone(),
            confidence: confidence.clone(),
            next_steps: next_steps.clone(),
            context: (severity == Severity::Critical).then(|| context.clone()),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SystemStatus {
    pub status: HealthStatus,
    pub critical_issues_count: usize,
    pub warnings_count: usize,
    pub log_sources_available: usize,
}

/// Consolidated view over every analyzed source.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AggregateReport {
    pub critical_issues: Vec<IssueRecord>,
    pub warnings: Vec<IssueRecord>,
    pub system_status: SystemStatus,
    pub log_sources_analyzed: Vec<String>,
    pub timestamp: String,
}
