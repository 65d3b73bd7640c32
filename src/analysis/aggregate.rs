use chrono::{DateTime, Local, SecondsFormat};

use crate::domain::{
    AggregateReport, HealthStatus, IssueRecord, LogFileAnalysis, Severity, SourceCategory,
    SystemStatus,
};

/// Folds per-source analyses into one [`AggregateReport`].
#[derive(Debug, Default)]
pub struct ReportBuilder {
    critical_issues: Vec<IssueRecord>,
    warnings: Vec<IssueRecord>,
    sources: Vec<SourceCategory>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort every analysis of a category into critical issues or warnings.
    ///
    /// A category without analyses is not counted as an available source.
    pub fn add_category(&mut self, category: SourceCategory, analyses: &[LogFileAnalysis]) -> &mut Self {
        if analyses.is_empty() {
            return self;
        }
        if !self.sources.contains(&category) {
            self.sources.push(category);
        }

        for analysis in analyses {
            let severity = Severity::classify(&analysis.analysis.root_cause);
            let record = IssueRecord::from_analysis(category, analysis, severity);
            match severity {
                Severity::Critical => self.critical_issues.push(record),
                Severity::Warning => self.warnings.push(record),
            }
        }
        self
    }

    pub fn build(self, now: DateTime<Local>) -> AggregateReport {
        let status = if self.critical_issues.is_empty() {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        };

        AggregateReport {
            system_status: SystemStatus {
                status,
                critical_issues_count: self.critical_issues.len(),
                warnings_count: self.warnings.len(),
                log_sources_available: self.sources.len(),
            },
            critical_issues: self.critical_issues,
            warnings: self.warnings,
            log_sources_analyzed: self
                .sources
                .iter()
                .map(ToString::to_string)
                .collect(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Micros, false),
        }
    }
}
