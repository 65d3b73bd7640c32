use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::UNIX_EPOCH;

use chrono::{DateTime, Local, TimeDelta};
use futures::future::{join_all, try_join_all};
use tracing::{debug, info, warn};

use crate::adapter::log_files::{file_display_name, pod_display_name};
use crate::adapter::{FileRead, PodFilter, find_recent_logs, read_log_file};
use crate::analysis::{LogAnalyzer, ReportBuilder};
use crate::config::SourceLayout;
use crate::domain::{AggregateReport, LogFileAnalysis, LogRecord, SourceCategory};
use crate::error::AnalyzerError;
use crate::port::JournalReader;

const TOP_LEVEL_LOGS: &str = "*.log";

/// Collects logs from every configured source and runs the analyzer over them.
///
/// Holds only read-only handles, so one instance serves all requests.
pub struct DiagnosticsService {
    analyzer: Arc<LogAnalyzer>,
    layout: SourceLayout,
    journal: Arc<dyn JournalReader>,
    journal_services: Vec<String>,
}

impl DiagnosticsService {
    pub fn new(
        analyzer: Arc<LogAnalyzer>,
        layout: SourceLayout,
        journal: Arc<dyn JournalReader>,
        journal_services: Vec<String>,
    ) -> Self {
        Self {
            analyzer,
            layout,
            journal,
            journal_services,
        }
    }

    /// Embedded-cluster files, embedded-cluster data files and journal output
    /// of the configured services.
    pub async fn analyze_embedded_cluster(&self, hours: u32) -> Result<Vec<LogFileAnalysis>, AnalyzerError> {
        let cutoff = cutoff(hours);
        let mut records = Vec::new();

        for dir in [
            &self.layout.embedded_cluster_dir,
            &self.layout.embedded_cluster_data_dir,
        ] {
            let paths = discover(dir, TOP_LEVEL_LOGS, cutoff).await?;
            records.extend(read_records(&paths, file_display_name).await);
        }

        let outputs = join_all(
            self.journal_services
                .iter()
                .map(|service| self.journal.fetch(service, hours)),
        )
        .await;
        let captured_at = Local::now();
        for (service, text) in self.journal_services.iter().zip(outputs) {
            if text.is_empty() {
                debug!(service = %service, "No journal output");
                continue;
            }
            records.push(LogRecord::new(format!("journalctl-{service}"), text, captured_at));
        }

        info!(sources = records.len(), hours, "Analyzing embedded-cluster logs");
        self.analyze_records(records).await
    }

    /// Pod log files selected by `filter`.
    pub async fn analyze_pod_logs(
        &self,
        filter: &PodFilter,
        hours: u32,
    ) -> Result<Vec<LogFileAnalysis>, AnalyzerError> {
        let paths = discover(&self.layout.pod_log_dir, &filter.glob_pattern(), cutoff(hours)).await?;
        let records = read_records(&paths, pod_display_name).await;

        info!(sources = records.len(), hours, ?filter, "Analyzing pod logs");
        self.analyze_records(records).await
    }

    /// The syslog file, or `None` when it is missing, unreadable or older
    /// than the lookback window.
    pub async fn analyze_syslog(&self, hours: u32) -> Result<Option<LogFileAnalysis>, AnalyzerError> {
        let path = &self.layout.syslog_path;
        let record = match read_log_file(path, "syslog").await {
            FileRead::Found(record) if record.timestamp >= cutoff(hours) => record,
            FileRead::Found(_) => {
                debug!(path = %path.display(), "Syslog is older than the lookback window");
                return Ok(None);
            }
            FileRead::Absent => {
                debug!(path = %path.display(), "Syslog not present");
                return Ok(None);
            }
            FileRead::Unreadable(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read syslog");
                return Ok(None);
            }
        };

        info!(hours, "Analyzing syslog");
        self.analyze_record(record).await.map(Some)
    }

    /// Every source category, merged into one report.
    pub async fn analyze_all(&self, hours: u32) -> Result<AggregateReport, AnalyzerError> {
        let pod_filter = PodFilter::default();
        let (embedded, pods, syslog) = tokio::join!(
            self.analyze_embedded_cluster(hours),
            self.analyze_pod_logs(&pod_filter, hours),
            self.analyze_syslog(hours),
        );
        let syslog: Vec<_> = syslog?.into_iter().collect();

        let mut builder = ReportBuilder::new();
        builder
            .add_category(SourceCategory::EmbeddedCluster, &embedded?)
            .add_category(SourceCategory::Pods, &pods?)
            .add_category(SourceCategory::Syslog, &syslog);
        let report = builder.build(Local::now());

        info!(
            status = ?report.system_status.status,
            critical = report.system_status.critical_issues_count,
            warnings = report.system_status.warnings_count,
            "Consolidated analysis complete"
        );
        Ok(report)
    }

    async fn analyze_records(&self, records: Vec<LogRecord>) -> Result<Vec<LogFileAnalysis>, AnalyzerError> {
        try_join_all(records.into_iter().map(|record| self.analyze_record(record))).await
    }

    /// Model inference blocks, so each analysis runs on the blocking pool.
    async fn analyze_record(&self, record: LogRecord) -> Result<LogFileAnalysis, AnalyzerError> {
        let analyzer = Arc::clone(&self.analyzer);
        tokio::task::spawn_blocking(move || LogFileAnalysis {
            analysis: analyzer.analyze(&record.text).at(record.timestamp),
            filename: record.source,
        })
        .await
        .map_err(|e| AnalyzerError::Aggregation(e.to_string()))
    }
}

/// Start of the lookback window. Windows reaching past the representable
/// range start at the Unix epoch.
fn cutoff(hours: u32) -> DateTime<Local> {
    Local::now()
        .checked_sub_signed(TimeDelta::hours(i64::from(hours)))
        .unwrap_or_else(|| DateTime::from(UNIX_EPOCH))
}

async fn discover(root: &Path, pattern: &str, cutoff: DateTime<Local>) -> Result<Vec<PathBuf>, AnalyzerError> {
    let root = root.to_path_buf();
    let pattern = pattern.to_string();
    tokio::task::spawn_blocking(move || find_recent_logs(&root, &pattern, cutoff))
        .await
        .map_err(|e| AnalyzerError::Aggregation(e.to_string()))?
}

/// Read every path, keeping the files that could be read.
async fn read_records(paths: &[PathBuf], display_name: fn(&Path) -> String) -> Vec<LogRecord> {
    let mut records = Vec::with_capacity(paths.len());
    for path in paths {
        match read_log_file(path, display_name(path)).await {
            FileRead::Found(record) => records.push(record),
            FileRead::Absent => debug!(path = %path.display(), "Log file disappeared before reading"),
            FileRead::Unreadable(e) => {
                warn!(path = %path.display(), error = %e, "Error reading log file");
            }
        }
    }
    records
}
