pub mod diagnosis;
pub mod record;
pub mod report;

pub use diagnosis::{Diagnosis, LogFileAnalysis};
pub use record::{LogRecord, SourceCategory};
pub use report::{AggregateReport, HealthStatus, IssueRecord, Severity, SystemStatus};
