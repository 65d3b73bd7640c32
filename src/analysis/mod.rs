//! Log diagnosis pipeline.
//!
//! [`LogAnalyzer`] turns one log into a [`Diagnosis`](crate::domain::Diagnosis);
//! [`ReportBuilder`] folds many of them into an
//! [`AggregateReport`](crate::domain::AggregateReport).

pub mod aggregate;
pub mod analyzer;
pub mod classifier;
pub mod context;
pub mod patterns;
pub mod remediation;

pub use aggregate::ReportBuilder;
pub use analyzer::{LogAnalyzer, UNKNOWN_ROOT_CAUSE};
pub use classifier::{BertClassifier, ConfidenceScorer, SequenceClassifier};
pub use context::extract_context;
pub use patterns::{PatternCatalog, PatternMatch};
pub use remediation::steps_for;
