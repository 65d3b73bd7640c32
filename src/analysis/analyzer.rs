use std::sync::Arc;

use tracing::debug;

use super::classifier::ConfidenceScorer;
use super::context::extract_context;
use super::patterns::{PatternCatalog, PatternMatch};
use super::remediation::steps_for;
use crate::domain::Diagnosis;

pub const UNKNOWN_ROOT_CAUSE: &str = "Unknown issue";

/// Product families whose matches outrank generic ones.
const PRIORITY_FAMILIES: &[&str] = &["helm", "kots"];

/// Single-source analysis: context, root cause, confidence and next steps.
#[derive(Clone, Debug)]
pub struct LogAnalyzer {
    catalog: Arc<PatternCatalog>,
    scorer: Arc<ConfidenceScorer>,
}

impl LogAnalyzer {
    pub fn new(catalog: Arc<PatternCatalog>, scorer: Arc<ConfidenceScorer>) -> Self {
        Self { catalog, scorer }
    }

    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    /// Diagnose one log. The result carries no timestamp; see [`Diagnosis::at`].
    pub fn analyze(&self, text: &str) -> Diagnosis {
        let context = extract_context(text).join("\n");
        let matches = self.catalog.find_matches(text);
        let root_cause = resolve_root_cause(&matches);
        debug!(
            matched = matches.len(),
            root_cause, "Resolved root cause"
        );

        let confidence = self.scorer.confidence(&context);
        let next_steps = steps_for(root_cause)
            .iter()
            .map(|step| (*step).to_string())
            .collect();

        Diagnosis {
            root_cause: root_cause.to_string(),
            confidence,
            next_steps,
            context,
            timestamp: None,
        }
    }
}

/// First Helm/KOTS match, else the first match, else [`UNKNOWN_ROOT_CAUSE`].
pub fn resolve_root_cause(matches: &[PatternMatch]) -> &str {
    matches
        .iter()
        .find(|m| {
            let lowered = m.root_cause.to_lowercase();
            PRIORITY_FAMILIES.iter().any(|family| lowered.contains(family))
        })
        .or_else(|| matches.first())
        .map_or(UNKNOWN_ROOT_CAUSE, |m| m.root_cause.as_str())
}
