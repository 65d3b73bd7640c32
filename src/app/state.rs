use std::sync::Arc;

use tracing::{info, warn};

use crate::adapter::JournalctlReader;
use crate::analysis::{BertClassifier, ConfidenceScorer, LogAnalyzer, PatternCatalog};
use crate::config::Settings;
use crate::diagnostics::DiagnosticsService;
use crate::error::AnalyzerError;

/// Shared application state; everything behind it is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub diagnostics: Arc<DiagnosticsService>,
}

impl AppState {
    pub fn new(diagnostics: Arc<DiagnosticsService>) -> Self {
        Self { diagnostics }
    }

    /// Build the pattern catalog, load the model and wire the log sources.
    ///
    /// A model that fails to load leaves confidence at the sentinel instead
    /// of stopping the service.
    pub fn from_settings(settings: &Settings) -> Result<Self, AnalyzerError> {
        let catalog = Arc::new(PatternCatalog::builtin()?);
        info!(signatures = catalog.len(), "Compiled fault signatures");

        let scorer = if settings.classifier_enabled {
            match BertClassifier::new() {
                Ok(classifier) => ConfidenceScorer::new(Arc::new(classifier)),
                Err(e) => {
                    warn!(error = %e, "Classifier unavailable, confidence will be reported as 0.00");
                    ConfidenceScorer::disabled()
                }
            }
        } else {
            info!("Classifier disabled by configuration");
            ConfidenceScorer::disabled()
        };

        let analyzer = Arc::new(LogAnalyzer::new(catalog, Arc::new(scorer)));
        let diagnostics = DiagnosticsService::new(
            analyzer,
            settings.layout.clone(),
            Arc::new(JournalctlReader::default()),
            settings.journal_services.clone(),
        );

        Ok(Self::new(Arc::new(diagnostics)))
    }
}
