//! Shared test support: a scripted journal, a fixed-score classifier and a
//! temporary log tree laid out like a support bundle mount.
#![allow(dead_code)]

use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use chrono::{Local, TimeDelta};
use filetime::{FileTime, set_file_mtime};
use kots_log_analyzer::analysis::{ConfidenceScorer, LogAnalyzer, PatternCatalog, SequenceClassifier};
use kots_log_analyzer::config::SourceLayout;
use kots_log_analyzer::diagnostics::DiagnosticsService;
use kots_log_analyzer::port::JournalReader;
use tempfile::TempDir;

/// Journal that returns canned output per service and records every call.
#[derive(Default)]
pub struct ScriptedJournal {
    outputs: HashMap<String, String>,
    calls: Mutex<Vec<(String, u32)>>,
}

impl ScriptedJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(mut self, service: &str, text: &str) -> Self {
        self.outputs.insert(service.to_string(), text.to_string());
        self
    }

    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

impl JournalReader for ScriptedJournal {
    fn fetch(&self, service: &str, hours: u32) -> Pin<Box<dyn Future<Output = String> + Send + '_>> {
        self.calls.lock().unwrap().push((service.to_string(), hours));
        let text = self.outputs.get(service).cloned().unwrap_or_default();
        Box::pin(async move { text })
    }
}

pub struct FixedClassifier(pub f64);

impl SequenceClassifier for FixedClassifier {
    fn top_probability(&self, _text: &str) -> anyhow::Result<f64> {
        Ok(self.0)
    }
}

pub fn analyzer_with_score(score: f64) -> LogAnalyzer {
    LogAnalyzer::new(
        Arc::new(PatternCatalog::builtin().unwrap()),
        Arc::new(ConfidenceScorer::new(Arc::new(FixedClassifier(score)))),
    )
}

/// Temporary directory laid out like the `/logs` mount.
pub struct LogTree {
    dir: TempDir,
}

impl LogTree {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn layout(&self) -> SourceLayout {
        SourceLayout::under(self.root())
    }

    pub fn write(&self, relative: &str, text: &str) -> PathBuf {
        let path = self.root().join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, text).unwrap();
        path
    }

    /// Write a file whose modification time is `hours` in the past.
    pub fn write_aged(&self, relative: &str, text: &str, hours: i64) -> PathBuf {
        let path = self.write(relative, text);
        let when = Local::now() - TimeDelta::hours(hours);
        set_file_mtime(&path, FileTime::from_unix_time(when.timestamp(), 0)).unwrap();
        path
    }

    pub fn service(&self, journal: Arc<dyn JournalReader>, services: &[&str]) -> DiagnosticsService {
        DiagnosticsService::new(
            Arc::new(analyzer_with_score(0.73)),
            self.layout(),
            journal,
            services.iter().map(|s| (*s).to_string()).collect(),
        )
    }
}
