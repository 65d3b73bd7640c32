// Log discovery on disk: glob selection under a root directory, a modification
// time cutoff, and per-file reads that report their own outcome.

use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use globset::{GlobBuilder, GlobMatcher};
use tokio::fs;
use tracing::warn;
use walkdir::WalkDir;

use crate::domain::LogRecord;
use crate::error::AnalyzerError;

/// Outcome of reading one log file.
#[derive(Debug)]
pub enum FileRead {
    Found(LogRecord),
    Absent,
    Unreadable(io::Error),
}

/// Optional namespace / pod name selection for pod logs.
///
/// Pod log directories are named `<namespace>_<pod>_<uid>`; both filters may
/// contain glob wildcards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PodFilter {
    pub namespace: Option<String>,
    pub pod_name: Option<String>,
}

impl PodFilter {
    pub fn new(namespace: Option<String>, pod_name: Option<String>) -> Self {
        // Blank query parameters behave like absent ones.
        let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        Self {
            namespace: non_blank(namespace),
            pod_name: non_blank(pod_name),
        }
    }

    /// Glob relative to the pod log root selecting `*.log` files at any depth.
    ///
    /// Without filters this includes logs lying directly in the root.
    pub fn glob_pattern(&self) -> String {
        let pod_dir = match (&self.namespace, &self.pod_name) {
            (Some(ns), Some(pod)) => format!("{ns}_{pod}_*"),
            (Some(ns), None) => format!("{ns}_*"),
            (None, Some(pod)) => format!("*_{pod}_*"),
            (None, None) => return "**/*.log".to_string(),
        };
        format!("{pod_dir}/**/*.log")
    }
}

fn compile(pattern: &str) -> Result<GlobMatcher, AnalyzerError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| AnalyzerError::InvalidFilter {
            filter: pattern.to_string(),
            source,
        })
}

fn max_depth(pattern: &str) -> usize {
    if pattern.contains("**") {
        usize::MAX
    } else {
        pattern.matches('/').count() + 1
    }
}

/// Files under `root` whose relative path matches `pattern` and whose
/// modification time is at or after `cutoff`, sorted by path.
///
/// Symlinks are followed. A missing root yields no files. Entries that cannot
/// be inspected are logged and skipped.
pub fn find_recent_logs(
    root: &Path,
    pattern: &str,
    cutoff: DateTime<Local>,
) -> Result<Vec<PathBuf>, AnalyzerError> {
    let matcher = compile(pattern)?;
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let mut found = Vec::new();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth(pattern))
        .follow_links(true)
        .sort_by_file_name();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(root = %root.display(), error = %e, "Skipping unreadable log path");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        if !matcher.is_match(relative) {
            continue;
        }
        match entry.metadata().map_err(io::Error::from).and_then(|m| m.modified()) {
            Ok(modified) if DateTime::<Local>::from(modified) >= cutoff => {
                found.push(entry.into_path());
            }
            Ok(_) => {}
            Err(e) => {
                warn!(path = %entry.path().display(), error = %e, "Skipping log without modification time");
            }
        }
    }
    Ok(found)
}

/// Read a whole log file. `source` becomes the record's display name.
pub async fn read_log_file(path: &Path, source: impl Into<String>) -> FileRead {
    let metadata = match fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return FileRead::Absent,
        Err(e) => return FileRead::Unreadable(e),
    };
    let modified = match metadata.modified() {
        Ok(modified) => modified,
        Err(e) => return FileRead::Unreadable(e),
    };

    match fs::read_to_string(path).await {
        Ok(text) => FileRead::Found(LogRecord::new(source, text, modified.into())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => FileRead::Absent,
        Err(e) => FileRead::Unreadable(e),
    }
}

/// `<parent dir>/<file name>`, the display name used for pod logs.
pub fn pod_display_name(path: &Path) -> String {
    let file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let parent = path
        .parent()
        .and_then(Path::file_name)
        .map_or_else(|| "unknown".to_string(), |name| name.to_string_lossy().into_owned());
    format!("{parent}/{file}")
}

/// Bare file name, the display name used for embedded-cluster logs.
pub fn file_display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
