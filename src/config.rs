use std::env;
use std::path::PathBuf;

use crate::error::AnalyzerError;

const DEFAULT_HTTP_PORT: &str = "8000";
const DEFAULT_LOG_ROOT: &str = "/logs";
const DEFAULT_JOURNAL_SERVICES: &str =
    "k0scontroller.service,k0sworker.service,local-artifact-mirror.service";

/// Where each log source lives on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLayout {
    pub embedded_cluster_dir: PathBuf,
    pub embedded_cluster_data_dir: PathBuf,
    pub pod_log_dir: PathBuf,
    pub syslog_path: PathBuf,
}

impl SourceLayout {
    /// Default layout below a single mount point.
    pub fn under(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            embedded_cluster_dir: root.join("embedded-cluster"),
            embedded_cluster_data_dir: root.join("embedded-cluster-data").join("logs"),
            pod_log_dir: root.join("pods"),
            syslog_path: root.join("syslog"),
        }
    }
}

#[derive(Debug)]
pub struct Settings {
    pub http_port: u16,
    pub log_root: PathBuf,
    pub layout: SourceLayout,
    /// systemd units read through the journal for the embedded-cluster view
    pub journal_services: Vec<String>,
    pub classifier_enabled: bool,
}

impl Settings {
    /// Validates the settings and returns an error if invalid.
    pub fn validate(&self) -> Result<(), AnalyzerError> {
        validate_port(self.http_port)?;
        if self.log_root.as_os_str().to_string_lossy().trim().is_empty() {
            return Err(AnalyzerError::Config("Log root cannot be empty".into()));
        }
        if self.journal_services.iter().any(|s| s.trim().is_empty()) {
            return Err(AnalyzerError::Config(
                "Journal service names cannot be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Validates that the port is in valid range (1-65535).
fn validate_port(port: u16) -> Result<(), AnalyzerError> {
    if port == 0 {
        return Err(AnalyzerError::Config("Port cannot be 0".into()));
    }
    Ok(())
}

fn parse_bool(name: &str, default: bool) -> Result<bool, AnalyzerError> {
    match env::var(name) {
        Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(AnalyzerError::Config(format!(
                "Invalid boolean for {name}: {other}"
            ))),
        },
        Err(_) => Ok(default),
    }
}

fn parse_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn path_or(name: &str, default: PathBuf) -> PathBuf {
    env::var_os(name).map_or(default, PathBuf::from)
}

pub fn get_configuration() -> Result<Settings, AnalyzerError> {
    let http_port = env::var("HTTP_PORT")
        .unwrap_or_else(|_| DEFAULT_HTTP_PORT.to_string())
        .parse::<u16>()
        .map_err(|e| AnalyzerError::Config(format!("Invalid HTTP_PORT: {e}")))?;

    let log_root = PathBuf::from(env::var("LOG_ROOT").unwrap_or_else(|_| DEFAULT_LOG_ROOT.to_string()));
    let defaults = SourceLayout::under(&log_root);
    let layout = SourceLayout {
        embedded_cluster_dir: path_or("EMBEDDED_CLUSTER_LOG_DIR", defaults.embedded_cluster_dir),
        embedded_cluster_data_dir: path_or(
            "EMBEDDED_CLUSTER_DATA_LOG_DIR",
            defaults.embedded_cluster_data_dir,
        ),
        pod_log_dir: path_or("POD_LOG_DIR", defaults.pod_log_dir),
        syslog_path: path_or("SYSLOG_PATH", defaults.syslog_path),
    };

    let journal_services = parse_csv(
        &env::var("JOURNAL_SERVICES").unwrap_or_else(|_| DEFAULT_JOURNAL_SERVICES.to_string()),
    );
    let classifier_enabled = parse_bool("CLASSIFIER_ENABLED", true)?;

    let settings = Settings {
        http_port,
        log_root,
        layout,
        journal_services,
        classifier_enabled,
    };

    // Validate settings before returning
    settings.validate()?;

    Ok(settings)
}
