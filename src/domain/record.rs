use chrono::{DateTime, Local};
use std::fmt;

/// Raw log payload read from one source.
#[derive(Clone, Debug)]
pub struct LogRecord {
    /// Display name: `<pod dir>/<file>`, a bare file name, `journalctl-<unit>` or `syslog`.
    pub source: String,
    pub text: String,
    /// File modification time, or capture time for journal output.
    pub timestamp: DateTime<Local>,
}

impl LogRecord {
    pub fn new(source: impl Into<String>, text: impl Into<String>, timestamp: DateTime<Local>) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
            timestamp,
        }
    }
}

/// Groups of log sources reported in the consolidated view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceCategory {
    EmbeddedCluster,
    Pods,
    Syslog,
}

impl SourceCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EmbeddedCluster => "embedded-cluster",
            Self::Pods => "pods",
            Self::Syslog => "syslog",
        }
    }
}

impl fmt::Display for SourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
