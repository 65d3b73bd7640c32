use std::future::Future;
use std::pin::Pin;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::port::JournalReader;

/// Reads unit logs through the `journalctl` binary.
#[derive(Debug, Clone)]
pub struct JournalctlReader {
    program: String,
}

impl Default for JournalctlReader {
    fn default() -> Self {
        Self::new("journalctl")
    }
}

impl JournalctlReader {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn args(service: &str, hours: u32) -> Vec<String> {
        vec![
            "--since".to_string(),
            format!("{hours} hours ago"),
            "--no-pager".to_string(),
            "-u".to_string(),
            service.to_string(),
        ]
    }
}

impl JournalReader for JournalctlReader {
    fn fetch(&self, service: &str, hours: u32) -> Pin<Box<dyn Future<Output = String> + Send + '_>> {
        let args = Self::args(service, hours);
        let service = service.to_string();
        Box::pin(async move {
            match Command::new(&self.program).args(&args).output().await {
                Ok(output) => {
                    if !output.status.success() {
                        debug!(service = %service, status = %output.status, "journalctl exited unsuccessfully");
                    }
                    String::from_utf8_lossy(&output.stdout).into_owned()
                }
                Err(e) => {
                    warn!(service = %service, error = %e, "Failed to run journalctl");
                    format!("Error getting journalctl logs: {e}")
                }
            }
        })
    }
}
