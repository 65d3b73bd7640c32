pub mod journalctl;
pub mod log_files;

pub use journalctl::JournalctlReader;
pub use log_files::{FileRead, PodFilter, find_recent_logs, read_log_file};
