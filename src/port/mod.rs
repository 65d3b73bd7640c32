pub mod journal_reader;

pub use journal_reader::JournalReader;
