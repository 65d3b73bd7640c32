use std::future::Future;
use std::pin::Pin;

/// Source of recent output for a system service.
///
/// Dyn-compatible through boxed futures. Implementations never fail: problems
/// are returned inline as text and analyzed like any other log.
pub trait JournalReader: Send + Sync {
    fn fetch(&self, service: &str, hours: u32) -> Pin<Box<dyn Future<Output = String> + Send + '_>>;
}
