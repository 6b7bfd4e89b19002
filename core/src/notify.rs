//! User-visible notification sink.
//!
//! The pipelines report progress and failures through this seam; diagnostic
//! detail goes to `tracing` instead. Fire-and-forget, no return contract.

/// Sink for user-visible messages.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, is_error: bool);
}

/// Notifier that drops everything. Useful where only logs are wanted.
#[derive(Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _message: &str, _is_error: bool) {}
}
