//! Reporter trait for dependency injection
//!
//! This trait allows core logic to report progress and status without
//! being coupled to a specific output implementation.

/// Progress and status sink for pipeline stages.
pub trait Reporter: Send + Sync {
    /// Indicates a new pipeline stage has started (e.g. "Fetching", "Normalizing").
    fn section(&self, title: &str);

    /// Updates the progress of a download.
    fn downloading(&self, what: &str, current: u64, total: Option<u64>);

    /// Marks a stage or bundle as successfully completed.
    fn done(&self, what: &str, detail: &str);

    /// Log an informational message.
    fn info(&self, msg: &str);

    /// Log a warning message.
    fn warning(&self, msg: &str);

    /// Log an error message.
    fn error(&self, msg: &str);
}

impl<T: Reporter + ?Sized> Reporter for std::sync::Arc<T> {
    fn section(&self, title: &str) {
        (**self).section(title);
    }
    fn downloading(&self, what: &str, current: u64, total: Option<u64>) {
        (**self).downloading(what, current, total);
    }
    fn done(&self, what: &str, detail: &str) {
        (**self).done(what, detail);
    }
    fn info(&self, msg: &str) {
        (**self).info(msg);
    }
    fn warning(&self, msg: &str) {
        (**self).warning(msg);
    }
    fn error(&self, msg: &str) {
        (**self).error(msg);
    }
}

/// A no-op reporter for silent operations (e.g., verification, testing).
#[derive(Debug, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn section(&self, _: &str) {}
    fn downloading(&self, _: &str, _: u64, _: Option<u64>) {}
    fn done(&self, _: &str, _: &str) {}
    fn info(&self, _: &str) {}
    fn warning(&self, _: &str) {}
    fn error(&self, _: &str) {}
}
