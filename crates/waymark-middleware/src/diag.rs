//! Diagnostic sink for non-fatal middleware warnings.
//!
//! The sink is injected at configuration time so tests can assert on
//! warnings without capturing process-wide output. The default sink
//! forwards to `tracing`.

use std::sync::Mutex;

/// Receiver for non-fatal diagnostics emitted by the middleware.
pub trait DiagnosticSink: Send + Sync {
    /// Report a warning.
    fn warn(&self, message: &str);
}

/// Sink that forwards warnings to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn warn(&self, message: &str) {
        tracing::warn!(target: "waymark_middleware", "{message}");
    }
}

/// Sink that collects warnings in memory, for assertions in tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    messages: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the warnings collected so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    /// True if no warning has been collected.
    pub fn is_empty(&self) -> bool {
        self.messages.lock().unwrap().is_empty()
    }
}

impl DiagnosticSink for MemorySink {
    fn warn(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_owned());
    }
}
