//! Port for structured debug logging.
//!
//! Defines the [`DebugLogger`] trait: a `debug(message, data)` sink for
//! machine-readable records of what the relay did (queue ids, filtered
//! events, retries).
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures structured records
//! that can be written to a file (JSONL) for later inspection.

use serde_json::Value;

/// Port for recording structured debug events.
///
/// The `debug` method is intentionally synchronous and non-fallible so it
/// never disrupts the main flow; logging failures are silently ignored.
pub trait DebugLogger: Send + Sync {
    fn debug(&self, message: &str, data: Value);
}

/// No-op implementation for tests and when debug logging is disabled.
pub struct NoDebugLogger;

impl DebugLogger for NoDebugLogger {
    fn debug(&self, _message: &str, _data: Value) {}
}

/// Forwards records to `tracing` at debug level.
pub struct TracingDebugLogger;

impl DebugLogger for TracingDebugLogger {
    fn debug(&self, message: &str, data: Value) {
        tracing::debug!(data = %data, "{}", message);
    }
}
