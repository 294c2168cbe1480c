//! Logging infrastructure: structured debug records.
//!
//! Provides [`JsonlDebugLogger`], a JSONL file writer that implements
//! the [`DebugLogger`](consult_application::DebugLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlDebugLogger;
