//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod chat_gateway;
pub mod debug_logger;
pub mod message_formatter;
pub mod progress;
pub mod session_provider;
pub mod stream_provisioner;
pub mod topic_source;
