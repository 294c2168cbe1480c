//! Infrastructure layer for consult-relay
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the Zulip HTTP client, configuration
//! loading, debug logging and topic detection.

pub mod config;
pub mod formatter;
pub mod logging;
pub mod topic;
pub mod zulip;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FilePollConfig, FileSessionProvider,
    FileTopicConfig, FileZulipConfig,
};
pub use formatter::ConfidenceMessageFormatter;
pub use logging::JsonlDebugLogger;
pub use topic::GitTopicSource;
pub use zulip::{
    client::{ZulipClient, ZulipCredentials},
    error::ZulipError,
    provisioner::SubscribeStreamProvisioner,
};
