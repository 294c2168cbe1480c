//! Error types for the Zulip adapter

use thiserror::Error;

/// Result type alias for Zulip client setup
pub type Result<T> = std::result::Result<T, ZulipError>;

/// Errors that can occur while constructing a Zulip client.
///
/// Request-time failures are reported as
/// [`GatewayError`](consult_application::GatewayError).
#[derive(Error, Debug)]
pub enum ZulipError {
    #[error("Invalid site URL '{0}': must start with http:// or https://")]
    InvalidSite(String),

    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}
