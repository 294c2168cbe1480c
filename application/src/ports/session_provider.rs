//! Session provider port
//!
//! Resolves configuration and a connected chat client before a
//! consultation starts.

use super::chat_gateway::ChatGateway;
use crate::config::RelaySettings;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while resolving configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Missing required setting: {0}")]
    MissingSetting(String),

    #[error("Invalid setting: {0}")]
    InvalidSetting(String),

    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Failed to create chat client: {0}")]
    Client(String),
}

/// Settings plus the client bound to them.
#[derive(Clone)]
pub struct RelaySession {
    pub settings: RelaySettings,
    pub gateway: Arc<dyn ChatGateway>,
}

/// Provides the configuration and chat client for a consultation.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn resolve(&self) -> Result<RelaySession, SessionError>;
}
