//! Stream auto-provisioning port.

use super::chat_gateway::{ChatGateway, GatewayError};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProvisionError {
    #[error("Stream provisioning is not available")]
    Unavailable,

    #[error("Stream provisioning failed: {0}")]
    Gateway(#[from] GatewayError),
}

/// Creates a channel when none is configured.
#[async_trait]
pub trait StreamProvisioner: Send + Sync {
    /// Create (or adopt) a channel and return its name.
    async fn provision(&self, gateway: &dyn ChatGateway) -> Result<String, ProvisionError>;
}

/// Provisioner for setups where a channel must always be configured.
pub struct NoStreamProvisioner;

#[async_trait]
impl StreamProvisioner for NoStreamProvisioner {
    async fn provision(&self, _gateway: &dyn ChatGateway) -> Result<String, ProvisionError> {
        Err(ProvisionError::Unavailable)
    }
}
