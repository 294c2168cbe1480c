//! Stream auto-provisioning.

use async_trait::async_trait;
use consult_application::{ChatGateway, ProvisionError, StreamProvisioner};
use tracing::info;

/// Default name for an auto-provisioned stream.
pub const DEFAULT_PROVISION_STREAM: &str = "consult";

/// Provisions a stream by subscribing to it.
///
/// Zulip creates a stream on first subscription, and subscribing to an
/// existing one is a no-op, so repeated runs adopt the same stream.
pub struct SubscribeStreamProvisioner {
    stream: String,
}

impl SubscribeStreamProvisioner {
    pub fn new(stream: impl Into<String>) -> Self {
        Self {
            stream: stream.into(),
        }
    }
}

impl Default for SubscribeStreamProvisioner {
    fn default() -> Self {
        Self::new(DEFAULT_PROVISION_STREAM)
    }
}

#[async_trait]
impl StreamProvisioner for SubscribeStreamProvisioner {
    async fn provision(&self, gateway: &dyn ChatGateway) -> Result<String, ProvisionError> {
        gateway.ensure_subscribed(&self.stream).await?;
        info!(stream = %self.stream, "Provisioned consultation stream");
        Ok(self.stream.clone())
    }
}
