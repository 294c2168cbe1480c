//! File-backed session provider.

use super::file_config::{ConfigValidationError, FileConfig};
use crate::zulip::client::ZulipClient;
use async_trait::async_trait;
use consult_application::{RelaySession, SessionError, SessionProvider};
use std::sync::Arc;
use tracing::debug;

/// Resolves settings and a [`ZulipClient`] from a loaded [`FileConfig`].
///
/// Missing or invalid required settings fail resolution; defaults are
/// never substituted for them.
pub struct FileSessionProvider {
    config: FileConfig,
}

impl FileSessionProvider {
    pub fn new(config: FileConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FileConfig {
        &self.config
    }
}

impl From<ConfigValidationError> for SessionError {
    fn from(error: ConfigValidationError) -> Self {
        match error {
            ConfigValidationError::MissingField(name) => {
                SessionError::MissingSetting(format!("zulip.{name}"))
            }
            other => SessionError::InvalidSetting(other.to_string()),
        }
    }
}

#[async_trait]
impl SessionProvider for FileSessionProvider {
    async fn resolve(&self) -> Result<RelaySession, SessionError> {
        self.config.validate()?;

        let zulip = &self.config.zulip;
        let credentials = zulip
            .credentials()
            .ok_or_else(|| SessionError::MissingSetting("zulip credentials".to_string()))?;
        let client = ZulipClient::new(credentials)
            .map_err(|e| SessionError::Client(e.to_string()))?
            .with_timeouts(zulip.request_timeout(), zulip.long_poll_timeout());

        let settings = self.config.to_relay_settings();
        debug!(
            identity = %settings.identity,
            channel = ?settings.channel,
            "Resolved relay session"
        );

        Ok(RelaySession {
            settings,
            gateway: Arc::new(client),
        })
    }
}
