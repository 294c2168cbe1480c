//! Chat server configuration from TOML (`[zulip]` section)

use crate::zulip::client::{DEFAULT_LONG_POLL_TIMEOUT, DEFAULT_REQUEST_TIMEOUT, ZulipCredentials};
use crate::zulip::provisioner::DEFAULT_PROVISION_STREAM;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw chat server configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileZulipConfig {
    /// Server URL, e.g. `https://chat.example.com`
    pub site: Option<String>,
    /// Bot account email; also the identity whose messages are ignored
    pub email: Option<String>,
    pub api_key: Option<String>,
    /// Stream to publish to. When unset, one is provisioned if allowed.
    pub stream: Option<String>,
    pub auto_provision: bool,
    /// Stream created when auto-provisioning
    pub provision_stream: String,
    pub request_timeout_secs: u64,
    pub long_poll_timeout_secs: u64,
}

impl Default for FileZulipConfig {
    fn default() -> Self {
        Self {
            site: None,
            email: None,
            api_key: None,
            stream: None,
            auto_provision: true,
            provision_stream: DEFAULT_PROVISION_STREAM.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT.as_secs(),
            long_poll_timeout_secs: DEFAULT_LONG_POLL_TIMEOUT.as_secs(),
        }
    }
}

impl FileZulipConfig {
    /// Credentials, if all three required fields are present and non-blank.
    pub fn credentials(&self) -> Option<ZulipCredentials> {
        Some(ZulipCredentials {
            site: non_blank(&self.site)?,
            email: non_blank(&self.email)?,
            api_key: non_blank(&self.api_key)?,
        })
    }

    /// Configured stream, ignoring blank values.
    pub fn stream(&self) -> Option<String> {
        non_blank(&self.stream)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn long_poll_timeout(&self) -> Duration {
        Duration::from_secs(self.long_poll_timeout_secs)
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_require_all_fields() {
        let mut config = FileZulipConfig {
            site: Some("https://chat.example.com".to_string()),
            email: Some("relay-bot@example.com".to_string()),
            api_key: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(config.credentials().is_none());

        config.api_key = Some("secret".to_string());
        let credentials = config.credentials().unwrap();
        assert_eq!(credentials.email, "relay-bot@example.com");
    }

    #[test]
    fn test_blank_stream_is_unset() {
        let config = FileZulipConfig {
            stream: Some(String::new()),
            ..Default::default()
        };
        assert!(config.stream().is_none());
    }
}
