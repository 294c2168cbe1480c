//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application settings
//! once validated.

mod poll;
mod topic;
mod zulip;

pub use poll::FilePollConfig;
pub use topic::{DEFAULT_FALLBACK_TOPIC, FileTopicConfig};
pub use zulip::FileZulipConfig;

use consult_application::RelaySettings;
use consult_domain::MAX_TOPIC_CHARS;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("zulip.{0} is required")]
    MissingField(&'static str),

    #[error("{0} cannot be 0")]
    ZeroLimit(&'static str),

    #[error("zulip.site must start with http:// or https://, got '{0}'")]
    InvalidSite(String),

    #[error(
        "topic.max_length must be between {min} and {max}, got {0}",
        min = MIN_TOPIC_LENGTH,
        max = MAX_TOPIC_CHARS
    )]
    TopicLengthOutOfRange(usize),

    #[error("topic.fallback cannot be empty")]
    EmptyFallbackTopic,
}

/// Shortest topic limit that still leaves room for the `...` marker.
const MIN_TOPIC_LENGTH: usize = 4;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Append structured debug records (JSONL) to this file
    pub debug_log: Option<PathBuf>,
    /// Chat server connection and stream settings
    pub zulip: FileZulipConfig,
    /// Retry and re-registration limits
    pub poll: FilePollConfig,
    /// Topic derivation settings
    pub topic: FileTopicConfig,
}

impl FileConfig {
    /// Validate the configuration.
    ///
    /// Required connection fields must be present and non-blank; limits and
    /// timeouts must be non-zero. The topic limit must fit the server's
    /// topic length.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let zulip = &self.zulip;
        for (name, value) in [
            ("site", &zulip.site),
            ("email", &zulip.email),
            ("api_key", &zulip.api_key),
        ] {
            if value.as_deref().is_none_or(|v| v.trim().is_empty()) {
                return Err(ConfigValidationError::MissingField(name));
            }
        }

        if let Some(site) = &zulip.site {
            let site = site.trim();
            if !(site.starts_with("http://") || site.starts_with("https://")) {
                return Err(ConfigValidationError::InvalidSite(site.to_string()));
            }
        }

        let limits = [
            ("zulip.request_timeout_secs", zulip.request_timeout_secs),
            ("zulip.long_poll_timeout_secs", zulip.long_poll_timeout_secs),
            ("poll.base_interval_ms", self.poll.base_interval_ms),
            ("poll.max_backoff_ms", self.poll.max_backoff_ms),
            ("poll.max_retries", u64::from(self.poll.max_retries)),
        ];
        if let Some((name, _)) = limits.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigValidationError::ZeroLimit(name));
        }

        if !(MIN_TOPIC_LENGTH..=MAX_TOPIC_CHARS).contains(&self.topic.max_length) {
            return Err(ConfigValidationError::TopicLengthOutOfRange(
                self.topic.max_length,
            ));
        }

        if self.topic.fallback.trim().is_empty() {
            return Err(ConfigValidationError::EmptyFallbackTopic);
        }

        Ok(())
    }

    /// Build relay settings. Call [`validate`](Self::validate) first.
    pub fn to_relay_settings(&self) -> RelaySettings {
        let identity = self.zulip.email.as_deref().unwrap_or_default().trim();
        let mut settings = RelaySettings::new(identity)
            .with_auto_provision(self.zulip.auto_provision)
            .with_topic_max_chars(self.topic.max_length)
            .with_poll(self.poll.to_poll_options());
        if let Some(stream) = self.zulip.stream() {
            settings = settings.with_channel(stream);
        }
        settings
    }

    /// Copy with the API key masked, for display.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.zulip.api_key.is_some() {
            config.zulip.api_key = Some("********".to_string());
        }
        config
    }
}
