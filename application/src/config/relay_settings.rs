//! Resolved relay settings for a consultation run.

use super::poll_options::PollOptions;
use consult_domain::MAX_TOPIC_CHARS;

/// Settings the orchestrator needs once configuration has been resolved.
///
/// Produced by a [`SessionProvider`](crate::ports::session_provider::SessionProvider);
/// required fields are already validated at this point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelaySettings {
    /// Identity this relay posts as; its own messages are never a reply.
    pub identity: String,
    /// Configured channel, if any.
    pub channel: Option<String>,
    /// Create a channel when none is configured.
    pub auto_provision: bool,
    /// Topic length limit in code points.
    pub topic_max_chars: usize,
    pub poll: PollOptions,
}

impl RelaySettings {
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            channel: None,
            auto_provision: true,
            topic_max_chars: MAX_TOPIC_CHARS,
            poll: PollOptions::default(),
        }
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn with_auto_provision(mut self, enabled: bool) -> Self {
        self.auto_provision = enabled;
        self
    }

    pub fn with_topic_max_chars(mut self, max: usize) -> Self {
        self.topic_max_chars = max;
        self
    }

    pub fn with_poll(mut self, poll: PollOptions) -> Self {
        self.poll = poll;
        self
    }
}
