//! Polling configuration from TOML (`[poll]` section)

use consult_application::PollOptions;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw polling configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePollConfig {
    /// First retry delay; doubles per consecutive transient failure
    pub base_interval_ms: u64,
    pub max_retries: u32,
    pub max_resubscribes: u32,
    /// Upper bound for a single retry delay
    pub max_backoff_ms: u64,
}

impl Default for FilePollConfig {
    fn default() -> Self {
        let options = PollOptions::default();
        Self {
            base_interval_ms: duration_ms(options.base_interval),
            max_retries: options.max_retries,
            max_resubscribes: options.max_resubscribes,
            max_backoff_ms: duration_ms(options.max_backoff),
        }
    }
}

impl FilePollConfig {
    pub fn to_poll_options(&self) -> PollOptions {
        PollOptions::default()
            .with_base_interval(Duration::from_millis(self.base_interval_ms))
            .with_max_backoff(Duration::from_millis(self.max_backoff_ms))
            .with_max_retries(self.max_retries)
            .with_max_resubscribes(self.max_resubscribes)
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
