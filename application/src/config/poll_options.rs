//! Poll options: event loop retry control.
//!
//! [`PollOptions`] groups the limits that control the long-poll loop in
//! [`EventConsumer`](crate::use_cases::consume_events::EventConsumer).
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry and backoff limits for the long-poll loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOptions {
    /// First backoff delay; doubled after each consecutive transient failure.
    pub base_interval: Duration,
    /// Upper bound for a single backoff delay.
    pub max_backoff: Duration,
    /// Consecutive transient failures tolerated before giving up.
    pub max_retries: u32,
    /// Consecutive queue re-registrations tolerated before giving up.
    pub max_resubscribes: u32,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            base_interval: Duration::from_millis(1000),
            max_backoff: Duration::from_millis(60_000),
            max_retries: 10,
            max_resubscribes: 3,
        }
    }
}

impl PollOptions {
    // ==================== Builder Methods ====================

    pub fn with_base_interval(mut self, interval: Duration) -> Self {
        self.base_interval = interval;
        self
    }

    pub fn with_max_backoff(mut self, max: Duration) -> Self {
        self.max_backoff = max;
        self
    }

    pub fn with_max_retries(mut self, max: u32) -> Self {
        self.max_retries = max;
        self
    }

    pub fn with_max_resubscribes(mut self, max: u32) -> Self {
        self.max_resubscribes = max;
        self
    }

    /// Delay before retry number `attempt` (zero-based).
    ///
    /// `min(base * 2^attempt, max_backoff)`
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let base_ms = self.base_interval.as_millis() as u64;
        let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
        let delay_ms = base_ms.saturating_mul(factor);
        Duration::from_millis(delay_ms).min(self.max_backoff)
    }
}
