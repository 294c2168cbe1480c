//! Application-level configuration.
//!
//! - [`PollOptions`]: retry and backoff limits for the event poll loop
//! - [`RelaySettings`]: resolved settings for one consultation run

pub mod poll_options;
pub mod relay_settings;

pub use poll_options::PollOptions;
pub use relay_settings::RelaySettings;
