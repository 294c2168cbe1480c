//! Zulip adapter
//!
//! Implements [`ChatGateway`](consult_application::ChatGateway) over the
//! Zulip REST API and its long-poll event queue.

pub mod client;
pub mod error;
pub mod protocol;
pub mod provisioner;
