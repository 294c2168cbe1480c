//! Subscription (event queue) state

use super::entities::EventId;
use serde::{Deserialize, Serialize};

/// The channel/topic pair a subscription is narrowed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narrow {
    pub channel: String,
    pub topic: String,
}

impl Narrow {
    pub fn new(channel: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            topic: topic.into(),
        }
    }
}

/// A registered event queue.
///
/// The cursor never moves backwards; it is reset only when the queue id is
/// replaced by a re-registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    id: String,
    cursor: EventId,
    narrow: Option<Narrow>,
}

impl Subscription {
    pub fn new(id: impl Into<String>, cursor: EventId) -> Self {
        Self {
            id: id.into(),
            cursor,
            narrow: None,
        }
    }

    pub fn with_narrow(mut self, narrow: Narrow) -> Self {
        self.narrow = Some(narrow);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn cursor(&self) -> EventId {
        self.cursor
    }

    pub fn narrow(&self) -> Option<&Narrow> {
        self.narrow.as_ref()
    }

    /// Move the cursor to `event_id` if it is ahead of the current one.
    pub fn advance(&mut self, event_id: EventId) {
        if event_id > self.cursor {
            self.cursor = event_id;
        }
    }

    /// Point this subscription at a freshly registered queue.
    pub fn replace(&mut self, id: impl Into<String>, cursor: EventId) {
        self.id = id.into();
        self.cursor = cursor;
    }
}
