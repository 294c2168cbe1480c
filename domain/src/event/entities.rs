//! Chat event entities

use serde::{Deserialize, Serialize};

/// Identifier of a published chat message.
pub type MessageId = u64;

/// Identifier of an event in a subscription queue.
///
/// Queues start with a cursor of `-1` before any event has been seen.
pub type EventId = i64;

/// A candidate reply: the message payload carried by a message event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    /// Server-assigned message id
    pub message_id: MessageId,
    /// Sender identity (the account email)
    pub sender_email: String,
    /// Display name of the sender
    pub sender_name: String,
    /// Message body
    pub content: String,
    /// Topic the message was posted to
    pub topic: String,
}

impl Reply {
    /// Check whether the message was posted to `target`.
    ///
    /// Topics compare case-insensitively, and a topic that embeds the target
    /// (e.g. one the service marked as resolved with a prefix) still matches.
    pub fn is_in_topic(&self, target: &str) -> bool {
        let topic = self.topic.to_lowercase();
        let target = target.to_lowercase();
        topic == target || topic.contains(&target)
    }

    /// Check whether this message was sent by `identity`.
    pub fn is_from(&self, identity: &str) -> bool {
        self.sender_email.eq_ignore_ascii_case(identity)
    }
}

/// One event from a long-poll batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// Keep-alive sent by the server while a queue is idle
    Heartbeat { id: EventId },
    /// A new message in the narrowed channel/topic
    Message { id: EventId, reply: Reply },
    /// Any event kind this relay does not act on
    Other { id: EventId, kind: String },
}

impl ChatEvent {
    /// Event id, used to advance the subscription cursor.
    pub fn id(&self) -> EventId {
        match self {
            ChatEvent::Heartbeat { id }
            | ChatEvent::Message { id, .. }
            | ChatEvent::Other { id, .. } => *id,
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            ChatEvent::Heartbeat { .. } => "heartbeat",
            ChatEvent::Message { .. } => "message",
            ChatEvent::Other { kind, .. } => kind,
        }
    }
}
