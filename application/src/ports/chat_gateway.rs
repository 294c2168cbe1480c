//! Chat gateway port
//!
//! Defines the interface for talking to the group-chat service: publishing
//! messages, managing subscriptions and long-polling the event queue.

use async_trait::async_trait;
use consult_domain::{ChatEvent, EventId, MessageId, Narrow};
use thiserror::Error;

/// Errors that can occur during chat gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Non-2xx response that is neither retryable nor a dead queue.
    #[error("Request failed with status {status} ({code}): {message}")]
    Protocol {
        status: u16,
        code: String,
        message: String,
    },

    /// The event queue was garbage-collected or never existed.
    #[error("Event queue {queue_id} is no longer valid")]
    QueueInvalid { queue_id: String },

    /// 5xx response or a network-level failure.
    #[error("Transient transport error: {0}")]
    Transient(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Check if the failed call may succeed when retried as-is.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GatewayError::Transient(_))
    }

    /// Check if this error means the event queue must be re-registered.
    pub fn is_queue_invalid(&self) -> bool {
        matches!(self, GatewayError::QueueInvalid { .. })
    }
}

/// Server response to a queue registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub queue_id: String,
    pub last_event_id: EventId,
}

/// Gateway for group-chat communication
///
/// This port defines how the application layer talks to the chat service.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Publish `content` to `channel`/`topic`, returning the new message id.
    async fn send_message(
        &self,
        channel: &str,
        topic: &str,
        content: &str,
    ) -> Result<MessageId, GatewayError>;

    /// Subscribe this identity to `channel`. Idempotent.
    async fn ensure_subscribed(&self, channel: &str) -> Result<(), GatewayError>;

    /// Register a message event queue narrowed to one channel/topic.
    async fn register_queue(&self, narrow: &Narrow) -> Result<Registration, GatewayError>;

    /// Long-poll for events after `last_event_id`.
    ///
    /// The server holds the request open until events arrive or its own
    /// timeout elapses, so an empty batch is a normal result.
    async fn get_events(
        &self,
        queue_id: &str,
        last_event_id: EventId,
    ) -> Result<Vec<ChatEvent>, GatewayError>;

    /// Deregister an event queue.
    async fn delete_queue(&self, queue_id: &str) -> Result<(), GatewayError>;
}
