//! Wire types for the Zulip REST API.
//!
//! Request parameters are form-encoded; list-valued parameters (`narrow`,
//! `event_types`, `subscriptions`) are JSON strings inside the form. Error
//! responses carry a machine-readable `code`.

use consult_application::GatewayError;
use consult_domain::{ChatEvent, EventId, MessageId, Narrow, Reply};
use serde::Deserialize;

/// Error code returned when an event queue has expired or never existed.
pub const BAD_EVENT_QUEUE_ID: &str = "BAD_EVENT_QUEUE_ID";

/// Error body of a non-2xx response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub queue_id: Option<String>,
}

/// `POST /messages`
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageResponse {
    pub id: MessageId,
}

/// `POST /register`
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    pub queue_id: String,
    pub last_event_id: EventId,
}

/// `GET /events`
#[derive(Debug, Clone, Deserialize)]
pub struct EventsResponse {
    #[serde(default)]
    pub events: Vec<RawEvent>,
}

/// One event as sent by the server; converted into [`ChatEvent`].
#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    pub id: EventId,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub message: Option<RawMessage>,
}

/// Message object carried by a `message` event.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMessage {
    pub id: MessageId,
    pub sender_email: String,
    #[serde(default)]
    pub sender_full_name: String,
    #[serde(default)]
    pub content: String,
    /// Topic name; the API still calls it `subject`.
    #[serde(default, alias = "topic")]
    pub subject: String,
}

impl RawEvent {
    pub fn into_event(self) -> ChatEvent {
        match (self.kind.as_str(), self.message) {
            ("heartbeat", _) => ChatEvent::Heartbeat { id: self.id },
            ("message", Some(message)) => ChatEvent::Message {
                id: self.id,
                reply: Reply {
                    message_id: message.id,
                    sender_email: message.sender_email,
                    sender_name: message.sender_full_name,
                    content: message.content,
                    topic: message.subject,
                },
            },
            _ => ChatEvent::Other {
                id: self.id,
                kind: self.kind,
            },
        }
    }
}

/// `narrow` parameter for a queue watching one stream/topic.
pub fn narrow_param(narrow: &Narrow) -> String {
    serde_json::json!([["stream", narrow.channel], ["topic", narrow.topic]]).to_string()
}

/// `subscriptions` parameter for subscribing to one stream.
pub fn subscriptions_param(channel: &str) -> String {
    serde_json::json!([{ "name": channel }]).to_string()
}

/// Map a non-2xx response to the gateway error taxonomy.
///
/// `queue_id` is the queue the request targeted, used when the server does
/// not echo it back.
pub fn classify_error(status: u16, body: &str, queue_id: Option<&str>) -> GatewayError {
    let api: ApiError = serde_json::from_str(body).unwrap_or_default();

    if api.code == BAD_EVENT_QUEUE_ID {
        return GatewayError::QueueInvalid {
            queue_id: api
                .queue_id
                .or_else(|| queue_id.map(str::to_string))
                .unwrap_or_default(),
        };
    }

    let message = if api.msg.is_empty() {
        truncate_body(body)
    } else {
        api.msg
    };

    if status >= 500 {
        return GatewayError::Transient(format!("status {status}: {message}"));
    }

    GatewayError::Protocol {
        status,
        code: if api.code.is_empty() {
            "UNKNOWN".to_string()
        } else {
            api.code
        },
        message,
    }
}

fn truncate_body(body: &str) -> String {
    consult_domain::truncate_chars(body.trim(), 300)
}
