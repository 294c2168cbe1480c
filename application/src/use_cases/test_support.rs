//! Scripted test doubles shared by the use case tests.

use crate::ports::chat_gateway::{ChatGateway, GatewayError, Registration};
use async_trait::async_trait;
use consult_domain::{ChatEvent, EventId, MessageId, Narrow, Reply};
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;

pub(crate) const BOT: &str = "relay-bot@example.com";
pub(crate) const HUMAN: &str = "alice@example.com";

/// Gateway whose responses are scripted up front and whose calls are recorded.
#[derive(Default)]
pub(crate) struct ScriptedGateway {
    sends: Mutex<VecDeque<Result<MessageId, GatewayError>>>,
    subscribes: Mutex<VecDeque<Result<(), GatewayError>>>,
    registrations: Mutex<VecDeque<Result<Registration, GatewayError>>>,
    fetches: Mutex<VecDeque<Result<Vec<ChatEvent>, GatewayError>>>,
    deletes: Mutex<VecDeque<Result<(), GatewayError>>>,
    cancel_on_fetch: Mutex<Option<(usize, CancellationToken)>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedGateway {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn send(self, result: Result<MessageId, GatewayError>) -> Self {
        self.sends.lock().unwrap().push_back(result);
        self
    }

    pub(crate) fn subscribe(self, result: Result<(), GatewayError>) -> Self {
        self.subscribes.lock().unwrap().push_back(result);
        self
    }

    pub(crate) fn register(self, result: Result<Registration, GatewayError>) -> Self {
        self.registrations.lock().unwrap().push_back(result);
        self
    }

    pub(crate) fn fetch(self, result: Result<Vec<ChatEvent>, GatewayError>) -> Self {
        self.fetches.lock().unwrap().push_back(result);
        self
    }

    pub(crate) fn delete(self, result: Result<(), GatewayError>) -> Self {
        self.deletes.lock().unwrap().push_back(result);
        self
    }

    /// Cancel `token` while answering the `nth` (1-based) fetch.
    pub(crate) fn cancel_on_fetch(self, nth: usize, token: CancellationToken) -> Self {
        *self.cancel_on_fetch.lock().unwrap() = Some((nth, token));
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn count(&self, prefix: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn exhausted(what: &str) -> GatewayError {
        GatewayError::Protocol {
            status: 599,
            code: "SCRIPT_EXHAUSTED".to_string(),
            message: format!("no scripted {what} response"),
        }
    }
}

#[async_trait]
impl ChatGateway for ScriptedGateway {
    async fn send_message(
        &self,
        channel: &str,
        topic: &str,
        _content: &str,
    ) -> Result<MessageId, GatewayError> {
        self.record(format!("send:{channel}:{topic}"));
        self.sends
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Self::exhausted("send")))
    }

    async fn ensure_subscribed(&self, channel: &str) -> Result<(), GatewayError> {
        self.record(format!("subscribe:{channel}"));
        self.subscribes.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }

    async fn register_queue(&self, narrow: &Narrow) -> Result<Registration, GatewayError> {
        self.record(format!("register:{}:{}", narrow.channel, narrow.topic));
        self.registrations
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Self::exhausted("register")))
    }

    async fn get_events(
        &self,
        queue_id: &str,
        last_event_id: EventId,
    ) -> Result<Vec<ChatEvent>, GatewayError> {
        self.record(format!("events:{queue_id}:{last_event_id}"));
        let nth = self.count("events:");
        if let Some((at, token)) = self.cancel_on_fetch.lock().unwrap().as_ref()
            && *at == nth
        {
            token.cancel();
        }
        self.fetches
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Self::exhausted("events")))
    }

    async fn delete_queue(&self, queue_id: &str) -> Result<(), GatewayError> {
        self.record(format!("delete:{queue_id}"));
        self.deletes.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }
}

pub(crate) fn registration(queue_id: &str, last_event_id: EventId) -> Registration {
    Registration {
        queue_id: queue_id.to_string(),
        last_event_id,
    }
}

pub(crate) fn message(
    event_id: EventId,
    message_id: MessageId,
    sender: &str,
    topic: &str,
    content: &str,
) -> ChatEvent {
    ChatEvent::Message {
        id: event_id,
        reply: Reply {
            message_id,
            sender_email: sender.to_string(),
            sender_name: sender.split('@').next().unwrap_or(sender).to_string(),
            content: content.to_string(),
            topic: topic.to_string(),
        },
    }
}

pub(crate) fn server_error() -> GatewayError {
    GatewayError::Transient("status 500".to_string())
}

pub(crate) fn queue_invalid(queue_id: &str) -> GatewayError {
    GatewayError::QueueInvalid {
        queue_id: queue_id.to_string(),
    }
}
