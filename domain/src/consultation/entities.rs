//! Consultation domain entities

use super::value_objects::{Confidence, Topic};
use crate::core::error::DomainError;
use crate::event::entities::{MessageId, Reply};
use serde::{Deserialize, Serialize};

/// State of a consultation.
///
/// ```text
/// Init → ConfigResolved → StreamResolved → TopicChosen → Published
///      → Subscribed → Polling → {Replied | Cancelled | Failed}
/// ```
///
/// `Failed` and `Cancelled` are reachable from every non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsultState {
    Init,
    ConfigResolved,
    StreamResolved,
    TopicChosen,
    Published,
    Subscribed,
    Polling,
    Replied,
    Cancelled,
    Failed,
}

impl ConsultState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsultState::Init => "init",
            ConsultState::ConfigResolved => "config_resolved",
            ConsultState::StreamResolved => "stream_resolved",
            ConsultState::TopicChosen => "topic_chosen",
            ConsultState::Published => "published",
            ConsultState::Subscribed => "subscribed",
            ConsultState::Polling => "polling",
            ConsultState::Replied => "replied",
            ConsultState::Cancelled => "cancelled",
            ConsultState::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ConsultState::Replied | ConsultState::Cancelled | ConsultState::Failed
        )
    }

    /// The state that follows this one on the success path.
    fn next(&self) -> Option<ConsultState> {
        match self {
            ConsultState::Init => Some(ConsultState::ConfigResolved),
            ConsultState::ConfigResolved => Some(ConsultState::StreamResolved),
            ConsultState::StreamResolved => Some(ConsultState::TopicChosen),
            ConsultState::TopicChosen => Some(ConsultState::Published),
            ConsultState::Published => Some(ConsultState::Subscribed),
            ConsultState::Subscribed => Some(ConsultState::Polling),
            ConsultState::Polling => Some(ConsultState::Replied),
            _ => None,
        }
    }

    pub fn can_transition_to(&self, to: ConsultState) -> bool {
        if self.is_terminal() {
            return false;
        }
        matches!(to, ConsultState::Cancelled | ConsultState::Failed) || self.next() == Some(to)
    }
}

impl std::fmt::Display for ConsultState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a consultation ended without a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelReason {
    /// The caller's cancellation signal was observed.
    Signal,
    /// The poll loop stopped without a reply while the signal was not set.
    ///
    /// Reported the same way as [`CancelReason::Signal`]; kept separate so the
    /// two can be told apart in logs.
    EngineAbort,
}

/// Terminal outcome of a consultation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsultOutcome {
    Replied(Reply),
    Cancelled(CancelReason),
    Failed(String),
}

impl ConsultOutcome {
    pub fn state(&self) -> ConsultState {
        match self {
            ConsultOutcome::Replied(_) => ConsultState::Replied,
            ConsultOutcome::Cancelled(_) => ConsultState::Cancelled,
            ConsultOutcome::Failed(_) => ConsultState::Failed,
        }
    }
}

/// One request/response exchange with a human (Entity).
///
/// Created when a consultation starts and mutated only by the orchestrator.
#[derive(Debug, Clone)]
pub struct Consultation {
    text: String,
    confidence: Confidence,
    continuation: Option<String>,
    channel: Option<String>,
    topic: Option<Topic>,
    question_id: Option<MessageId>,
    subscription_id: Option<String>,
    state: ConsultState,
    outcome: Option<ConsultOutcome>,
}

impl Consultation {
    pub fn new(
        text: impl Into<String>,
        confidence: Confidence,
        continuation: Option<String>,
    ) -> Result<Self, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::EmptyText);
        }
        Ok(Self {
            text,
            confidence,
            continuation: continuation.filter(|c| !c.trim().is_empty()),
            channel: None,
            topic: None,
            question_id: None,
            subscription_id: None,
            state: ConsultState::Init,
            outcome: None,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    pub fn continuation(&self) -> Option<&str> {
        self.continuation.as_deref()
    }

    pub fn channel(&self) -> Option<&str> {
        self.channel.as_deref()
    }

    pub fn topic(&self) -> Option<&Topic> {
        self.topic.as_ref()
    }

    pub fn question_id(&self) -> Option<MessageId> {
        self.question_id
    }

    pub fn subscription_id(&self) -> Option<&str> {
        self.subscription_id.as_deref()
    }

    pub fn state(&self) -> ConsultState {
        self.state
    }

    pub fn outcome(&self) -> Option<&ConsultOutcome> {
        self.outcome.as_ref()
    }

    /// Advance the state machine, rejecting edges that are not allowed.
    pub fn transition(&mut self, to: ConsultState) -> Result<(), DomainError> {
        if !self.state.can_transition_to(to) {
            return Err(DomainError::InvalidTransition {
                from: self.state.to_string(),
                to: to.to_string(),
            });
        }
        self.state = to;
        Ok(())
    }

    pub fn set_channel(&mut self, channel: impl Into<String>) {
        self.channel = Some(channel.into());
    }

    pub fn set_topic(&mut self, topic: Topic) {
        self.topic = Some(topic);
    }

    pub fn record_question(&mut self, message_id: MessageId) {
        self.question_id = Some(message_id);
    }

    pub fn track_subscription(&mut self, id: impl Into<String>) {
        self.subscription_id = Some(id.into());
    }

    /// Record the terminal outcome and move to the matching terminal state.
    pub fn finish(&mut self, outcome: ConsultOutcome) -> Result<(), DomainError> {
        self.transition(outcome.state())?;
        self.outcome = Some(outcome);
        Ok(())
    }
}
