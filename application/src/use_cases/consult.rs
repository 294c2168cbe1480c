//! Consult use case.
//!
//! Drives one consultation end-to-end: resolve configuration, pick the
//! channel and topic, publish the question, register an event queue and
//! block until a human replies or the caller cancels.
//!
//! # Flow
//!
//! ```text
//! Init ─▶ ConfigResolved ─▶ StreamResolved ─▶ TopicChosen ─▶ Published
//!      ─▶ Subscribed ─▶ Polling ─▶ Replied | Cancelled | Failed
//! ```
//!
//! Once a queue is registered it is held by a [`QueueLease`] and released
//! exactly once before the use case returns, whichever way polling ends.

use crate::config::RelaySettings;
use crate::ports::chat_gateway::{ChatGateway, GatewayError};
use crate::ports::debug_logger::{DebugLogger, NoDebugLogger};
use crate::ports::message_formatter::{MessageFormatter, PlainMessageFormatter};
use crate::ports::progress::ConsultProgressNotifier;
use crate::ports::session_provider::{SessionError, SessionProvider};
use crate::ports::stream_provisioner::{ProvisionError, StreamProvisioner};
use crate::ports::topic_source::TopicSource;
use crate::queue_registry::{GatewayRelease, QueueRegistry};
use crate::use_cases::consume_events::{EventConsumer, PollError, PollOutcome, ReplyFilter};
use consult_domain::{
    CancelReason, Confidence, ConsultOutcome, ConsultState, Consultation, DomainError, Narrow,
    Topic, preview,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Errors that end a consultation as a critical failure.
#[derive(Error, Debug)]
pub enum ConsultError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] SessionError),

    #[error("No stream is configured and auto-provisioning is disabled")]
    StreamUnavailable,

    #[error("Stream auto-provisioning failed: {0}")]
    Provisioning(#[from] ProvisionError),

    #[error("Failed to publish question: {0}")]
    Publish(GatewayError),

    #[error("Failed to subscribe to stream '{channel}': {source}")]
    Subscribe {
        channel: String,
        source: GatewayError,
    },

    #[error("Failed to register event queue: {0}")]
    Register(GatewayError),

    #[error("Failed while waiting for a reply: {0}")]
    Poll(#[from] PollError),

    #[error("Invalid consultation: {0}")]
    State(#[from] DomainError),
}

/// Input for the [`ConsultUseCase`].
#[derive(Debug, Clone)]
pub struct ConsultInput {
    /// The question to put to the human.
    pub text: String,
    /// The caller's confidence in its own best guess.
    pub confidence: Confidence,
    /// Topic of an earlier consultation to continue in.
    pub continuation: Option<String>,
}

impl ConsultInput {
    pub fn new(text: impl Into<String>, confidence: Confidence) -> Self {
        Self {
            text: text.into(),
            confidence,
            continuation: None,
        }
    }

    pub fn with_continuation(mut self, continuation: impl Into<String>) -> Self {
        self.continuation = Some(continuation.into());
        self
    }
}

/// Extra fields of the host-facing result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultDetails {
    /// Topic to pass back as the continuation id for a follow-up.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuation_id: Option<String>,
    /// Who answered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responder: Option<String>,
}

/// Host-facing result of a consultation.
///
/// `is_error == true` means the caller must halt rather than guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultOutput {
    pub text_out: String,
    pub is_error: bool,
    pub details: ConsultDetails,
}

impl ConsultOutput {
    /// Critical failure telling the caller to stop all work.
    pub fn critical(reason: impl std::fmt::Display) -> Self {
        Self {
            text_out: format!(
                "CRITICAL: {reason}\n\nThe human could not be consulted. Stop all work now and \
                 report this failure. Do not proceed on a best guess."
            ),
            is_error: true,
            details: ConsultDetails::default(),
        }
    }

    pub fn from_consultation(consultation: &Consultation) -> Self {
        let continuation_id = consultation.topic().map(|t| t.to_string());
        match consultation.outcome() {
            Some(ConsultOutcome::Replied(reply)) => {
                let responder = if reply.sender_name.trim().is_empty() {
                    reply.sender_email.clone()
                } else {
                    reply.sender_name.clone()
                };
                Self {
                    text_out: reply.content.clone(),
                    is_error: false,
                    details: ConsultDetails {
                        continuation_id,
                        responder: Some(responder),
                    },
                }
            }
            Some(ConsultOutcome::Cancelled(_)) => Self {
                text_out: "Consultation cancelled before a reply was received.".to_string(),
                is_error: false,
                details: ConsultDetails {
                    continuation_id,
                    responder: None,
                },
            },
            Some(ConsultOutcome::Failed(reason)) => Self::critical(reason),
            None => Self::critical("consultation did not reach a terminal state"),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        !self.is_error && self.details.responder.is_none()
    }
}

/// Scoped ownership of a registered event queue.
///
/// [`release`](Self::release) deregisters the queue and drops its registry
/// entry. If the lease is dropped without being released (the consultation
/// future was aborted), the release is spawned onto the current runtime;
/// without a runtime the registry entry is left for the shutdown sweep.
struct QueueLease {
    consumer: EventConsumer,
    registry: Arc<QueueRegistry>,
    queue_id: String,
    released: bool,
}

impl QueueLease {
    fn new(consumer: EventConsumer, registry: Arc<QueueRegistry>, queue_id: String) -> Self {
        Self {
            consumer,
            registry,
            queue_id,
            released: false,
        }
    }

    fn queue_id(&self) -> &str {
        &self.queue_id
    }

    fn repoint(&mut self, queue_id: &str) {
        self.queue_id = queue_id.to_string();
    }

    async fn release(mut self) {
        self.released = true;
        self.consumer.release_subscription(&self.queue_id).await;
        self.registry.unregister(&self.queue_id);
    }
}

impl Drop for QueueLease {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        let queue_id = std::mem::take(&mut self.queue_id);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                warn!("Event queue {} dropped without release, releasing now", queue_id);
                let consumer = self.consumer.clone();
                let registry = Arc::clone(&self.registry);
                handle.spawn(async move {
                    consumer.release_subscription(&queue_id).await;
                    registry.unregister(&queue_id);
                });
            }
            Err(_) => warn!(
                "Event queue {} dropped outside a runtime; left for shutdown release",
                queue_id
            ),
        }
    }
}

/// Use case for consulting a human through the chat service.
pub struct ConsultUseCase {
    sessions: Arc<dyn SessionProvider>,
    provisioner: Arc<dyn StreamProvisioner>,
    topics: Arc<dyn TopicSource>,
    registry: Arc<QueueRegistry>,
    formatter: Arc<dyn MessageFormatter>,
    logger: Arc<dyn DebugLogger>,
}

impl ConsultUseCase {
    pub fn new(
        sessions: Arc<dyn SessionProvider>,
        provisioner: Arc<dyn StreamProvisioner>,
        topics: Arc<dyn TopicSource>,
        registry: Arc<QueueRegistry>,
    ) -> Self {
        Self {
            sessions,
            provisioner,
            topics,
            registry,
            formatter: Arc::new(PlainMessageFormatter),
            logger: Arc::new(NoDebugLogger),
        }
    }

    pub fn with_formatter(mut self, formatter: Arc<dyn MessageFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn with_debug_logger(mut self, logger: Arc<dyn DebugLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Run a consultation and map it to the host-facing result.
    pub async fn execute(
        &self,
        input: ConsultInput,
        progress: &dyn ConsultProgressNotifier,
        cancel: &CancellationToken,
    ) -> ConsultOutput {
        let consultation = match Consultation::new(input.text, input.confidence, input.continuation)
        {
            Ok(c) => c,
            Err(e) => return ConsultOutput::critical(ConsultError::State(e)),
        };
        let consultation = self.run(consultation, progress, cancel).await;
        ConsultOutput::from_consultation(&consultation)
    }

    /// Drive `consultation` to a terminal state.
    pub async fn run(
        &self,
        mut consultation: Consultation,
        progress: &dyn ConsultProgressNotifier,
        cancel: &CancellationToken,
    ) -> Consultation {
        info!(
            "Starting consultation ({} confidence): {}",
            consultation.confidence(),
            preview(consultation.text(), 100)
        );

        let outcome = match self.drive(&mut consultation, progress, cancel).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(
                    "Consultation failed in state {}: {}",
                    consultation.state(),
                    e
                );
                ConsultOutcome::Failed(e.to_string())
            }
        };

        if let Err(e) = consultation.finish(outcome) {
            warn!("Could not record consultation outcome: {}", e);
            if !consultation.state().is_terminal()
                && let Err(e) = consultation.finish(ConsultOutcome::Failed(e.to_string()))
            {
                warn!("Could not mark consultation as failed: {}", e);
            }
        }
        self.logger.debug(
            "consultation finished",
            json!({
                "state": consultation.state(),
                "topic": consultation.topic().map(|t| t.as_str()),
                "question_id": consultation.question_id(),
                "queue_id": consultation.subscription_id(),
            }),
        );
        consultation
    }

    async fn drive(
        &self,
        consultation: &mut Consultation,
        progress: &dyn ConsultProgressNotifier,
        cancel: &CancellationToken,
    ) -> Result<ConsultOutcome, ConsultError> {
        let session = self.sessions.resolve().await?;
        let settings = session.settings;
        let gateway = session.gateway;
        self.advance(consultation, ConsultState::ConfigResolved)?;

        let channel = self.resolve_channel(&settings, gateway.as_ref()).await?;
        consultation.set_channel(channel.clone());
        self.advance(consultation, ConsultState::StreamResolved)?;

        let topic = match consultation.continuation() {
            Some(id) => Topic::from_continuation(id),
            None => Topic::derive(&self.topics.describe().await, settings.topic_max_chars),
        };
        consultation.set_topic(topic.clone());
        self.advance(consultation, ConsultState::TopicChosen)?;

        progress.on_publishing(&channel, topic.as_str());
        let body = self
            .formatter
            .format(consultation.text(), consultation.confidence());
        let question_id = gateway
            .send_message(&channel, topic.as_str(), &body)
            .await
            .map_err(ConsultError::Publish)?;
        consultation.record_question(question_id);
        info!("Published question {} to {} > {}", question_id, channel, topic);
        self.advance(consultation, ConsultState::Published)?;

        gateway
            .ensure_subscribed(&channel)
            .await
            .map_err(|source| ConsultError::Subscribe {
                channel: channel.clone(),
                source,
            })?;

        let consumer = EventConsumer::new(
            Arc::clone(&gateway),
            Arc::clone(&self.logger),
            settings.poll.clone(),
        );
        let mut subscription = consumer
            .register_subscription(Narrow::new(channel.clone(), topic.as_str()))
            .await
            .map_err(ConsultError::Register)?;
        self.registry.register(
            subscription.id(),
            Arc::new(GatewayRelease::new(Arc::clone(&gateway))),
        );
        let mut lease = QueueLease::new(
            consumer.clone(),
            Arc::clone(&self.registry),
            subscription.id().to_string(),
        );
        consultation.track_subscription(subscription.id());
        self.advance(consultation, ConsultState::Subscribed)?;
        self.advance(consultation, ConsultState::Polling)?;

        progress.on_waiting(&channel, topic.as_str());
        let filter = ReplyFilter::new(settings.identity.as_str())
            .with_question(question_id)
            .with_topic(topic.as_str());

        let polled = {
            let registry = Arc::clone(&self.registry);
            let lease = &mut lease;
            let mut on_resubscribe = |old: &str, new: &str| {
                registry.rename(old, new);
                lease.repoint(new);
                progress.on_resubscribed(new);
            };
            consumer
                .poll(&mut subscription, &filter, cancel, &mut on_resubscribe)
                .await
        };

        consultation.track_subscription(lease.queue_id());
        lease.release().await;

        match polled {
            Ok(PollOutcome::Reply(reply)) => {
                progress.on_received(&reply);
                Ok(ConsultOutcome::Replied(reply))
            }
            Ok(PollOutcome::Cancelled) => {
                if cancel.is_cancelled() {
                    info!("Consultation cancelled");
                    Ok(ConsultOutcome::Cancelled(CancelReason::Signal))
                } else {
                    // Reported as cancelled; logged so the two cases stay distinguishable.
                    warn!("Poll stopped without a reply while the cancel signal was not set");
                    Ok(ConsultOutcome::Cancelled(CancelReason::EngineAbort))
                }
            }
            Err(e) if cancel.is_cancelled() => {
                info!("Consultation cancelled (poll error after cancel: {})", e);
                Ok(ConsultOutcome::Cancelled(CancelReason::Signal))
            }
            Err(e) => Err(ConsultError::Poll(e)),
        }
    }

    async fn resolve_channel(
        &self,
        settings: &RelaySettings,
        gateway: &dyn ChatGateway,
    ) -> Result<String, ConsultError> {
        if let Some(channel) = settings.channel.as_ref().filter(|c| !c.trim().is_empty()) {
            return Ok(channel.clone());
        }
        if !settings.auto_provision {
            return Err(ConsultError::StreamUnavailable);
        }
        let channel = self.provisioner.provision(gateway).await?;
        info!("Auto-provisioned stream '{}'", channel);
        Ok(channel)
    }

    fn advance(
        &self,
        consultation: &mut Consultation,
        state: ConsultState,
    ) -> Result<(), ConsultError> {
        consultation.transition(state)?;
        self.logger
            .debug("consultation state", json!({ "state": state }));
        Ok(())
    }
}
