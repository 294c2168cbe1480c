//! Event consumption engine.
//!
//! Owns the long-poll loop for one subscription: it blocks on the server's
//! long-poll, re-registers the queue when the server reports it invalid,
//! backs off on transient failures and filters the event stream down to the
//! single reply that answers the published question.
//!
//! # Loop
//!
//! ```text
//! cancelled? ──yes──▶ Cancelled
//!     │
//!  get_events ──ok, empty──────────▶ loop (the long-poll is the wait)
//!     │       ──ok, events─────────▶ advance cursor, filter ──▶ Reply | loop
//!     │       ──queue invalid──────▶ re-register (≤ max_resubscribes) ──▶ loop
//!     │       ──transient──────────▶ backoff (cancellable, ≤ max_retries) ──▶ loop
//!     │       ──other──────────────▶ error
//! ```

use crate::config::PollOptions;
use crate::ports::chat_gateway::{ChatGateway, GatewayError};
use crate::ports::debug_logger::DebugLogger;
use consult_domain::{ChatEvent, MessageId, Narrow, Reply, Subscription, preview};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Fatal errors from the poll loop.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PollError {
    #[error("{operation} failed after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        operation: &'static str,
        attempts: u32,
        last_error: GatewayError,
    },

    #[error("poll: event queue re-registration exceeded {attempts} attempts")]
    ResubscribeExhausted { attempts: u32 },

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Non-error result of a poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Reply(Reply),
    /// The cancellation signal was observed before a reply arrived.
    Cancelled,
}

/// Why a message event was not accepted as the reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    OwnMessage,
    Stale { question_id: MessageId },
    TopicMismatch { expected: String, actual: String },
}

/// Decides which message events count as a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyFilter {
    self_identity: String,
    question_id: Option<MessageId>,
    target_topic: Option<String>,
}

impl ReplyFilter {
    pub fn new(self_identity: impl Into<String>) -> Self {
        Self {
            self_identity: self_identity.into(),
            question_id: None,
            target_topic: None,
        }
    }

    /// Skip anything at or before the published question.
    pub fn with_question(mut self, question_id: MessageId) -> Self {
        self.question_id = Some(question_id);
        self
    }

    /// Skip messages posted to any other topic.
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.target_topic = Some(topic.into());
        self
    }

    pub fn check(&self, reply: &Reply) -> Result<(), SkipReason> {
        if reply.is_from(&self.self_identity) {
            return Err(SkipReason::OwnMessage);
        }
        if let Some(question_id) = self.question_id
            && reply.message_id <= question_id
        {
            return Err(SkipReason::Stale { question_id });
        }
        if let Some(target) = &self.target_topic
            && !reply.is_in_topic(target)
        {
            return Err(SkipReason::TopicMismatch {
                expected: target.clone(),
                actual: reply.topic.clone(),
            });
        }
        Ok(())
    }
}

/// Long-poll event consumer bound to one chat gateway.
#[derive(Clone)]
pub struct EventConsumer {
    gateway: Arc<dyn ChatGateway>,
    logger: Arc<dyn DebugLogger>,
    options: PollOptions,
}

impl EventConsumer {
    pub fn new(
        gateway: Arc<dyn ChatGateway>,
        logger: Arc<dyn DebugLogger>,
        options: PollOptions,
    ) -> Self {
        Self {
            gateway,
            logger,
            options,
        }
    }

    pub fn options(&self) -> &PollOptions {
        &self.options
    }

    /// Register a new event queue narrowed to `narrow`.
    ///
    /// Every call creates a new server-side queue.
    pub async fn register_subscription(
        &self,
        narrow: Narrow,
    ) -> Result<Subscription, GatewayError> {
        let registration = self.gateway.register_queue(&narrow).await?;
        info!(
            "Registered event queue {} for {} > {}",
            registration.queue_id, narrow.channel, narrow.topic
        );
        self.logger.debug(
            "queue registered",
            json!({
                "queue_id": registration.queue_id,
                "last_event_id": registration.last_event_id,
                "channel": narrow.channel,
                "topic": narrow.topic,
            }),
        );
        Ok(Subscription::new(registration.queue_id, registration.last_event_id).with_narrow(narrow))
    }

    /// Block until a reply passes `filter`, the signal is cancelled, or a
    /// fatal error occurs.
    ///
    /// Queue re-registration is only attempted when `subscription` carries
    /// the narrow it was registered with; `on_resubscribe(old_id, new_id)` is
    /// called after each successful re-registration. A transient failure of
    /// the re-registration itself is retried with the same backoff and
    /// retry budget as the fetch.
    pub async fn poll(
        &self,
        subscription: &mut Subscription,
        filter: &ReplyFilter,
        cancel: &CancellationToken,
        on_resubscribe: &mut (dyn FnMut(&str, &str) + Send),
    ) -> Result<PollOutcome, PollError> {
        let mut transient_failures: u32 = 0;
        let mut resubscribes: u32 = 0;
        // Set while the current queue is dead and a replacement is pending.
        let mut queue_dead = false;

        loop {
            if cancel.is_cancelled() {
                debug!("Poll cancelled before request on {}", subscription.id());
                return Ok(PollOutcome::Cancelled);
            }

            let error = if queue_dead {
                match self
                    .resubscribe(subscription, resubscribes, on_resubscribe)
                    .await
                {
                    Ok(()) => {
                        queue_dead = false;
                        continue;
                    }
                    Err(error) => error,
                }
            } else {
                match self
                    .gateway
                    .get_events(subscription.id(), subscription.cursor())
                    .await
                {
                    Ok(events) => {
                        transient_failures = 0;
                        resubscribes = 0;
                        if events.is_empty() {
                            continue;
                        }
                        if let Some(reply) = self.select_reply(subscription, events, filter) {
                            return Ok(PollOutcome::Reply(reply));
                        }
                        continue;
                    }
                    Err(error) => error,
                }
            };

            match error {
                GatewayError::QueueInvalid { .. }
                    if !queue_dead && subscription.narrow().is_some() =>
                {
                    resubscribes += 1;
                    if resubscribes > self.options.max_resubscribes {
                        return Err(PollError::ResubscribeExhausted {
                            attempts: self.options.max_resubscribes,
                        });
                    }
                    warn!(
                        "Event queue {} is no longer valid, registering a new one ({}/{})",
                        subscription.id(),
                        resubscribes,
                        self.options.max_resubscribes
                    );
                    queue_dead = true;
                }
                error if error.is_retryable() => {
                    transient_failures += 1;
                    if transient_failures >= self.options.max_retries {
                        return Err(PollError::RetriesExhausted {
                            operation: "poll",
                            attempts: transient_failures,
                            last_error: error,
                        });
                    }
                    let step = if queue_dead { "Re-registration" } else { "Poll" };
                    let delay = self.options.backoff_delay(transient_failures - 1);
                    warn!(
                        "{} attempt {}/{} failed: {}; retrying in {:?}",
                        step, transient_failures, self.options.max_retries, error, delay
                    );
                    self.logger.debug(
                        "poll retry",
                        json!({
                            "queue_id": subscription.id(),
                            "resubscribing": queue_dead,
                            "attempt": transient_failures,
                            "delay_ms": delay.as_millis() as u64,
                            "error": error.to_string(),
                        }),
                    );
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => {
                            debug!("Poll cancelled during backoff");
                            return Ok(PollOutcome::Cancelled);
                        }
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
                error => return Err(PollError::Gateway(error)),
            }
        }
    }

    /// Register a replacement for a dead queue and repoint `subscription`.
    async fn resubscribe(
        &self,
        subscription: &mut Subscription,
        attempt: u32,
        on_resubscribe: &mut (dyn FnMut(&str, &str) + Send),
    ) -> Result<(), GatewayError> {
        let Some(narrow) = subscription.narrow().cloned() else {
            return Ok(());
        };
        let old_id = subscription.id().to_string();

        let registration = self.gateway.register_queue(&narrow).await?;
        subscription.replace(registration.queue_id, registration.last_event_id);

        info!("Resubscribed: {} -> {}", old_id, subscription.id());
        self.logger.debug(
            "queue re-registered",
            json!({
                "old_queue_id": old_id,
                "new_queue_id": subscription.id(),
                "attempt": attempt,
            }),
        );
        on_resubscribe(&old_id, subscription.id());
        Ok(())
    }

    /// Walk a batch in arrival order, advancing the cursor for every event,
    /// and return the first message that passes the filter.
    fn select_reply(
        &self,
        subscription: &mut Subscription,
        events: Vec<ChatEvent>,
        filter: &ReplyFilter,
    ) -> Option<Reply> {
        let total = events.len();
        for (index, event) in events.into_iter().enumerate() {
            subscription.advance(event.id());
            let reply = match event {
                ChatEvent::Heartbeat { .. } => continue,
                ChatEvent::Other { id, kind } => {
                    debug!("Ignoring event {} of kind {}", id, kind);
                    continue;
                }
                ChatEvent::Message { reply, .. } => reply,
            };

            match filter.check(&reply) {
                Ok(()) => {
                    if index + 1 < total {
                        debug!(
                            "Leaving {} later event(s) in the batch unread",
                            total - index - 1
                        );
                    }
                    info!(
                        "Reply {} from {}: {}",
                        reply.message_id,
                        reply.sender_email,
                        preview(&reply.content, 80)
                    );
                    return Some(reply);
                }
                Err(SkipReason::TopicMismatch { expected, actual }) => {
                    debug!(
                        "Skipping message {}: topic '{}' does not match '{}'",
                        reply.message_id, actual, expected
                    );
                    self.logger.debug(
                        "topic mismatch",
                        json!({
                            "message_id": reply.message_id,
                            "expected": expected,
                            "actual": actual,
                        }),
                    );
                }
                Err(reason) => {
                    debug!("Skipping message {}: {:?}", reply.message_id, reason);
                }
            }
        }
        None
    }

    /// Deregister a queue. Never fails: errors are logged and dropped.
    pub async fn release_subscription(&self, queue_id: &str) {
        match self.gateway.delete_queue(queue_id).await {
            Ok(()) => debug!("Released event queue {}", queue_id),
            Err(e) => {
                warn!("Failed to release event queue {}: {}", queue_id, e);
                self.logger.debug(
                    "queue release failed",
                    json!({ "queue_id": queue_id, "error": e.to_string() }),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::debug_logger::NoDebugLogger;
    use crate::use_cases::test_support::*;
    use std::time::Duration;
    use tokio::time::Instant;

    const TOPIC: &str = "repo:main";

    fn consumer(gateway: Arc<ScriptedGateway>) -> EventConsumer {
        EventConsumer::new(gateway, Arc::new(NoDebugLogger), PollOptions::default())
    }

    fn subscription() -> Subscription {
        Subscription::new("q1", -1).with_narrow(Narrow::new("ops", TOPIC))
    }

    fn filter() -> ReplyFilter {
        ReplyFilter::new(BOT).with_question(100).with_topic(TOPIC)
    }

    async fn run_poll(
        consumer: &EventConsumer,
        subscription: &mut Subscription,
        cancel: &CancellationToken,
    ) -> (Result<PollOutcome, PollError>, Vec<(String, String)>) {
        let mut renames = Vec::new();
        let mut on_resubscribe = |old: &str, new: &str| {
            renames.push((old.to_string(), new.to_string()));
        };
        let result = consumer
            .poll(subscription, &filter(), cancel, &mut on_resubscribe)
            .await;
        (result, renames)
    }

    fn expect_reply(result: Result<PollOutcome, PollError>) -> Reply {
        match result {
            Ok(PollOutcome::Reply(reply)) => reply,
            other => panic!("expected reply, got {:?}", other),
        }
    }

    // ==================== Filter ====================

    #[test]
    fn test_filter_rejects_own_message() {
        let ChatEvent::Message { reply, .. } = message(1, 200, BOT, TOPIC, "echo") else {
            unreachable!()
        };
        assert_eq!(filter().check(&reply), Err(SkipReason::OwnMessage));
    }

    #[test]
    fn test_filter_rejects_question_and_older() {
        for message_id in [99, 100] {
            let ChatEvent::Message { reply, .. } = message(1, message_id, HUMAN, TOPIC, "old")
            else {
                unreachable!()
            };
            assert_eq!(
                filter().check(&reply),
                Err(SkipReason::Stale { question_id: 100 })
            );
        }
    }

    #[test]
    fn test_filter_rejects_other_topic() {
        let ChatEvent::Message { reply, .. } = message(1, 101, HUMAN, "repo:dev", "hi") else {
            unreachable!()
        };
        assert!(matches!(
            filter().check(&reply),
            Err(SkipReason::TopicMismatch { .. })
        ));
    }

    #[test]
    fn test_filter_without_question_or_topic_accepts_humans() {
        let ChatEvent::Message { reply, .. } = message(1, 1, HUMAN, "anything", "hi") else {
            unreachable!()
        };
        assert_eq!(ReplyFilter::new(BOT).check(&reply), Ok(()));
    }

    // ==================== Poll loop ====================

    #[tokio::test]
    async fn test_cancelled_before_start_makes_no_request() {
        let gateway = Arc::new(ScriptedGateway::new());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let (result, _) = run_poll(&consumer(gateway.clone()), &mut subscription(), &cancel).await;

        assert_eq!(result, Ok(PollOutcome::Cancelled));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_stale_event_filtered_then_newer_reply_returned() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .fetch(Ok(vec![message(1, 99, HUMAN, TOPIC, "stale")]))
                .fetch(Ok(vec![message(2, 101, HUMAN, TOPIC, "use main")])),
        );
        let mut sub = subscription();

        let (result, _) =
            run_poll(&consumer(gateway.clone()), &mut sub, &CancellationToken::new()).await;

        let reply = expect_reply(result);
        assert_eq!(reply.message_id, 101);
        assert_eq!(reply.content, "use main");
        assert_eq!(gateway.calls(), vec!["events:q1:-1", "events:q1:1"]);
        assert_eq!(sub.cursor(), 2);
    }

    #[tokio::test]
    async fn test_empty_batches_and_heartbeats_keep_polling() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .fetch(Ok(vec![]))
                .fetch(Ok(vec![ChatEvent::Heartbeat { id: 3 }]))
                .fetch(Ok(vec![message(4, 150, HUMAN, TOPIC, "done")])),
        );

        let (result, _) = run_poll(
            &consumer(gateway.clone()),
            &mut subscription(),
            &CancellationToken::new(),
        )
        .await;

        assert_eq!(expect_reply(result).message_id, 150);
        assert_eq!(
            gateway.calls(),
            vec!["events:q1:-1", "events:q1:-1", "events:q1:3"]
        );
    }

    #[tokio::test]
    async fn test_cursor_advances_past_filtered_events_and_first_match_wins() {
        let gateway = Arc::new(ScriptedGateway::new().fetch(Ok(vec![
            ChatEvent::Other {
                id: 5,
                kind: "typing".to_string(),
            },
            message(6, 120, BOT, TOPIC, "my own echo"),
            message(7, 121, HUMAN, "repo:dev", "wrong topic"),
            message(8, 122, HUMAN, TOPIC, "first"),
            message(9, 123, HUMAN, TOPIC, "second"),
        ])));
        let mut sub = subscription();

        let (result, _) =
            run_poll(&consumer(gateway), &mut sub, &CancellationToken::new()).await;

        assert_eq!(expect_reply(result).content, "first");
        assert_eq!(sub.cursor(), 8);
    }

    #[tokio::test]
    async fn test_queue_invalid_reregisters_once_and_continues() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .fetch(Err(queue_invalid("q1")))
                .register(Ok(registration("q2", 40)))
                .fetch(Ok(vec![message(41, 101, HUMAN, TOPIC, "answer")])),
        );
        let mut sub = subscription();

        let (result, renames) =
            run_poll(&consumer(gateway.clone()), &mut sub, &CancellationToken::new()).await;

        assert_eq!(expect_reply(result).content, "answer");
        assert_eq!(renames, vec![("q1".to_string(), "q2".to_string())]);
        assert_eq!(gateway.count("register:"), 1);
        assert_eq!(
            gateway.calls(),
            vec!["events:q1:-1", "register:ops:repo:main", "events:q2:40"]
        );
        assert_eq!(sub.id(), "q2");
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_reregistration_failure_is_retried() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .fetch(Err(queue_invalid("q1")))
                .register(Err(server_error()))
                .register(Ok(registration("q2", 40)))
                .fetch(Ok(vec![message(41, 101, HUMAN, TOPIC, "answer")])),
        );
        let mut sub = subscription();
        let start = Instant::now();

        let (result, renames) =
            run_poll(&consumer(gateway.clone()), &mut sub, &CancellationToken::new()).await;

        assert_eq!(expect_reply(result).content, "answer");
        assert_eq!(
            gateway.calls(),
            vec![
                "events:q1:-1",
                "register:ops:repo:main",
                "register:ops:repo:main",
                "events:q2:40"
            ]
        );
        assert_eq!(renames, vec![("q1".to_string(), "q2".to_string())]);
        assert!(start.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reregistration_failures_share_retry_budget() {
        let mut script = ScriptedGateway::new().fetch(Err(queue_invalid("q1")));
        for _ in 0..10 {
            script = script.register(Err(server_error()));
        }
        let gateway = Arc::new(script);

        let (result, renames) = run_poll(
            &consumer(gateway.clone()),
            &mut subscription(),
            &CancellationToken::new(),
        )
        .await;

        assert!(matches!(
            result,
            Err(PollError::RetriesExhausted { attempts: 10, .. })
        ));
        assert_eq!(gateway.count("register:"), 10);
        assert_eq!(gateway.count("events:"), 1);
        assert!(renames.is_empty());
    }

    #[tokio::test]
    async fn test_reregistration_protocol_error_is_fatal() {
        let error = GatewayError::Protocol {
            status: 403,
            code: "UNAUTHORIZED".to_string(),
            message: "no access".to_string(),
        };
        let gateway = Arc::new(
            ScriptedGateway::new()
                .fetch(Err(queue_invalid("q1")))
                .register(Err(error.clone())),
        );

        let (result, _) = run_poll(
            &consumer(gateway.clone()),
            &mut subscription(),
            &CancellationToken::new(),
        )
        .await;

        assert_eq!(result, Err(PollError::Gateway(error)));
        assert_eq!(gateway.count("register:"), 1);
    }

    #[tokio::test]
    async fn test_fourth_consecutive_queue_invalid_is_fatal() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .fetch(Err(queue_invalid("q1")))
                .register(Ok(registration("q2", -1)))
                .fetch(Err(queue_invalid("q2")))
                .register(Ok(registration("q3", -1)))
                .fetch(Err(queue_invalid("q3")))
                .register(Ok(registration("q4", -1)))
                .fetch(Err(queue_invalid("q4"))),
        );

        let (result, renames) = run_poll(
            &consumer(gateway.clone()),
            &mut subscription(),
            &CancellationToken::new(),
        )
        .await;

        assert_eq!(result, Err(PollError::ResubscribeExhausted { attempts: 3 }));
        assert_eq!(gateway.count("register:"), 3);
        assert_eq!(renames.len(), 3);
    }

    #[tokio::test]
    async fn test_queue_invalid_without_narrow_is_fatal() {
        let gateway = Arc::new(ScriptedGateway::new().fetch(Err(queue_invalid("q1"))));
        let mut sub = Subscription::new("q1", -1);

        let (result, _) =
            run_poll(&consumer(gateway.clone()), &mut sub, &CancellationToken::new()).await;

        assert_eq!(result, Err(PollError::Gateway(queue_invalid("q1"))));
        assert_eq!(gateway.count("register:"), 0);
    }

    #[tokio::test]
    async fn test_protocol_error_propagates_unmodified() {
        let error = GatewayError::Protocol {
            status: 401,
            code: "UNAUTHORIZED".to_string(),
            message: "bad key".to_string(),
        };
        let gateway = Arc::new(ScriptedGateway::new().fetch(Err(error.clone())));

        let (result, _) = run_poll(
            &consumer(gateway.clone()),
            &mut subscription(),
            &CancellationToken::new(),
        )
        .await;

        assert_eq!(result, Err(PollError::Gateway(error)));
        assert_eq!(gateway.count("events:"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_failures_back_off_then_recover() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .fetch(Err(server_error()))
                .fetch(Err(server_error()))
                .fetch(Err(server_error()))
                .fetch(Ok(vec![message(1, 101, HUMAN, TOPIC, "back")])),
        );
        let start = Instant::now();

        let (result, _) = run_poll(
            &consumer(gateway.clone()),
            &mut subscription(),
            &CancellationToken::new(),
        )
        .await;

        assert_eq!(expect_reply(result).content, "back");
        // 1s + 2s + 4s
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(7000));
        assert!(elapsed < Duration::from_millis(8000));
        assert_eq!(gateway.count("events:"), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ten_consecutive_server_errors_are_fatal() {
        let mut script = ScriptedGateway::new();
        for _ in 0..10 {
            script = script.fetch(Err(server_error()));
        }
        let gateway = Arc::new(script);

        let (result, _) = run_poll(
            &consumer(gateway.clone()),
            &mut subscription(),
            &CancellationToken::new(),
        )
        .await;

        let error = result.unwrap_err();
        assert!(matches!(
            error,
            PollError::RetriesExhausted { attempts: 10, .. }
        ));
        assert!(error.to_string().contains("poll"));
        assert_eq!(gateway.count("events:"), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_backoff_returns_without_another_request() {
        let cancel = CancellationToken::new();
        let gateway = Arc::new(
            ScriptedGateway::new()
                .fetch(Err(server_error()))
                .fetch(Err(server_error()))
                .fetch(Ok(vec![message(1, 101, HUMAN, TOPIC, "too late")])),
        );
        let trigger = cancel.clone();
        tokio::spawn(async move {
            // Second backoff runs from t=1s to t=3s
            tokio::time::sleep(Duration::from_millis(1500)).await;
            trigger.cancel();
        });
        let start = Instant::now();

        let (result, _) = run_poll(&consumer(gateway.clone()), &mut subscription(), &cancel).await;

        assert_eq!(result, Ok(PollOutcome::Cancelled));
        assert_eq!(gateway.count("events:"), 2);
        assert!(start.elapsed() < Duration::from_millis(3000));
    }

    #[tokio::test]
    async fn test_release_subscription_swallows_errors() {
        let gateway = Arc::new(
            ScriptedGateway::new().delete(Err(GatewayError::Transient("reset".to_string()))),
        );

        consumer(gateway.clone()).release_subscription("q1").await;

        assert_eq!(gateway.calls(), vec!["delete:q1"]);
    }

    #[tokio::test]
    async fn test_register_subscription_carries_narrow() {
        let gateway = Arc::new(ScriptedGateway::new().register(Ok(registration("q9", 12))));

        let sub = consumer(gateway)
            .register_subscription(Narrow::new("ops", TOPIC))
            .await
            .unwrap();

        assert_eq!(sub.id(), "q9");
        assert_eq!(sub.cursor(), 12);
        assert_eq!(sub.narrow(), Some(&Narrow::new("ops", TOPIC)));
    }
}
