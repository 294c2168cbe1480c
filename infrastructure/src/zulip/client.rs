//! Zulip REST client
//!
//! Every call authenticates with HTTP basic auth (bot email + API key) and
//! sends form-encoded parameters to `<site>/api/v1`. `GET /events` is a
//! long-poll and gets its own, longer timeout.

use super::error::{Result, ZulipError};
use super::protocol::{
    EventsResponse, RawEvent, RegisterResponse, SendMessageResponse, classify_error,
    narrow_param, subscriptions_param,
};
use async_trait::async_trait;
use consult_application::{ChatGateway, GatewayError, Registration};
use consult_domain::{ChatEvent, EventId, MessageId, Narrow};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, trace};

/// Default timeout for ordinary requests.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Default timeout for the `GET /events` long-poll.
///
/// The server answers with a heartbeat well before this elapses.
pub const DEFAULT_LONG_POLL_TIMEOUT: Duration = Duration::from_secs(120);

/// Login credentials for a bot account.
#[derive(Debug, Clone)]
pub struct ZulipCredentials {
    pub site: String,
    pub email: String,
    pub api_key: String,
}

/// HTTP client for one Zulip realm, implementing [`ChatGateway`].
#[derive(Debug, Clone)]
pub struct ZulipClient {
    http: reqwest::Client,
    api_base: String,
    email: String,
    api_key: String,
    request_timeout: Duration,
    long_poll_timeout: Duration,
}

impl ZulipClient {
    pub fn new(credentials: ZulipCredentials) -> Result<Self> {
        let site = credentials.site.trim().trim_end_matches('/');
        if !(site.starts_with("http://") || site.starts_with("https://")) {
            return Err(ZulipError::InvalidSite(credentials.site));
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("consult-relay/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http,
            api_base: format!("{site}/api/v1"),
            email: credentials.email,
            api_key: credentials.api_key,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            long_poll_timeout: DEFAULT_LONG_POLL_TIMEOUT,
        })
    }

    pub fn with_timeouts(mut self, request: Duration, long_poll: Duration) -> Self {
        self.request_timeout = request;
        self.long_poll_timeout = long_poll;
        self
    }

    /// Bot identity used for authentication.
    pub fn email(&self) -> &str {
        &self.email
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, self.url(path))
            .basic_auth(&self.email, Some(&self.api_key))
            .timeout(self.request_timeout)
    }

    /// Send a request and decode a 2xx body.
    ///
    /// `queue_id` names the event queue the call targets, if any, so a
    /// dead-queue error can be attributed even when the server omits it.
    async fn request_json<T>(
        &self,
        operation: &str,
        request: reqwest::RequestBuilder,
        queue_id: Option<&str>,
    ) -> std::result::Result<T, GatewayError>
    where
        T: DeserializeOwned,
    {
        trace!(operation, "zulip request");

        let response = request
            .send()
            .await
            .map_err(|e| transport_error(operation, &e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(operation, &e))?;

        if !status.is_success() {
            let error = classify_error(status.as_u16(), &body, queue_id);
            debug!(operation, status = status.as_u16(), error = %error, "zulip request failed");
            return Err(error);
        }

        serde_json::from_str(&body)
            .map_err(|e| GatewayError::Decode(format!("{operation}: {e}")))
    }
}

fn transport_error(operation: &str, error: &reqwest::Error) -> GatewayError {
    let kind = if error.is_timeout() {
        "timed out"
    } else if error.is_connect() {
        "connection failed"
    } else {
        "request failed"
    };
    GatewayError::Transient(format!("{operation} {kind}: {error}"))
}

#[async_trait]
impl ChatGateway for ZulipClient {
    async fn send_message(
        &self,
        channel: &str,
        topic: &str,
        content: &str,
    ) -> std::result::Result<MessageId, GatewayError> {
        let request = self.request(reqwest::Method::POST, "messages").form(&[
            ("type", "stream"),
            ("to", channel),
            ("topic", topic),
            ("content", content),
        ]);

        let response: SendMessageResponse =
            self.request_json("send message", request, None).await?;
        Ok(response.id)
    }

    async fn ensure_subscribed(&self, channel: &str) -> std::result::Result<(), GatewayError> {
        let subscriptions = subscriptions_param(channel);
        let request = self
            .request(reqwest::Method::POST, "users/me/subscriptions")
            .form(&[("subscriptions", subscriptions.as_str())]);

        let _: serde_json::Value = self.request_json("subscribe", request, None).await?;
        Ok(())
    }

    async fn register_queue(
        &self,
        narrow: &Narrow,
    ) -> std::result::Result<Registration, GatewayError> {
        let narrow = narrow_param(narrow);
        let request = self.request(reqwest::Method::POST, "register").form(&[
            ("event_types", r#"["message"]"#),
            ("narrow", narrow.as_str()),
            ("apply_markdown", "false"),
        ]);

        let response: RegisterResponse = self.request_json("register", request, None).await?;
        debug!(queue_id = %response.queue_id, last_event_id = response.last_event_id, "registered event queue");
        Ok(Registration {
            queue_id: response.queue_id,
            last_event_id: response.last_event_id,
        })
    }

    async fn get_events(
        &self,
        queue_id: &str,
        last_event_id: EventId,
    ) -> std::result::Result<Vec<ChatEvent>, GatewayError> {
        let last_event_id = last_event_id.to_string();
        let request = self
            .request(reqwest::Method::GET, "events")
            .query(&[("queue_id", queue_id), ("last_event_id", last_event_id.as_str())])
            .timeout(self.long_poll_timeout);

        let response: EventsResponse = self
            .request_json("get events", request, Some(queue_id))
            .await?;
        Ok(response
            .events
            .into_iter()
            .map(RawEvent::into_event)
            .collect())
    }

    async fn delete_queue(&self, queue_id: &str) -> std::result::Result<(), GatewayError> {
        let request = self
            .request(reqwest::Method::DELETE, "events")
            .form(&[("queue_id", queue_id)]);

        let _: serde_json::Value = self
            .request_json("delete queue", request, Some(queue_id))
            .await?;
        Ok(())
    }
}
