//! Application layer for consult-relay
//!
//! This crate contains use cases, port definitions, the queue registry and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod queue_registry;
pub mod use_cases;

// Re-export commonly used types
pub use config::{PollOptions, RelaySettings};
pub use ports::{
    chat_gateway::{ChatGateway, GatewayError, Registration},
    debug_logger::{DebugLogger, NoDebugLogger, TracingDebugLogger},
    message_formatter::{MessageFormatter, PlainMessageFormatter},
    progress::{ConsultProgressNotifier, NoProgress},
    session_provider::{RelaySession, SessionError, SessionProvider},
    stream_provisioner::{NoStreamProvisioner, ProvisionError, StreamProvisioner},
    topic_source::{StaticTopicSource, TopicSource},
};
pub use queue_registry::{GatewayRelease, QueueRegistry, QueueRelease, ReleaseSummary};
pub use use_cases::consult::{
    ConsultDetails, ConsultError, ConsultInput, ConsultOutput, ConsultUseCase,
};
pub use use_cases::consume_events::{
    EventConsumer, PollError, PollOutcome, ReplyFilter, SkipReason,
};
