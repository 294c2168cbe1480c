//! Domain layer for consult-relay
//!
//! This crate contains the core entities and value objects for relaying a
//! single question from an automated caller to a human responder through a
//! group-chat stream/topic. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Consultation
//!
//! One request/response exchange: a message is published to a topic and the
//! first human reply in that topic is returned. The [`Consultation`] entity
//! walks a fixed state machine ([`ConsultState`]) and ends in exactly one
//! [`ConsultOutcome`].
//!
//! ## Subscription
//!
//! A server-side event queue narrowed to one channel/topic. The
//! [`Subscription`] tracks the queue id and the cursor (last seen event id)
//! which only ever moves forward.
//!
//! ## Chat events
//!
//! Long-poll batches decode into the tagged [`ChatEvent`] variant, so
//! heartbeats, messages and unknown event kinds are handled exhaustively.

pub mod consultation;
pub mod core;
pub mod event;

// Re-export commonly used types
pub use consultation::{
    entities::{CancelReason, ConsultOutcome, ConsultState, Consultation},
    value_objects::{Confidence, MAX_TOPIC_CHARS, Topic},
};
pub use core::{
    error::DomainError,
    string::{preview, truncate_chars},
};
pub use event::{
    entities::{ChatEvent, EventId, MessageId, Reply},
    subscription::{Narrow, Subscription},
};
