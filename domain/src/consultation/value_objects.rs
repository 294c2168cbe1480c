//! Consultation value objects

use crate::core::error::DomainError;
use crate::core::string::truncate_chars;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum topic length accepted by the chat service, in code points.
pub const MAX_TOPIC_CHARS: usize = 60;

/// How confident the caller is in its own best guess (0–100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Confidence(u8);

impl Confidence {
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if !(0..=100).contains(&value) {
            return Err(DomainError::InvalidConfidence(value));
        }
        Ok(Self(value as u8))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self(50)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// The topic a consultation is posted under.
///
/// A topic is either reused verbatim from a continuation id, or derived from
/// a descriptor and truncated to the service's length limit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Topic(String);

impl Topic {
    /// Reuse a continuation id as-is.
    pub fn from_continuation(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive a topic from a descriptor, truncated to `max_chars` code points.
    pub fn derive(descriptor: &str, max_chars: usize) -> Self {
        Self(truncate_chars(descriptor.trim(), max_chars))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
