//! Topic source port.

use async_trait::async_trait;

/// Supplies the descriptor a new topic is derived from
/// (for example `repo:branch`).
///
/// Implementations fall back to a fixed descriptor when nothing can be
/// detected, so this never fails.
#[async_trait]
pub trait TopicSource: Send + Sync {
    async fn describe(&self) -> String;
}

/// Always returns the same descriptor.
pub struct StaticTopicSource(pub String);

impl StaticTopicSource {
    pub fn new(descriptor: impl Into<String>) -> Self {
        Self(descriptor.into())
    }
}

#[async_trait]
impl TopicSource for StaticTopicSource {
    async fn describe(&self) -> String {
        self.0.clone()
    }
}
