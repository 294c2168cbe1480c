//! Topic configuration from TOML (`[topic]` section)

use consult_domain::MAX_TOPIC_CHARS;
use serde::{Deserialize, Serialize};

/// Topic used when no repository or branch can be detected.
pub const DEFAULT_FALLBACK_TOPIC: &str = "consultation";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTopicConfig {
    /// Topic length limit in code points
    pub max_length: usize,
    pub fallback: String,
}

impl Default for FileTopicConfig {
    fn default() -> Self {
        Self {
            max_length: MAX_TOPIC_CHARS,
            fallback: DEFAULT_FALLBACK_TOPIC.to_string(),
        }
    }
}
