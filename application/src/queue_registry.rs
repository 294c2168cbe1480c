//! Process-wide registry of outstanding event queues.
//!
//! Every queue the orchestrator registers is tracked here from creation until
//! it is deregistered, so that shutdown can release whatever is still open
//! (for example after a consultation task was aborted mid-poll).
//!
//! The registry is an explicitly constructed value shared through an `Arc`;
//! tests create isolated instances.

use crate::ports::chat_gateway::{ChatGateway, GatewayError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// Capability to release one event queue.
#[async_trait]
pub trait QueueRelease: Send + Sync {
    async fn release(&self, queue_id: &str) -> Result<(), GatewayError>;
}

/// Releases a queue by deregistering it through the chat gateway.
pub struct GatewayRelease {
    gateway: Arc<dyn ChatGateway>,
}

impl GatewayRelease {
    pub fn new(gateway: Arc<dyn ChatGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl QueueRelease for GatewayRelease {
    async fn release(&self, queue_id: &str) -> Result<(), GatewayError> {
        self.gateway.delete_queue(queue_id).await
    }
}

/// Result of [`QueueRegistry::release_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReleaseSummary {
    pub released: usize,
    pub failed: usize,
}

/// Tracked set of live event queues, keyed by queue id.
#[derive(Default)]
pub struct QueueRegistry {
    entries: Mutex<HashMap<String, Arc<dyn QueueRelease>>>,
}

impl QueueRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Arc<dyn QueueRelease>>> {
        // A panic while holding the lock cannot leave the map half-updated.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn register(&self, queue_id: impl Into<String>, release: Arc<dyn QueueRelease>) {
        let queue_id = queue_id.into();
        debug!("Registry: tracking queue {}", queue_id);
        self.entries().insert(queue_id, release);
    }

    /// Stop tracking a queue. Returns `false` if it was not tracked.
    pub fn unregister(&self, queue_id: &str) -> bool {
        self.entries().remove(queue_id).is_some()
    }

    /// Re-key an entry after its queue was replaced by a re-registration.
    ///
    /// Returns `false` (and changes nothing) if `old_id` was not tracked.
    pub fn rename(&self, old_id: &str, new_id: &str) -> bool {
        let mut entries = self.entries();
        match entries.remove(old_id) {
            Some(release) => {
                debug!("Registry: queue {} is now {}", old_id, new_id);
                entries.insert(new_id.to_string(), release);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, queue_id: &str) -> bool {
        self.entries().contains_key(queue_id)
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Release every tracked queue concurrently.
    ///
    /// Individual failures are logged and counted; the registry is empty
    /// afterwards regardless of outcome.
    pub async fn release_all(&self) -> ReleaseSummary {
        let drained: Vec<(String, Arc<dyn QueueRelease>)> = self.entries().drain().collect();
        if drained.is_empty() {
            debug!("Registry: no outstanding queues to release");
            return ReleaseSummary::default();
        }

        info!("Releasing {} outstanding event queue(s)", drained.len());
        let results = futures::future::join_all(drained.into_iter().map(
            |(queue_id, release)| async move {
                let result = release.release(&queue_id).await;
                (queue_id, result)
            },
        ))
        .await;

        let mut summary = ReleaseSummary::default();
        for (queue_id, result) in results {
            match result {
                Ok(()) => summary.released += 1,
                Err(e) => {
                    warn!("Failed to release event queue {}: {}", queue_id, e);
                    summary.failed += 1;
                }
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RecordingRelease {
        calls: Mutex<Vec<String>>,
        fail_on: Option<String>,
    }

    impl RecordingRelease {
        fn new(fail_on: Option<&str>) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                fail_on: fail_on.map(str::to_string),
            })
        }

        fn calls(&self) -> Vec<String> {
            let mut calls = self.calls.lock().unwrap().clone();
            calls.sort();
            calls
        }
    }

    #[async_trait]
    impl QueueRelease for RecordingRelease {
        async fn release(&self, queue_id: &str) -> Result<(), GatewayError> {
            self.calls.lock().unwrap().push(queue_id.to_string());
            if self.fail_on.as_deref() == Some(queue_id) {
                return Err(GatewayError::Transient("connection reset".to_string()));
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_release_all_with_no_entries() {
        let registry = QueueRegistry::new();
        assert_eq!(registry.release_all().await, ReleaseSummary::default());
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_release_all_releases_every_entry() {
        let registry = QueueRegistry::new();
        let release = RecordingRelease::new(None);
        registry.register("q1", release.clone());
        registry.register("q2", release.clone());

        let summary = registry.release_all().await;

        assert_eq!(summary.released, 2);
        assert_eq!(summary.failed, 0);
        assert_eq!(release.calls(), vec!["q1", "q2"]);
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_release_all_tolerates_failures_and_empties() {
        let registry = QueueRegistry::new();
        let release = RecordingRelease::new(Some("q2"));
        registry.register("q1", release.clone());
        registry.register("q2", release.clone());
        registry.register("q3", release.clone());

        let summary = registry.release_all().await;

        assert_eq!(summary.released, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(release.calls().len(), 3);
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_rename_keeps_release_under_new_key() {
        let registry = QueueRegistry::new();
        let release = RecordingRelease::new(None);
        registry.register("old", release.clone());

        assert!(registry.rename("old", "new"));
        assert!(!registry.contains("old"));
        assert!(registry.contains("new"));

        registry.release_all().await;
        assert_eq!(release.calls(), vec!["new"]);
    }

    #[test]
    fn test_rename_unknown_is_noop() {
        let registry = QueueRegistry::new();
        assert!(!registry.rename("missing", "new"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unregister() {
        let registry = QueueRegistry::new();
        registry.register("q1", RecordingRelease::new(None));
        assert_eq!(registry.len(), 1);
        assert!(registry.unregister("q1"));
        assert!(!registry.unregister("q1"));
        assert!(registry.is_empty());
    }
}
