//! Progress notification port
//!
//! Defines the interface for reporting progress during a consultation.

use consult_domain::Reply;

/// Callback for progress updates during a consultation
///
/// Implementations live in the presentation layer. Notifications are
/// advisory: they must not block and never affect control flow.
pub trait ConsultProgressNotifier: Send + Sync {
    /// Called right before the question is published
    fn on_publishing(&self, channel: &str, topic: &str);

    /// Called once the event queue is registered and polling starts
    fn on_waiting(&self, channel: &str, topic: &str);

    /// Called when a reply has been accepted
    fn on_received(&self, reply: &Reply);

    /// Called when the event queue had to be registered again
    fn on_resubscribed(&self, _queue_id: &str) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ConsultProgressNotifier for NoProgress {
    fn on_publishing(&self, _channel: &str, _topic: &str) {}
    fn on_waiting(&self, _channel: &str, _topic: &str) {}
    fn on_received(&self, _reply: &Reply) {}
}
