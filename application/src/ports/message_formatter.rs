//! Message formatting port.

use consult_domain::Confidence;

/// Renders the outgoing question body.
pub trait MessageFormatter: Send + Sync {
    fn format(&self, text: &str, confidence: Confidence) -> String;
}

/// Sends the text unchanged.
pub struct PlainMessageFormatter;

impl MessageFormatter for PlainMessageFormatter {
    fn format(&self, text: &str, _confidence: Confidence) -> String {
        text.to_string()
    }
}
