//! Outgoing message formatting.

use consult_application::MessageFormatter;
use consult_domain::Confidence;

/// Appends a confidence footer to the question text.
pub struct ConfidenceMessageFormatter;

impl MessageFormatter for ConfidenceMessageFormatter {
    fn format(&self, text: &str, confidence: Confidence) -> String {
        format!("{}\n\n---\nconfidence: {}", text.trim_end(), confidence)
    }
}
