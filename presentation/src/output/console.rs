//! Console output formatter for consultation results

use colored::Colorize;
use consult_application::ConsultOutput;

/// Formats consultation results for stdout
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format for a terminal: the reply text, then where to continue.
    pub fn format(output: &ConsultOutput) -> String {
        if output.is_error {
            return format!("{}\n", output.text_out.red().bold());
        }

        let mut text = String::new();
        text.push_str(output.text_out.trim_end());
        text.push('\n');

        let details = &output.details;
        if details.responder.is_some() || details.continuation_id.is_some() {
            text.push('\n');
        }
        if let Some(responder) = &details.responder {
            text.push_str(&format!("{} {}\n", "Responder:".dimmed(), responder));
        }
        if let Some(continuation) = &details.continuation_id {
            text.push_str(&format!(
                "{} {}\n",
                "Continuation:".dimmed(),
                continuation.cyan()
            ));
        }

        text
    }

    /// Format as JSON (`{textOut, isError, details}`)
    pub fn format_json(output: &ConsultOutput) -> String {
        serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
    }
}
