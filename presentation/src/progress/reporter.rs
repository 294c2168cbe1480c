//! Progress reporting for a consultation
//!
//! Progress goes to stderr so stdout carries only the result.

use colored::Colorize;
use consult_application::ConsultProgressNotifier;
use consult_domain::{Reply, preview};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with a spinner while waiting for the human
pub struct ConsultProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ConsultProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn location(channel: &str, topic: &str) -> String {
        format!("#{} > {}", channel, topic)
    }

    fn with_spinner(&self, f: impl FnOnce(&mut Option<ProgressBar>)) {
        let mut guard = self.spinner.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut guard);
    }
}

impl Default for ConsultProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsultProgressNotifier for ConsultProgressReporter {
    fn on_publishing(&self, channel: &str, topic: &str) {
        self.with_spinner(|slot| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(Self::spinner_style());
            pb.set_message(format!(
                "Publishing question to {}",
                Self::location(channel, topic).cyan()
            ));
            pb.enable_steady_tick(Duration::from_millis(120));
            *slot = Some(pb);
        });
    }

    fn on_waiting(&self, channel: &str, topic: &str) {
        self.with_spinner(|slot| {
            if let Some(pb) = slot.as_ref() {
                pb.set_message(format!(
                    "Waiting for a reply in {}",
                    Self::location(channel, topic).cyan()
                ));
            }
        });
    }

    fn on_received(&self, reply: &Reply) {
        self.with_spinner(|slot| {
            if let Some(pb) = slot.take() {
                pb.finish_and_clear();
            }
        });
        eprintln!(
            "{} Reply from {}: {}",
            "v".green(),
            reply.sender_name.bold(),
            preview(&reply.content, 60).dimmed()
        );
    }

    fn on_resubscribed(&self, queue_id: &str) {
        self.with_spinner(|slot| {
            if let Some(pb) = slot.as_ref() {
                pb.println(format!(
                    "{} Event queue expired, re-registered as {}",
                    "!".yellow(),
                    queue_id
                ));
            }
        });
    }
}

impl Drop for ConsultProgressReporter {
    fn drop(&mut self) {
        self.with_spinner(|slot| {
            if let Some(pb) = slot.take() {
                pb.finish_and_clear();
            }
        });
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ConsultProgressNotifier for SimpleProgress {
    fn on_publishing(&self, channel: &str, topic: &str) {
        eprintln!(
            "{} Publishing to {}",
            "->".cyan(),
            ConsultProgressReporter::location(channel, topic).bold()
        );
    }

    fn on_waiting(&self, _channel: &str, _topic: &str) {
        eprintln!("{} Waiting for a reply...", "->".cyan());
    }

    fn on_received(&self, reply: &Reply) {
        eprintln!("  {} Reply from {}", "v".green(), reply.sender_name);
    }

    fn on_resubscribed(&self, queue_id: &str) {
        eprintln!("  {} Re-registered event queue {}", "!".yellow(), queue_id);
    }
}
