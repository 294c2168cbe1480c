//! JSONL file writer for debug records.
//!
//! Each record is serialized as a single JSON line with `timestamp` and
//! `message` fields, appended to the file via a buffered writer.

use consult_application::DebugLogger;
use serde_json::Value;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL debug logger that appends one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlDebugLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlDebugLogger {
    /// Open the log at `path` for appending.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create debug log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open debug log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DebugLogger for JsonlDebugLogger {
    fn debug(&self, message: &str, data: Value) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let record = match data {
            Value::Object(mut map) => {
                map.insert("timestamp".to_string(), Value::String(timestamp));
                map.insert("message".to_string(), Value::String(message.to_string()));
                Value::Object(map)
            }
            Value::Null => serde_json::json!({
                "timestamp": timestamp,
                "message": message,
            }),
            other => serde_json::json!({
                "timestamp": timestamp,
                "message": message,
                "data": other,
            }),
        };

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlDebugLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
