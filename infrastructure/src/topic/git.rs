//! Topic descriptor from the current git checkout.

use async_trait::async_trait;
use consult_application::TopicSource;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

/// Describes the working copy as `<repo>:<branch>`.
///
/// Falls back to a fixed descriptor outside a repository or when `git`
/// is unavailable. A detached HEAD is described by its short commit hash.
pub struct GitTopicSource {
    working_dir: Option<PathBuf>,
    fallback: String,
}

impl GitTopicSource {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            working_dir: None,
            fallback: fallback.into(),
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    async fn git(&self, args: &[&str]) -> Option<String> {
        let mut cmd = Command::new("git");
        cmd.args(args);
        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }

        let output = match cmd.output().await {
            Ok(output) => output,
            Err(e) => {
                debug!("Failed to execute git: {}", e);
                return None;
            }
        };
        if !output.status.success() {
            return None;
        }

        let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
        (!value.is_empty()).then_some(value)
    }

    async fn detect(&self) -> Option<String> {
        let toplevel = self.git(&["rev-parse", "--show-toplevel"]).await?;
        let repo = Path::new(&toplevel)
            .file_name()?
            .to_string_lossy()
            .into_owned();

        // symbolic-ref also works on an unborn branch; rev-parse covers detached HEAD
        let branch = match self.git(&["symbolic-ref", "--short", "HEAD"]).await {
            Some(branch) => Some(branch),
            None => self.git(&["rev-parse", "--short", "HEAD"]).await,
        };

        Some(match branch {
            Some(branch) => format!("{repo}:{branch}"),
            None => repo,
        })
    }
}

#[async_trait]
impl TopicSource for GitTopicSource {
    async fn describe(&self) -> String {
        match self.detect().await {
            Some(descriptor) => {
                debug!(descriptor = %descriptor, "Detected topic from git");
                descriptor
            }
            None => {
                debug!(fallback = %self.fallback, "No git checkout detected, using fallback topic");
                self.fallback.clone()
            }
        }
    }
}
