//! Configuration file loading for consult-relay
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./consult.toml` or `./.consult.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/consult-relay/config.toml`
//! 4. Environment variables prefixed `CONSULT_`
//! 5. Default values

mod file_config;
mod loader;
mod session_provider;

pub use file_config::{
    ConfigValidationError, DEFAULT_FALLBACK_TOPIC, FileConfig, FilePollConfig, FileTopicConfig,
    FileZulipConfig,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
pub use session_provider::FileSessionProvider;
