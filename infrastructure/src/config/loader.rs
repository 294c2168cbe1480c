//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Environment variable prefix, e.g. `CONSULT_ZULIP_API_KEY`.
pub const ENV_PREFIX: &str = "CONSULT_";

const PROJECT_FILES: [&str; 2] = ["consult.toml", ".consult.toml"];
const SECTIONS: [&str; 3] = ["zulip", "poll", "topic"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Project root: `./consult.toml` or `./.consult.toml`
    /// 3. XDG config: `$XDG_CONFIG_HOME/consult-relay/config.toml`
    /// 4. Environment: `CONSULT_<SECTION>_<KEY>`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(config_path, true)
            .extract()
            .map_err(Box::new)
    }

    /// Load defaults plus environment only (for --no-config)
    pub fn load_defaults() -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(None, false).extract().map_err(Box::new)
    }

    fn figment(config_path: Option<&Path>, with_files: bool) -> Figment {
        let mut figment = Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Env::prefixed(ENV_PREFIX).map(|key| nest_section(key.as_str()).into()));

        if !with_files {
            return figment;
        }

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/consult-relay/config.toml if set,
    /// otherwise the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("consult-relay").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&Path>) {
        println!("Configuration sources (in priority order):");

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{mark:^7}] Explicit: {}", path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [ FOUND ] Project: {}", path.display());
        } else {
            println!("  [       ] Project: ./consult.toml or ./.consult.toml");
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { " FOUND " } else { "       " };
            println!("  [{mark}] Global:  {}", path.display());
        }

        println!("  [       ] Env:     {ENV_PREFIX}<SECTION>_<KEY>");
        println!("  [       ] Default: built-in defaults");
    }
}

/// Map `zulip_api_key` to `zulip.api_key` so env vars address nested keys.
///
/// figment hands the mapper the raw (upper case) env name, so it is
/// lowercased first.
fn nest_section(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    for section in SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key
}
