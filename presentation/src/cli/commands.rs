//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the consultation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable reply with its continuation id
    Text,
    /// `{textOut, isError, details}` JSON object
    Json,
}

/// CLI arguments for consult-relay
#[derive(Parser, Debug)]
#[command(name = "consult-relay")]
#[command(author, version, about = "Ask a human over group chat and wait for the reply")]
#[command(long_about = r#"
consult-relay posts a question to a chat stream, then long-polls the
stream/topic until a human answers. The reply is printed to stdout.

Each question goes to a topic derived from the current git checkout
(<repo>:<branch>). Pass the continuation id printed with a reply to
--continuation to ask a follow-up in the same topic.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./consult.toml      Project-level config
3. ~/.config/consult-relay/config.toml   Global config
4. CONSULT_* environment variables (e.g. CONSULT_ZULIP_API_KEY)

Example:
  consult-relay "Is it OK to drop the legacy_users table?"
  consult-relay --confidence 30 "Which region should the bucket live in?"
  consult-relay --continuation "billing:main" "And the retention period?"
"#)]
pub struct Cli {
    /// The question to ask (not required with --show-config)
    #[arg(required_unless_present = "show_config")]
    pub text: Option<String>,

    /// How confident you are in your own best guess (0-100)
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub confidence: u8,

    /// Topic of an earlier consultation to continue
    #[arg(long, value_name = "TOPIC")]
    pub continuation: Option<String>,

    /// Topic descriptor to use instead of git detection
    #[arg(long, value_name = "TOPIC", conflicts_with = "continuation")]
    pub topic: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Append structured debug records (JSONL) to this file
    #[arg(long, value_name = "PATH")]
    pub debug_log: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration sources and the merged configuration, then exit
    #[arg(long)]
    pub show_config: bool,
}
