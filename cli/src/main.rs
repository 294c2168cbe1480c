//! CLI entrypoint for consult-relay
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use consult_application::{
    ConsultError, ConsultInput, ConsultOutput, ConsultProgressNotifier, ConsultUseCase,
    DebugLogger, NoProgress, NoStreamProvisioner, QueueRegistry, SessionError, StaticTopicSource,
    StreamProvisioner, TopicSource, TracingDebugLogger,
};
use consult_domain::Confidence;
use consult_infrastructure::{
    ConfidenceMessageFormatter, ConfigLoader, FileConfig, FileSessionProvider, GitTopicSource,
    JsonlDebugLogger, SubscribeStreamProvisioner,
};
use consult_presentation::{
    Cli, ConsoleFormatter, ConsultProgressReporter, OutputFormat, SimpleProgress,
};
use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (writer, _log_guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(writer)
        .init();

    if cli.show_config {
        return show_config(&cli);
    }

    info!("Starting consult-relay");

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            let reason = ConsultError::Configuration(SessionError::Load(format!("{e:#}")));
            return Ok(emit(&cli, &ConsultOutput::critical(reason)));
        }
    };

    // === Dependency Injection ===
    let registry = Arc::new(QueueRegistry::default());

    let provisioner: Arc<dyn StreamProvisioner> = if config.zulip.auto_provision {
        Arc::new(SubscribeStreamProvisioner::new(
            config.zulip.provision_stream.clone(),
        ))
    } else {
        Arc::new(NoStreamProvisioner)
    };

    let topics: Arc<dyn TopicSource> = match &cli.topic {
        Some(topic) => Arc::new(StaticTopicSource::new(topic.clone())),
        None => Arc::new(GitTopicSource::new(config.topic.fallback.clone())),
    };

    let debug_logger: Arc<dyn DebugLogger> = match cli.debug_log.as_ref().or(config.debug_log.as_ref())
    {
        Some(path) => match JsonlDebugLogger::new(path) {
            Some(logger) => {
                info!("Writing debug records to {}", logger.path().display());
                Arc::new(logger)
            }
            None => Arc::new(TracingDebugLogger),
        },
        None => Arc::new(TracingDebugLogger),
    };

    let use_case = ConsultUseCase::new(
        Arc::new(FileSessionProvider::new(config)),
        provisioner,
        topics,
        registry.clone(),
    )
    .with_formatter(Arc::new(ConfidenceMessageFormatter))
    .with_debug_logger(debug_logger);

    // Ctrl-C cancels the consultation; cleanup below still runs
    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling consultation");
            signal_token.cancel();
        }
    });

    let text = cli.text.clone().unwrap_or_default();
    let confidence = Confidence::new(i64::from(cli.confidence))
        .context("confidence must be between 0 and 100")?;
    let mut input = ConsultInput::new(text, confidence);
    if let Some(continuation) = &cli.continuation {
        input = input.with_continuation(continuation.clone());
    }

    let output = {
        let progress = progress_notifier(&cli);
        use_case.execute(input, progress.as_ref(), &cancel).await
    };

    let summary = registry.release_all().await;
    if summary.failed > 0 {
        warn!(
            "{} event queue(s) could not be released at shutdown",
            summary.failed
        );
    }

    Ok(emit(&cli, &output))
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
    };
    config.map_err(|e| anyhow::anyhow!(*e))
}

fn show_config(cli: &Cli) -> Result<ExitCode> {
    ConfigLoader::print_config_sources(cli.config.as_deref());
    println!();

    let config = load_config(cli)?;
    let rendered = toml::to_string_pretty(&config.redacted())
        .context("failed to render configuration")?;
    println!("{}", rendered);

    if let Err(e) = config.validate() {
        println!("Configuration is incomplete: {}", e);
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn progress_notifier(cli: &Cli) -> Box<dyn ConsultProgressNotifier> {
    if cli.quiet {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ConsultProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    }
}

/// Print the result and pick the exit code.
fn emit(cli: &Cli, output: &ConsultOutput) -> ExitCode {
    let rendered = match cli.output {
        OutputFormat::Text => ConsoleFormatter::format(output),
        OutputFormat::Json => ConsoleFormatter::format_json(output),
    };
    println!("{}", rendered.trim_end());

    if output.is_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
