//! CLI entrypoint for Consumer Interview
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use interview_application::{
    ConversationLogger, FieldStore, InterviewPresenter, MemoryFieldStore, NoConversationLogger,
    TurnController, recover_session,
};
use interview_domain::SessionContext;
use interview_infrastructure::{
    ConfigLoader, FileConfig, GeminiClient, JsonFileStore, JsonlTranscriptLogger,
};
use interview_presentation::{Cli, ConsolePresenter, InterviewRepl};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
    }
    .map_err(|e| anyhow!("Failed to load configuration: {}", e))?;
    config.validate()?;

    let log_file = config
        .logging
        .log_file
        .clone()
        .unwrap_or_else(ConfigLoader::default_log_file);
    let _log_guard = init_logging(cli.verbose, &log_file);

    info!("Starting Consumer Interview");

    // === Dependency Injection ===
    let settings = config.generation.gemini_settings()?;
    info!("Using model {}", settings.model);
    let client = Arc::new(GeminiClient::new(settings));

    let store = open_store(&cli, &config)?;

    let session = if cli.resume {
        match recover_session(store.as_ref()).context("Could not restore the saved interview")? {
            Some(session) => {
                info!("Restored interview with {} turns", session.log.len());
                session
            }
            None => {
                println!("No saved interview found; starting a new one.");
                SessionContext::new()
            }
        }
    } else {
        SessionContext::new()
    };

    let transcript: Arc<dyn ConversationLogger> =
        match cli.transcript.as_ref().or(config.logging.transcript_file.as_ref()) {
            Some(path) => match JsonlTranscriptLogger::open(path) {
                Ok(logger) => {
                    info!("Writing transcript to {}", logger.path().display());
                    Arc::new(logger)
                }
                Err(e) => {
                    warn!("Could not open transcript {}: {}", path.display(), e);
                    Arc::new(NoConversationLogger)
                }
            },
            None => Arc::new(NoConversationLogger),
        };

    let presenter: Arc<dyn InterviewPresenter> =
        Arc::new(ConsolePresenter::new().with_progress(!cli.quiet));

    let controller = TurnController::new(client, presenter.clone(), store, config.interview_params())
        .with_conversation_logger(transcript);

    let session = InterviewRepl::new(controller, presenter, session).run().await?;
    info!(
        "Interview ended after {} respondent turns",
        session.log.respondent_turn_count()
    );

    Ok(())
}

/// Install stderr logging by verbosity plus an info-level file log.
///
/// The returned guard flushes the file writer on drop.
fn init_logging(verbose: u8, log_file: &Path) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter);

    let file_parts = log_file
        .parent()
        .zip(log_file.file_name())
        .filter(|(dir, _)| dir.as_os_str().is_empty() || std::fs::create_dir_all(dir).is_ok());

    match file_parts {
        Some((dir, name)) => {
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(EnvFilter::new("info"));
            tracing_subscriber::registry()
                .with(stderr_layer)
                .with(file_layer)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry().with(stderr_layer).init();
            None
        }
    }
}

/// Pick the session store: a JSON file when persistence is on, memory otherwise.
///
/// A new (non-resumed) interview starts from an empty file without reading
/// the old one.
fn open_store(cli: &Cli, config: &FileConfig) -> Result<Arc<dyn FieldStore>> {
    let explicit = cli.state_file.clone();
    if explicit.is_none() && !config.persistence.enabled {
        return Ok(Arc::new(MemoryFieldStore::new()));
    }

    let path = explicit
        .or_else(|| config.persistence.state_file.clone())
        .unwrap_or_else(ConfigLoader::default_state_file);
    let store = if cli.resume {
        JsonFileStore::open(&path)
    } else {
        JsonFileStore::create(&path)
    }
    .with_context(|| format!("Could not open session file {}", path.display()))?;
    info!("Persisting session to {}", store.path().display());
    Ok(Arc::new(store))
}
