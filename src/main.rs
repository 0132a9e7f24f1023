// logdeck - terminal console for platform log libraries
//
// Browses the log libraries of a ClickHouse-backed log platform from the
// terminal: open libraries as panes, page and search their rows, follow
// the hit histogram, delete libraries you no longer need.
//
// Architecture:
// - API client (reqwest): talks to the platform HTTP API
// - Workspace: owned registry of open panes, one per library
// - TUI (ratatui): library list, pane tabs, histogram, log rows
// - Event system: service calls run on spawned tasks and report back
//   through an mpsc channel

mod api;
mod cli;
mod config;
mod events;
mod logging;
mod session;
mod tui;
mod util;

use anyhow::{Context, Result};
use api::{Backend, DemoBackend, HttpClient};
use config::{Config, LogRotation};
use logging::{LogBuffer, TuiLogLayer};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI subcommands first (config --show, --reset, --edit, ...)
    // If one was handled, exit early
    let Some(flags) = cli::handle_cli() else {
        return Ok(());
    };

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let mut config = Config::from_env();
    if flags.demo {
        config.demo_mode = true;
    }
    if let Some(api_url) = flags.api_url {
        config.api_url = api_url;
    }

    // Log buffer backing the system log panel
    let log_buffer = LogBuffer::new();

    // Initialize tracing. The TUI owns the terminal, so logs go to the
    // buffer (and optionally to rotating files), never to stdout.
    //
    // Precedence: RUST_LOG env var > config file > default "info"
    let default_filter = format!("logdeck={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    // The guard must be kept alive for the duration of the program to
    // ensure file logs flush
    let _file_guard: Option<tracing_appender::non_blocking::WorkerGuard> =
        if config.logging.file_enabled {
            if let Err(e) = std::fs::create_dir_all(&config.logging.file_dir) {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.logging.file_dir, e
                );
                // Fall back to buffer-only logging
                tracing_subscriber::registry()
                    .with(filter)
                    .with(TuiLogLayer::new(log_buffer.clone()))
                    .init();
                None
            } else {
                // Create rolling file appender based on configured rotation
                let file_appender = match config.logging.file_rotation {
                    LogRotation::Hourly => tracing_appender::rolling::hourly(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Daily => tracing_appender::rolling::daily(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Never => tracing_appender::rolling::never(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                };

                // Wrap in non-blocking writer (writes happen in background thread)
                // File layer uses JSON format for structured log parsing
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
                tracing_subscriber::registry()
                    .with(filter)
                    .with(TuiLogLayer::new(log_buffer.clone()))
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(non_blocking)
                            .with_ansi(false),
                    )
                    .init();
                Some(guard)
            }
        } else {
            // No file logging
            tracing_subscriber::registry()
                .with(filter)
                .with(TuiLogLayer::new(log_buffer.clone()))
                .init();
            None
        };

    tracing::info!(version = config::VERSION, "logdeck starting");

    // Pick the backend: the real platform or built-in sample data
    let backend = if config.demo_mode {
        tracing::info!("Running in DEMO MODE - using built-in sample data");
        Backend::Demo(DemoBackend::new())
    } else {
        let timeout = Duration::from_secs(config.query.request_timeout_secs);
        let client =
            HttpClient::new(&config.api_url, timeout).context("Failed to create API client")?;
        tracing::info!(url = %config.api_url, "using platform API");
        Backend::Http(client)
    };

    // Run the TUI in the main task
    // This blocks until the user quits (presses 'q')
    let result = tui::run_tui(backend, config, log_buffer).await;
    if let Err(ref e) = result {
        tracing::error!("TUI error: {:?}", e);
    }

    tracing::info!("Shutdown complete");
    result
}
