//! hourglass - A weekly bandwidth scheduler.
//!
//! This is the main binary: it starts the local scheduler service and
//! launches the schedule painter on top of it.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use hourglass_config::{Config, LoggingConfig};
use hourglass_service::{LocalService, StaticSelection};
use hourglass_tui::{App, terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().await.context("loading configuration")?;
    let state_dir = config.service.resolve_state_dir()?;

    init_logging(&config.logging, &state_dir)?;
    info!(state_dir = %state_dir.display(), "starting hourglass");

    let service = Arc::new(LocalService::open(state_dir).await?);
    let schedule = tokio::spawn(Arc::clone(&service).run_schedule());
    let selection = Arc::new(StaticSelection::from_strings(config.selection.iter()));

    // Install panic hook to restore terminal on panic
    terminal::install_panic_hook();
    let mut session = terminal::TerminalSession::start()?;

    let mut app = App::new(service.clone(), service, selection);
    let result = app.run(session.terminal()).await;

    // Always restore terminal, even if app.run() failed
    session.finish()?;
    schedule.abort();
    info!("hourglass stopped");

    result
}

/// Sends log output to the configured file; `RUST_LOG` wins over the
/// configured filter.
fn init_logging(logging: &LoggingConfig, state_dir: &Path) -> anyhow::Result<()> {
    let path = logging.resolve_file(state_dir);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter)),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
