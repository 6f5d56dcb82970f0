#![forbid(unsafe_code)]

mod clock;
mod constants;
mod controller;
mod gui;
mod quotes;
mod shortcuts;
mod state;
mod store;
mod sync;
mod weather;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{Level as TraceLevel, info};
use tracing_subscriber::FmtSubscriber;

use controller::SettingsController;
use store::{FileStore, MemoryStore, SyncStore};
use sync::StateSync;
use weather::WeatherService;

#[derive(Parser, Debug)]
#[command(name = "vista", about = "Minimal productive dashboard", version)]
struct Args {
    /// Path of the JSON state file (defaults to the platform config dir)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Keep preferences in memory only; nothing touches disk
    #[arg(long)]
    ephemeral: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse log level from environment variable
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("Failed to build async runtime")?;

    let store: Arc<dyn SyncStore> = if args.ephemeral {
        info!("Running ephemeral, preferences will not persist");
        Arc::new(MemoryStore::new())
    } else {
        let path = args.store.unwrap_or_else(FileStore::default_path);
        info!(path = ?path, "Using state file");
        Arc::new(FileStore::new(path))
    };

    // State loads once before any dependent module initializes
    let sync = StateSync::new(store, runtime.handle().clone());
    let state = sync.load();
    info!(shortcuts = state.shortcuts.len(), "Preference state ready");

    let controller = SettingsController::new(state, sync);

    // Weather runs concurrently and never blocks settings initialization
    let weather = WeatherService::spawn(runtime.handle());

    gui::run_gui(controller, weather)?;
    Ok(())
}
