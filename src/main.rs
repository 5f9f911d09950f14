//! Save-the-date server
//!
//! Run with: cargo run --bin save-the-date -- --config config.toml
//!
//! # Configuration
//!
//! Without `--config` the first of these that exists is used:
//! `$XDG_CONFIG_HOME/save-the-date/config.toml`, `/etc/save-the-date/config.toml`,
//! `./config.toml`. Environment variables override the file:
//! - `SAVE_THE_DATE_HOST`, `SAVE_THE_DATE_PORT`: Bind address (default: 0.0.0.0:8080)
//! - `SAVE_THE_DATE_PUBLIC_URL`: Page URL written into the calendar file
//! - `SAVE_THE_DATE_DATA_DIR`: Where the guest book and counter live
//! - `SAVE_THE_DATE_LOG_LEVEL`, `SAVE_THE_DATE_LOG_FORMAT`: Logging (`pretty` or `json`)
//! - `RUST_LOG`: Full filter, wins over the log level

use anyhow::Context;
use clap::Parser;
use save_the_date::api::{serve, AppState};
use save_the_date::config::Config;
use save_the_date::guestbook::GuestBook;
use save_the_date::logging;
use save_the_date::storage::{FileStore, FileStoreConfig};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "save-the-date")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Serve the Ben & Emily save-the-date page")]
struct Args {
    /// Config file (default: search the usual locations)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    logging::init(&config.logging);

    tracing::info!("Starting save-the-date server v{}", env!("CARGO_PKG_VERSION"));
    let data_path = config.storage.data_path();
    tracing::info!("Data directory: {:?}", data_path);

    let store_config = FileStoreConfig {
        max_value_bytes: config.storage.max_value_bytes,
        ..FileStoreConfig::new(&data_path)
    };
    let store = FileStore::open(store_config)
        .await
        .with_context(|| format!("opening data directory {}", data_path.display()))?;
    let guestbook = GuestBook::load(Arc::new(store)).await;

    let countdown = config.event.countdown()?;
    let remaining = countdown.now();
    tracing::info!(
        target_instant = %countdown.target(),
        has_passed = remaining.has_passed,
        "Countdown: {}",
        remaining
    );

    let state = AppState::new(
        guestbook,
        countdown,
        config.event,
        config.site,
        config.api.clone(),
    );

    serve(state, &config.api).await?;

    tracing::info!("Save-the-date server stopped");
    Ok(())
}
