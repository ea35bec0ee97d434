//! Clipcast daemon
//!
//! Starts the clip relay pipeline and, when enabled, the clip server. All
//! stages run until one of them fails with a startup-class error; everything
//! else is logged and retried internally.
//!
//! # Usage
//!
//! ```bash
//! clipcast --env-file /etc/clipcast/.env
//! ```
//!
//! Configuration comes from the environment (optionally seeded from a .env
//! file); see the project README for the variable list.

use anyhow::Context;
use clap::Parser;
use clipcast::pipeline::{DeliveryWorker, Dispatcher};
use clipcast::twitch::ClipFetcher;
use clipcast::utils::version;
use clipcast::{ClipStore, Settings};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Twitch clip relay daemon
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Load configuration from this env file, overriding the environment
    #[arg(long, value_name = "PATH")]
    env_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // A .env in the working directory is optional; a file named on the
    // command line is not.
    dotenvy::dotenv().ok();
    if let Some(path) = &cli.env_file {
        dotenvy::from_path_override(path)
            .with_context(|| format!("failed to load env file {}", path.display()))?;
    }

    init_tracing(cli.verbose);

    let settings = Settings::from_env()?;
    settings.validate()?;
    let settings = Arc::new(settings);

    tracing::info!("Starting clipcast v{}", version::get_version());

    if let Some(parent) = settings.database.path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create database directory {}", parent.display())
            })?;
        }
    }
    let store = ClipStore::open(&settings.database.path)?;

    let client = reqwest::Client::builder()
        .user_agent(format!("clipcast/{}", version::get_version()))
        .build()
        .context("failed to build HTTP client")?;

    let (raw_tx, raw_rx) = mpsc::unbounded_channel();
    let (delivery_tx, delivery_rx) = mpsc::unbounded_channel();

    let fetcher = ClipFetcher::new(client.clone(), Arc::clone(&settings));
    let dispatcher = Dispatcher::new(store.clone());
    let delivery = DeliveryWorker::new(client, Arc::clone(&settings));

    // The pipeline stages never complete on their own; the first stage to
    // fail with a startup-class error takes the process down with it.
    tokio::try_join!(
        fetcher.run(raw_tx),
        dispatcher.run(raw_rx, delivery_tx),
        delivery.run(delivery_rx),
        run_clip_server(store, settings),
    )?;

    Ok(())
}

/// Run the clip server when enabled; completes immediately otherwise
async fn run_clip_server(store: ClipStore, settings: Arc<Settings>) -> clipcast::Result<()> {
    if !settings.server.enabled {
        tracing::info!("Clip server is disabled");
        return Ok(());
    }
    clipcast::server::serve(store, settings).await
}

/// Initialize logging, honoring `RUST_LOG` when present
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(&["clipcast"]);
        assert_eq!(cli.env_file, None);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_custom_values() {
        let cli = Cli::parse_from(&["clipcast", "--env-file", "/etc/clipcast/.env", "--verbose"]);
        assert_eq!(
            cli.env_file.as_deref(),
            Some(std::path::Path::new("/etc/clipcast/.env"))
        );
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_short_verbose() {
        let cli = Cli::parse_from(&["clipcast", "-v"]);
        assert!(cli.verbose);
    }
}
