//! `storefront` — terminal client for the product catalog.
//!
//! Built on [ratatui](https://ratatui.rs) with reactive data from
//! `storefront-core`'s [`CatalogController`](storefront_core::CatalogController).
//! Three screens: the product list (start destination), a product detail
//! view, and a static profile page.
//!
//! Logs are written to a file (default `/tmp/storefront.log`) to avoid
//! corrupting the terminal UI. A background data bridge task forwards core
//! state changes into the TUI action loop, and a reachability probe drives
//! the connectivity monitor.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app launch.

mod action;
mod app;
mod bridge;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use storefront_core::{CatalogController, ConnectionState, ConnectivityMonitor, ProductRepository};

use crate::app::App;
use crate::bridge::spawn_connectivity_driver;
use crate::screens::ProfileScreen;

/// Terminal client for browsing the product catalog.
#[derive(Parser, Debug)]
#[command(name = "storefront", version, about)]
struct Cli {
    /// Catalog base URL (overrides the config file)
    #[arg(short = 'u', long, env = "STOREFRONT_CATALOG_BASE_URL")]
    base_url: Option<String>,

    /// Catalog resource path under the base URL
    #[arg(short = 'r', long, env = "STOREFRONT_CATALOG_RESOURCE")]
    resource: Option<String>,

    /// Log file path (defaults to /tmp/storefront.log)
    #[arg(long, default_value = "/tmp/storefront.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr — that would
/// corrupt the TUI output. Returns a guard that must be held for the
/// lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "storefront={log_level},storefront_core={log_level},storefront_api={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("storefront.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    // Priority: CLI flags > config file > built-in defaults
    let mut config = storefront_config::load_config_or_default();
    if let Some(base_url) = cli.base_url {
        config.catalog.base_url = base_url;
    }
    if let Some(resource) = cli.resource {
        config.catalog.resource = resource;
    }

    info!(
        base_url = %config.catalog.base_url,
        resource = %config.catalog.resource,
        "starting storefront"
    );

    // One shared HTTP transport for the catalog client and the
    // reachability probe.
    let http = config.catalog.transport().build_client()?;
    let client = config.catalog.to_client(http.clone())?;
    let probe_url: reqwest::Url = config
        .catalog
        .base_url
        .parse()
        .map_err(|e| eyre!("invalid catalog base URL: {e}"))?;

    let controller = CatalogController::new(ProductRepository::new(client));
    let monitor = Arc::new(ConnectivityMonitor::new(ConnectionState::Unavailable));

    let probe_cancel = CancellationToken::new();
    spawn_connectivity_driver(
        http,
        probe_url,
        Arc::clone(&monitor),
        probe_cancel.clone(),
    );

    let profile = ProfileScreen::new(storefront_config::ProfileStore::new(), config.profile);

    let mut app = App::new(controller, monitor, profile);
    app.run().await?;

    probe_cancel.cancel();
    Ok(())
}
