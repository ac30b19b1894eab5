//! Security headers demo server.
//!
//! Serves `GET /` with every response carrying the configured security
//! headers (Content-Security-Policy, X-Frame-Options, X-Content-Type-Options,
//! X-XSS-Protection, Referrer-Policy, Permissions-Policy).
//!
//! ```text
//! security-headers [--config security-headers.toml] [--bind 127.0.0.1:8080]
//! ```
//!
//! With `--config`, the file is watched and the header policy is swapped in
//! place whenever a valid new version is saved.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use security_headers::config::{load_config, watcher::ConfigWatcher, AppConfig};
use security_headers::http::HttpServer;
use security_headers::observability::logging;

#[derive(Parser)]
#[command(name = "security-headers")]
#[command(about = "HTTP server applying a typed security header policy", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability.log_level)?;
    tracing::info!("security-headers v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        order = ?config.headers.order,
        "Configuration loaded"
    );

    // Keep the watcher alive for the lifetime of the server.
    let (config_updates, _watcher) = match &cli.config {
        Some(path) => {
            let (watcher, rx) = ConfigWatcher::new(path);
            (rx, Some(watcher.run()?))
        }
        None => {
            let (_, rx) = mpsc::unbounded_channel();
            (rx, None)
        }
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(config);
    server.run(listener, config_updates).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
