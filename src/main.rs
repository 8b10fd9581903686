//! FX quote service.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                QUOTE SERVICE                 │
//!   quote-client         │                                              │
//!   ─── GET /cotacao ───▶│  http ──▶ quoting::engine (D0)               │
//!                        │              │                               │
//!                        │              ├─▶ upstream (D1) ──────────────┼──▶ Quote provider
//!                        │              │                               │
//!                        │              └─▶ persistence (D2) ───────────┼──▶ SQLite
//!   ◀── "5.43" ──────────│                                              │
//!                        └──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use fx_quote::config::load_or_default;
use fx_quote::lifecycle::{bootstrap, Shutdown};
use fx_quote::observability::logging;

#[derive(Parser)]
#[command(name = "fx-quote")]
#[command(about = "Serve the current FX bid with cascaded deadlines", long_about = None)]
struct Args {
    /// TOML configuration file; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_or_default(args.config.as_deref())?;

    logging::init_logging(&config.observability);

    tracing::info!("fx-quote v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.url,
        request_ms = config.timeouts.request_ms,
        fetch_ms = config.timeouts.fetch_ms,
        persist_ms = config.timeouts.persist_ms,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = bootstrap(config).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        shutdown.trigger_on_ctrl_c().await;
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
