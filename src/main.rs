//! hostswap-proxy binary.
//!
//! A forwarding proxy that intercepts each request's destination host
//! and rewrites known game-service domains to a configured remote host.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │               FORWARDING PROXY                │
//!                    │                                               │
//!   Client Request   │  ┌─────────┐   ┌───────────┐   ┌──────────┐  │
//!   ─────────────────┼─▶│  http   │──▶│ intercept │──▶│  hyper   │──┼──▶ Upstream
//!                    │  │ server  │   │ (rewrite) │   │  client  │  │    (remote or
//!   Client Response  │  └─────────┘   └───────────┘   └──────────┘  │     original)
//!   ◀────────────────┼───────────────── response relay ─────────────┼───
//!                    │                                               │
//!                    │  ┌─────────────────────────────────────────┐  │
//!                    │  │          Cross-Cutting Concerns          │  │
//!                    │  │   config  ·  logging  ·  metrics         │  │
//!                    │  └─────────────────────────────────────────┘  │
//!                    └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use hostswap_proxy::config::loader::load_config;
use hostswap_proxy::http::HttpServer;
use hostswap_proxy::observability::logging::init_logging;
use hostswap_proxy::observability::metrics::init_metrics;

/// Forwarding proxy that rewrites known game-service hosts.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(&args.config)?;

    init_logging(&config.observability.log_level);

    tracing::info!("hostswap-proxy v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        remote_host = %config.rewrite.remote_host,
        domains = config.rewrite.domains.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let server = HttpServer::new(config);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
