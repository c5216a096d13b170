//! Service gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌───────────────────────────────────────────────┐
//!                      │                   GATEWAY                     │
//!   Client             │                                               │
//!   GET /data ─────────┼─▶ public API ──▶ gateway ──▶ registry         │
//!   GET /status        │    (:8080)       retry/       next_instance    │
//!                      │                  backoff      (round-robin)    │
//!                      │                     │                          │
//!   ◀──────────────────┼─────────────────────┘──── GET <addr>/data ────┼──▶ Backend
//!                      │                                               │
//!   Backend            │                                               │
//!   POST /register ────┼─▶ internal API ──▶ registry                   │
//!   POST /heartbeat    │    (:9090)          register / heartbeat       │
//!                      └───────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use service_gateway::config::{load_config, GatewayConfig};
use service_gateway::http::HttpServer;
use service_gateway::lifecycle::{wait_for_signal, Shutdown};
use service_gateway::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "gateway", about = "Service gateway with registration and retrying forwarder")]
struct Args {
    /// Path to a TOML config file. Defaults are used when omitted.
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    logging::init(&config.observability);

    tracing::info!(
        public = %config.public.bind_address,
        internal = %config.internal.bind_address,
        ttl_ms = config.registry.ttl_ms,
        max_retries = config.forward.max_retries,
        request_timeout_ms = config.forward.request_timeout_ms,
        backoff_base_ms = config.forward.backoff_base_ms,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let public = TcpListener::bind(&config.public.bind_address).await?;
    let internal = TcpListener::bind(&config.internal.bind_address).await?;

    let shutdown = Shutdown::new();
    let server = HttpServer::from_config(&config, shutdown.clone());

    let signals = shutdown.clone();
    tokio::spawn(async move {
        wait_for_signal().await;
        signals.trigger();
    });

    tracing::info!("Starting servers");
    server.run(public, internal).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
