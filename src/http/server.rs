//! HTTP server setup.
//!
//! # Responsibilities
//! - Build the public and internal Axum routers
//! - Wire up middleware (tracing, request ID)
//! - Serve both listeners until shutdown, then drain within the grace period

use axum::{
    routing::{get, post},
    Router,
};
use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use crate::config::GatewayConfig;
use crate::gateway::Gateway;
use crate::http::{internal, public, request};
use crate::lifecycle::Shutdown;
use crate::registry::ServiceRegistry;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ServiceRegistry>,
    pub gateway: Arc<Gateway>,
    pub shutdown: Shutdown,
}

impl AppState {
    /// Registry and gateway built from configuration.
    pub fn from_config(config: &GatewayConfig, shutdown: Shutdown) -> Self {
        let registry = Arc::new(ServiceRegistry::new(config.registry.ttl()));
        let gateway = Arc::new(Gateway::from_config(registry.clone(), &config.forward));
        Self {
            registry,
            gateway,
            shutdown,
        }
    }
}

/// Router for `/data` and `/status`.
pub fn public_router(state: AppState) -> Router {
    request::instrument(
        Router::new()
            .route("/data", get(public::data))
            .route("/status", get(public::status))
            .with_state(state),
    )
}

/// Router for `/register`, `/heartbeat` and `/healthz`.
pub fn internal_router(state: AppState) -> Router {
    request::instrument(
        Router::new()
            .route("/register", post(internal::register))
            .route("/heartbeat", post(internal::heartbeat))
            .route("/healthz", get(internal::healthz))
            .with_state(state),
    )
}

/// Gateway HTTP server: one public and one internal listener.
pub struct HttpServer {
    state: AppState,
    grace: Duration,
}

impl HttpServer {
    pub fn new(state: AppState, grace: Duration) -> Self {
        Self { state, grace }
    }

    /// Server with registry and gateway built from `config`.
    pub fn from_config(config: &GatewayConfig, shutdown: Shutdown) -> Self {
        Self::new(
            AppState::from_config(config, shutdown),
            config.shutdown.grace(),
        )
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Serve until the shutdown signal fires, then drain in-flight requests
    /// for at most the grace period.
    pub async fn run(self, public: TcpListener, internal: TcpListener) -> Result<(), std::io::Error> {
        tracing::info!(address = %public.local_addr()?, "Public API server started");
        tracing::info!(address = %internal.local_addr()?, "Internal API server started");

        let shutdown = self.state.shutdown.clone();
        let stop = shutdown.signalled();

        let public_server = axum::serve(public, public_router(self.state.clone()))
            .with_graceful_shutdown(shutdown.signalled())
            .into_future();
        let internal_server = axum::serve(internal, internal_router(self.state))
            .with_graceful_shutdown(shutdown.signalled())
            .into_future();

        let servers = async { tokio::try_join!(public_server, internal_server).map(|_| ()) };
        tokio::pin!(servers);

        tokio::select! {
            result = &mut servers => result?,
            _ = stop => {
                tracing::info!("Shutting down servers...");
                match tokio::time::timeout(self.grace, &mut servers).await {
                    Ok(result) => result?,
                    Err(_) => tracing::warn!(grace = ?self.grace, "Drain timed out, forcing shutdown"),
                }
            }
        }

        tracing::info!("Servers stopped gracefully");
        Ok(())
    }
}
