//! Demo storage backend.
//!
//! Serves `GET /data`, registers itself with the gateway and heartbeats
//! until SIGINT/SIGTERM.

use axum::{routing::get, Json, Router};
use clap::Parser;
use serde::Serialize;
use std::future::IntoFuture;
use std::time::Duration;
use tokio::net::TcpListener;

use service_gateway::config::ObservabilityConfig;
use service_gateway::lifecycle::{wait_for_signal, Shutdown};
use service_gateway::observability::logging;
use service_gateway::registration::{AgentConfig, RegistrationAgent};

#[derive(Parser)]
#[command(name = "storage", about = "Demo backend that registers with the gateway")]
struct Args {
    /// Service name; also the hostname other containers reach it by.
    #[arg(long, env = "STORAGE_NAME", default_value = "storage1")]
    name: String,

    #[arg(long, env = "STORAGE_PORT", default_value_t = 9999)]
    port: u16,

    /// Gateway internal API base URL.
    #[arg(long, env = "GATEWAY_URL", default_value = "http://gateway:9090")]
    gateway_url: String,

    #[arg(long, default_value_t = 10)]
    register_attempts: u32,

    #[arg(long, default_value_t = 2000)]
    register_delay_ms: u64,

    #[arg(long, default_value_t = 5000)]
    heartbeat_interval_ms: u64,

    /// Time allowed for in-flight requests to drain.
    #[arg(long, default_value_t = 10)]
    grace_secs: u64,
}

#[derive(Serialize)]
struct DataResponse {
    service: String,
    time: chrono::DateTime<chrono::Utc>,
    data: Vec<String>,
}

fn router(name: String) -> Router {
    Router::new()
        .route(
            "/data",
            get(move || {
                let name = name.clone();
                async move {
                    Json(DataResponse {
                        service: name.clone(),
                        time: chrono::Utc::now(),
                        data: vec![name],
                    })
                }
            }),
        )
        .route("/healthz", get(|| async { "Healthy" }))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init(&ObservabilityConfig::default());

    let address = format!("http://{}:{}", args.name, args.port);
    let listener = TcpListener::bind(("0.0.0.0", args.port)).await?;
    tracing::info!(port = args.port, "Starting storage service");

    let shutdown = Shutdown::new();
    let server = tokio::spawn(
        axum::serve(listener, router(args.name.clone()))
            .with_graceful_shutdown(shutdown.signalled())
            .into_future(),
    );

    let agent = RegistrationAgent::new(AgentConfig {
        gateway_url: args.gateway_url,
        address,
        register_attempts: args.register_attempts,
        register_delay: Duration::from_millis(args.register_delay_ms),
        heartbeat_interval: Duration::from_millis(args.heartbeat_interval_ms),
        ..Default::default()
    })?;

    if let Err(e) = agent.register().await {
        tracing::error!(error = %e, "Failed to register with gateway, exiting");
        std::process::exit(1);
    }

    let heartbeats = {
        let agent = agent.clone();
        let stop = shutdown.subscribe();
        tokio::spawn(async move { agent.run_heartbeats(stop).await })
    };

    wait_for_signal().await;
    tracing::info!("Shutdown signal received");
    shutdown.trigger();

    let _ = heartbeats.await;
    match tokio::time::timeout(Duration::from_secs(args.grace_secs), server).await {
        Ok(Ok(result)) => result?,
        Ok(Err(e)) => tracing::error!(error = %e, "Server task failed"),
        Err(_) => tracing::warn!("Server forced to shutdown"),
    }

    tracing::info!("Storage service stopped gracefully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    async fn get(path: &str) -> (StatusCode, Vec<u8>) {
        let response = router("storage1".to_string())
            .oneshot(Request::get(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_data_json_shape() {
        let (status, body) = get("/data").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["service"], "storage1");
        assert_eq!(json["data"], serde_json::json!(["storage1"]));

        let time = json["time"].as_str().expect("time is an RFC 3339 string");
        assert!(chrono::DateTime::parse_from_rfc3339(time).is_ok(), "bad time {time}");
        assert_eq!(json.as_object().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_healthz() {
        let (status, body) = get("/healthz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"Healthy");
    }
}
