//! Backend self-registration against a live internal API.

use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use service_gateway::gateway::Gateway;
use service_gateway::http::{internal_router, AppState};
use service_gateway::lifecycle::Shutdown;
use service_gateway::registration::{AgentConfig, RegistrationAgent, RegistrationError};
use service_gateway::registry::ServiceRegistry;

mod common;

/// Serve the internal API on an ephemeral port.
async fn start_internal_api(ttl: Duration) -> (String, Arc<ServiceRegistry>) {
    let registry = Arc::new(ServiceRegistry::new(ttl));
    let state = AppState {
        registry: registry.clone(),
        gateway: Arc::new(Gateway::builder().registry(registry.clone()).build()),
        shutdown: Shutdown::new(),
    };

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        let _ = axum::serve(listener, internal_router(state)).await;
    });
    (url, registry)
}

fn agent_config(gateway_url: String, address: &str) -> AgentConfig {
    AgentConfig {
        gateway_url,
        address: address.to_string(),
        register_attempts: 3,
        register_delay: Duration::from_millis(10),
        heartbeat_interval: Duration::from_millis(30),
        request_timeout: Duration::from_secs(1),
    }
}

#[tokio::test]
async fn test_register_on_first_attempt() {
    let (url, registry) = start_internal_api(Duration::from_secs(60)).await;
    let agent = RegistrationAgent::new(agent_config(url, "http://storage1:9999")).unwrap();

    assert_eq!(agent.register().await.unwrap(), 1);

    let status = registry.status();
    assert_eq!(status.len(), 1);
    assert_eq!(status[0].address, "http://storage1:9999");
    assert!(status[0].alive);
}

#[tokio::test]
async fn test_heartbeats_keep_instance_alive_until_shutdown() {
    let ttl = Duration::from_millis(150);
    let (url, registry) = start_internal_api(ttl).await;
    let agent = RegistrationAgent::new(agent_config(url, "http://storage1:9999")).unwrap();
    agent.register().await.unwrap();

    let shutdown = Shutdown::new();
    let loop_agent = agent.clone();
    let stop = shutdown.subscribe();
    let heartbeats = tokio::spawn(async move { loop_agent.run_heartbeats(stop).await });

    tokio::time::sleep(ttl * 3).await;
    assert_eq!(registry.alive_count(), 1, "heartbeats should refresh the instance");

    shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(1), heartbeats)
        .await
        .expect("heartbeat loop should stop on shutdown")
        .unwrap();

    tokio::time::sleep(ttl * 2).await;
    assert_eq!(registry.alive_count(), 0, "silent instance should expire");
    assert_eq!(registry.len(), 1);
}

#[tokio::test]
async fn test_register_exhausts_attempts_when_gateway_down() {
    let url = common::refused_address().await;
    let agent = RegistrationAgent::new(agent_config(url, "http://storage1:9999")).unwrap();

    let err = agent.register().await.unwrap_err();
    assert!(matches!(err, RegistrationError::Exhausted { attempts: 3 }), "got {err:?}");
}

#[tokio::test]
async fn test_register_rejected_by_gateway() {
    let (url, registry) = start_internal_api(Duration::from_secs(60)).await;
    let agent = RegistrationAgent::new(agent_config(url, "")).unwrap();

    let err = agent.register().await.unwrap_err();
    assert!(matches!(err, RegistrationError::Exhausted { .. }));
    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_register_retries_until_gateway_is_up() {
    // Reserve a port, start the gateway on it only after the first attempt fails.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let registry = Arc::new(ServiceRegistry::new(Duration::from_secs(60)));
    let state = AppState {
        registry: registry.clone(),
        gateway: Arc::new(Gateway::builder().registry(registry.clone()).build()),
        shutdown: Shutdown::new(),
    };

    let mut config = agent_config(format!("http://{}", addr), "http://storage1:9999");
    config.register_attempts = 10;
    config.register_delay = Duration::from_millis(50);
    let agent = RegistrationAgent::new(config).unwrap();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(75)).await;
        let listener = TcpListener::bind(addr).await.unwrap();
        let _ = axum::serve(listener, internal_router(state)).await;
    });

    let attempt = agent.register().await.unwrap();
    assert!(attempt > 1, "first attempt should have failed");
    assert_eq!(registry.len(), 1);
}
