//! Registration and heartbeat client run by backends.

use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::broadcast;
use url::Url;

/// Errors surfaced by the registration agent.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("invalid gateway url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("http client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("registration failed after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

/// Agent settings.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Base URL of the gateway's internal API, e.g. `http://gateway:9090`.
    pub gateway_url: String,
    /// Address this backend is reachable at, e.g. `http://storage1:9999`.
    pub address: String,
    /// Registration attempts before giving up.
    pub register_attempts: u32,
    /// Fixed delay between registration attempts.
    pub register_delay: Duration,
    /// Interval between heartbeats.
    pub heartbeat_interval: Duration,
    /// Timeout for each call to the gateway.
    pub request_timeout: Duration,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            gateway_url: "http://gateway:9090".to_string(),
            address: "http://storage1:9999".to_string(),
            register_attempts: 10,
            register_delay: Duration::from_secs(2),
            heartbeat_interval: Duration::from_secs(5),
            request_timeout: Duration::from_secs(2),
        }
    }
}

/// Keeps one backend registered with the gateway.
#[derive(Debug, Clone)]
pub struct RegistrationAgent {
    client: Client,
    register_url: Url,
    heartbeat_url: Url,
    config: AgentConfig,
}

impl RegistrationAgent {
    pub fn new(config: AgentConfig) -> Result<Self, RegistrationError> {
        let base = Url::parse(&config.gateway_url)?;
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client,
            register_url: base.join("/register")?,
            heartbeat_url: base.join("/heartbeat")?,
            config,
        })
    }

    pub fn address(&self) -> &str {
        &self.config.address
    }

    /// Register with the gateway, retrying with a fixed delay.
    ///
    /// Succeeds on the first `201 Created`. Returns the attempt number that
    /// succeeded.
    pub async fn register(&self) -> Result<u32, RegistrationError> {
        let attempts = self.config.register_attempts;
        for attempt in 1..=attempts {
            match self.post(&self.register_url).await {
                Ok(StatusCode::CREATED) => {
                    tracing::info!(address = %self.config.address, attempt, "Registered with gateway");
                    return Ok(attempt);
                }
                Ok(status) => {
                    tracing::warn!(attempt, status = %status, "Register attempt rejected");
                }
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "Register attempt failed");
                }
            }
            if attempt < attempts {
                tokio::time::sleep(self.config.register_delay).await;
            }
        }
        Err(RegistrationError::Exhausted { attempts })
    }

    /// Send one heartbeat. Returns the gateway's status code.
    pub async fn heartbeat(&self) -> Result<StatusCode, RegistrationError> {
        Ok(self.post(&self.heartbeat_url).await?)
    }

    /// Heartbeat on a fixed interval until `shutdown` fires.
    pub async fn run_heartbeats(&self, mut shutdown: broadcast::Receiver<()>) {
        let mut ticker = tokio::time::interval(self.config.heartbeat_interval);
        // The first tick completes immediately; registration just refreshed us.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match self.heartbeat().await {
                        Ok(status) => tracing::debug!(address = %self.config.address, status = %status, "Heartbeat sent"),
                        Err(e) => tracing::warn!(error = %e, "Heartbeat failed"),
                    }
                }
                _ = shutdown.recv() => {
                    tracing::info!("Stopping heartbeat");
                    break;
                }
            }
        }
    }

    async fn post(&self, url: &Url) -> Result<StatusCode, reqwest::Error> {
        let response = self
            .client
            .post(url.clone())
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(self.config.address.clone())
            .send()
            .await?;
        Ok(response.status())
    }
}
