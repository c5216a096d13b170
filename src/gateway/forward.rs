//! Retry/backoff orchestration for one inbound request.

use axum::body::Body;
use hyper::body::Incoming;
use hyper::{Request, Response, Uri};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{self, Instant};

use crate::config::ForwardConfig;
use crate::gateway::context::{BoundedContext, RequestContext};
use crate::gateway::error::GatewayError;
use crate::observability::metrics;
use crate::registry::ServiceRegistry;
use crate::resilience::{is_retryable_status, Backoff};

/// Outbound HTTP client shared by all forwards.
pub type HttpClient = Client<HttpConnector, Body>;

/// Path requested on every backend.
const DATA_PATH: &str = "/data";

/// Build the outbound client with a bounded connect phase.
pub fn build_http_client(connect_timeout: Duration) -> HttpClient {
    let mut connector = HttpConnector::new();
    connector.set_connect_timeout(Some(connect_timeout));
    Client::builder(TokioExecutor::new()).build(connector)
}

/// Immutable retry parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardPolicy {
    /// Retries after the first attempt; `max_retries + 1` attempts in total.
    pub max_retries: u32,
    /// Deadline for the whole retry sequence.
    pub request_timeout: Duration,
    /// First backoff delay.
    pub backoff_base: Duration,
}

impl Default for ForwardPolicy {
    fn default() -> Self {
        Self::from(&ForwardConfig::default())
    }
}

impl From<&ForwardConfig> for ForwardPolicy {
    fn from(config: &ForwardConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            request_timeout: Duration::from_millis(config.request_timeout_ms),
            backoff_base: Duration::from_millis(config.backoff_base_ms),
        }
    }
}

/// Forwards requests to a live backend picked from the registry.
#[derive(Debug, Clone)]
pub struct Gateway {
    client: Option<HttpClient>,
    registry: Option<Arc<ServiceRegistry>>,
    policy: ForwardPolicy,
}

/// Builder for [`Gateway`]. Missing pieces surface as
/// [`GatewayError::NotConfigured`] on every forward.
#[derive(Debug, Default)]
pub struct GatewayBuilder {
    client: Option<HttpClient>,
    registry: Option<Arc<ServiceRegistry>>,
    policy: ForwardPolicy,
}

impl GatewayBuilder {
    pub fn client(mut self, client: HttpClient) -> Self {
        self.client = Some(client);
        self
    }

    pub fn registry(mut self, registry: Arc<ServiceRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn policy(mut self, policy: ForwardPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn build(self) -> Gateway {
        Gateway {
            client: self.client,
            registry: self.registry,
            policy: self.policy,
        }
    }
}

/// Result of the attempt loop before metrics are recorded.
type Outcome = Result<Response<Incoming>, GatewayError>;

impl Gateway {
    pub fn builder() -> GatewayBuilder {
        GatewayBuilder::default()
    }

    /// Fully configured gateway from the `[forward]` config section.
    pub fn from_config(registry: Arc<ServiceRegistry>, config: &ForwardConfig) -> Self {
        Self::builder()
            .client(build_http_client(Duration::from_millis(config.connect_timeout_ms)))
            .registry(registry)
            .policy(ForwardPolicy::from(config))
            .build()
    }

    pub fn policy(&self) -> &ForwardPolicy {
        &self.policy
    }

    /// Forward one request to `GET <target>/data`.
    ///
    /// Returns the upstream response (which may carry a 5xx once retries are
    /// exhausted) or a single terminal error.
    pub async fn forward(&self, ctx: RequestContext) -> Outcome {
        let start = std::time::Instant::now();
        let (attempts, outcome) = self.run(ctx).await;

        match &outcome {
            Ok(response) => {
                metrics::record_forward("response", Some(response.status().as_u16()), attempts, start)
            }
            Err(e) => metrics::record_forward(e.kind(), None, attempts, start),
        }
        outcome
    }

    async fn run(&self, ctx: RequestContext) -> (u32, Outcome) {
        let (client, registry) = match (&self.client, &self.registry) {
            (Some(client), Some(registry)) => (client, registry),
            _ => return (0, Err(GatewayError::NotConfigured)),
        };

        let mut ctx = ctx.bounded(self.policy.request_timeout);

        let target = match registry.next_instance() {
            Some(target) => target,
            None => return (0, Err(GatewayError::NoBackendAvailable)),
        };

        let uri: Uri = match format!("{}{}", target, DATA_PATH).parse() {
            Ok(uri) => uri,
            Err(_) => return (0, Err(GatewayError::InvalidTarget(target))),
        };

        tracing::debug!(backend = %target, "Forwarding request");

        let mut backoff = Backoff::new(self.policy.backoff_base);
        let mut attempt: u32 = 0;

        loop {
            if ctx.is_expired() {
                return (attempt, Err(GatewayError::DeadlineExceeded));
            }
            if ctx.is_cancelled() {
                return (attempt, Err(GatewayError::Canceled));
            }

            let request = match Request::get(uri.clone()).body(Body::empty()) {
                Ok(request) => request,
                Err(_) => return (attempt, Err(GatewayError::InvalidTarget(target))),
            };

            let deadline = ctx.deadline;
            let result = tokio::select! {
                result = client.request(request) => result,
                _ = time::sleep_until(deadline) => {
                    return (attempt + 1, Err(GatewayError::DeadlineExceeded));
                }
                _ = ctx.cancelled() => return (attempt + 1, Err(GatewayError::Canceled)),
            };

            let retries_left = attempt < self.policy.max_retries;
            match result {
                Err(e) if retries_left => {
                    tracing::warn!(backend = %target, attempt, error = %e, "Network error, retrying");
                }
                Err(e) => return (attempt + 1, Err(GatewayError::Transport(e))),
                Ok(response) if retries_left && is_retryable_status(response.status()) => {
                    tracing::warn!(backend = %target, attempt, status = %response.status(), "Retryable status, retrying");
                    drop(response);
                }
                Ok(response) => return (attempt + 1, Ok(response)),
            }

            if let Err(e) = Self::wait(&mut ctx, backoff.current()).await {
                return (attempt + 1, Err(e));
            }
            backoff.advance();
            attempt += 1;
        }
    }

    /// Sleep for `delay` unless the deadline or a cancellation comes first.
    async fn wait(ctx: &mut BoundedContext, delay: Duration) -> Result<(), GatewayError> {
        let wake = Instant::now() + delay;
        let deadline = ctx.deadline;
        tokio::select! {
            biased;
            _ = ctx.cancelled() => Err(GatewayError::Canceled),
            _ = time::sleep_until(deadline), if deadline <= wake => Err(GatewayError::DeadlineExceeded),
            _ = time::sleep_until(wake) => Ok(()),
        }
    }
}
