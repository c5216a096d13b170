//! Public API handlers.

use axum::{
    body::Body,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::gateway::RequestContext;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::registry::InstanceStatus;

/// `GET /data`: forward to a live backend and stream its response back.
///
/// Upstream status codes pass through unchanged, including a 5xx left
/// over after retries. Gateway failures become `503`. Shutdown does not
/// cancel the forward; the server's grace period bounds it instead.
pub async fn data(State(state): State<AppState>) -> Response {
    match state.gateway.forward(RequestContext::new()).await {
        Ok(upstream) => {
            let (parts, body) = upstream.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Err(e) if e.is_timeout() => {
            tracing::warn!(error = %e, "Forward timed out");
            (StatusCode::SERVICE_UNAVAILABLE, "Timeout").into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Service Unavailable");
            (StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable").into_response()
        }
    }
}

/// `GET /status`: every registered instance with its liveness.
pub async fn status(State(state): State<AppState>) -> Json<Vec<InstanceStatus>> {
    let instances = state.registry.status();
    let alive = instances.iter().filter(|i| i.alive).count();
    metrics::record_registry(alive, instances.len());
    Json(instances)
}
