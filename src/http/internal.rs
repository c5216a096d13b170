//! Internal API handlers used by backends to join the pool.
//!
//! The request body is the backend address as plain text. Surrounding
//! whitespace is stripped; an empty address is rejected here so the
//! registry never sees one.

use axum::{extract::State, http::StatusCode, response::IntoResponse};

use crate::http::server::AppState;

fn parse_address(body: &str) -> Option<&str> {
    let address = body.trim();
    (!address.is_empty()).then_some(address)
}

/// `POST /register`: add or refresh a backend. Replies `201 Created`.
pub async fn register(State(state): State<AppState>, body: String) -> impl IntoResponse {
    let Some(address) = parse_address(&body) else {
        return (StatusCode::BAD_REQUEST, "missing address").into_response();
    };

    state.registry.register(address);
    tracing::info!(address = %address, "Registered");
    StatusCode::CREATED.into_response()
}

/// `POST /heartbeat`: refresh a registered backend. Unknown addresses are
/// acknowledged but not registered.
pub async fn heartbeat(State(state): State<AppState>, body: String) -> impl IntoResponse {
    let Some(address) = parse_address(&body) else {
        return (StatusCode::BAD_REQUEST, "missing address").into_response();
    };

    if state.registry.heartbeat(address) {
        tracing::debug!(address = %address, "Heartbeat received");
    } else {
        tracing::warn!(address = %address, "Heartbeat from unregistered address ignored");
    }
    StatusCode::OK.into_response()
}

/// `GET /healthz`: liveness of the gateway process itself.
pub async fn healthz() -> &'static str {
    "Healthy"
}
