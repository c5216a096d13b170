//! Retry classification.
//!
//! # Responsibilities
//! - Decide whether an upstream status code is worth another attempt
//!
//! Transport failures are retried unconditionally by the caller; only
//! status codes need classifying.

use hyper::StatusCode;

/// Upstream statuses treated as transient.
pub const RETRYABLE_STATUSES: [StatusCode; 4] = [
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::BAD_GATEWAY,
    StatusCode::SERVICE_UNAVAILABLE,
    StatusCode::GATEWAY_TIMEOUT,
];

/// Return true if a response with `status` should be retried.
pub fn is_retryable_status(status: StatusCode) -> bool {
    RETRYABLE_STATUSES.contains(&status)
}
