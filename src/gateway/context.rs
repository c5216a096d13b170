//! Caller context for a forwarded request.

use std::time::Duration;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tokio::time::Instant;

/// Deadline and cancellation supplied by whoever triggers a forward.
///
/// Cancellation reuses the broadcast primitive handed out by
/// [`Shutdown::subscribe`](crate::lifecycle::Shutdown::subscribe). Dropping
/// the forward future cancels as well; the signal only matters when the
/// caller needs a distinct [`Canceled`](crate::gateway::GatewayError::Canceled)
/// outcome.
#[derive(Debug, Default)]
pub struct RequestContext {
    deadline: Option<Instant>,
    cancel: Option<broadcast::Receiver<()>>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an absolute caller deadline.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set the caller deadline relative to now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Abort the forward when `signal` fires.
    pub fn with_cancellation(mut self, signal: broadcast::Receiver<()>) -> Self {
        self.cancel = Some(signal);
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Derive a child context whose deadline is at most `timeout` from now.
    pub(crate) fn bounded(self, timeout: Duration) -> BoundedContext {
        let local = Instant::now() + timeout;
        let deadline = match self.deadline {
            Some(caller) if caller < local => caller,
            _ => local,
        };
        BoundedContext {
            deadline,
            cancel: self.cancel,
        }
    }
}

/// Context with a fixed deadline, owned by one forward call.
#[derive(Debug)]
pub(crate) struct BoundedContext {
    pub(crate) deadline: Instant,
    cancel: Option<broadcast::Receiver<()>>,
}

impl BoundedContext {
    pub(crate) fn is_expired(&self) -> bool {
        Instant::now() >= self.deadline
    }

    /// Non-blocking check for a pending cancellation.
    pub(crate) fn is_cancelled(&mut self) -> bool {
        match self.cancel.as_mut() {
            Some(rx) => matches!(rx.try_recv(), Ok(()) | Err(TryRecvError::Lagged(_))),
            None => false,
        }
    }

    /// Resolve once the caller cancels. Pends forever without a signal
    /// or once every sender is gone.
    pub(crate) async fn cancelled(&mut self) {
        match self.cancel.as_mut() {
            Some(rx) => match rx.recv().await {
                Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => {}
                Err(broadcast::error::RecvError::Closed) => std::future::pending().await,
            },
            None => std::future::pending().await,
        }
    }
}
