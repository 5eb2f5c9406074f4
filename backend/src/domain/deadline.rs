//! Per-request time budget shared by every store call in a request.

use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, timeout_at};

/// Default budget for a single registry request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(1);

/// Returned when the deadline elapses before a store call completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("request deadline elapsed")]
pub struct DeadlineElapsed;

/// Absolute instant after which store calls are abandoned.
///
/// A single deadline is created per request and applied to each store call
/// in turn, so the budget covers the whole request rather than each call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline(Instant);

impl Deadline {
    /// Deadline `budget` from now.
    pub fn after(budget: Duration) -> Self {
        Self(Instant::now() + budget)
    }

    /// Drive `fut` to completion unless the deadline passes first.
    pub async fn run<F>(&self, fut: F) -> Result<F::Output, DeadlineElapsed>
    where
        F: Future,
    {
        timeout_at(self.0, fut).await.map_err(|_| DeadlineElapsed)
    }
}
