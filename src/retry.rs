//! Bounded retry with exponential backoff for transient NCBI failures

use std::future::Future;
use std::time::Duration;

use tokio_retry::strategy::{jitter, ExponentialBackoff};
use tokio_retry::RetryIf;
use tracing::warn;

use crate::error::Result;

/// Marker trait deciding whether an error is worth retrying
pub trait RetryableError {
    fn is_retryable(&self) -> bool;
}

/// Retry policy for API requests
///
/// Delays roughly double per attempt, starting at `initial_delay`, with
/// jitter applied and each delay capped at `max_delay`.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retries after the initial attempt
    pub max_retries: usize,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Upper bound for any single delay
    pub max_delay: Duration,
}

impl RetryConfig {
    /// Disable retries entirely (single attempt per request)
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, initial_delay: Duration) -> Self {
        self.initial_delay = initial_delay;
        self
    }

    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
        }
    }
}

/// Run `operation`, retrying retryable failures per `config`
///
/// Non-retryable errors are surfaced immediately; retryable errors are
/// surfaced once the retry budget is exhausted.
pub(crate) async fn with_retry<T, F, Fut>(
    operation: F,
    config: &RetryConfig,
    description: &str,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    // factor doubles the base-2 exponent schedule into real delays
    let initial_ms = config.initial_delay.as_millis().max(1) as u64;
    let strategy = ExponentialBackoff::from_millis(2)
        .factor((initial_ms / 2).max(1))
        .max_delay(config.max_delay)
        .map(jitter)
        .take(config.max_retries);

    RetryIf::spawn(strategy, operation, |err: &crate::error::EntrezError| {
        let retryable = err.is_retryable();
        if retryable {
            warn!(error = %err, operation = description, "Transient failure, will retry");
        }
        retryable
    })
    .await
}
