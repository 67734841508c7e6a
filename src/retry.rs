//! Retry loop with exponential backoff and an elapsed-time budget.
//!
//! Every error is retried until the budget runs out. Nothing distinguishes a
//! transient failure (timeout, 5xx) from one that will never succeed
//! (unsupported content type, malformed JSON).
// TODO: classify FetchError variants so decode and content-type failures stop the loop early.

use log::{debug, warn};
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Delay before the first retry.
pub const INITIAL_INTERVAL: Duration = Duration::from_millis(500);

/// Growth factor applied to the delay after each failed attempt.
pub const MULTIPLIER: f64 = 2.0;

/// Upper bound for a single delay.
pub const MAX_INTERVAL: Duration = Duration::from_secs(5);

/// Total time budget across all attempts.
pub const MAX_ELAPSED_TIME: Duration = Duration::from_secs(30);

/// Backoff schedule for [`retry`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExponentialBackoff {
    pub initial_interval: Duration,
    pub multiplier: f64,
    pub max_interval: Duration,
    pub max_elapsed_time: Duration,
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self {
            initial_interval: INITIAL_INTERVAL,
            multiplier: MULTIPLIER,
            max_interval: MAX_INTERVAL,
            max_elapsed_time: MAX_ELAPSED_TIME,
        }
    }
}

impl ExponentialBackoff {
    pub fn with_max_elapsed_time(mut self, max_elapsed_time: Duration) -> Self {
        self.max_elapsed_time = max_elapsed_time;
        self
    }

    /// Delay after the given failed attempt (1-based), capped at `max_interval`.
    pub fn interval(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        let secs = self.initial_interval.as_secs_f64() * self.multiplier.powi(exponent);

        if !secs.is_finite() || secs >= self.max_interval.as_secs_f64() {
            self.max_interval
        } else {
            Duration::from_secs_f64(secs)
        }
    }
}

/// Runs `operation` until it succeeds or the backoff budget is spent.
///
/// The last sleep is shortened so it never runs past `max_elapsed_time`.
/// Once the budget is exhausted the most recent error is returned.
pub async fn retry<F, Fut, T, E>(
    operation_name: &str,
    backoff: &ExponentialBackoff,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let start = Instant::now();
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;

        let error = match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => e,
        };

        let remaining = backoff.max_elapsed_time.saturating_sub(start.elapsed());
        if remaining.is_zero() {
            debug!(
                "{}: giving up after {} attempts in {:?}: {}",
                operation_name,
                attempt,
                start.elapsed(),
                error
            );
            return Err(error);
        }

        let delay = backoff.interval(attempt).min(remaining);
        warn!(
            "{}: attempt {} failed ({}), retrying in {}ms...",
            operation_name,
            attempt,
            error,
            delay.as_millis()
        );
        tokio::time::sleep(delay).await;
    }
}

/// [`retry`] with the default schedule: 500ms doubling up to 5s, 30s in total.
pub async fn retry_default<F, Fut, T, E>(operation_name: &str, operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    retry(operation_name, &ExponentialBackoff::default(), operation).await
}
