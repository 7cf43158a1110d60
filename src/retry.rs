//! Retry logic with exponential backoff
//!
//! Configurable retry for transient fetch failures, with exponential backoff
//! and optional jitter to prevent thundering herd. Retries are off by default
//! (`RetryConfig::max_attempts == 0`) so every fetch is a single attempt
//! unless the embedder opts in.

use crate::config::RetryConfig;
use crate::error::{Error, FetchError};
use rand::Rng;
use std::future::Future;
use std::time::Duration;

/// Trait for errors that can be classified as retryable or not
///
/// Transient failures (timeouts, connection resets, server overload) should
/// return `true`. Permanent failures (missing fields, parse errors, bad
/// configuration) should return `false`.
pub trait IsRetryable {
    /// Returns true if the error is transient and the operation should be retried
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for Error {
    fn is_retryable(&self) -> bool {
        match self {
            // Timeouts and connection failures are worth another attempt
            Error::Network(e) => e.is_timeout() || e.is_connect(),
            // Server overload and upstream hiccups are transient; anything
            // else (404, 403, ...) is a permanent answer
            Error::Fetch(FetchError::HttpStatus { status, .. }) => {
                *status == 429 || (500..=599).contains(status)
            }
            // A well-formed response without the expected field will not
            // grow the field on a second request
            Error::Fetch(FetchError::MissingField { .. }) => false,
            // Markup structure problems are permanent
            Error::Parse(_) => false,
            // Input and config errors are permanent
            Error::NegativeWordCount { .. } => false,
            Error::Config { .. } => false,
            Error::Serialization(_) => false,
        }
    }
}

/// Execute an async fetch operation with exponential backoff retry logic
///
/// # Arguments
///
/// * `config` - Retry configuration (max attempts, delays, backoff multiplier, jitter)
/// * `operation` - Async closure returning `Result<T, E>` where E implements [`IsRetryable`]
///
/// # Returns
///
/// The successful result, or the last error once attempts are exhausted or a
/// non-retryable error occurs. With `max_attempts == 0` the operation runs
/// exactly once.
pub async fn fetch_with_retry<F, Fut, T, E>(config: &RetryConfig, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: IsRetryable + std::fmt::Display,
{
    let mut attempt = 0;
    let mut delay = config.initial_delay;

    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    tracing::info!(attempts = attempt + 1, "Fetch succeeded after retry");
                }
                return Ok(result);
            }
            Err(e) if e.is_retryable() && attempt < config.max_attempts => {
                attempt += 1;

                tracing::warn!(
                    error = %e,
                    attempt = attempt,
                    max_attempts = config.max_attempts,
                    delay_ms = delay.as_millis(),
                    "Fetch failed, retrying"
                );

                let jittered_delay = if config.jitter {
                    add_jitter(delay)
                } else {
                    delay
                };

                tokio::time::sleep(jittered_delay).await;

                let next_delay =
                    Duration::from_secs_f64(delay.as_secs_f64() * config.backoff_multiplier);
                delay = next_delay.min(config.max_delay);
            }
            Err(e) => {
                if e.is_retryable() {
                    tracing::error!(
                        error = %e,
                        attempts = attempt + 1,
                        "Fetch failed after all retry attempts exhausted"
                    );
                } else {
                    tracing::error!(error = %e, "Fetch failed with non-retryable error");
                }
                return Err(e);
            }
        }
    }
}

/// Add random jitter to a delay
///
/// Jitter is uniformly distributed between 0% and 100% of the delay, so the
/// actual delay lands between `delay` and `2 * delay`.
fn add_jitter(delay: Duration) -> Duration {
    let mut rng = rand::thread_rng();
    let jitter_factor: f64 = rng.gen_range(0.0..=1.0);
    let jittered_secs = delay.as_secs_f64() * (1.0 + jitter_factor);
    Duration::from_secs_f64(jittered_secs)
}
