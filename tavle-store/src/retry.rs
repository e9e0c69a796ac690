//! Bounded retry with exponential backoff for backend mutations.

use crate::error::Result;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// Configuration for retry behavior
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Maximum number of retries after the first attempt
    pub max_retries: u32,
    /// Initial delay between retries
    pub initial_delay: Duration,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f64,
    /// Maximum delay between retries
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_delay: Duration::from_millis(200),
            backoff_multiplier: 2.0,
            max_delay: Duration::from_secs(2),
        }
    }
}

impl RetryConfig {
    /// A config that never retries. Useful for tests and for callers that
    /// do their own scheduling.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }
}

/// Run `operation` until it succeeds, fails with a non-retryable error, or
/// exhausts the retry budget. The last error is returned as-is.
pub async fn with_retry<T, F, Fut>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0u32;
    let mut delay = config.initial_delay;

    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 0 {
                    info!(
                        "operation '{}' succeeded after {} {}",
                        operation_name,
                        attempt,
                        if attempt == 1 { "retry" } else { "retries" }
                    );
                }
                return Ok(value);
            }
            Err(error) => {
                attempt += 1;

                if !error.is_retryable() {
                    return Err(error);
                }

                if attempt > config.max_retries {
                    warn!(
                        "operation '{}' failed after {} attempts: {}",
                        operation_name, attempt, error
                    );
                    return Err(error);
                }

                warn!(
                    "operation '{}' attempt {} failed: {}. Retrying in {:?}",
                    operation_name, attempt, error, delay
                );
                sleep(delay).await;
                delay = next_delay(config, delay);
            }
        }
    }
}

/// Next backoff delay, capped at the configured maximum.
fn next_delay(config: &RetryConfig, current: Duration) -> Duration {
    let scaled = current.as_millis() as f64 * config.backoff_multiplier;
    Duration::from_millis(scaled as u64).min(config.max_delay)
}
