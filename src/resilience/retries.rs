//! Retry logic.
//!
//! # Responsibilities
//! - Decide whether a failure is worth another attempt
//! - Execute retries with exponential backoff + jitter
//!
//! # Design Decisions
//! - Errors opt in through [`Retryable`]; anything else fails immediately
//! - Attempts are bounded by `max_attempts`, first call included

use std::fmt::Display;
use std::future::Future;

use crate::config::RetryConfig;
use crate::resilience::backoff::calculate_backoff;

/// Errors that know whether repeating the operation could help.
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

/// Retry policy built from [`RetryConfig`].
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay_ms: u64,
    max_delay_ms: u64,
}

impl RetryPolicy {
    pub fn from_config(config: &RetryConfig) -> Self {
        let max_attempts = if config.enabled {
            config.max_attempts.max(1)
        } else {
            1
        };
        Self {
            max_attempts,
            base_delay_ms: config.base_delay_ms,
            max_delay_ms: config.max_delay_ms,
        }
    }

    /// A policy that calls the operation once.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            base_delay_ms: 0,
            max_delay_ms: 0,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Run `op`, retrying retryable failures with backoff.
    ///
    /// `operation` names the call in log events.
    pub async fn execute<T, E, F, Fut>(&self, operation: &'static str, mut op: F) -> Result<T, E>
    where
        E: Retryable + Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut attempt = 0;
        loop {
            match op().await {
                Ok(value) => {
                    if attempt > 0 {
                        tracing::info!(operation, attempts = attempt + 1, "Operation succeeded after retries");
                    }
                    return Ok(value);
                }
                Err(err) => {
                    if !err.is_retryable() {
                        tracing::debug!(operation, error = %err, "Error is not retryable");
                        return Err(err);
                    }
                    attempt += 1;
                    if attempt >= self.max_attempts {
                        tracing::warn!(operation, error = %err, attempts = attempt, "Max retries exceeded");
                        return Err(err);
                    }

                    let delay = calculate_backoff(attempt, self.base_delay_ms, self.max_delay_ms);
                    tracing::debug!(
                        operation,
                        error = %err,
                        attempt,
                        backoff_ms = delay.as_millis() as u64,
                        "Retrying operation"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
