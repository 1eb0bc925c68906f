//! Exponential backoff with a stability window

use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use super::config::ReconnectConfig;

/// What to do after a failed attempt or a lost session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Sleep for `delay`, then reconnect
    Retry { delay: Duration, retry_count: u32 },
    /// Retry ceiling reached
    Exhausted { retry_count: u32 },
}

/// Backoff state for one `connect_and_stream` invocation
///
/// The delay doubles after every failure up to `max_delay`. When more than
/// `stability_window` passes between two failures (the first one measured
/// from `started`), delay and retry count start over.
#[derive(Debug, Clone)]
pub struct ReconnectPolicy {
    config: ReconnectConfig,
    retry_count: u32,
    reconnect_delay: Duration,
    last_failure: Instant,
}

impl ReconnectPolicy {
    pub fn new(config: ReconnectConfig, started: Instant) -> Self {
        ReconnectPolicy {
            config,
            retry_count: 0,
            reconnect_delay: config.initial_delay,
            last_failure: started,
        }
    }

    /// Record a failure at `now` and decide the next step
    pub fn record_failure(&mut self, now: Instant) -> RetryDecision {
        let since_last = now.saturating_duration_since(self.last_failure);
        if since_last >= self.config.stability_window {
            debug!(
                stable_for_ms = since_last.as_millis() as u64,
                "Feed was stable, resetting backoff"
            );
            self.reset();
        }
        self.last_failure = now;

        self.retry_count = self.retry_count.saturating_add(1);
        if self.retry_count >= self.config.max_retries {
            return RetryDecision::Exhausted {
                retry_count: self.retry_count,
            };
        }

        let delay = self.reconnect_delay;
        self.reconnect_delay = delay
            .checked_mul(2)
            .unwrap_or(self.config.max_delay)
            .min(self.config.max_delay);

        RetryDecision::Retry {
            delay,
            retry_count: self.retry_count,
        }
    }

    /// Back to the initial delay and a zero retry count
    pub fn reset(&mut self) {
        self.retry_count = 0;
        self.reconnect_delay = self.config.initial_delay;
    }

    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    /// Delay the next retry would use
    pub fn reconnect_delay(&self) -> Duration {
        self.reconnect_delay
    }
}
