use std::time::Duration;

use trading_core::stats::DEFAULT_SAMPLE_CAPACITY;

use crate::domain::SubscriptionRequest;

/// Reconnect and backoff policy for a feed connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectConfig {
    /// First delay after a failure
    pub initial_delay: Duration,
    /// Upper bound for the doubling delay
    pub max_delay: Duration,
    /// Gap between failures after which the policy starts over
    pub stability_window: Duration,
    /// Consecutive failures before giving up
    pub max_retries: u32,
    /// Limit on a single handshake; an attempt that runs over counts as a failure
    pub connect_timeout: Duration,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        ReconnectConfig {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            stability_window: Duration::from_secs(60),
            max_retries: 10,
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl ReconnectConfig {
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub fn with_stability_window(mut self, window: Duration) -> Self {
        self.stability_window = window;
        self
    }

    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

/// Configuration for one feed connection
/// Application-level configuration
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// WebSocket endpoint
    pub endpoint: String,
    /// Sent after every handshake
    pub subscription: SubscriptionRequest,
    pub reconnect: ReconnectConfig,
    /// Capacity of the event channel between producer and consumer
    pub buffer: usize,
}

impl FeedConfig {
    pub fn new(endpoint: impl Into<String>, subscription: SubscriptionRequest) -> Self {
        FeedConfig {
            endpoint: endpoint.into(),
            subscription,
            reconnect: ReconnectConfig::default(),
            buffer: 1024,
        }
    }

    pub fn with_reconnect(mut self, reconnect: ReconnectConfig) -> Self {
        self.reconnect = reconnect;
        self
    }

    pub fn with_buffer(mut self, buffer: usize) -> Self {
        self.buffer = buffer.max(1);
        self
    }
}

/// Configuration for the ingestion pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestionConfig {
    /// Levels per side in each snapshot and in the depth sums
    pub depth_levels: usize,
    /// Capacity of the processing-latency window
    pub latency_samples: usize,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        IngestionConfig {
            depth_levels: 10,
            latency_samples: DEFAULT_SAMPLE_CAPACITY,
        }
    }
}

impl IngestionConfig {
    pub fn with_depth_levels(mut self, levels: usize) -> Self {
        self.depth_levels = levels;
        self
    }

    pub fn with_latency_samples(mut self, samples: usize) -> Self {
        self.latency_samples = samples;
        self
    }
}
