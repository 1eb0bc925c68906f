use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::application::{FeedConfig, IngestionConfig, ReconnectConfig};
use crate::domain::{SubscriptionArg, SubscriptionRequest};
use crate::error::ConfigError;

/// Feed section (JSON representation)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfigJson {
    /// WebSocket URL
    #[serde(default = "default_ws_url")]
    pub ws_url: String,
    /// Subscription sent after every handshake
    #[serde(default)]
    pub subscription: SubscriptionConfigJson,
    /// Capacity of the producer → ingestion channel
    #[serde(default = "default_feed_buffer")]
    pub feed_buffer: usize,
    /// Capacity of the ingestion → cost model channel
    #[serde(default = "default_snapshot_buffer")]
    pub snapshot_buffer: usize,
}

impl Default for FeedConfigJson {
    fn default() -> Self {
        FeedConfigJson {
            ws_url: default_ws_url(),
            subscription: SubscriptionConfigJson::default(),
            feed_buffer: default_feed_buffer(),
            snapshot_buffer: default_snapshot_buffer(),
        }
    }
}

impl FeedConfigJson {
    /// Convert to application-layer FeedConfig
    pub fn to_feed_config(&self, reconnect: &ReconnectConfigJson) -> FeedConfig {
        FeedConfig::new(self.ws_url.clone(), self.subscription.to_request())
            .with_reconnect(reconnect.to_reconnect_config())
            .with_buffer(self.feed_buffer)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.ws_url).map_err(|source| ConfigError::InvalidUrl {
            url: self.ws_url.clone(),
            source,
        })?;
        if !matches!(url.scheme(), "ws" | "wss") {
            return Err(ConfigError::UnsupportedScheme(url.scheme().to_string()));
        }
        if self.feed_buffer == 0 {
            return Err(ConfigError::InvalidValue {
                field: "feed.feed_buffer",
                reason: "must be at least 1",
            });
        }
        if self.snapshot_buffer == 0 {
            return Err(ConfigError::InvalidValue {
                field: "feed.snapshot_buffer",
                reason: "must be at least 1",
            });
        }
        self.subscription.validate()
    }
}

/// Subscription request (JSON representation)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionConfigJson {
    #[serde(default = "default_op")]
    pub op: String,
    #[serde(default = "default_channel")]
    pub channel: String,
    #[serde(default = "default_inst_id")]
    pub inst_id: String,
    #[serde(default = "default_inst_type")]
    pub inst_type: Option<String>,
}

impl Default for SubscriptionConfigJson {
    fn default() -> Self {
        SubscriptionConfigJson {
            op: default_op(),
            channel: default_channel(),
            inst_id: default_inst_id(),
            inst_type: default_inst_type(),
        }
    }
}

impl SubscriptionConfigJson {
    pub fn to_request(&self) -> SubscriptionRequest {
        SubscriptionRequest {
            op: self.op.clone(),
            args: vec![SubscriptionArg {
                channel: self.channel.clone(),
                inst_id: self.inst_id.clone(),
                inst_type: self.inst_type.clone(),
            }],
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.channel.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "feed.subscription.channel",
                reason: "must not be empty",
            });
        }
        if self.inst_id.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "feed.subscription.inst_id",
                reason: "must not be empty",
            });
        }
        Ok(())
    }
}

/// Reconnect policy (JSON representation)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconnectConfigJson {
    #[serde(default = "default_initial_delay")]
    pub initial_delay_ms: u64,
    #[serde(default = "default_max_delay")]
    pub max_delay_ms: u64,
    #[serde(default = "default_stability_window")]
    pub stability_window_ms: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_ms: u64,
}

impl Default for ReconnectConfigJson {
    fn default() -> Self {
        ReconnectConfigJson {
            initial_delay_ms: default_initial_delay(),
            max_delay_ms: default_max_delay(),
            stability_window_ms: default_stability_window(),
            max_retries: default_max_retries(),
            connect_timeout_ms: default_connect_timeout(),
        }
    }
}

impl ReconnectConfigJson {
    /// Convert to application-layer ReconnectConfig
    pub fn to_reconnect_config(&self) -> ReconnectConfig {
        ReconnectConfig {
            initial_delay: Duration::from_millis(self.initial_delay_ms),
            max_delay: Duration::from_millis(self.max_delay_ms),
            stability_window: Duration::from_millis(self.stability_window_ms),
            max_retries: self.max_retries,
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_retries == 0 {
            return Err(ConfigError::InvalidValue {
                field: "reconnect.max_retries",
                reason: "must be at least 1",
            });
        }
        if self.max_delay_ms < self.initial_delay_ms {
            return Err(ConfigError::InvalidValue {
                field: "reconnect.max_delay_ms",
                reason: "must not be below initial_delay_ms",
            });
        }
        if self.connect_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "reconnect.connect_timeout_ms",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}

/// Ingestion pipeline (JSON representation)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestionConfigJson {
    #[serde(default = "default_depth_levels")]
    pub depth_levels: usize,
    #[serde(default = "default_latency_samples")]
    pub latency_samples: usize,
}

impl Default for IngestionConfigJson {
    fn default() -> Self {
        IngestionConfigJson {
            depth_levels: default_depth_levels(),
            latency_samples: default_latency_samples(),
        }
    }
}

impl IngestionConfigJson {
    /// Convert to application-layer IngestionConfig
    pub fn to_ingestion_config(&self) -> IngestionConfig {
        IngestionConfig {
            depth_levels: self.depth_levels,
            latency_samples: self.latency_samples,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth_levels == 0 {
            return Err(ConfigError::InvalidValue {
                field: "ingestion.depth_levels",
                reason: "must be at least 1",
            });
        }
        if self.latency_samples == 0 {
            return Err(ConfigError::InvalidValue {
                field: "ingestion.latency_samples",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}

fn default_ws_url() -> String {
    "wss://ws.okx.com:8443/ws/v5/public".to_string()
}

fn default_feed_buffer() -> usize {
    1024
}

fn default_snapshot_buffer() -> usize {
    256
}

fn default_op() -> String {
    "subscribe".to_string()
}

fn default_channel() -> String {
    "books".to_string()
}

fn default_inst_id() -> String {
    "BTC-USDT-SWAP".to_string()
}

fn default_inst_type() -> Option<String> {
    Some("SWAP".to_string())
}

fn default_initial_delay() -> u64 {
    1_000
}

fn default_max_delay() -> u64 {
    30_000
}

fn default_stability_window() -> u64 {
    60_000
}

fn default_max_retries() -> u32 {
    10
}

fn default_connect_timeout() -> u64 {
    10_000
}

fn default_depth_levels() -> usize {
    10
}

fn default_latency_samples() -> usize {
    1_000
}
