use serde::{Deserialize, Serialize};

use execution::ExecutionConfigJson;
use gateway::{FeedConfig, FeedConfigJson, IngestionConfigJson, ReconnectConfigJson};

use crate::error::ConfigError;

/// Root configuration for the cost agent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default)]
    pub feed: FeedConfigJson,
    #[serde(default)]
    pub reconnect: ReconnectConfigJson,
    #[serde(default)]
    pub ingestion: IngestionConfigJson,
    #[serde(default)]
    pub execution: ExecutionConfigJson,
}

impl AgentConfig {
    /// Feed connection settings with the reconnect policy applied
    pub fn feed_config(&self) -> FeedConfig {
        self.feed.to_feed_config(&self.reconnect)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.feed.validate()?;
        self.reconnect.validate()?;
        self.ingestion.validate()?;
        self.execution.validate()?;
        Ok(())
    }
}
