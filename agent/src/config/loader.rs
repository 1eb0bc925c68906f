use std::path::Path;

use super::types::AgentConfig;
use crate::error::ConfigError;

/// Load agent configuration from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AgentConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Load configuration from a JSON string
pub fn load_config_from_str(json: &str) -> Result<AgentConfig, ConfigError> {
    let config: AgentConfig = serde_json::from_str(json)?;
    Ok(config)
}

/// Load the default embedded configuration
pub fn load_default_config() -> Result<AgentConfig, ConfigError> {
    let default_config = include_str!("agent_config.json");
    load_config_from_str(default_config)
}
