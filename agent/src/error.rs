use thiserror::Error;

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid feed configuration: {0}")]
    Feed(#[from] gateway::ConfigError),

    #[error("Invalid execution configuration: {0}")]
    Execution(#[from] execution::ConfigError),
}

/// Errors surfaced by the cost monitor
#[derive(Error, Debug)]
pub enum AgentError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Feed ingestion exhausted after {attempts} reconnect attempts")]
    IngestionExhausted { attempts: u32 },

    #[error("Feed ingestion failed: {0}")]
    IngestionFailed(String),
}
