//! Error types for the execution crate

use thiserror::Error;

/// Execution configuration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },

    #[error("Unknown fee tier {tier:?} (available: {available})")]
    UnknownFeeTier { tier: String, available: String },
}
