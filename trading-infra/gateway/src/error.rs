//! Error types for the gateway crate

use thiserror::Error;

/// Transport-level errors
///
/// Infrastructure implementations convert their specific errors to this type
/// so the connection loop does not depend on a particular WebSocket library.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Send failed: {0}")]
    Send(String),

    #[error("Receive failed: {0}")]
    Receive(String),
}

/// Errors raised while decoding an inbound feed message
#[derive(Error, Debug)]
pub enum FeedParseError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid message shape: {0}")]
    InvalidShape(&'static str),

    #[error("Invalid {side} level at index {index}: {reason}")]
    InvalidLevel {
        side: &'static str,
        index: usize,
        reason: String,
    },
}

/// Configuration validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid feed URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Unsupported feed URL scheme: {0} (expected ws or wss)")]
    UnsupportedScheme(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },
}

/// Snapshot publication errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishError {
    #[error("Snapshot subscriber closed")]
    Closed,
}
