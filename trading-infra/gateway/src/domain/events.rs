use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parsed inbound feed message - core domain event
#[derive(Debug, Clone, PartialEq)]
pub enum FeedMessage {
    /// Control event (`event` field present)
    Control(ControlEvent),
    /// Book data (`data` field present and non-empty), shape not yet validated
    Book(BookMessage),
    /// Well-formed message carrying neither an event nor book data
    Ignored,
}

/// Control events sent by the remote side
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlKind {
    Subscribed,
    Unsubscribed,
    Error,
    Other(String),
}

impl ControlKind {
    pub fn from_event(event: &str) -> Self {
        match event {
            "subscribe" => ControlKind::Subscribed,
            "unsubscribe" => ControlKind::Unsubscribed,
            "error" => ControlKind::Error,
            other => ControlKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ControlKind::Subscribed => "subscribe",
            ControlKind::Unsubscribed => "unsubscribe",
            ControlKind::Error => "error",
            ControlKind::Other(event) => event,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControlEvent {
    pub kind: ControlKind,
    pub code: Option<String>,
    pub msg: Option<String>,
}

impl ControlEvent {
    pub fn is_error(&self) -> bool {
        self.kind == ControlKind::Error
    }

    /// Human readable summary for logs
    pub fn describe(&self) -> String {
        match (&self.code, &self.msg) {
            (Some(code), Some(msg)) => format!("{} (code {}): {}", self.kind.as_str(), code, msg),
            (Some(code), None) => format!("{} (code {})", self.kind.as_str(), code),
            (None, Some(msg)) => format!("{}: {}", self.kind.as_str(), msg),
            (None, None) => self.kind.as_str().to_string(),
        }
    }
}

/// Whether a book message replaces the book or amends it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookAction {
    Snapshot,
    #[default]
    Update,
}

impl BookAction {
    pub fn from_action(action: Option<&str>) -> Self {
        match action {
            Some("snapshot") => BookAction::Snapshot,
            _ => BookAction::Update,
        }
    }
}

/// Raw book payload as received, validated by the ingestion pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct BookMessage {
    pub action: BookAction,
    pub data: Value,
}

/// Validated book delta ready to apply
#[derive(Debug, Clone, PartialEq)]
pub struct BookUpdate {
    pub action: BookAction,
    /// (price, size) pairs; size zero removes the level
    pub bids: Vec<(Decimal, Decimal)>,
    pub asks: Vec<(Decimal, Decimal)>,
    /// Exchange timestamp if the payload carried one
    pub timestamp: Option<DateTime<Utc>>,
}

/// Events produced by a feed connection, in arrival order
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    /// A new session was established and subscribed. The book must be rebuilt.
    Connected { session: u64 },
    /// Parsed message from the current session
    Message(FeedMessage),
}

/// Subscription request sent after each handshake (OKX-compatible)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionRequest {
    pub op: String,
    pub args: Vec<SubscriptionArg>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionArg {
    pub channel: String,
    #[serde(rename = "instId")]
    pub inst_id: String,
    #[serde(rename = "instType", default, skip_serializing_if = "Option::is_none")]
    pub inst_type: Option<String>,
}

impl SubscriptionRequest {
    pub fn subscribe(args: Vec<SubscriptionArg>) -> Self {
        SubscriptionRequest {
            op: "subscribe".to_string(),
            args,
        }
    }

    /// Subscribe to the full-depth `books` channel for one instrument
    pub fn books(inst_id: impl Into<String>, inst_type: Option<String>) -> Self {
        Self::subscribe(vec![SubscriptionArg {
            channel: "books".to_string(),
            inst_id: inst_id.into(),
            inst_type,
        }])
    }
}
