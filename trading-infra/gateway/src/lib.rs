//! Gateway Crate
//!
//! Market data gateway: keeps one exchange order-book subscription alive,
//! rebuilds the book from its deltas and publishes immutable snapshots to
//! downstream consumers.
//!
//! # Architecture
//!
//! The gateway:
//! - Connects to the exchange via WebSocket and subscribes
//! - Reconnects with exponential backoff, giving up after repeated failures
//! - Applies snapshot/update messages to a price-level order book
//! - Times each update and keeps a rolling latency window
//! - Publishes one `MarketSnapshot` per applied update
//!
//! ```text
//! ┌─────────────┐
//! │  Exchange   │
//! └──────┬──────┘
//!        │ WebSocket
//!        ▼
//! ┌──────────────────────────────────────────────────────┐
//! │                     Gateway                          │
//! │  ┌────────────────────────────────────────────────┐  │
//! │  │ FeedConnection (reconnect + backoff)           │  │
//! │  └──────────────────────┬─────────────────────────┘  │
//! │                         │ FeedEvent (bounded mpsc)   │
//! │  ┌──────────────────────▼─────────────────────────┐  │
//! │  │ IngestionPipeline → OrderBook                  │  │
//! │  └──────────────────────┬─────────────────────────┘  │
//! │                         │ MarketSnapshot             │
//! │  ┌──────────────────────▼─────────────────────────┐  │
//! │  │ SnapshotPublisher (mpsc + latest-value cell)   │  │
//! │  └────────────────────────────────────────────────┘  │
//! └──────────────────────────┬───────────────────────────┘
//!                            ▼
//!                     ┌─────────────┐
//!                     │ Cost model  │
//!                     └─────────────┘
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-export key types
pub use domain::events::{
    BookAction, BookMessage, BookUpdate, ControlEvent, ControlKind, FeedEvent, FeedMessage,
    SubscriptionArg, SubscriptionRequest,
};
pub use domain::feed_status::{ConnectionLoss, FeedTermination};
pub use domain::order_book::OrderBook;
pub use domain::traits::{BookStore, DepthReader, FeedSession, FeedTransport, OrderBookWriter};

pub use application::config::{FeedConfig, IngestionConfig, ReconnectConfig};
pub use application::feed_connection::{FeedConnection, FeedStream};
pub use application::ingestion::{IngestionPipeline, run_ingestion};
pub use application::reconnect::{ReconnectPolicy, RetryDecision};
pub use application::shutdown::{ShutdownHandle, ShutdownListener, shutdown_channel};

pub use infrastructure::parsers::{MAX_LEVEL_VALUE, parse_book_update, parse_feed_message};
pub use infrastructure::ws_client::{WsSession, WsTransport};

pub use presentation::{SnapshotPublisher, SnapshotReader, SnapshotSubscriber, snapshot_channel};

pub use config::{FeedConfigJson, IngestionConfigJson, ReconnectConfigJson, SubscriptionConfigJson};
pub use error::{ConfigError, FeedParseError, PublishError, TransportError};
