//! Infrastructure Layer - Inbound adapters from upstream systems
//!
//! This layer contains adapters for systems we consume from:
//! - WsTransport: WebSocket client for exchange streams
//! - Parsers: feed message decoding into domain types
//!
//! Follows Hexagonal Architecture:
//! - Infrastructure = inbound (exchange → gateway)
//! - Presentation = outbound (gateway → consumers)

pub mod parsers;
pub mod ws_client;

pub use parsers::{MAX_LEVEL_VALUE, parse_book_update, parse_feed_message};
pub use ws_client::{WsSession, WsTransport};
