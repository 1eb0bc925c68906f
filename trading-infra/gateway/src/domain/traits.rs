use async_trait::async_trait;
use rust_decimal::Decimal;
use trading_core::{PriceLevel, Side};

use crate::error::TransportError;

/// Establishes sessions with a streaming source
///
/// Implements Dependency Inversion - the connection loop depends on this
/// abstraction, so it runs against a real socket or a scripted test double.
#[async_trait]
pub trait FeedTransport: Send + Sync + 'static {
    type Session: FeedSession;

    /// Open a session (handshake only, no subscription)
    async fn connect(&self, endpoint: &str) -> Result<Self::Session, TransportError>;
}

/// One live connection to a streaming source
#[async_trait]
pub trait FeedSession: Send + 'static {
    /// Send a text frame
    async fn send_text(&mut self, text: String) -> Result<(), TransportError>;

    /// Next text frame. `None` means the remote closed the session.
    async fn next_text(&mut self) -> Option<Result<String, TransportError>>;
}

/// Mutating half of the order book contract
///
/// Implements Interface Segregation - separated from read operations.
pub trait OrderBookWriter: Send {
    /// Upsert the level at `price`; a size of zero (or below) removes it
    fn apply_delta(&mut self, side: Side, price: Decimal, size: Decimal);

    /// Drop every level on both sides
    fn clear(&mut self);
}

/// Read half of the order book contract
///
/// Bids are reported best (highest) first, asks best (lowest) first.
pub trait DepthReader {
    /// Up to `depth` levels from the top of `side`
    fn top_of_book(&self, side: Side, depth: usize) -> Vec<PriceLevel>;

    /// Sum of sizes over the top `depth` levels, zero on an empty side
    ///
    /// Saturates at `Decimal::MAX` instead of overflowing.
    fn aggregate_depth(&self, side: Side, depth: usize) -> Decimal {
        self.top_of_book(side, depth)
            .iter()
            .fold(Decimal::ZERO, |total, level| total.saturating_add(level.size))
    }

    fn best_bid(&self) -> Option<PriceLevel> {
        self.top_of_book(Side::Bid, 1).into_iter().next()
    }

    fn best_ask(&self) -> Option<PriceLevel> {
        self.top_of_book(Side::Ask, 1).into_iter().next()
    }

    fn spread(&self) -> Option<Decimal> {
        self.best_ask()?.price.checked_sub(self.best_bid()?.price)
    }

    fn mid_price(&self) -> Option<Decimal> {
        Some(self.best_ask()?.price.checked_add(self.best_bid()?.price)? / Decimal::TWO)
    }
}

/// Combined book contract used by the ingestion pipeline
pub trait BookStore: OrderBookWriter + DepthReader {}

// Blanket implementation: anything implementing both traits is a BookStore
impl<T: OrderBookWriter + DepthReader> BookStore for T {}
