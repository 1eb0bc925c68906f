//! Market Data Messages
//!
//! The snapshot handed from the ingestion loop to downstream consumers.

use std::time::Duration;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::{PriceLevel, Timestamp};

/// Immutable view of the book produced once per processed update
///
/// Consumers never see the live mutable book, only these values. A snapshot
/// is fully built before it is published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Monotonic per-pipeline sequence number
    pub sequence: u64,
    /// Exchange timestamp when available, otherwise local receive time
    pub timestamp: Timestamp,
    /// Top bid levels (price descending)
    pub bids: Vec<PriceLevel>,
    /// Top ask levels (price ascending)
    pub asks: Vec<PriceLevel>,
    /// Sum of sizes across the bid levels above
    pub bid_depth: Decimal,
    /// Sum of sizes across the ask levels above
    pub ask_depth: Decimal,
    /// Time spent applying this update to the book
    pub processing_time: Duration,
    /// Rolling average of recent processing times
    pub avg_latency: Duration,
}

impl MarketSnapshot {
    /// Best bid level
    pub fn best_bid(&self) -> Option<&PriceLevel> {
        self.bids.first()
    }

    /// Best ask level
    pub fn best_ask(&self) -> Option<&PriceLevel> {
        self.asks.first()
    }

    /// Mid price, absent unless both sides have a level
    ///
    /// Also absent when the sum of the two prices overflows.
    pub fn mid_price(&self) -> Option<Decimal> {
        let bid = self.best_bid()?;
        let ask = self.best_ask()?;
        Some(bid.price.checked_add(ask.price)? / Decimal::TWO)
    }

    /// Spread (best ask - best bid). Negative for a crossed book.
    pub fn spread(&self) -> Option<Decimal> {
        let bid = self.best_bid()?;
        let ask = self.best_ask()?;
        ask.price.checked_sub(bid.price)
    }

    /// Total depth on both sides, saturating at `Decimal::MAX`
    pub fn total_depth(&self) -> Decimal {
        self.bid_depth.saturating_add(self.ask_depth)
    }

    /// Share of visible depth resting on the bid side, in [0, 1]
    ///
    /// Returns 0.5 when both sides are empty.
    pub fn depth_imbalance(&self) -> f64 {
        let total = self.total_depth();
        if total.is_zero() {
            return 0.5;
        }
        self.bid_depth
            .checked_div(total)
            .and_then(|share| share.to_f64())
            .unwrap_or(0.5)
    }

    /// Check if best bid >= best ask. Crossed books are passed through.
    pub fn is_crossed(&self) -> bool {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => bid.price >= ask.price,
            _ => false,
        }
    }

    /// Check if neither side has any level
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}
