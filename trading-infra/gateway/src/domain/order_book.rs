use std::collections::BTreeMap;

use rust_decimal::Decimal;
use trading_core::{PriceLevel, Side};

use super::traits::{DepthReader, OrderBookWriter};

/// Price-level order book for a single instrument
///
/// Both sides are keyed by price in a `BTreeMap`, so ordering comes from the
/// map: bids are walked in reverse, asks forward. Stored sizes are always
/// strictly positive.
#[derive(Debug, Clone, Default)]
pub struct OrderBook {
    bids: BTreeMap<Decimal, Decimal>,
    asks: BTreeMap<Decimal, Decimal>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    fn side(&self, side: Side) -> &BTreeMap<Decimal, Decimal> {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut BTreeMap<Decimal, Decimal> {
        match side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        }
    }

    /// Levels of `side` in best-first order
    fn levels(&self, side: Side) -> Box<dyn Iterator<Item = (&Decimal, &Decimal)> + '_> {
        match side {
            Side::Bid => Box::new(self.bids.iter().rev()),
            Side::Ask => Box::new(self.asks.iter()),
        }
    }

    /// Number of price levels on `side`
    pub fn len(&self, side: Side) -> usize {
        self.side(side).len()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}

impl OrderBookWriter for OrderBook {
    fn apply_delta(&mut self, side: Side, price: Decimal, size: Decimal) {
        let book = self.side_mut(side);
        if size > Decimal::ZERO {
            book.insert(price, size);
        } else {
            book.remove(&price);
        }
    }

    fn clear(&mut self) {
        self.bids.clear();
        self.asks.clear();
    }
}

impl DepthReader for OrderBook {
    fn top_of_book(&self, side: Side, depth: usize) -> Vec<PriceLevel> {
        self.levels(side)
            .take(depth)
            .map(|(price, size)| PriceLevel::new(*price, *size))
            .collect()
    }

    fn aggregate_depth(&self, side: Side, depth: usize) -> Decimal {
        self.levels(side)
            .take(depth)
            .fold(Decimal::ZERO, |total, (_, size)| total.saturating_add(*size))
    }

    fn best_bid(&self) -> Option<PriceLevel> {
        self.bids
            .iter()
            .next_back()
            .map(|(price, size)| PriceLevel::new(*price, *size))
    }

    fn best_ask(&self) -> Option<PriceLevel> {
        self.asks
            .iter()
            .next()
            .map(|(price, size)| PriceLevel::new(*price, *size))
    }
}
