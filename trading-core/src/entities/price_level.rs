use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a single price level in the order book
///
/// A level only exists while its size is strictly positive. The book removes
/// a level instead of storing it with zero size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceLevel {
    pub price: Decimal,
    pub size: Decimal,
}

impl PriceLevel {
    pub fn new(price: Decimal, size: Decimal) -> Self {
        PriceLevel { price, size }
    }

    pub fn is_empty(&self) -> bool {
        self.size.is_zero()
    }

    /// Notional value of the level (price × size)
    pub fn notional(&self) -> Decimal {
        self.price * self.size
    }
}

impl From<(Decimal, Decimal)> for PriceLevel {
    fn from((price, size): (Decimal, Decimal)) -> Self {
        PriceLevel { price, size }
    }
}
