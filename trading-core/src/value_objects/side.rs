use serde::{Deserialize, Serialize};
use std::fmt;

/// Side of the order book a level rests on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Resting buy interest, best level is the highest price
    Bid,
    /// Resting sell interest, best level is the lowest price
    Ask,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Bid => write!(f, "bid"),
            Side::Ask => write!(f, "ask"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite() {
        assert_eq!(Side::Bid.opposite(), Side::Ask);
        assert_eq!(Side::Ask.opposite(), Side::Bid);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Side::Bid).unwrap();
        assert_eq!(json, "\"bid\"");
        let side: Side = serde_json::from_str("\"ask\"").unwrap();
        assert_eq!(side, Side::Ask);
    }
}
