//! Model features derived from a market snapshot

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use trading_core::MarketSnapshot;

/// Number of features the predictor receives
pub const FEATURE_COUNT: usize = 6;

/// Predictor input, always in the order of [`FeatureVector::as_array`]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Size at the best bid
    pub volume: f64,
    /// Best ask - best bid
    pub spread: f64,
    /// bid_depth / (bid_depth + ask_depth), 0.5 when both are zero
    pub depth_imbalance: f64,
    /// spread / mid, 0 when mid is zero
    pub normalized_spread: f64,
    pub bid_depth: f64,
    pub ask_depth: f64,
}

impl FeatureVector {
    /// Derive features from a snapshot; missing sides contribute zeros
    pub fn from_snapshot(snapshot: &MarketSnapshot) -> Self {
        let volume = snapshot.best_bid().map(|l| to_f64(l.size)).unwrap_or(0.0);
        let spread = snapshot.spread().map(to_f64).unwrap_or(0.0);
        let mid = snapshot.mid_price().map(to_f64).unwrap_or(0.0);
        let normalized_spread = if mid != 0.0 { spread / mid } else { 0.0 };

        Self {
            volume,
            spread,
            depth_imbalance: snapshot.depth_imbalance(),
            normalized_spread,
            bid_depth: to_f64(snapshot.bid_depth),
            ask_depth: to_f64(snapshot.ask_depth),
        }
    }

    /// `[volume, spread, depth_imbalance, normalized_spread, bid_depth, ask_depth]`
    pub fn as_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.volume,
            self.spread,
            self.depth_imbalance,
            self.normalized_spread,
            self.bid_depth,
            self.ask_depth,
        ]
    }

    /// Total visible liquidity over the snapshot depth
    pub fn liquidity(&self) -> f64 {
        self.bid_depth + self.ask_depth
    }
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().filter(|v| v.is_finite()).unwrap_or(0.0)
}
