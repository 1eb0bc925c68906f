//! Cost breakdown returned to callers

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::impact::ImpactMethod;

/// Pre-trade cost estimate for one trade size against one snapshot
///
/// Recomputed on every snapshot, never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub trade_size: f64,
    pub slippage: f64,
    pub fees: f64,
    pub market_impact: f64,
    /// slippage + fees + market_impact
    pub net_cost: f64,
    /// Probability of executing as maker, in [0, 1]
    pub maker_proportion: f64,
    /// Rolling average processing latency of the book
    pub latency: Duration,
    /// Volatility the impact model ran with
    pub volatility: f64,
    pub impact_method: ImpactMethod,
}

impl CostBreakdown {
    /// Net cost per unit traded, zero for an empty trade
    pub fn net_cost_per_unit(&self) -> f64 {
        if self.trade_size > 0.0 {
            self.net_cost / self.trade_size
        } else {
            0.0
        }
    }
}
