//! Linear Impact Model
//!
//! Closed-form estimate used when the optimal trajectory cannot be computed.
//!
//! Impact = γ × X + η × σ × √(X / L)
//!
//! Where:
//! - γ = permanent impact coefficient
//! - η = temporary impact coefficient
//! - L = visible liquidity (bid depth + ask depth)
//!
//! With no liquidity, or a non-finite temporary term, only γ × X is reported.

use super::protocol::ImpactModel;
use crate::domain::{ImpactEstimate, ImpactMethod, ModelParams};

/// Linear impact model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearImpact {
    eta: f64,
    gamma: f64,
}

impl LinearImpact {
    pub fn new(eta: f64, gamma: f64) -> Self {
        Self { eta, gamma }
    }

    pub fn from_params(params: &ModelParams) -> Self {
        Self::new(params.eta, params.gamma)
    }
}

impl Default for LinearImpact {
    fn default() -> Self {
        Self::from_params(&ModelParams::default())
    }
}

impl ImpactModel for LinearImpact {
    fn estimate(
        &self,
        trade_size: f64,
        volatility: f64,
        liquidity: f64,
        reference_price: f64,
    ) -> ImpactEstimate {
        let permanent = self.gamma * trade_size;
        let temporary = if liquidity > 0.0 {
            let term = self.eta * volatility * (trade_size / liquidity).sqrt();
            if term.is_finite() { term } else { 0.0 }
        } else {
            0.0
        };

        ImpactEstimate {
            impact: permanent + temporary,
            temporary,
            permanent,
            expected_shortfall: permanent + temporary,
            trajectory: vec![trade_size],
            method: ImpactMethod::LinearFallback,
            reference_price,
        }
    }

    fn name(&self) -> &str {
        "linear"
    }
}
