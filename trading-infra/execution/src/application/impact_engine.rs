//! Impact engine: Almgren-Chriss with a linear safety net

use rust_decimal::prelude::ToPrimitive;
use tracing::{debug, warn};
use trading_core::MarketSnapshot;

use super::impact_models::{AlmgrenChriss, ImpactModel, LinearImpact};
use crate::domain::{ImpactEstimate, ModelParams};

/// Market impact estimation against live book state
///
/// Immutable during estimation; parameters only change through
/// [`ImpactEngine::recalibrate`].
#[derive(Debug, Clone)]
pub struct ImpactEngine {
    primary: AlmgrenChriss,
    fallback: LinearImpact,
}

impl Default for ImpactEngine {
    fn default() -> Self {
        Self::new(ModelParams::default())
    }
}

impl ImpactEngine {
    pub fn new(params: ModelParams) -> Self {
        Self {
            primary: AlmgrenChriss::new(params),
            fallback: LinearImpact::from_params(&params),
        }
    }

    pub fn params(&self) -> &ModelParams {
        self.primary.params()
    }

    /// Replace η, γ, T, N (and the default σ)
    pub fn recalibrate(&mut self, params: ModelParams) {
        debug!(?params, "Recalibrating impact engine");
        *self = Self::new(params);
    }

    /// Estimate impact of `trade_size` with liquidity taken from `snapshot`
    pub fn estimate(
        &self,
        trade_size: f64,
        current_price: f64,
        volatility: f64,
        snapshot: &MarketSnapshot,
    ) -> ImpactEstimate {
        let liquidity = snapshot.total_depth().to_f64().unwrap_or(0.0);
        self.estimate_with_liquidity(trade_size, current_price, volatility, liquidity)
    }

    /// Estimate impact with an explicit liquidity figure
    ///
    /// The result is always finite.
    pub fn estimate_with_liquidity(
        &self,
        trade_size: f64,
        current_price: f64,
        volatility: f64,
        liquidity: f64,
    ) -> ImpactEstimate {
        if !trade_size.is_finite() || trade_size < 0.0 {
            warn!(trade_size, "Invalid trade size, reporting zero impact");
            return ImpactEstimate::zero(current_price);
        }

        let volatility = if volatility.is_finite() && volatility >= 0.0 {
            volatility
        } else {
            warn!(
                volatility,
                fallback_sigma = self.params().sigma,
                "Invalid volatility, using model default"
            );
            self.params().sigma
        };
        let liquidity = if liquidity.is_finite() { liquidity.max(0.0) } else { 0.0 };

        let estimate = self
            .primary
            .estimate(trade_size, volatility, liquidity, current_price);
        if is_finite(&estimate) {
            debug!(
                model = self.primary.name(),
                temporary = estimate.temporary,
                permanent = estimate.permanent,
                expected_shortfall = estimate.expected_shortfall,
                "Market impact"
            );
            return estimate;
        }

        warn!(
            trade_size,
            volatility,
            liquidity,
            "Non-finite impact from optimal trajectory, falling back to linear model"
        );
        let fallback = self
            .fallback
            .estimate(trade_size, volatility, liquidity, current_price);
        if is_finite(&fallback) {
            fallback
        } else {
            ImpactEstimate {
                impact: fallback.permanent,
                temporary: 0.0,
                expected_shortfall: fallback.permanent,
                ..fallback
            }
        }
    }
}

fn is_finite(estimate: &ImpactEstimate) -> bool {
    estimate.impact.is_finite()
        && estimate.temporary.is_finite()
        && estimate.permanent.is_finite()
        && estimate.expected_shortfall.is_finite()
        && estimate.trajectory.iter().all(|v| v.is_finite())
}
