//! Pre-trade cost composition
//!
//! net cost = predicted slippage + blended fees + market impact

use rust_decimal::prelude::ToPrimitive;
use tracing::{debug, trace};
use trading_core::MarketSnapshot;

use super::impact_engine::ImpactEngine;
use super::predictor::CostPredictor;
use super::volatility::VolatilityEstimator;
use crate::domain::{CostBreakdown, FeatureVector, FeeRates};

/// Combines the impact engine, a volatility source and a predictor into a
/// [`CostBreakdown`] per snapshot
#[derive(Debug, Clone, Default)]
pub struct CostEstimator {
    engine: ImpactEngine,
    volatility: VolatilityEstimator,
}

impl CostEstimator {
    pub fn new(engine: ImpactEngine, volatility: VolatilityEstimator) -> Self {
        Self { engine, volatility }
    }

    pub fn engine(&self) -> &ImpactEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ImpactEngine {
        &mut self.engine
    }

    pub fn volatility(&self) -> &VolatilityEstimator {
        &self.volatility
    }

    /// Estimate the cost of trading `trade_size` against `snapshot`
    ///
    /// Returns `None` while either side of the book is empty. The snapshot
    /// still feeds the volatility estimate in that case.
    pub fn estimate_cost(
        &mut self,
        snapshot: &MarketSnapshot,
        trade_size: f64,
        fee_rates: &FeeRates,
        predictor: &dyn CostPredictor,
    ) -> Option<CostBreakdown> {
        let sigma = self.volatility.observe(snapshot);

        if snapshot.best_bid().is_none() || snapshot.best_ask().is_none() {
            trace!(sequence = snapshot.sequence, "One-sided book, no cost estimate");
            return None;
        }
        let current_price = snapshot.mid_price()?.to_f64()?;

        let features = FeatureVector::from_snapshot(snapshot);
        let impact = self
            .engine
            .estimate(trade_size, current_price, sigma, snapshot);

        let slippage = finite_or_zero(predictor.predict_slippage(&features));
        let maker_proportion =
            sanitize_probability(predictor.predict_maker_probability(&features));
        let fees = finite_or_zero(fee_rates.cost(maker_proportion, trade_size));
        let net_cost = slippage + fees + impact.impact;

        debug!(
            sequence = snapshot.sequence,
            predictor = predictor.name(),
            trade_size,
            slippage,
            fees,
            market_impact = impact.impact,
            net_cost,
            "Cost estimate"
        );

        Some(CostBreakdown {
            trade_size,
            slippage,
            fees,
            market_impact: impact.impact,
            net_cost,
            maker_proportion,
            latency: snapshot.avg_latency,
            volatility: sigma,
            impact_method: impact.method,
        })
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

fn sanitize_probability(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.5
    }
}
