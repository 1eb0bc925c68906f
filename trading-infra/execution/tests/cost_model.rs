//! Impact engine and cost estimator against constructed snapshots

use std::time::Duration;

use approx::assert_relative_eq;
use chrono::Utc;
use execution::{
    CostEstimator, CostPredictor, FeatureVector, FeeRates, FeeSchedule, ImpactEngine, ImpactMethod,
    ModelParams, UnfittedPredictor, VolatilityEstimator, VolatilitySource,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use trading_core::{MarketSnapshot, PriceLevel};

fn snapshot(bids: &[(Decimal, Decimal)], asks: &[(Decimal, Decimal)]) -> MarketSnapshot {
    let bids: Vec<PriceLevel> = bids.iter().map(|&(p, s)| PriceLevel::new(p, s)).collect();
    let asks: Vec<PriceLevel> = asks.iter().map(|&(p, s)| PriceLevel::new(p, s)).collect();
    MarketSnapshot {
        sequence: 1,
        timestamp: Utc::now(),
        bid_depth: bids.iter().map(|l| l.size).sum(),
        ask_depth: asks.iter().map(|l| l.size).sum(),
        bids,
        asks,
        processing_time: Duration::from_micros(3),
        avg_latency: Duration::from_micros(7),
    }
}

fn two_sided() -> MarketSnapshot {
    snapshot(&[(dec!(100), dec!(2))], &[(dec!(101), dec!(3))])
}

struct FixedPredictor {
    slippage: f64,
    maker_probability: f64,
}

impl CostPredictor for FixedPredictor {
    fn predict_slippage(&self, _features: &FeatureVector) -> f64 {
        self.slippage
    }

    fn predict_maker_probability(&self, _features: &FeatureVector) -> f64 {
        self.maker_probability
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

// ============================================================================
// Impact engine
// ============================================================================

#[test]
fn test_impact_components_with_default_params() {
    let engine = ImpactEngine::default();
    let estimate = engine.estimate(100.0, 100.5, 0.3, &two_sided());

    assert_eq!(estimate.method, ImpactMethod::AlmgrenChriss);
    assert_relative_eq!(estimate.permanent, 15.0, epsilon = 1e-9);
    assert_relative_eq!(
        estimate.impact,
        estimate.temporary + estimate.permanent,
        epsilon = 1e-12
    );
    assert!(estimate.temporary > 0.0);
    assert_relative_eq!(
        estimate.expected_shortfall,
        0.5 * 0.15 * 100.0 * 100.0 + estimate.temporary,
        epsilon = 1e-9
    );
}

#[test]
fn test_trajectory_starts_at_trade_size() {
    let engine = ImpactEngine::default();
    for sigma in [0.02, 0.3, 2.0] {
        let estimate = engine.estimate(250.0, 1.0, sigma, &two_sided());
        assert_eq!(estimate.trajectory.len(), 100);
        assert_relative_eq!(estimate.trajectory[0], 250.0, max_relative = 1e-12);
        assert!(estimate.trajectory.windows(2).all(|w| w[0] >= w[1]));
    }
}

#[test]
fn test_temporary_impact_with_default_params() {
    let engine = ImpactEngine::default();
    let estimate = engine.estimate(100.0, 1.0, 0.3, &two_sided());

    assert_relative_eq!(estimate.temporary, 5857.924155, epsilon = 1e-5);
    assert_relative_eq!(estimate.impact, 5872.924155, epsilon = 1e-5);
}

#[test]
fn test_small_volatility_converges_to_linear_decay() {
    let engine = ImpactEngine::default();
    let nearly = engine.estimate(100.0, 1.0, 1e-6, &two_sided());

    assert_eq!(nearly.method, ImpactMethod::AlmgrenChriss);
    // κT → 0 limit of the rate: v_i = X(T - t_i)/T = 100 - i
    for (i, v) in nearly.trajectory.iter().enumerate() {
        assert_relative_eq!(*v, 100.0 - i as f64, max_relative = 1e-9);
    }
    // η · Σ k² · Δt for k = 1..=100
    assert_relative_eq!(nearly.temporary, 2.0 * 338_350.0 * 0.01, max_relative = 1e-9);
}

#[test]
fn test_zero_volatility_uses_even_schedule() {
    let engine = ImpactEngine::default();
    let uniform = engine.estimate(100.0, 1.0, 0.0, &two_sided());

    assert_eq!(uniform.method, ImpactMethod::Uniform);
    assert!(uniform.trajectory.iter().all(|v| (*v - 1.0).abs() < 1e-12));
    // η · N · (X/N)² · Δt = 2.0 · 100 · 1 · 0.01
    assert_relative_eq!(uniform.temporary, 2.0, epsilon = 1e-9);
    assert_relative_eq!(uniform.impact, 17.0, epsilon = 1e-9);
}

#[test]
fn test_overflow_falls_back_to_linear() {
    let engine = ImpactEngine::default();
    let estimate = engine.estimate_with_liquidity(100.0, 1.0, 1000.0, 50.0);

    assert_eq!(estimate.method, ImpactMethod::LinearFallback);
    assert_relative_eq!(
        estimate.impact,
        15.0 + 2.0 * 1000.0 * 2f64.sqrt(),
        max_relative = 1e-12
    );
    assert!(estimate.impact.is_finite());
}

#[test]
fn test_overflow_without_liquidity_is_permanent_only() {
    let engine = ImpactEngine::default();
    let empty = snapshot(&[], &[]);
    let estimate = engine.estimate(100.0, 1.0, 1000.0, &empty);

    assert_eq!(estimate.method, ImpactMethod::LinearFallback);
    assert_relative_eq!(estimate.impact, 15.0, epsilon = 1e-9);
    assert_eq!(estimate.temporary, 0.0);
}

#[test]
fn test_recalibrated_horizon_changes_temporary_only() {
    let mut engine = ImpactEngine::default();
    let before = engine.estimate(100.0, 1.0, 0.0, &two_sided());
    engine.recalibrate(ModelParams {
        horizon: 2.0,
        ..Default::default()
    });
    let after = engine.estimate(100.0, 1.0, 0.0, &two_sided());

    assert_relative_eq!(after.permanent, before.permanent, epsilon = 1e-12);
    assert_relative_eq!(after.temporary, 2.0 * before.temporary, epsilon = 1e-9);
}

// ============================================================================
// Fees
// ============================================================================

#[test]
fn test_fee_blend_at_extremes() {
    let rates = FeeRates::new(0.0002, 0.0010);
    assert_relative_eq!(rates.cost(0.0, 50.0), 0.0010 * 50.0, epsilon = 1e-15);
    assert_relative_eq!(rates.cost(1.0, 50.0), 0.0002 * 50.0, epsilon = 1e-15);
    assert_relative_eq!(rates.cost(0.5, 50.0), 0.0006 * 50.0, epsilon = 1e-15);
}

// ============================================================================
// Cost estimator
// ============================================================================

#[test]
fn test_estimate_cost_composition() {
    let mut estimator = CostEstimator::default();
    let rates = FeeSchedule::default().rates("Tier1").unwrap();
    let snap = two_sided();

    let cost = estimator
        .estimate_cost(&snap, 10.0, &rates, &UnfittedPredictor)
        .unwrap();

    assert_eq!(cost.slippage, 0.0);
    assert_eq!(cost.maker_proportion, 0.5);
    assert_relative_eq!(cost.fees, (0.5 * 0.0008 + 0.5 * 0.0010) * 10.0, epsilon = 1e-15);
    assert_relative_eq!(
        cost.net_cost,
        cost.slippage + cost.fees + cost.market_impact,
        epsilon = 1e-12
    );
    assert_eq!(cost.latency, Duration::from_micros(7));
    assert_eq!(cost.volatility, 0.02);

    let expected_impact = ImpactEngine::default().estimate(10.0, 100.5, 0.02, &snap);
    assert_relative_eq!(cost.market_impact, expected_impact.impact, epsilon = 1e-12);
}

#[test]
fn test_estimate_cost_requires_both_sides() {
    let mut estimator = CostEstimator::default();
    let rates = FeeRates::new(0.0008, 0.0010);

    let bids_only = snapshot(&[(dec!(100), dec!(2))], &[]);
    let asks_only = snapshot(&[], &[(dec!(101), dec!(3))]);
    let empty = snapshot(&[], &[]);

    for snap in [bids_only, asks_only, empty] {
        assert!(
            estimator
                .estimate_cost(&snap, 10.0, &rates, &UnfittedPredictor)
                .is_none()
        );
    }
}

#[test]
fn test_non_finite_predictions_are_sanitized() {
    let mut estimator = CostEstimator::default();
    let rates = FeeRates::new(0.0008, 0.0010);
    let predictor = FixedPredictor {
        slippage: f64::NAN,
        maker_probability: f64::NAN,
    };

    let cost = estimator
        .estimate_cost(&two_sided(), 10.0, &rates, &predictor)
        .unwrap();
    assert_eq!(cost.slippage, 0.0);
    assert_eq!(cost.maker_proportion, 0.5);
    assert!(cost.net_cost.is_finite());
}

#[test]
fn test_maker_probability_is_clamped() {
    let mut estimator = CostEstimator::default();
    let rates = FeeRates::new(0.0008, 0.0010);
    let predictor = FixedPredictor {
        slippage: 0.25,
        maker_probability: 3.0,
    };

    let cost = estimator
        .estimate_cost(&two_sided(), 10.0, &rates, &predictor)
        .unwrap();
    assert_eq!(cost.maker_proportion, 1.0);
    assert_relative_eq!(cost.fees, 0.0008 * 10.0, epsilon = 1e-15);
    assert_eq!(cost.slippage, 0.25);
}

#[test]
fn test_rolling_volatility_feeds_impact() {
    let mut estimator = CostEstimator::new(
        ImpactEngine::default(),
        VolatilityEstimator::new(VolatilitySource::Rolling {
            window: 20,
            min_samples: 2,
            fallback: 0.02,
        }),
    );
    let rates = FeeRates::new(0.0008, 0.0010);

    let first = estimator
        .estimate_cost(&two_sided(), 10.0, &rates, &UnfittedPredictor)
        .unwrap();
    assert_eq!(first.volatility, 0.02);

    estimator.estimate_cost(
        &snapshot(&[(dec!(102), dec!(2))], &[(dec!(103), dec!(3))]),
        10.0,
        &rates,
        &UnfittedPredictor,
    );
    let third = estimator
        .estimate_cost(&two_sided(), 10.0, &rates, &UnfittedPredictor)
        .unwrap();
    assert_eq!(estimator.volatility().samples(), 2);
    assert!(third.volatility > 0.0);
    assert_ne!(third.volatility, 0.02);
}

#[test]
fn test_features_never_nan() {
    for snap in [
        two_sided(),
        snapshot(&[], &[]),
        snapshot(&[(dec!(100), dec!(2))], &[]),
    ] {
        let features = FeatureVector::from_snapshot(&snap);
        assert!(features.as_array().iter().all(|v| !v.is_nan()));
    }
}
