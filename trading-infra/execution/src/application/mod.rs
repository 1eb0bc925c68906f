//! Execution Application Layer
//!
//! Impact models, the impact engine and the cost estimator built on them.

mod estimator;
mod impact_engine;
pub mod impact_models;
mod predictor;
mod volatility;

pub use estimator::CostEstimator;
pub use impact_engine::ImpactEngine;
pub use predictor::{CostPredictor, LinearCostPredictor, UnfittedPredictor};
pub use volatility::{DEFAULT_VOLATILITY, VolatilityEstimator, VolatilitySource};
