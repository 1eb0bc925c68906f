//! Market Impact and Pre-Trade Cost Models
//!
//! This crate turns live order-book snapshots into pre-trade cost estimates.
//!
//! # Impact Models
//!
//! - [`AlmgrenChriss`](application::impact_models::AlmgrenChriss): optimal liquidation
//!   trajectory, E[IS] = ½γX² + ηΣv²Δt
//! - [`LinearImpact`](application::impact_models::LinearImpact): fallback,
//!   Impact = γX + ησ√(X/L)
//!
//! [`ImpactEngine`] runs the first and falls back to the second whenever a
//! non-finite value appears, so estimates are always finite.
//!
//! # Cost Composition
//!
//! [`CostEstimator`] combines impact, a [`CostPredictor`] and [`FeeRates`]:
//!
//! ```text
//! net_cost = slippage + (p·maker + (1 − p)·taker)·X + impact
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use execution::{CostEstimator, FeeSchedule, UnfittedPredictor};
//! # fn snapshot() -> trading_core::MarketSnapshot { unimplemented!() }
//!
//! let mut estimator = CostEstimator::default();
//! let rates = FeeSchedule::default().rates("Tier1").unwrap();
//!
//! if let Some(cost) = estimator.estimate_cost(&snapshot(), 100.0, &rates, &UnfittedPredictor) {
//!     println!("net cost {:.4} ({:?})", cost.net_cost, cost.impact_method);
//! }
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod error;

// Re-export commonly used types
pub use application::impact_models::{AlmgrenChriss, ImpactModel, LinearImpact};
pub use application::{
    CostEstimator, CostPredictor, ImpactEngine, LinearCostPredictor, UnfittedPredictor,
    VolatilityEstimator, VolatilitySource,
};
pub use config::ExecutionConfigJson;
pub use domain::{
    CostBreakdown, FeatureVector, FeeRates, FeeSchedule, FeeTier, ImpactEstimate, ImpactMethod,
    ModelParams,
};
pub use error::ConfigError;
