//! Execution Domain Types
//!
//! Core value objects for impact and cost modeling.

mod cost;
mod features;
mod fees;
mod impact;

pub use cost::CostBreakdown;
pub use features::{FEATURE_COUNT, FeatureVector};
pub use fees::{DEFAULT_MAKER_RATIO, FeeRates, FeeSchedule, FeeTier};
pub use impact::{ImpactEstimate, ImpactMethod, ModelParams};
