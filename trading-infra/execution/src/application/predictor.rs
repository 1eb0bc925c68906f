//! Slippage and maker/taker predictors
//!
//! The statistical models themselves live outside this crate; these are the
//! collaborators the cost estimator talks to. No fitting happens here.

use serde::{Deserialize, Serialize};

use crate::domain::{FEATURE_COUNT, FeatureVector};

/// Predictor interface
pub trait CostPredictor: Send + Sync {
    /// Expected slippage for the trade
    fn predict_slippage(&self, features: &FeatureVector) -> f64;

    /// Probability of executing as maker, expected in [0, 1]
    fn predict_maker_probability(&self, features: &FeatureVector) -> f64;

    fn name(&self) -> &str;
}

/// Behaves like a model that has never been fitted: zero slippage, even odds
#[derive(Debug, Clone, Copy, Default)]
pub struct UnfittedPredictor;

impl CostPredictor for UnfittedPredictor {
    fn predict_slippage(&self, _features: &FeatureVector) -> f64 {
        0.0
    }

    fn predict_maker_probability(&self, _features: &FeatureVector) -> f64 {
        0.5
    }

    fn name(&self) -> &str {
        "unfitted"
    }
}

/// Linear slippage and logistic maker probability with fixed coefficients
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LinearCostPredictor {
    #[serde(default)]
    pub slippage_intercept: f64,
    #[serde(default)]
    pub slippage_coefficients: [f64; FEATURE_COUNT],
    #[serde(default)]
    pub maker_intercept: f64,
    #[serde(default)]
    pub maker_coefficients: [f64; FEATURE_COUNT],
}

impl LinearCostPredictor {
    fn dot(coefficients: &[f64; FEATURE_COUNT], features: &FeatureVector) -> f64 {
        coefficients
            .iter()
            .zip(features.as_array())
            .map(|(c, x)| c * x)
            .sum()
    }
}

impl CostPredictor for LinearCostPredictor {
    fn predict_slippage(&self, features: &FeatureVector) -> f64 {
        self.slippage_intercept + Self::dot(&self.slippage_coefficients, features)
    }

    fn predict_maker_probability(&self, features: &FeatureVector) -> f64 {
        let z = self.maker_intercept + Self::dot(&self.maker_coefficients, features);
        1.0 / (1.0 + (-z).exp())
    }

    fn name(&self) -> &str {
        "linear"
    }
}
