//! Impact Types
//!
//! Domain models for the impact model parameters and its estimates.

use serde::{Deserialize, Serialize};

/// Almgren-Chriss model parameters
///
/// η, γ, horizon and interval count are static between recalibrations. σ is
/// the volatility used only when a caller supplies an unusable one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelParams {
    /// Default volatility σ
    pub sigma: f64,
    /// Temporary impact coefficient η
    pub eta: f64,
    /// Permanent impact coefficient γ
    pub gamma: f64,
    /// Execution horizon T
    pub horizon: f64,
    /// Number of trading intervals N
    pub intervals: usize,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            sigma: 0.3,
            eta: 2.0,
            gamma: 0.15,
            horizon: 1.0,
            intervals: 100,
        }
    }
}

impl ModelParams {
    /// Length of one interval, Δt = T / N
    pub fn dt(&self) -> f64 {
        self.horizon / self.intervals.max(1) as f64
    }

    /// Urgency κ = √(η/γ) · σ
    pub fn kappa(&self, volatility: f64) -> f64 {
        (self.eta / self.gamma).sqrt() * volatility
    }
}

/// How an estimate was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactMethod {
    /// Optimal sinh trajectory
    AlmgrenChriss,
    /// κT too small for the sinh ratio, even trajectory used
    Uniform,
    /// Non-finite intermediate, closed-form linear model used
    LinearFallback,
    /// Nothing to execute
    Zero,
}

/// Market impact estimate for one trade size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactEstimate {
    /// Reported impact, `temporary + permanent`
    pub impact: f64,
    /// η · Σ v² · Δt
    pub temporary: f64,
    /// γ · X
    pub permanent: f64,
    /// Expected implementation shortfall 0.5·γ·X² + η·Σ v²·Δt
    pub expected_shortfall: f64,
    /// Trade rate sampled at the start of each interval
    pub trajectory: Vec<f64>,
    pub method: ImpactMethod,
    /// Price the estimate was made against
    pub reference_price: f64,
}

impl ImpactEstimate {
    pub fn zero(reference_price: f64) -> Self {
        Self {
            impact: 0.0,
            temporary: 0.0,
            permanent: 0.0,
            expected_shortfall: 0.0,
            trajectory: Vec::new(),
            method: ImpactMethod::Zero,
            reference_price,
        }
    }

    /// Impact relative to the traded notional, in basis points
    pub fn impact_bps(&self) -> f64 {
        let notional: f64 = self.trajectory.iter().sum::<f64>() * self.reference_price;
        if notional > 0.0 && notional.is_finite() {
            self.impact / notional * 10_000.0
        } else {
            0.0
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.method, ImpactMethod::LinearFallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = ModelParams::default();
        assert_eq!(params.intervals, 100);
        assert!((params.dt() - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_kappa() {
        let params = ModelParams {
            eta: 2.0,
            gamma: 0.5,
            ..Default::default()
        };
        assert!((params.kappa(0.3) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_zero_estimate() {
        let estimate = ImpactEstimate::zero(100.0);
        assert_eq!(estimate.impact, 0.0);
        assert_eq!(estimate.impact_bps(), 0.0);
        assert!(!estimate.is_fallback());
    }
}
