//! Almgren-Chriss Optimal Liquidation
//!
//! Optimal trade rate when liquidating X over horizon T:
//!
//! v(t) = X × sinh(κ(T-t)) / sinh(κT)
//!
//! Where κ = √(η/γ) × σ
//! - η = temporary impact coefficient
//! - γ = permanent impact coefficient
//! - σ = volatility
//!
//! The horizon is split into N intervals, t_i = i × Δt for i in 0..N, and the
//! rate is sampled at each interval start. v_0 is always X.
//!
//! Expected shortfall:  E[IS] = ½γX² + η Σ v_i² Δt
//! Reported impact:     η Σ v_i² Δt + γX
//!
//! Below |sinh(κT)| < 1e-10 the even schedule X/N is used instead. As κT → 0
//! the sampled rates tend to X(T-t_i)/T, not X/N, so the temporary term jumps
//! at the threshold.

use tracing::debug;

use super::protocol::ImpactModel;
use crate::domain::{ImpactEstimate, ImpactMethod, ModelParams};

/// Threshold on |sinh(κT)| below which the even schedule is used
pub const SINH_EPSILON: f64 = 1e-10;

/// Almgren-Chriss impact model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlmgrenChriss {
    params: ModelParams,
}

impl AlmgrenChriss {
    pub fn new(params: ModelParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    /// Trade rate at each interval start and whether the even schedule was used
    pub fn trajectory(&self, trade_size: f64, volatility: f64) -> (Vec<f64>, bool) {
        let n = self.params.intervals.max(1);
        let horizon = self.params.horizon;
        let dt = self.params.dt();
        let kappa = self.params.kappa(volatility);
        let denominator = (kappa * horizon).sinh();

        if denominator.abs() < SINH_EPSILON {
            return (vec![trade_size / n as f64; n], true);
        }

        let trajectory = (0..n)
            .map(|i| {
                let t = i as f64 * dt;
                trade_size * (kappa * (horizon - t)).sinh() / denominator
            })
            .collect();
        (trajectory, false)
    }
}

impl Default for AlmgrenChriss {
    fn default() -> Self {
        Self::new(ModelParams::default())
    }
}

impl ImpactModel for AlmgrenChriss {
    fn estimate(
        &self,
        trade_size: f64,
        volatility: f64,
        _liquidity: f64,
        reference_price: f64,
    ) -> ImpactEstimate {
        let (trajectory, uniform) = self.trajectory(trade_size, volatility);
        let dt = self.params.dt();

        let sum_sq: f64 = trajectory.iter().map(|v| v * v).sum();
        let temporary = self.params.eta * sum_sq * dt;
        let permanent = self.params.gamma * trade_size;
        let expected_shortfall = 0.5 * self.params.gamma * trade_size * trade_size + temporary;

        debug!(
            temporary,
            permanent,
            expected_shortfall,
            uniform,
            "Almgren-Chriss impact components"
        );

        ImpactEstimate {
            impact: temporary + permanent,
            temporary,
            permanent,
            expected_shortfall,
            trajectory,
            method: if uniform {
                ImpactMethod::Uniform
            } else {
                ImpactMethod::AlmgrenChriss
            },
            reference_price,
        }
    }

    fn name(&self) -> &str {
        "almgren_chriss"
    }
}
