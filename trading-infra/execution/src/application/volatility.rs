//! Volatility input for the impact model

use std::collections::VecDeque;

use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use trading_core::MarketSnapshot;

/// Volatility used when nothing better is known
pub const DEFAULT_VOLATILITY: f64 = 0.02;

/// Where σ comes from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VolatilitySource {
    /// Constant σ
    Fixed { value: f64 },
    /// Sample standard deviation of log mid-price returns over the last
    /// `window` returns; `fallback` until `min_samples` are available
    Rolling {
        window: usize,
        min_samples: usize,
        #[serde(default = "default_fallback")]
        fallback: f64,
    },
}

impl Default for VolatilitySource {
    fn default() -> Self {
        VolatilitySource::Fixed {
            value: DEFAULT_VOLATILITY,
        }
    }
}

fn default_fallback() -> f64 {
    DEFAULT_VOLATILITY
}

/// Stateful estimator fed one snapshot at a time
#[derive(Debug, Clone)]
pub struct VolatilityEstimator {
    source: VolatilitySource,
    last_mid: Option<f64>,
    returns: VecDeque<f64>,
}

impl Default for VolatilityEstimator {
    fn default() -> Self {
        Self::new(VolatilitySource::default())
    }
}

impl VolatilityEstimator {
    pub fn new(source: VolatilitySource) -> Self {
        let capacity = match source {
            VolatilitySource::Rolling { window, .. } => window,
            VolatilitySource::Fixed { .. } => 0,
        };
        Self {
            source,
            last_mid: None,
            returns: VecDeque::with_capacity(capacity),
        }
    }

    pub fn source(&self) -> &VolatilitySource {
        &self.source
    }

    /// Record the snapshot's mid price and return the current σ
    pub fn observe(&mut self, snapshot: &MarketSnapshot) -> f64 {
        if let Some(mid) = snapshot.mid_price().and_then(|m| m.to_f64()) {
            self.observe_mid(mid);
        }
        self.current()
    }

    /// Record a mid price
    pub fn observe_mid(&mut self, mid: f64) {
        let VolatilitySource::Rolling { window, .. } = self.source else {
            return;
        };
        if !(mid.is_finite() && mid > 0.0) {
            return;
        }

        if let Some(prev) = self.last_mid.replace(mid) {
            let ret = (mid / prev).ln();
            if ret.is_finite() {
                if self.returns.len() >= window.max(1) {
                    self.returns.pop_front();
                }
                self.returns.push_back(ret);
            }
        }
    }

    /// Current σ estimate
    pub fn current(&self) -> f64 {
        match self.source {
            VolatilitySource::Fixed { value } => value,
            VolatilitySource::Rolling {
                min_samples,
                fallback,
                ..
            } => {
                if self.returns.len() < min_samples.max(2) {
                    return fallback;
                }
                let n = self.returns.len() as f64;
                let mean = self.returns.iter().sum::<f64>() / n;
                let var = self
                    .returns
                    .iter()
                    .map(|r| (r - mean).powi(2))
                    .sum::<f64>()
                    / (n - 1.0);
                let sigma = var.sqrt();
                if sigma.is_finite() { sigma } else { fallback }
            }
        }
    }

    /// Number of returns currently in the window
    pub fn samples(&self) -> usize {
        self.returns.len()
    }
}
