use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::application::{
    CostEstimator, CostPredictor, ImpactEngine, LinearCostPredictor, UnfittedPredictor,
    VolatilityEstimator, VolatilitySource,
};
use crate::domain::{DEFAULT_MAKER_RATIO, FeeRates, FeeSchedule, FeeTier, ModelParams};
use crate::error::ConfigError;

/// Execution section (JSON representation)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionConfigJson {
    #[serde(default)]
    pub model: ModelParamsJson,
    #[serde(default)]
    pub volatility: VolatilitySource,
    #[serde(default)]
    pub fees: FeeConfigJson,
    #[serde(default)]
    pub predictor: PredictorConfigJson,
    /// Trade size costed on every snapshot
    #[serde(default = "default_trade_size")]
    pub trade_size: f64,
}

impl Default for ExecutionConfigJson {
    fn default() -> Self {
        ExecutionConfigJson {
            model: ModelParamsJson::default(),
            volatility: VolatilitySource::default(),
            fees: FeeConfigJson::default(),
            predictor: PredictorConfigJson::default(),
            trade_size: default_trade_size(),
        }
    }
}

impl ExecutionConfigJson {
    /// Build the cost estimator (impact engine + volatility source)
    pub fn to_estimator(&self) -> CostEstimator {
        CostEstimator::new(
            ImpactEngine::new(self.model.to_params()),
            VolatilityEstimator::new(self.volatility),
        )
    }

    /// Build the configured predictor
    pub fn to_predictor(&self) -> Box<dyn CostPredictor> {
        self.predictor.to_predictor()
    }

    /// Rates of the selected tier
    pub fn fee_rates(&self) -> Result<FeeRates, ConfigError> {
        self.fees.rates()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.model.validate()?;
        validate_volatility(&self.volatility)?;
        self.fees.validate()?;
        if !self.trade_size.is_finite() || self.trade_size < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "execution.trade_size",
                reason: "must be finite and non-negative",
            });
        }
        Ok(())
    }
}

/// Impact model parameters (JSON representation)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelParamsJson {
    #[serde(default = "default_sigma")]
    pub sigma: f64,
    #[serde(default = "default_eta")]
    pub eta: f64,
    #[serde(default = "default_gamma")]
    pub gamma: f64,
    #[serde(default = "default_horizon")]
    pub horizon: f64,
    #[serde(default = "default_intervals")]
    pub intervals: usize,
}

impl Default for ModelParamsJson {
    fn default() -> Self {
        ModelParamsJson {
            sigma: default_sigma(),
            eta: default_eta(),
            gamma: default_gamma(),
            horizon: default_horizon(),
            intervals: default_intervals(),
        }
    }
}

impl ModelParamsJson {
    pub fn to_params(&self) -> ModelParams {
        ModelParams {
            sigma: self.sigma,
            eta: self.eta,
            gamma: self.gamma,
            horizon: self.horizon,
            intervals: self.intervals,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |value: f64| value.is_finite() && value > 0.0;
        if !positive(self.gamma) {
            return Err(ConfigError::InvalidValue {
                field: "execution.model.gamma",
                reason: "must be positive",
            });
        }
        if !positive(self.eta) {
            return Err(ConfigError::InvalidValue {
                field: "execution.model.eta",
                reason: "must be positive",
            });
        }
        if !positive(self.horizon) {
            return Err(ConfigError::InvalidValue {
                field: "execution.model.horizon",
                reason: "must be positive",
            });
        }
        if self.intervals == 0 {
            return Err(ConfigError::InvalidValue {
                field: "execution.model.intervals",
                reason: "must be at least 1",
            });
        }
        if !self.sigma.is_finite() || self.sigma < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "execution.model.sigma",
                reason: "must be finite and non-negative",
            });
        }
        Ok(())
    }
}

fn validate_volatility(source: &VolatilitySource) -> Result<(), ConfigError> {
    match *source {
        VolatilitySource::Fixed { value } if !value.is_finite() || value < 0.0 => {
            Err(ConfigError::InvalidValue {
                field: "execution.volatility.value",
                reason: "must be finite and non-negative",
            })
        }
        VolatilitySource::Rolling { window, .. } if window < 2 => Err(ConfigError::InvalidValue {
            field: "execution.volatility.window",
            reason: "must be at least 2",
        }),
        VolatilitySource::Rolling {
            window,
            min_samples,
            ..
        } if min_samples > window => Err(ConfigError::InvalidValue {
            field: "execution.volatility.min_samples",
            reason: "must not exceed window",
        }),
        VolatilitySource::Rolling { fallback, .. } if !fallback.is_finite() || fallback < 0.0 => {
            Err(ConfigError::InvalidValue {
                field: "execution.volatility.fallback",
                reason: "must be finite and non-negative",
            })
        }
        _ => Ok(()),
    }
}

/// Fee schedule and selected tier (JSON representation)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeConfigJson {
    /// Tier used for every estimate
    #[serde(default = "default_tier")]
    pub tier: String,
    #[serde(default = "default_maker_ratio")]
    pub maker_ratio: f64,
    /// Custom tiers; the built-in Tier1..Tier5 when empty
    #[serde(default)]
    pub tiers: BTreeMap<String, FeeTier>,
}

impl Default for FeeConfigJson {
    fn default() -> Self {
        FeeConfigJson {
            tier: default_tier(),
            maker_ratio: default_maker_ratio(),
            tiers: BTreeMap::new(),
        }
    }
}

impl FeeConfigJson {
    pub fn to_schedule(&self) -> FeeSchedule {
        if self.tiers.is_empty() {
            let builtin = FeeSchedule::default();
            let tiers = builtin
                .tier_names()
                .filter_map(|name| {
                    builtin
                        .rates(name)
                        .map(|rates| (name.to_string(), FeeTier::taker_only(rates.taker)))
                })
                .collect();
            FeeSchedule::new(tiers, self.maker_ratio)
        } else {
            FeeSchedule::new(self.tiers.clone(), self.maker_ratio)
        }
    }

    pub fn rates(&self) -> Result<FeeRates, ConfigError> {
        let schedule = self.to_schedule();
        schedule
            .rates(&self.tier)
            .ok_or_else(|| ConfigError::UnknownFeeTier {
                tier: self.tier.clone(),
                available: schedule.tier_names().collect::<Vec<_>>().join(", "),
            })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.maker_ratio.is_finite() || self.maker_ratio < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "execution.fees.maker_ratio",
                reason: "must be finite and non-negative",
            });
        }
        let rates = self.rates()?;
        if !(rates.maker.is_finite() && rates.taker.is_finite()) {
            return Err(ConfigError::InvalidValue {
                field: "execution.fees.tiers",
                reason: "fees must be finite",
            });
        }
        Ok(())
    }
}

/// Predictor selection (JSON representation)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PredictorConfigJson {
    #[default]
    Unfitted,
    Linear(LinearCostPredictor),
}

impl PredictorConfigJson {
    pub fn to_predictor(&self) -> Box<dyn CostPredictor> {
        match self {
            PredictorConfigJson::Unfitted => Box::new(UnfittedPredictor),
            PredictorConfigJson::Linear(predictor) => Box::new(*predictor),
        }
    }
}

fn default_trade_size() -> f64 {
    100.0
}

fn default_sigma() -> f64 {
    ModelParams::default().sigma
}

fn default_eta() -> f64 {
    ModelParams::default().eta
}

fn default_gamma() -> f64 {
    ModelParams::default().gamma
}

fn default_horizon() -> f64 {
    ModelParams::default().horizon
}

fn default_intervals() -> usize {
    ModelParams::default().intervals
}

fn default_tier() -> String {
    "Tier1".to_string()
}

fn default_maker_ratio() -> f64 {
    DEFAULT_MAKER_RATIO
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_object() {
        let config: ExecutionConfigJson = serde_json::from_str("{}").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.trade_size, 100.0);
        assert_eq!(config.model.to_params(), ModelParams::default());

        let rates = config.fee_rates().unwrap();
        assert!((rates.taker - 0.0010).abs() < 1e-12);
        assert!((rates.maker - 0.0008).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_tier() {
        let config: ExecutionConfigJson =
            serde_json::from_str(r#"{"fees":{"tier":"Tier9"}}"#).unwrap();
        match config.validate() {
            Err(ConfigError::UnknownFeeTier { tier, available }) => {
                assert_eq!(tier, "Tier9");
                assert!(available.contains("Tier1"));
            }
            other => panic!("expected unknown tier, got {other:?}"),
        }
    }

    #[test]
    fn test_custom_tiers_and_ratio() {
        let json = r#"{
            "fees": {
                "tier": "vip",
                "maker_ratio": 0.5,
                "tiers": {
                    "vip": {"taker": 0.0004},
                    "mm": {"taker": 0.0004, "maker": -0.0001}
                }
            }
        }"#;
        let config: ExecutionConfigJson = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        let rates = config.fee_rates().unwrap();
        assert!((rates.maker - 0.0002).abs() < 1e-12);

        let maker_rebate = config.fees.to_schedule().rates("mm").unwrap();
        assert_eq!(maker_rebate.maker, -0.0001);
    }

    #[test]
    fn test_maker_ratio_applies_to_builtin_tiers() {
        let config: ExecutionConfigJson =
            serde_json::from_str(r#"{"fees":{"tier":"Tier5","maker_ratio":0.5}}"#).unwrap();
        let rates = config.fee_rates().unwrap();
        assert!((rates.maker - 0.0003).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_bad_model() {
        for json in [
            r#"{"model":{"gamma":0.0}}"#,
            r#"{"model":{"eta":-1.0}}"#,
            r#"{"model":{"horizon":0.0}}"#,
            r#"{"model":{"intervals":0}}"#,
        ] {
            let config: ExecutionConfigJson = serde_json::from_str(json).unwrap();
            assert!(
                matches!(config.validate(), Err(ConfigError::InvalidValue { .. })),
                "{json} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_bad_volatility() {
        let config: ExecutionConfigJson = serde_json::from_str(
            r#"{"volatility":{"kind":"rolling","window":10,"min_samples":20}}"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_linear_predictor_config() {
        let json = r#"{"predictor":{"kind":"linear","slippage_intercept":0.25}}"#;
        let config: ExecutionConfigJson = serde_json::from_str(json).unwrap();
        let predictor = config.to_predictor();
        assert_eq!(predictor.name(), "linear");
        assert_eq!(
            predictor.predict_slippage(&crate::domain::FeatureVector::default()),
            0.25
        );
    }
}
