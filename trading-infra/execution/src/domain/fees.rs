//! Fee tiers and maker/taker blending

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Maker fee as a share of the taker fee when a tier does not set one
pub const DEFAULT_MAKER_RATIO: f64 = 0.8;

/// Fee rates for one tier, as fractions of traded size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeRates {
    pub maker: f64,
    pub taker: f64,
}

impl FeeRates {
    pub fn new(maker: f64, taker: f64) -> Self {
        Self { maker, taker }
    }

    /// Taker fee with the maker fee derived from `maker_ratio`
    pub fn from_taker(taker: f64, maker_ratio: f64) -> Self {
        Self {
            maker: taker * maker_ratio,
            taker,
        }
    }

    /// Rate blended by the probability of executing as maker
    pub fn blended(&self, maker_probability: f64) -> f64 {
        maker_probability * self.maker + (1.0 - maker_probability) * self.taker
    }

    /// Expected fees for `trade_size`
    pub fn cost(&self, maker_probability: f64, trade_size: f64) -> f64 {
        self.blended(maker_probability) * trade_size
    }
}

/// One named tier; `maker` derives from the schedule's ratio when absent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeTier {
    pub taker: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maker: Option<f64>,
}

impl FeeTier {
    pub fn taker_only(taker: f64) -> Self {
        Self { taker, maker: None }
    }
}

/// Named fee tiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    tiers: BTreeMap<String, FeeTier>,
    maker_ratio: f64,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        let tiers = [
            ("Tier1", 0.0010),
            ("Tier2", 0.0009),
            ("Tier3", 0.0008),
            ("Tier4", 0.0007),
            ("Tier5", 0.0006),
        ]
        .into_iter()
        .map(|(name, taker)| (name.to_string(), FeeTier::taker_only(taker)))
        .collect();

        Self {
            tiers,
            maker_ratio: DEFAULT_MAKER_RATIO,
        }
    }
}

impl FeeSchedule {
    pub fn new(tiers: BTreeMap<String, FeeTier>, maker_ratio: f64) -> Self {
        Self { tiers, maker_ratio }
    }

    /// Resolved rates for `tier`, `None` if the tier is unknown
    pub fn rates(&self, tier: &str) -> Option<FeeRates> {
        let fee_tier = self.tiers.get(tier)?;
        Some(match fee_tier.maker {
            Some(maker) => FeeRates::new(maker, fee_tier.taker),
            None => FeeRates::from_taker(fee_tier.taker, self.maker_ratio),
        })
    }

    pub fn tier_names(&self) -> impl Iterator<Item = &str> {
        self.tiers.keys().map(String::as_str)
    }

    pub fn maker_ratio(&self) -> f64 {
        self.maker_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tiers() {
        let schedule = FeeSchedule::default();
        let tier1 = schedule.rates("Tier1").unwrap();
        assert!((tier1.taker - 0.0010).abs() < 1e-15);
        assert!((tier1.maker - 0.0008).abs() < 1e-15);

        let tier5 = schedule.rates("Tier5").unwrap();
        assert!((tier5.taker - 0.0006).abs() < 1e-15);
        assert_eq!(schedule.tier_names().count(), 5);
        assert!(schedule.rates("Tier9").is_none());
    }

    #[test]
    fn test_explicit_maker_fee_wins() {
        let mut tiers = BTreeMap::new();
        tiers.insert(
            "vip".to_string(),
            FeeTier {
                taker: 0.0005,
                maker: Some(-0.0001),
            },
        );
        let schedule = FeeSchedule::new(tiers, 0.8);
        assert_eq!(schedule.rates("vip"), Some(FeeRates::new(-0.0001, 0.0005)));
    }

    #[test]
    fn test_blend_extremes() {
        let rates = FeeRates::new(0.0008, 0.0010);
        assert_eq!(rates.cost(1.0, 100.0), 0.0008 * 100.0);
        assert_eq!(rates.cost(0.0, 100.0), 0.0010 * 100.0);
        assert!((rates.cost(0.5, 100.0) - 0.09).abs() < 1e-12);
    }
}
