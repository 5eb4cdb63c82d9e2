//! Item quality tiers and the stat factors they apply.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Awful,
    Poor,
    #[default]
    Normal,
    Good,
    Excellent,
    Masterwork,
    Legendary,
}

impl Quality {
    pub const ALL: [Quality; 7] = [
        Quality::Awful,
        Quality::Poor,
        Quality::Normal,
        Quality::Good,
        Quality::Excellent,
        Quality::Masterwork,
        Quality::Legendary,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Quality::Awful => "awful",
            Quality::Poor => "poor",
            Quality::Normal => "normal",
            Quality::Good => "good",
            Quality::Excellent => "excellent",
            Quality::Masterwork => "masterwork",
            Quality::Legendary => "legendary",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Quality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = crate::util::normalize_id(s);
        Quality::ALL
            .into_iter()
            .find(|q| q.as_str() == key)
            .ok_or_else(|| format!("unknown quality tier: {}", s))
    }
}

/// One multiplier per quality tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityFactors {
    pub awful: f64,
    pub poor: f64,
    pub normal: f64,
    pub good: f64,
    pub excellent: f64,
    pub masterwork: f64,
    pub legendary: f64,
}

impl QualityFactors {
    pub fn factor(&self, quality: Quality) -> f64 {
        match quality {
            Quality::Awful => self.awful,
            Quality::Poor => self.poor,
            Quality::Normal => self.normal,
            Quality::Good => self.good,
            Quality::Excellent => self.excellent,
            Quality::Masterwork => self.masterwork,
            Quality::Legendary => self.legendary,
        }
    }
}

/// How quality scales ranged weapon stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityTuning {
    /// Applied to all four accuracy bands.
    pub accuracy: QualityFactors,
    /// Applied to projectile damage and armor penetration.
    pub damage: QualityFactors,
}

impl Default for QualityTuning {
    fn default() -> Self {
        Self {
            accuracy: QualityFactors {
                awful: 0.8,
                poor: 0.9,
                normal: 1.0,
                good: 1.1,
                excellent: 1.2,
                masterwork: 1.35,
                legendary: 1.5,
            },
            damage: QualityFactors {
                awful: 0.9,
                poor: 0.95,
                normal: 1.0,
                good: 1.05,
                excellent: 1.1,
                masterwork: 1.2,
                legendary: 1.25,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quality_case_insensitive() {
        assert_eq!("Legendary".parse::<Quality>(), Ok(Quality::Legendary));
        assert_eq!(" awful ".parse::<Quality>(), Ok(Quality::Awful));
        assert!("shoddy".parse::<Quality>().is_err());
    }

    #[test]
    fn normal_quality_is_neutral() {
        let t = QualityTuning::default();
        assert_eq!(t.accuracy.factor(Quality::Normal), 1.0);
        assert_eq!(t.damage.factor(Quality::Normal), 1.0);
        assert!(t.accuracy.factor(Quality::Legendary) > 1.0);
    }
}
