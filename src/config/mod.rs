//! Configuration: fixed ballistic tuning constants plus TOML-loadable tuning.

mod graph;
mod quality;

pub use graph::{Color, GraphConfig};
pub use quality::{Quality, QualityFactors, QualityTuning};

use crate::model::{CurvePoint, ResponseCurve};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Engine ticks per second; burst delays are given in ticks.
pub const TICKS_PER_SECOND: f64 = 60.0;

/// Nominal distance of the touch accuracy band (cells).
pub const DIST_TOUCH: f64 = 3.0;
/// Nominal distance of the short accuracy band (cells).
pub const DIST_SHORT: f64 = 12.0;
/// Nominal distance of the medium accuracy band (cells).
pub const DIST_MEDIUM: f64 = 25.0;
/// Nominal distance of the long accuracy band (cells).
pub const DIST_LONG: f64 = 40.0;

/// Floor applied to the shooter hit factor.
pub const MIN_HIT_FACTOR: f64 = 0.0201;

/// Shooting skill used for a simulated shooter when none is given.
pub const DEFAULT_SHOOTING_SKILL: f64 = 8.0;

/// Effective skill shift of the trigger-happy / careful-shooter aim tiers.
pub const AIM_TIER_SKILL_SHIFT: f64 = 5.0;

/// Distance between rows of a range breakdown (cells).
pub const BREAKDOWN_STEP: f64 = 5.0;

/// Maximum number of definition files read from one catalog source.
pub const MAX_DEF_FILES: usize = 10_000;

/// Maximum size in bytes for a single definition file.
pub const MAX_DEF_FILE_BYTES: usize = 2 * 1024 * 1024;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("configuration validation error: {0}")]
    Validation(String),
}

/// Everything a run can tune. Every section falls back to its defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub quality: QualityTuning,
    /// Skill -> shooting accuracy response curve for simulated shooters.
    #[serde(default = "default_shooting_accuracy_curve")]
    pub shooting_accuracy_curve: Vec<CurvePoint>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            graph: GraphConfig::default(),
            quality: QualityTuning::default(),
            shooting_accuracy_curve: default_shooting_accuracy_curve(),
        }
    }
}

impl AppConfig {
    /// Load from a TOML file and validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse from a TOML string and validate.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let cfg: AppConfig = toml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from `path` when given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn accuracy_curve(&self) -> ResponseCurve {
        ResponseCurve::new(self.shooting_accuracy_curve.clone())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.graph.resolution == 0 {
            return Err(ConfigError::Validation(
                "graph.resolution must be greater than 0".to_string(),
            ));
        }
        if self.graph.palette.is_empty() {
            return Err(ConfigError::Validation(
                "graph.palette must contain at least one color".to_string(),
            ));
        }
        if self.shooting_accuracy_curve.is_empty() {
            return Err(ConfigError::Validation(
                "shooting_accuracy_curve must contain at least one point".to_string(),
            ));
        }
        Ok(())
    }
}

/// Pawn shooting accuracy per cell by skill level, as the reference engine ships it.
fn default_shooting_accuracy_curve() -> Vec<CurvePoint> {
    [
        (0.0, 0.89),
        (4.0, 0.93),
        (8.0, 0.96),
        (12.0, 0.975),
        (16.0, 0.985),
        (20.0, 0.99),
    ]
    .into_iter()
    .map(|(x, y)| CurvePoint { x, y })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let cfg = AppConfig::parse("").unwrap();
        assert_eq!(cfg.graph.resolution, 500);
        assert!((cfg.graph.headroom - 1.05).abs() < 1e-12);
        assert_eq!(cfg.shooting_accuracy_curve.len(), 6);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = AppConfig::parse(
            r#"
            [graph]
            resolution = 100

            [quality.accuracy]
            awful = 0.5
            poor = 0.75
            normal = 1.0
            good = 1.25
            excellent = 1.5
            masterwork = 1.75
            legendary = 2.0
            "#,
        )
        .unwrap();
        assert_eq!(cfg.graph.resolution, 100);
        assert!((cfg.graph.headroom - 1.05).abs() < 1e-12);
        assert!((cfg.quality.accuracy.legendary - 2.0).abs() < 1e-12);
        assert!((cfg.quality.damage.legendary - 1.25).abs() < 1e-12);
    }

    #[test]
    fn zero_resolution_is_rejected() {
        let err = AppConfig::parse("[graph]\nresolution = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn empty_curve_is_rejected() {
        let err = AppConfig::parse("shooting_accuracy_curve = []\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = AppConfig::parse("[graph\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
