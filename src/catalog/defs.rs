//! Definition records as they appear in catalog TOML files.

use crate::config::Quality;
use crate::model::{AccuracyBands, ArmorStats, Refuelable};
use serde::{Deserialize, Serialize};

/// One catalog document: any mix of `[[weapon]]`, `[[turret]]` and `[[pawn]]` entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefFile {
    #[serde(default)]
    pub weapon: Vec<WeaponDef>,
    #[serde(default)]
    pub turret: Vec<TurretDef>,
    #[serde(default)]
    pub pawn: Vec<PawnDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponDef {
    pub def_name: String,
    pub label: Option<String>,
    /// Explicit ranged flag; when absent, any non-melee verb makes the weapon ranged.
    pub ranged: Option<bool>,
    /// Finalized ranged cooldown stat (seconds).
    #[serde(default)]
    pub cooldown: f64,
    #[serde(default)]
    pub verbs: Vec<VerbDef>,
    #[serde(default)]
    pub accuracy: AccuracyBands,
}

impl WeaponDef {
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.def_name)
    }

    pub fn is_ranged_weapon(&self) -> bool {
        self.ranged
            .unwrap_or_else(|| self.verbs.iter().any(|v| !v.melee))
    }
}

/// Verb properties. Defaults describe a harmless single-shot verb.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerbDef {
    pub melee: bool,
    pub warmup_time: f64,
    pub burst_shot_count: i32,
    pub ticks_between_burst_shots: i32,
    pub min_range: f64,
    pub range: f64,
    pub default_cooldown_time: f64,
    pub projectile: Option<ProjectileDef>,
}

impl Default for VerbDef {
    fn default() -> Self {
        Self {
            melee: false,
            warmup_time: 0.0,
            burst_shot_count: 1,
            ticks_between_burst_shots: 0,
            min_range: 0.0,
            range: 0.0,
            default_cooldown_time: 0.0,
            projectile: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileDef {
    pub damage: i32,
    #[serde(default)]
    pub armor_penetration: f64,
}

/// Loadable ammunition (mortar shells and the like).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChangeableProjectileDef {
    #[serde(default)]
    pub loaded: bool,
    pub projectile: Option<ProjectileDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurretDef {
    pub def_name: String,
    pub label: Option<String>,
    /// Weapon def of the mounted gun.
    pub gun: String,
    /// Warmup range `[min, max]` in seconds; the average is used.
    #[serde(default)]
    pub burst_warmup: [f64; 2],
    /// Seconds; negative or absent means "use the gun verb's default cooldown".
    pub burst_cooldown: Option<f64>,
    #[serde(default = "default_turret_accuracy")]
    pub shooting_accuracy: f64,
    pub refuelable: Option<Refuelable>,
    pub changeable_projectile: Option<ChangeableProjectileDef>,
}

impl TurretDef {
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.def_name)
    }

    /// Turrets without loadable ammunition always count as loaded.
    pub fn is_loaded(&self) -> bool {
        self.changeable_projectile
            .map(|c| c.loaded)
            .unwrap_or(true)
    }
}

fn default_turret_accuracy() -> f64 {
    0.96
}

/// A pawn with finalized combat stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PawnDef {
    pub name: String,
    pub label: Option<String>,
    #[serde(default = "one")]
    pub aiming_delay_factor: f64,
    pub shooting_accuracy: f64,
    #[serde(default = "one")]
    pub body_size: f64,
    #[serde(default)]
    pub armor: ArmorStats,
    /// Weapon def name of the equipped primary.
    pub primary: Option<String>,
    #[serde(default)]
    pub primary_quality: Quality,
}

impl PawnDef {
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

fn one() -> f64 {
    1.0
}
