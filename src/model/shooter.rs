//! Shooters: who is holding the gun (a pawn, a hypothetical pawn, or a turret).

use super::curve::ResponseCurve;
use crate::config::{AIM_TIER_SKILL_SHIFT, DEFAULT_SHOOTING_SKILL, MIN_HIT_FACTOR};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Aim-quality trait of a simulated shooter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulatedAim {
    TriggerHappy,
    #[default]
    Normal,
    Careful,
}

impl SimulatedAim {
    pub fn aim_speed(self) -> f64 {
        match self {
            SimulatedAim::TriggerHappy => 0.5,
            SimulatedAim::Normal => 1.0,
            SimulatedAim::Careful => 1.25,
        }
    }

    pub fn skill_offset(self) -> f64 {
        match self {
            SimulatedAim::TriggerHappy => -AIM_TIER_SKILL_SHIFT,
            SimulatedAim::Normal => 0.0,
            SimulatedAim::Careful => AIM_TIER_SKILL_SHIFT,
        }
    }
}

impl FromStr for SimulatedAim {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match crate::util::normalize_id(s).as_str() {
            "th" | "trigger_happy" | "trigger-happy" => Ok(SimulatedAim::TriggerHappy),
            "" | "normal" => Ok(SimulatedAim::Normal),
            "cs" | "careful" | "careful_shooter" | "careful-shooter" => Ok(SimulatedAim::Careful),
            other => Err(format!("unknown aim tier: {}", other)),
        }
    }
}

/// A hypothetical pawn with a given shooting skill and aim trait.
/// Accuracy is evaluated from the response curve at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedShooter {
    pub skill: f64,
    pub aim: SimulatedAim,
    pub shooting_accuracy: f64,
}

impl SimulatedShooter {
    pub fn new(skill: f64, aim: SimulatedAim, accuracy_curve: &ResponseCurve) -> Self {
        let effective_skill = skill + aim.skill_offset();
        Self {
            skill,
            aim,
            shooting_accuracy: accuracy_curve.evaluate(effective_skill),
        }
    }

    /// Default skill, normal aim.
    pub fn standard(accuracy_curve: &ResponseCurve) -> Self {
        Self::new(DEFAULT_SHOOTING_SKILL, SimulatedAim::Normal, accuracy_curve)
    }

    pub fn effective_skill(&self) -> f64 {
        self.skill + self.aim.skill_offset()
    }
}

/// Stats of a real pawn, already finalized by the host's stat pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PawnShooter {
    pub label: String,
    /// Aiming delay factor; multiplies weapon warmup.
    pub aim_speed: f64,
    pub shooting_accuracy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurretShooter {
    pub label: String,
    pub shooting_accuracy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShooterStats {
    Pawn(PawnShooter),
    Simulated(SimulatedShooter),
    Turret(TurretShooter),
}

impl ShooterStats {
    pub fn label(&self) -> String {
        match self {
            ShooterStats::Pawn(p) => p.label.clone(),
            ShooterStats::Simulated(s) => match s.aim {
                SimulatedAim::TriggerHappy => format!("Lvl {} (TH)", s.skill),
                SimulatedAim::Careful => format!("Lvl {} (CS)", s.skill),
                SimulatedAim::Normal => format!("Lvl {}", s.skill),
            },
            ShooterStats::Turret(t) => t.label.clone(),
        }
    }

    /// Multiplier on weapon warmup (1.0 = baseline).
    pub fn aim_speed(&self) -> f64 {
        match self {
            ShooterStats::Pawn(p) => p.aim_speed,
            ShooterStats::Simulated(s) => s.aim.aim_speed(),
            // turrets have no warmup-speed stat
            ShooterStats::Turret(_) => 1.0,
        }
    }

    pub fn shooting_accuracy(&self) -> f64 {
        match self {
            ShooterStats::Pawn(p) => p.shooting_accuracy,
            ShooterStats::Simulated(s) => s.shooting_accuracy,
            ShooterStats::Turret(t) => t.shooting_accuracy,
        }
    }

    /// Hit factor this shooter contributes at `range`.
    pub fn hit_factor(&self, range: f64) -> f64 {
        hit_factor_from_shooter(self.shooting_accuracy(), range)
    }
}

/// The engine's shooter term of a shot's hit chance: per-cell accuracy
/// compounded over the distance, floored at [`MIN_HIT_FACTOR`].
pub fn hit_factor_from_shooter(accuracy: f64, range: f64) -> f64 {
    accuracy.powf(range).max(MIN_HIT_FACTOR)
}

impl fmt::Display for ShooterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
