//! Turret gun: weapon stats bound to the turret's own shooter, plus fuel economics.

use super::shooter::ShooterStats;
use super::target::TargetStats;
use super::weapon::{WeaponKind, WeaponStats};
use serde::{Deserialize, Serialize};

/// Fuel (barrel wear, ammo, ...) consumption of a turret.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Refuelable {
    /// Shots fired per unit of fuel.
    pub fuel_multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurretGunStats {
    pub weapon: WeaponStats,
    pub shooter: ShooterStats,
    pub refuelable: Option<Refuelable>,
}

impl TurretGunStats {
    pub fn new(weapon: WeaponStats, shooter: ShooterStats, refuelable: Option<Refuelable>) -> Self {
        debug_assert_eq!(weapon.kind, WeaponKind::TurretGun);
        Self {
            weapon,
            shooter,
            refuelable,
        }
    }

    pub fn label(&self) -> &str {
        &self.weapon.label
    }

    pub fn needs_fuel(&self) -> bool {
        self.refuelable.is_some()
    }

    /// Shots per unit of fuel; infinite for turrets that use none.
    pub fn shots_per_fuel(&self) -> f64 {
        match self.refuelable {
            Some(r) => r.fuel_multiplier,
            None => f64::INFINITY,
        }
    }

    /// Damage per unit of fuel assuming every shot hits; infinite without fuel.
    pub fn damage_per_fuel(&self) -> f64 {
        match self.refuelable {
            Some(_) => self.shots_per_fuel() * f64::from(self.weapon.shot_damage),
            None => f64::INFINITY,
        }
    }

    pub fn adjusted_damage_per_fuel(&self, range: f64) -> f64 {
        self.damage_per_fuel() * self.turret_adjusted_hit_chance(range, None).min(1.0)
    }

    pub fn turret_raw_dps(&self, target: Option<&TargetStats>) -> f64 {
        self.weapon.raw_dps(Some(&self.shooter), target)
    }

    pub fn turret_adjusted_hit_chance(&self, range: f64, target: Option<&TargetStats>) -> f64 {
        self.weapon.adjusted_hit_chance(range, Some(&self.shooter), target)
    }

    pub fn turret_adjusted_dps(&self, range: f64, target: Option<&TargetStats>) -> f64 {
        self.weapon.adjusted_dps(range, Some(&self.shooter), target)
    }

    pub fn find_turret_optimal_range(&self, target: Option<&TargetStats>) -> f64 {
        self.weapon.find_optimal_range(Some(&self.shooter), target)
    }
}
