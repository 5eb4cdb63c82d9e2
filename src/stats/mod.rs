//! Stat panes: the headline DPS numbers for a weapon, turret or pawn, plus
//! per-distance breakdowns.

use crate::config::BREAKDOWN_STEP;
use crate::model::{ShooterStats, TurretGunStats, WeaponStats};
use crate::util::format_metric;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One line of a range breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakdownRow {
    pub range: f64,
    /// DPS, or damage per fuel for fuel breakdowns.
    pub value: f64,
    pub hit_chance: f64,
}

impl fmt::Display for BreakdownRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Distance {:>2}: {:>5} ({}%)",
            self.range,
            format_metric(self.value, 2),
            format_metric(self.hit_chance * 100.0, 1)
        )
    }
}

/// Sample distances: the minimum (at least 1), every multiple of the step
/// below the maximum, then the maximum.
pub fn breakdown_ranges(min_range: f64, max_range: f64) -> Vec<f64> {
    let min = min_range.max(1.0);
    let mut ranges = vec![min];
    let mut range = (min / BREAKDOWN_STEP).ceil() * BREAKDOWN_STEP;
    while range < max_range {
        ranges.push(range);
        range += BREAKDOWN_STEP;
    }
    ranges.push(max_range);
    ranges
}

/// Adjusted DPS and hit chance across the weapon's range.
pub fn dps_breakdown(weapon: &WeaponStats, shooter: Option<&ShooterStats>) -> Vec<BreakdownRow> {
    breakdown_ranges(weapon.min_range, weapon.max_range)
        .into_iter()
        .map(|range| BreakdownRow {
            range,
            value: weapon.adjusted_dps(range, shooter, None),
            hit_chance: weapon.adjusted_hit_chance(range, shooter, None),
        })
        .collect()
}

/// Adjusted damage per fuel and hit chance across the turret's range.
pub fn fuel_breakdown(turret: &TurretGunStats) -> Vec<BreakdownRow> {
    breakdown_ranges(turret.weapon.min_range, turret.weapon.max_range)
        .into_iter()
        .map(|range| BreakdownRow {
            range,
            value: turret.adjusted_damage_per_fuel(range),
            hit_chance: turret.turret_adjusted_hit_chance(range, None),
        })
        .collect()
}

/// DPS assuming every shot hits.
pub fn max_dps(weapon: &WeaponStats) -> f64 {
    weapon.raw_dps(None, None)
}

/// Raw DPS at the weapon's best band accuracy (capped at 1), with that band's distance.
pub fn weapon_dps(weapon: &WeaponStats) -> (f64, f64) {
    let (band, accuracy) = weapon.best_accuracy_band();
    (weapon.raw_dps(None, None) * accuracy.min(1.0), band.distance())
}

/// Adjusted DPS at the shooter's optimal range, with that range.
pub fn shooter_dps(weapon: &WeaponStats, shooter: &ShooterStats) -> (f64, f64) {
    let range = weapon.find_optimal_range(Some(shooter), None);
    (weapon.adjusted_dps(range, Some(shooter), None), range)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponPane {
    pub label: String,
    pub max_dps: f64,
    pub weapon_dps: f64,
    pub optimal_band_distance: f64,
    pub breakdown: Vec<BreakdownRow>,
}

pub fn weapon_pane(weapon: &WeaponStats) -> WeaponPane {
    let (weapon_dps, optimal_band_distance) = weapon_dps(weapon);
    WeaponPane {
        label: weapon.label.clone(),
        max_dps: max_dps(weapon),
        weapon_dps,
        optimal_band_distance,
        breakdown: dps_breakdown(weapon, None),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShooterPane {
    pub shooter: String,
    pub weapon: String,
    pub shooter_dps: f64,
    pub optimal_range: f64,
    pub breakdown: Vec<BreakdownRow>,
}

pub fn shooter_pane(weapon: &WeaponStats, shooter: &ShooterStats) -> ShooterPane {
    let (shooter_dps, optimal_range) = shooter_dps(weapon, shooter);
    ShooterPane {
        shooter: shooter.label(),
        weapon: weapon.label.clone(),
        shooter_dps,
        optimal_range,
        breakdown: dps_breakdown(weapon, Some(shooter)),
    }
}

/// Fuel economics, only present for turrets that consume fuel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelPane {
    /// Adjusted damage per fuel at the turret's optimal range.
    pub damage_per_resource: f64,
    pub max_damage_per_resource: f64,
    pub breakdown: Vec<BreakdownRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurretPane {
    pub label: String,
    pub gun: String,
    pub max_dps: f64,
    pub weapon_dps: f64,
    pub optimal_band_distance: f64,
    pub shooter_dps: f64,
    pub optimal_range: f64,
    pub breakdown: Vec<BreakdownRow>,
    pub fuel: Option<FuelPane>,
}

/// Stat pane of a turret. Unloaded turrets (an empty mortar) have no DPS to show.
pub fn turret_pane(turret: &TurretGunStats, loaded: bool) -> Option<TurretPane> {
    if !loaded {
        tracing::info!("{} is not loaded; skipping its DPS stats", turret.shooter.label());
        return None;
    }
    let weapon = &turret.weapon;
    let (weapon_dps, optimal_band_distance) = weapon_dps(weapon);
    let optimal_range = turret.find_turret_optimal_range(None);
    let fuel = turret.needs_fuel().then(|| FuelPane {
        damage_per_resource: turret.adjusted_damage_per_fuel(optimal_range),
        max_damage_per_resource: turret.damage_per_fuel(),
        breakdown: fuel_breakdown(turret),
    });
    Some(TurretPane {
        label: turret.shooter.label(),
        gun: weapon.label.clone(),
        max_dps: max_dps(weapon),
        weapon_dps,
        optimal_band_distance,
        shooter_dps: turret.turret_adjusted_dps(optimal_range, None),
        optimal_range,
        breakdown: dps_breakdown(weapon, Some(&turret.shooter)),
        fuel,
    })
}
