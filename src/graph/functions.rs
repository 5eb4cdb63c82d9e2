//! Graph adapters over the weapon model.

use super::GraphFunction;
use crate::model::{ShooterStats, TargetStats, TurretGunStats, WeaponStats};

/// Adjusted DPS of a weapon by range, for an optional shooter and target.
pub struct DpsFunction {
    weapon: WeaponStats,
    shooter: Option<ShooterStats>,
    target: Option<TargetStats>,
}

impl DpsFunction {
    pub fn new(
        weapon: WeaponStats,
        shooter: Option<ShooterStats>,
        target: Option<TargetStats>,
    ) -> Self {
        Self {
            weapon,
            shooter,
            target,
        }
    }
}

impl GraphFunction for DpsFunction {
    fn label(&self) -> String {
        match &self.shooter {
            Some(s) => format!("{}, {}", s.label(), self.weapon.label),
            None => self.weapon.label.clone(),
        }
    }

    fn domain_min(&self) -> f64 {
        self.weapon.min_range
    }

    fn domain_max(&self) -> f64 {
        self.weapon.max_range
    }

    fn value_at(&self, x: f64) -> f64 {
        self.weapon
            .adjusted_dps(x, self.shooter.as_ref(), self.target.as_ref())
    }
}

/// Adjusted DPS of a turret by range, for an optional target.
pub struct TurretDpsFunction {
    turret: TurretGunStats,
    target: Option<TargetStats>,
}

impl TurretDpsFunction {
    pub fn new(turret: TurretGunStats, target: Option<TargetStats>) -> Self {
        Self { turret, target }
    }
}

impl GraphFunction for TurretDpsFunction {
    fn label(&self) -> String {
        self.turret.shooter.label()
    }

    fn domain_min(&self) -> f64 {
        self.turret.weapon.min_range
    }

    fn domain_max(&self) -> f64 {
        self.turret.weapon.max_range
    }

    fn value_at(&self, x: f64) -> f64 {
        self.turret.turret_adjusted_dps(x, self.target.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::LineGraph;
    use crate::model::{AccuracyBands, PawnShooter, Refuelable, TurretShooter, WeaponKind};

    fn gun(label: &str, max_range: f64) -> WeaponStats {
        WeaponStats {
            kind: WeaponKind::Gun,
            label: label.to_string(),
            warmup: 1.0,
            cooldown: 1.0,
            shot_damage: 10,
            armor_penetration: 0.1,
            burst_shot_count: 1,
            burst_delay_ticks: 0,
            min_range: 0.0,
            max_range,
            accuracy: AccuracyBands {
                touch: 0.9,
                short: 0.8,
                medium: 0.6,
                long: 0.4,
            },
        }
    }

    #[test]
    fn dps_function_labels() {
        let bare = DpsFunction::new(gun("revolver", 25.9), None, None);
        assert_eq!(bare.label(), "revolver");
        let held = DpsFunction::new(
            gun("revolver", 25.9),
            Some(ShooterStats::Pawn(PawnShooter {
                label: "Ana".to_string(),
                aim_speed: 1.0,
                shooting_accuracy: 0.95,
            })),
            None,
        );
        assert_eq!(held.label(), "Ana, revolver");
        assert_eq!(held.domain_min(), 0.0);
        assert_eq!(held.domain_max(), 25.9);
    }

    #[test]
    fn dps_function_matches_model() {
        let w = gun("rifle", 30.0);
        let f = DpsFunction::new(w.clone(), None, None);
        assert_eq!(f.value_at(10.0), w.adjusted_dps(10.0, None, None));
        // 10 dmg / 2 s at touch accuracy
        assert!((f.value_at(2.0) - 5.0 * 0.9).abs() < 1e-12);
    }

    #[test]
    fn turret_function_uses_turret_shooter() {
        let mut w = gun("autocannon", 32.9);
        w.kind = WeaponKind::TurretGun;
        let turret = TurretGunStats::new(
            w,
            ShooterStats::Turret(TurretShooter {
                label: "autocannon turret".to_string(),
                shooting_accuracy: 0.96,
            }),
            Some(Refuelable { fuel_multiplier: 2.0 }),
        );
        let f = TurretDpsFunction::new(turret.clone(), None);
        assert_eq!(f.label(), "autocannon turret");
        assert_eq!(f.value_at(12.0), turret.turret_adjusted_dps(12.0, None));
    }

    #[test]
    fn weapons_share_one_domain_in_graph() {
        let mut g = LineGraph::default();
        g.add_functions([
            Box::new(DpsFunction::new(gun("pistol", 10.0), None, None)) as Box<dyn GraphFunction>,
            Box::new(DpsFunction::new(gun("rifle", 20.0), None, None)),
        ]);
        assert_eq!(g.domain(), (0.0, 20.0));
        // step 0.04 everywhere; the pistol stops near its own range
        let pistol = &g.curves()[0];
        let last_sample = pistol.points[pistol.points.len() - 2];
        assert!(last_sample.x < 10.0 && last_sample.x > 10.0 - 0.04 - 1e-9);
        assert_eq!(pistol.points.last().unwrap().y, 0.0);
    }
}
