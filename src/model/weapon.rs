//! Weapon performance: cycle time, raw/adjusted DPS, range-banded hit chance, optimal range.

use super::curve::{inverse_lerp, lerp};
use super::shooter::ShooterStats;
use super::target::TargetStats;
use crate::config::{DIST_LONG, DIST_MEDIUM, DIST_SHORT, DIST_TOUCH, TICKS_PER_SECOND};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponKind {
    /// Handheld gun; warmup from the verb, cooldown from the weapon stat.
    Gun,
    /// Gun mounted in a turret; warmup and cooldown come from the turret building.
    TurretGun,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccuracyBand {
    Touch,
    Short,
    Medium,
    Long,
}

impl AccuracyBand {
    /// Nominal distance of the band.
    pub fn distance(self) -> f64 {
        match self {
            AccuracyBand::Touch => DIST_TOUCH,
            AccuracyBand::Short => DIST_SHORT,
            AccuracyBand::Medium => DIST_MEDIUM,
            AccuracyBand::Long => DIST_LONG,
        }
    }
}

/// Accuracy per range band. Values above 1.0 (overcapped accuracy) are kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccuracyBands {
    pub touch: f64,
    pub short: f64,
    pub medium: f64,
    pub long: f64,
}

impl AccuracyBands {
    pub fn get(&self, band: AccuracyBand) -> f64 {
        match band {
            AccuracyBand::Touch => self.touch,
            AccuracyBand::Short => self.short,
            AccuracyBand::Medium => self.medium,
            AccuracyBand::Long => self.long,
        }
    }

    /// Multiply every band by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            touch: self.touch * factor,
            short: self.short * factor,
            medium: self.medium * factor,
            long: self.long * factor,
        }
    }

    /// Weapon-only hit chance at `range`, interpolated linearly between band distances.
    pub fn at_range(&self, range: f64) -> f64 {
        if range <= DIST_TOUCH {
            self.touch
        } else if range <= DIST_SHORT {
            lerp(self.touch, self.short, inverse_lerp(DIST_TOUCH, DIST_SHORT, range))
        } else if range <= DIST_MEDIUM {
            lerp(self.short, self.medium, inverse_lerp(DIST_SHORT, DIST_MEDIUM, range))
        } else if range <= DIST_LONG {
            lerp(self.medium, self.long, inverse_lerp(DIST_MEDIUM, DIST_LONG, range))
        } else {
            self.long
        }
    }
}

/// Snapshot of a ranged weapon's ballistic constants.
///
/// Preconditions: `burst_shot_count >= 1` and a non-degenerate cycle. The
/// catalog only builds snapshots for ranged weapons; nothing here re-checks,
/// so a zero cycle time shows up as Inf/NaN in the results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponStats {
    pub kind: WeaponKind,
    pub label: String,
    /// Seconds.
    pub warmup: f64,
    /// Seconds.
    pub cooldown: f64,
    pub shot_damage: i32,
    pub armor_penetration: f64,
    pub burst_shot_count: i32,
    pub burst_delay_ticks: i32,
    pub min_range: f64,
    pub max_range: f64,
    pub accuracy: AccuracyBands,
}

impl WeaponStats {
    /// Time from the start of aiming to the end of the cooldown, in seconds.
    /// The shooter's aim speed only scales the warmup.
    pub fn full_cycle_time(&self, shooter: Option<&ShooterStats>) -> f64 {
        let aim_factor = shooter.map(ShooterStats::aim_speed).unwrap_or(1.0);
        let burst_delay = f64::from((self.burst_shot_count - 1) * self.burst_delay_ticks);
        self.warmup * aim_factor + self.cooldown + burst_delay / TICKS_PER_SECOND
    }

    /// DPS assuming every shot hits. Missing target = standard target.
    pub fn raw_dps(&self, shooter: Option<&ShooterStats>, target: Option<&TargetStats>) -> f64 {
        let reduction = match target {
            Some(t) => t.sharp_damage_reduction(self.armor_penetration),
            None => TargetStats::standard().sharp_damage_reduction(self.armor_penetration),
        };
        f64::from(self.shot_damage) * reduction * f64::from(self.burst_shot_count)
            / self.full_cycle_time(shooter)
    }

    /// Chance a shot hits at `range`, folding in shooter and target when given.
    ///
    /// Not clamped: overcapped accuracy can push this above 1.0.
    pub fn adjusted_hit_chance(
        &self,
        range: f64,
        shooter: Option<&ShooterStats>,
        target: Option<&TargetStats>,
    ) -> f64 {
        let mut hit_chance = self.accuracy.at_range(range);
        if let Some(s) = shooter {
            hit_chance *= s.hit_factor(range);
        }
        if let Some(t) = target {
            hit_chance *= t.total_hit_factor();
        }
        hit_chance
    }

    /// Raw DPS scaled by hit chance; the hit chance is capped at 1.0 here.
    pub fn adjusted_dps(
        &self,
        range: f64,
        shooter: Option<&ShooterStats>,
        target: Option<&TargetStats>,
    ) -> f64 {
        self.raw_dps(shooter, target) * self.adjusted_hit_chance(range, shooter, target).min(1.0)
    }

    /// Integer range with the highest hit chance; the lowest one wins ties.
    pub fn find_optimal_range(
        &self,
        shooter: Option<&ShooterStats>,
        target: Option<&TargetStats>,
    ) -> f64 {
        let start = (self.min_range.ceil() as i64).max(1);
        let end = self.max_range.floor() as i64;
        let mut best_range = start;
        let mut best_chance = f64::NEG_INFINITY;
        for range in start..=end {
            let chance = self.adjusted_hit_chance(range as f64, shooter, target);
            if chance > best_chance {
                best_chance = chance;
                best_range = range;
            }
        }
        best_range as f64
    }

    /// Highest of the four band accuracies.
    pub fn best_accuracy(&self) -> f64 {
        self.best_accuracy_band().1
    }

    /// First band holding the highest accuracy, with that accuracy.
    pub fn best_accuracy_band(&self) -> (AccuracyBand, f64) {
        let mut best = (AccuracyBand::Touch, self.accuracy.touch);
        for band in [AccuracyBand::Short, AccuracyBand::Medium, AccuracyBand::Long] {
            let value = self.accuracy.get(band);
            if value > best.1 {
                best = (band, value);
            }
        }
        best
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::{
        ArmorStats, CurvePoint, PawnShooter, ResponseCurve, SimulatedAim, SimulatedShooter,
    };

    pub(crate) fn rifle() -> WeaponStats {
        WeaponStats {
            kind: WeaponKind::Gun,
            label: "test rifle".to_string(),
            warmup: 2.0,
            cooldown: 1.0,
            shot_damage: 10,
            armor_penetration: 0.0,
            burst_shot_count: 3,
            burst_delay_ticks: 10,
            min_range: 1.0,
            max_range: 40.0,
            accuracy: AccuracyBands {
                touch: 1.0,
                short: 0.8,
                medium: 0.5,
                long: 0.3,
            },
        }
    }

    fn pawn(aim_speed: f64, shooting_accuracy: f64) -> ShooterStats {
        ShooterStats::Pawn(PawnShooter {
            label: "Tester".to_string(),
            aim_speed,
            shooting_accuracy,
        })
    }

    #[test]
    fn cycle_time_and_raw_dps() {
        let w = rifle();
        let cycle = w.full_cycle_time(None);
        assert!((cycle - (2.0 + 1.0 + 20.0 / 60.0)).abs() < 1e-12);
        assert!((w.raw_dps(None, None) - 9.0).abs() < 1e-9);
        assert!((w.raw_dps(None, Some(&TargetStats::standard())) - 9.0).abs() < 1e-9);
    }

    #[test]
    fn aim_speed_only_scales_warmup() {
        let w = rifle();
        let base = w.full_cycle_time(Some(&pawn(1.0, 1.0)));
        let slow = w.full_cycle_time(Some(&pawn(2.0, 1.0)));
        assert!((slow - base - w.warmup).abs() < 1e-12);
    }

    #[test]
    fn armor_lowers_raw_dps() {
        let w = rifle();
        let armor = ArmorStats {
            sharp: 0.5,
            blunt: 0.0,
            heat: 0.0,
        };
        let armored = TargetStats::simulated(1.0, 0.0, armor);
        assert!((w.raw_dps(None, Some(&armored)) - 9.0 * 0.625).abs() < 1e-9);
    }

    #[test]
    fn hit_chance_band_edges_are_exact() {
        let w = rifle();
        assert_eq!(w.adjusted_hit_chance(0.5, None, None), 1.0);
        assert_eq!(w.adjusted_hit_chance(3.0, None, None), 1.0);
        assert_eq!(w.adjusted_hit_chance(12.0, None, None), 0.8);
        assert_eq!(w.adjusted_hit_chance(25.0, None, None), 0.5);
        assert_eq!(w.adjusted_hit_chance(40.0, None, None), 0.3);
        assert_eq!(w.adjusted_hit_chance(50.0, None, None), 0.3);
    }

    #[test]
    fn hit_chance_continuous_at_touch_short_seam() {
        let mut w = rifle();
        w.accuracy.touch = 0.9;
        w.accuracy.short = 0.6;
        assert_eq!(w.adjusted_hit_chance(3.0, None, None), 0.9);
        assert!((w.adjusted_hit_chance(3.0 + 1e-9, None, None) - 0.9).abs() < 1e-9);
        assert_eq!(w.adjusted_hit_chance(12.0, None, None), 0.6);
        assert!((w.adjusted_hit_chance(12.0 + 1e-9, None, None) - 0.6).abs() < 1e-9);
        assert!((w.adjusted_hit_chance(7.5, None, None) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn overcapped_hit_chance_is_not_clamped_until_dps() {
        let mut w = rifle();
        w.accuracy = w.accuracy.scaled(1.5);
        let big = TargetStats::simulated(2.0, 0.0, ArmorStats::default());
        let chance = w.adjusted_hit_chance(3.0, None, Some(&big));
        assert!((chance - 3.0).abs() < 1e-12);
        let dps = w.adjusted_dps(3.0, None, Some(&big));
        assert!((dps - w.raw_dps(None, Some(&big))).abs() < 1e-12);
    }

    #[test]
    fn shooter_and_target_scale_hit_chance() {
        let w = rifle();
        let s = pawn(1.0, 0.9);
        let covered = TargetStats::simulated(1.0, 0.5, ArmorStats::default());
        let chance = w.adjusted_hit_chance(2.0, Some(&s), Some(&covered));
        assert!((chance - 1.0 * 0.81 * 0.5).abs() < 1e-12);
        let dps = w.adjusted_dps(2.0, Some(&s), Some(&covered));
        assert!((dps - w.raw_dps(Some(&s), Some(&covered)) * chance).abs() < 1e-12);
    }

    #[test]
    fn optimal_range_prefers_lowest_on_ties() {
        let mut w = rifle();
        w.accuracy = AccuracyBands {
            touch: 0.7,
            short: 0.7,
            medium: 0.7,
            long: 0.7,
        };
        w.min_range = 2.3;
        assert_eq!(w.find_optimal_range(None, None), 3.0);
        w.min_range = 0.0;
        assert_eq!(w.find_optimal_range(None, None), 1.0);
    }

    #[test]
    fn flat_accuracy_is_flat_at_every_cell() {
        let mut w = rifle();
        w.accuracy = AccuracyBands {
            touch: 0.7,
            short: 0.7,
            medium: 0.7,
            long: 0.7,
        };
        for range in 1..=40 {
            let chance = w.adjusted_hit_chance(f64::from(range), None, None);
            assert_eq!(chance, 0.7, "range {}", range);
        }
    }

    #[test]
    fn optimal_range_follows_peak_accuracy() {
        let mut w = rifle();
        w.accuracy = AccuracyBands {
            touch: 0.4,
            short: 0.9,
            medium: 0.6,
            long: 0.2,
        };
        assert_eq!(w.find_optimal_range(None, None), 12.0);
        // a shooter's per-cell falloff pulls the optimum closer
        let s = pawn(1.0, 0.5);
        assert!(w.find_optimal_range(Some(&s), None) < 12.0);
    }

    #[test]
    fn optimal_range_with_empty_scan_returns_start() {
        let mut w = rifle();
        w.min_range = 5.0;
        w.max_range = 4.5;
        assert_eq!(w.find_optimal_range(None, None), 5.0);
    }

    #[test]
    fn best_accuracy_band_first_max_wins() {
        let mut w = rifle();
        w.accuracy = AccuracyBands {
            touch: 0.5,
            short: 0.9,
            medium: 0.9,
            long: 0.2,
        };
        assert_eq!(w.best_accuracy_band(), (AccuracyBand::Short, 0.9));
        assert_eq!(w.best_accuracy_band().0.distance(), 12.0);
        assert_eq!(w.best_accuracy(), 0.9);
    }

    #[test]
    fn careful_shooter_is_slower_but_more_accurate() {
        let curve = ResponseCurve::new(vec![
            CurvePoint { x: 0.0, y: 0.9 },
            CurvePoint { x: 20.0, y: 1.0 },
        ]);
        let w = rifle();
        let normal =
            ShooterStats::Simulated(SimulatedShooter::new(8.0, SimulatedAim::Normal, &curve));
        let careful =
            ShooterStats::Simulated(SimulatedShooter::new(8.0, SimulatedAim::Careful, &curve));
        assert_eq!(curve.points().len(), 2);
        assert!(w.raw_dps(Some(&careful), None) < w.raw_dps(Some(&normal), None));
        assert!(
            w.adjusted_hit_chance(20.0, Some(&careful), None)
                > w.adjusted_hit_chance(20.0, Some(&normal), None)
        );
    }
}
