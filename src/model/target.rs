//! Targets: size, cover and layered armor.

use serde::{Deserialize, Serialize};

/// Armor ratings per damage type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmorStats {
    pub sharp: f64,
    pub blunt: f64,
    pub heat: f64,
}

/// Expected fraction of a hit's damage that gets through one armor layer.
///
/// The engine rolls a uniform value per hit: below `armor/2` the hit is
/// deflected, below `armor` it does half damage, otherwise full damage.
/// Penetration is subtracted from the rating first.
pub fn damage_reduction(armor: f64, armor_penetration: f64) -> f64 {
    let effective_armor = (armor - armor_penetration).max(0.0);

    let block_chance = (effective_armor / 2.0).min(1.0);
    let mitigation_chance = (effective_armor / 2.0).min(1.0 - block_chance);
    let penetrate_chance = (1.0 - (block_chance + mitigation_chance)).max(0.0);

    penetrate_chance + mitigation_chance / 2.0
}

/// A hypothetical target built from plain numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedTarget {
    pub size: f64,
    pub cover: f64,
    pub armor: ArmorStats,
}

impl Default for SimulatedTarget {
    fn default() -> Self {
        Self {
            size: 1.0,
            cover: 0.0,
            armor: ArmorStats::default(),
        }
    }
}

/// A real pawn being shot at. Worn apparel can be layered on as `additional_armor`;
/// each layer is rolled against separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PawnTarget {
    pub label: String,
    pub body_size: f64,
    pub cover: f64,
    pub innate_armor: ArmorStats,
    pub additional_armor: ArmorStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetStats {
    Simulated(SimulatedTarget),
    Pawn(PawnTarget),
}

impl Default for TargetStats {
    fn default() -> Self {
        Self::standard()
    }
}

impl TargetStats {
    /// Unarmored, human-sized, not in cover.
    pub fn standard() -> Self {
        TargetStats::Simulated(SimulatedTarget::default())
    }

    pub fn simulated(size: f64, cover: f64, armor: ArmorStats) -> Self {
        TargetStats::Simulated(SimulatedTarget { size, cover, armor })
    }

    pub fn label(&self) -> String {
        match self {
            TargetStats::Simulated(t) => format!("Size {:.1} target", t.size),
            TargetStats::Pawn(p) => p.label.clone(),
        }
    }

    pub fn size(&self) -> f64 {
        match self {
            TargetStats::Simulated(t) => t.size,
            TargetStats::Pawn(p) => p.body_size,
        }
    }

    pub fn cover(&self) -> f64 {
        match self {
            TargetStats::Simulated(t) => t.cover,
            TargetStats::Pawn(p) => p.cover,
        }
    }

    pub fn total_hit_factor(&self) -> f64 {
        self.size() * (1.0 - self.cover())
    }

    pub fn sharp_damage_reduction(&self, armor_penetration: f64) -> f64 {
        self.layered_reduction(|a| a.sharp, armor_penetration)
    }

    pub fn blunt_damage_reduction(&self, armor_penetration: f64) -> f64 {
        self.layered_reduction(|a| a.blunt, armor_penetration)
    }

    pub fn heat_damage_reduction(&self, armor_penetration: f64) -> f64 {
        self.layered_reduction(|a| a.heat, armor_penetration)
    }

    fn layered_reduction(
        &self,
        rating: impl Fn(&ArmorStats) -> f64,
        armor_penetration: f64,
    ) -> f64 {
        match self {
            TargetStats::Simulated(t) => damage_reduction(rating(&t.armor), armor_penetration),
            TargetStats::Pawn(p) => {
                damage_reduction(rating(&p.innate_armor), armor_penetration)
                    * damage_reduction(rating(&p.additional_armor), armor_penetration)
            }
        }
    }
}
