//! Ballistic performance model: weapon, shooter and target snapshots and the DPS math over them.

mod curve;
mod shooter;
mod target;
mod turret;
pub(crate) mod weapon;

pub use curve::{inverse_lerp, lerp, CurvePoint, ResponseCurve};
pub use shooter::{
    hit_factor_from_shooter, PawnShooter, ShooterStats, SimulatedAim, SimulatedShooter,
    TurretShooter,
};
pub use target::{damage_reduction, ArmorStats, PawnTarget, SimulatedTarget, TargetStats};
pub use turret::{Refuelable, TurretGunStats};
pub use weapon::{AccuracyBand, AccuracyBands, WeaponKind, WeaponStats};
