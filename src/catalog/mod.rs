//! Definition catalog: stands in for the game's def database and stat pipeline.
//!
//! Loads weapon, turret and pawn definitions and turns them into model
//! snapshots. This is the only layer that validates input; problems are
//! logged here and reported as [`CatalogError`], never raised from the math.

mod defs;
mod source;

pub use defs::{
    ChangeableProjectileDef, DefFile, PawnDef, ProjectileDef, TurretDef, VerbDef, WeaponDef,
};
pub use source::{read_sources, SourceDoc};

use crate::config::{Quality, QualityTuning};
use crate::model::{
    ArmorStats, PawnShooter, PawnTarget, ShooterStats, TargetStats, TurretGunStats,
    TurretShooter, WeaponKind, WeaponStats,
};
use crate::util::normalize_id;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse {origin}: {source}")]
    Toml {
        origin: String,
        source: toml::de::Error,
    },
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("{origin} is too large ({bytes} bytes)")]
    TooLarge { origin: String, bytes: u64 },
    #[error("unsupported catalog source: {0}")]
    UnsupportedSource(String),
    #[error("unknown {kind} def: {name}")]
    UnknownDef { kind: &'static str, name: String },
    #[error("{0} is not a ranged weapon")]
    NotRanged(String),
    #[error("pawn {0} has no primary weapon")]
    NoPrimaryWeapon(String),
}

/// All known definitions, keyed by normalized def name.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    weapons: BTreeMap<String, WeaponDef>,
    turrets: BTreeMap<String, TurretDef>,
    pawns: BTreeMap<String, PawnDef>,
}

impl Catalog {
    /// Load from a `.toml` file, a directory of them, or a `.zip`/`.pak` archive.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let docs = read_sources(path)?;
        let mut catalog = Catalog::default();
        for doc in &docs {
            catalog.add_toml(&doc.origin, &doc.content)?;
        }
        tracing::info!(
            "loaded catalog from {}: {} weapon(s), {} turret(s), {} pawn(s)",
            path.display(),
            catalog.weapons.len(),
            catalog.turrets.len(),
            catalog.pawns.len()
        );
        Ok(catalog)
    }

    /// Parse one document and merge it; later definitions replace earlier ones.
    pub fn add_toml(&mut self, origin: &str, content: &str) -> Result<(), CatalogError> {
        let file: DefFile = toml::from_str(content).map_err(|source| CatalogError::Toml {
            origin: origin.to_string(),
            source,
        })?;
        self.merge(origin, file);
        Ok(())
    }

    pub fn merge(&mut self, origin: &str, file: DefFile) {
        for w in file.weapon {
            if let Some(old) = self.weapons.insert(normalize_id(&w.def_name), w) {
                tracing::warn!(
                    "{}: weapon {} overrides an earlier definition",
                    origin,
                    old.def_name
                );
            }
        }
        for t in file.turret {
            if let Some(old) = self.turrets.insert(normalize_id(&t.def_name), t) {
                tracing::warn!(
                    "{}: turret {} overrides an earlier definition",
                    origin,
                    old.def_name
                );
            }
        }
        for p in file.pawn {
            if let Some(old) = self.pawns.insert(normalize_id(&p.name), p) {
                tracing::warn!("{}: pawn {} overrides an earlier definition", origin, old.name);
            }
        }
    }

    pub fn weapon(&self, def_name: &str) -> Option<&WeaponDef> {
        self.weapons.get(&normalize_id(def_name))
    }

    pub fn turret(&self, def_name: &str) -> Option<&TurretDef> {
        self.turrets.get(&normalize_id(def_name))
    }

    pub fn pawn(&self, name: &str) -> Option<&PawnDef> {
        self.pawns.get(&normalize_id(name))
    }

    pub fn weapons(&self) -> impl Iterator<Item = &WeaponDef> {
        self.weapons.values()
    }

    pub fn turrets(&self) -> impl Iterator<Item = &TurretDef> {
        self.turrets.values()
    }

    pub fn pawns(&self) -> impl Iterator<Item = &PawnDef> {
        self.pawns.values()
    }

    /// Snapshot of a handheld gun at the given quality.
    pub fn resolve_gun(
        &self,
        def_name: &str,
        quality: Quality,
        tuning: &QualityTuning,
    ) -> Result<WeaponStats, CatalogError> {
        let def = self.ranged_weapon(def_name)?;
        let verb = shoot_verb(def);
        let damage_factor = tuning.damage.factor(quality);
        let (shot_damage, armor_penetration) = projectile_stats(verb.projectile, damage_factor);
        Ok(WeaponStats {
            kind: WeaponKind::Gun,
            label: format!("{} ({})", def.label(), quality),
            warmup: verb.warmup_time,
            cooldown: def.cooldown,
            shot_damage,
            armor_penetration,
            burst_shot_count: verb.burst_shot_count,
            burst_delay_ticks: verb.ticks_between_burst_shots,
            min_range: verb.min_range,
            max_range: verb.range,
            accuracy: def.accuracy.scaled(tuning.accuracy.factor(quality)),
        })
    }

    /// Snapshot of a turret and its mounted gun (normal quality).
    pub fn resolve_turret(
        &self,
        def_name: &str,
        tuning: &QualityTuning,
    ) -> Result<TurretGunStats, CatalogError> {
        let turret = self.turret(def_name).ok_or_else(|| {
            tracing::error!("could not find turret def {}", def_name);
            CatalogError::UnknownDef {
                kind: "turret",
                name: def_name.to_string(),
            }
        })?;
        let gun = self.ranged_weapon(&turret.gun)?;
        let verb = shoot_verb(gun);
        let quality = Quality::Normal;

        // loaded ammunition replaces the verb's default projectile
        let projectile = turret
            .changeable_projectile
            .filter(|c| c.loaded)
            .and_then(|c| c.projectile)
            .or(verb.projectile);
        let (shot_damage, armor_penetration) =
            projectile_stats(projectile, tuning.damage.factor(quality));

        let cooldown = match turret.burst_cooldown {
            Some(c) if c >= 0.0 => c,
            _ => verb.default_cooldown_time,
        };
        let warmup = (turret.burst_warmup[0] + turret.burst_warmup[1]) / 2.0;

        let weapon = WeaponStats {
            kind: WeaponKind::TurretGun,
            label: gun.label().to_string(),
            warmup,
            cooldown,
            shot_damage,
            armor_penetration,
            burst_shot_count: verb.burst_shot_count,
            burst_delay_ticks: verb.ticks_between_burst_shots,
            min_range: verb.min_range,
            max_range: verb.range,
            accuracy: gun.accuracy.scaled(tuning.accuracy.factor(quality)),
        };
        let shooter = ShooterStats::Turret(TurretShooter {
            label: turret.label().to_string(),
            shooting_accuracy: turret.shooting_accuracy,
        });
        Ok(TurretGunStats::new(weapon, shooter, turret.refuelable))
    }

    pub fn resolve_pawn_shooter(&self, name: &str) -> Result<ShooterStats, CatalogError> {
        let pawn = self.find_pawn(name)?;
        Ok(ShooterStats::Pawn(PawnShooter {
            label: pawn.label().to_string(),
            aim_speed: pawn.aiming_delay_factor,
            shooting_accuracy: pawn.shooting_accuracy,
        }))
    }

    /// The pawn as a target, optionally in cover and with an extra armor layer.
    pub fn resolve_pawn_target(
        &self,
        name: &str,
        cover: f64,
        additional_armor: ArmorStats,
    ) -> Result<TargetStats, CatalogError> {
        let pawn = self.find_pawn(name)?;
        Ok(TargetStats::Pawn(PawnTarget {
            label: pawn.label().to_string(),
            body_size: pawn.body_size,
            cover,
            innate_armor: pawn.armor,
            additional_armor,
        }))
    }

    /// The pawn's equipped primary weapon.
    pub fn resolve_pawn_weapon(
        &self,
        name: &str,
        tuning: &QualityTuning,
    ) -> Result<WeaponStats, CatalogError> {
        let pawn = self.find_pawn(name)?;
        let Some(primary) = pawn.primary.as_deref() else {
            tracing::warn!("pawn {} has no primary weapon", pawn.name);
            return Err(CatalogError::NoPrimaryWeapon(pawn.name.clone()));
        };
        self.resolve_gun(primary, pawn.primary_quality, tuning)
    }

    fn find_pawn(&self, name: &str) -> Result<&PawnDef, CatalogError> {
        self.pawn(name).ok_or_else(|| {
            tracing::error!("could not find pawn {}", name);
            CatalogError::UnknownDef {
                kind: "pawn",
                name: name.to_string(),
            }
        })
    }

    fn ranged_weapon(&self, def_name: &str) -> Result<&WeaponDef, CatalogError> {
        let def = self.weapon(def_name).ok_or_else(|| {
            tracing::error!("could not find weapon def {}", def_name);
            CatalogError::UnknownDef {
                kind: "weapon",
                name: def_name.to_string(),
            }
        })?;
        if !def.is_ranged_weapon() {
            tracing::error!(
                "tried to get the ranged weapon stats of {}, which is not a ranged weapon",
                def.def_name
            );
            return Err(CatalogError::NotRanged(def.def_name.clone()));
        }
        Ok(def)
    }
}

/// First non-melee verb. A def without one is a data error: it is logged and a
/// default verb is substituted so downstream math still has numbers to work with.
fn shoot_verb(def: &WeaponDef) -> VerbDef {
    match def.verbs.iter().find(|v| !v.melee) {
        Some(v) => v.clone(),
        None => {
            tracing::error!("could not find a valid shoot verb for {}", def.def_name);
            VerbDef::default()
        }
    }
}

/// Damage (rounded) and armor penetration after the quality damage factor.
fn projectile_stats(projectile: Option<ProjectileDef>, damage_factor: f64) -> (i32, f64) {
    match projectile {
        Some(p) => (
            (f64::from(p.damage) * damage_factor).round() as i32,
            p.armor_penetration * damage_factor,
        ),
        None => (0, 0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFS: &str = r#"
        [[weapon]]
        def_name = "Gun_AssaultRifle"
        label = "assault rifle"
        cooldown = 1.7
        accuracy = { touch = 0.6, short = 0.7, medium = 0.65, long = 0.55 }
        [[weapon.verbs]]
        warmup_time = 1.0
        burst_shot_count = 3
        ticks_between_burst_shots = 7
        range = 30.9
        projectile = { damage = 11, armor_penetration = 0.16 }

        [[weapon]]
        def_name = "Gun_Broken"
        ranged = true
        accuracy = { touch = 0.5, short = 0.5, medium = 0.5, long = 0.5 }

        [[weapon]]
        def_name = "MeleeWeapon_Knife"
        [[weapon.verbs]]
        melee = true

        [[weapon]]
        def_name = "Gun_MiniTurret"
        label = "mini-turret gun"
        accuracy = { touch = 0.77, short = 0.7, medium = 0.45, long = 0.24 }
        [[weapon.verbs]]
        burst_shot_count = 2
        ticks_between_burst_shots = 8
        range = 28.9
        default_cooldown_time = 2.0
        projectile = { damage = 11, armor_penetration = 0.16 }

        [[turret]]
        def_name = "Turret_MiniTurret"
        label = "mini-turret"
        gun = "Gun_MiniTurret"
        burst_warmup = [1.0, 2.0]
        burst_cooldown = 4.8
        refuelable = { fuel_multiplier = 10.0 }

        [[turret]]
        def_name = "Turret_Default"
        gun = "Gun_MiniTurret"
        burst_cooldown = -1.0
        changeable_projectile = { loaded = true, projectile = { damage = 50, armor_penetration = 0.5 } }

        [[pawn]]
        name = "Ana"
        aiming_delay_factor = 0.8
        shooting_accuracy = 0.97
        body_size = 1.0
        armor = { sharp = 0.4 }
        primary = "Gun_AssaultRifle"
        primary_quality = "legendary"

        [[pawn]]
        name = "Bo"
        shooting_accuracy = 0.9
    "#;

    fn catalog() -> Catalog {
        let mut c = Catalog::default();
        c.add_toml("test", DEFS).unwrap();
        c
    }

    #[test]
    fn resolve_gun_at_normal_quality() {
        let w = catalog()
            .resolve_gun("gun_assaultrifle", Quality::Normal, &QualityTuning::default())
            .unwrap();
        assert_eq!(w.kind, WeaponKind::Gun);
        assert_eq!(w.label, "assault rifle (normal)");
        assert_eq!(w.warmup, 1.0);
        assert_eq!(w.cooldown, 1.7);
        assert_eq!(w.shot_damage, 11);
        assert_eq!(w.burst_shot_count, 3);
        assert_eq!(w.burst_delay_ticks, 7);
        assert_eq!(w.max_range, 30.9);
        assert_eq!(w.accuracy.touch, 0.6);
    }

    #[test]
    fn quality_scales_accuracy_and_damage() {
        let tuning = QualityTuning::default();
        let w = catalog()
            .resolve_gun("Gun_AssaultRifle", Quality::Legendary, &tuning)
            .unwrap();
        assert!((w.accuracy.short - 0.7 * 1.5).abs() < 1e-12);
        // 11 * 1.25 = 13.75 -> 14
        assert_eq!(w.shot_damage, 14);
        assert!((w.armor_penetration - 0.16 * 1.25).abs() < 1e-12);
    }

    #[test]
    fn missing_shoot_verb_falls_back_to_null_verb() {
        let w = catalog()
            .resolve_gun("Gun_Broken", Quality::Normal, &QualityTuning::default())
            .unwrap();
        assert_eq!(w.burst_shot_count, 1);
        assert_eq!(w.shot_damage, 0);
        assert_eq!(w.max_range, 0.0);
        assert_eq!(w.full_cycle_time(None), 0.0);
    }

    #[test]
    fn invalid_weapons_are_rejected() {
        let c = catalog();
        let tuning = QualityTuning::default();
        assert!(matches!(
            c.resolve_gun("MeleeWeapon_Knife", Quality::Normal, &tuning),
            Err(CatalogError::NotRanged(_))
        ));
        assert!(matches!(
            c.resolve_gun("Gun_Nope", Quality::Normal, &tuning),
            Err(CatalogError::UnknownDef { kind: "weapon", .. })
        ));
    }

    #[test]
    fn resolve_turret_uses_building_timings() {
        let t = catalog()
            .resolve_turret("Turret_MiniTurret", &QualityTuning::default())
            .unwrap();
        assert_eq!(t.weapon.kind, WeaponKind::TurretGun);
        assert_eq!(t.weapon.warmup, 1.5);
        assert_eq!(t.weapon.cooldown, 4.8);
        assert_eq!(t.shooter.label(), "mini-turret");
        assert_eq!(t.shooter.shooting_accuracy(), 0.96);
        assert_eq!(t.shots_per_fuel(), 10.0);
        assert_eq!(t.damage_per_fuel(), 110.0);
    }

    #[test]
    fn turret_cooldown_and_ammo_fallbacks() {
        let t = catalog()
            .resolve_turret("Turret_Default", &QualityTuning::default())
            .unwrap();
        assert_eq!(t.weapon.cooldown, 2.0);
        assert_eq!(t.weapon.warmup, 0.0);
        assert_eq!(t.weapon.shot_damage, 50);
        assert_eq!(t.weapon.armor_penetration, 0.5);
        assert!(!t.needs_fuel());
    }

    #[test]
    fn pawn_as_shooter_target_and_wielder() {
        let c = catalog();
        let tuning = QualityTuning::default();
        let s = c.resolve_pawn_shooter("ana").unwrap();
        assert_eq!(s.aim_speed(), 0.8);
        assert_eq!(s.shooting_accuracy(), 0.97);

        let extra = ArmorStats { sharp: 0.2, blunt: 0.0, heat: 0.0 };
        let t = c.resolve_pawn_target("Ana", 0.25, extra).unwrap();
        assert_eq!(t.cover(), 0.25);
        let expected =
            crate::model::damage_reduction(0.4, 0.0) * crate::model::damage_reduction(0.2, 0.0);
        assert!((t.sharp_damage_reduction(0.0) - expected).abs() < 1e-12);

        let w = c.resolve_pawn_weapon("Ana", &tuning).unwrap();
        assert_eq!(w.label, "assault rifle (legendary)");
        assert!(matches!(
            c.resolve_pawn_weapon("Bo", &tuning),
            Err(CatalogError::NoPrimaryWeapon(_))
        ));
        assert!(matches!(
            c.resolve_pawn_shooter("Cy"),
            Err(CatalogError::UnknownDef { kind: "pawn", .. })
        ));
    }

    #[test]
    fn later_documents_override() {
        let mut c = catalog();
        c.add_toml(
            "patch",
            "[[pawn]]\nname = \"ANA\"\nshooting_accuracy = 0.5\n\n\
             [[weapon]]\ndef_name = \"gun_broken\"\nlabel = \"patched\"\n",
        )
        .unwrap();
        assert_eq!(c.pawn("ana").unwrap().shooting_accuracy, 0.5);
        assert_eq!(c.pawns().count(), 2);
        assert_eq!(c.weapons().count(), 4);
        assert_eq!(c.turrets().count(), 2);
        assert!(c.weapons().any(|w| w.label.as_deref() == Some("patched")));
    }

    #[test]
    fn bad_toml_names_its_origin() {
        let mut c = Catalog::default();
        let err = c.add_toml("broken.toml", "[[weapon]\n").unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }
}
