//! Graph series specs given on the command line, e.g.
//! `weapon=Gun_AssaultRifle@good,shooter=sim:12:cs,target=size:1:cover:0.5`
//! or `turret=Turret_MiniTurret,target=pawn:Ana`.

use crate::catalog::{Catalog, CatalogError};
use crate::config::{AppConfig, Quality, DEFAULT_SHOOTING_SKILL};
use crate::graph::{DpsFunction, GraphFunction, TurretDpsFunction};
use crate::model::{ArmorStats, ShooterStats, SimulatedAim, SimulatedShooter, TargetStats};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub enum ShooterSpec {
    Pawn(String),
    Simulated { skill: f64, aim: SimulatedAim },
}

#[derive(Debug, Clone, PartialEq)]
pub enum TargetSpec {
    Simulated { size: f64, cover: f64, armor: ArmorStats },
    Pawn { name: String, cover: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SeriesSpec {
    Weapon {
        def_name: String,
        quality: Quality,
        shooter: Option<ShooterSpec>,
        target: Option<TargetSpec>,
    },
    Turret {
        def_name: String,
        target: Option<TargetSpec>,
    },
}

impl FromStr for SeriesSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',').map(str::trim);
        let head = parts.next().unwrap_or_default();
        let (kind, def) = head
            .split_once('=')
            .ok_or_else(|| format!("series must start with weapon=DEF or turret=DEF: {}", s))?;

        let mut shooter = None;
        let mut target = None;
        for part in parts.filter(|p| !p.is_empty()) {
            let (key, value) = part
                .split_once('=')
                .ok_or_else(|| format!("expected key=value, got {}", part))?;
            match key.trim() {
                "shooter" => shooter = Some(value.parse::<ShooterSpec>()?),
                "target" => target = Some(value.parse::<TargetSpec>()?),
                other => return Err(format!("unknown series option: {}", other)),
            }
        }

        match kind.trim() {
            "weapon" => {
                let (def_name, quality) = match def.split_once('@') {
                    Some((d, q)) => (d, q.parse::<Quality>()?),
                    None => (def, Quality::Normal),
                };
                Ok(SeriesSpec::Weapon {
                    def_name: non_empty(def_name, "weapon def")?,
                    quality,
                    shooter,
                    target,
                })
            }
            "turret" => {
                if shooter.is_some() {
                    return Err("turrets use their own shooter; drop shooter=".to_string());
                }
                Ok(SeriesSpec::Turret {
                    def_name: non_empty(def, "turret def")?,
                    target,
                })
            }
            other => Err(format!("unknown series kind: {}", other)),
        }
    }
}

impl FromStr for ShooterSpec {
    type Err = String;

    /// `pawn:NAME` or `sim[:SKILL][:th|:cs]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split(':').map(str::trim);
        match tokens.next().unwrap_or_default() {
            "pawn" => {
                let name = tokens.collect::<Vec<_>>().join(":");
                Ok(ShooterSpec::Pawn(non_empty(&name, "pawn name")?))
            }
            "sim" => {
                let mut skill = DEFAULT_SHOOTING_SKILL;
                let mut aim = SimulatedAim::Normal;
                for token in tokens {
                    match token.parse::<f64>() {
                        Ok(v) => skill = v,
                        Err(_) => aim = token.parse()?,
                    }
                }
                Ok(ShooterSpec::Simulated { skill, aim })
            }
            other => Err(format!("unknown shooter kind: {}", other)),
        }
    }
}

impl FromStr for TargetSpec {
    type Err = String;

    /// `size:S[:cover:C][:sharp:A][:blunt:A][:heat:A]` or `pawn:NAME[:cover:C]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split(':').map(str::trim).collect();
        if tokens.len() < 2 || tokens.len() % 2 != 0 {
            return Err(format!("expected key:value pairs in target spec: {}", s));
        }
        let mut cover = 0.0;
        let mut armor = ArmorStats::default();
        for pair in tokens[2..].chunks(2) {
            let value = parse_number(pair[1])?;
            match pair[0] {
                "cover" => cover = value,
                "sharp" => armor.sharp = value,
                "blunt" => armor.blunt = value,
                "heat" => armor.heat = value,
                other => return Err(format!("unknown target option: {}", other)),
            }
        }
        match tokens[0] {
            "size" => Ok(TargetSpec::Simulated {
                size: parse_number(tokens[1])?,
                cover,
                armor,
            }),
            "pawn" => {
                if armor != ArmorStats::default() {
                    return Err("pawn targets take their armor from the catalog".to_string());
                }
                Ok(TargetSpec::Pawn {
                    name: non_empty(tokens[1], "pawn name")?,
                    cover,
                })
            }
            other => Err(format!("unknown target kind: {}", other)),
        }
    }
}

impl SeriesSpec {
    /// Resolve against the catalog into a graph function.
    pub fn build(
        &self,
        catalog: &Catalog,
        config: &AppConfig,
    ) -> Result<Box<dyn GraphFunction>, CatalogError> {
        match self {
            SeriesSpec::Weapon {
                def_name,
                quality,
                shooter,
                target,
            } => {
                let weapon = catalog.resolve_gun(def_name, *quality, &config.quality)?;
                let shooter = shooter
                    .as_ref()
                    .map(|s| s.build(catalog, config))
                    .transpose()?;
                let target = target.as_ref().map(|t| t.build(catalog)).transpose()?;
                Ok(Box::new(DpsFunction::new(weapon, shooter, target)))
            }
            SeriesSpec::Turret { def_name, target } => {
                let turret = catalog.resolve_turret(def_name, &config.quality)?;
                let target = target.as_ref().map(|t| t.build(catalog)).transpose()?;
                Ok(Box::new(TurretDpsFunction::new(turret, target)))
            }
        }
    }
}

impl ShooterSpec {
    pub fn build(
        &self,
        catalog: &Catalog,
        config: &AppConfig,
    ) -> Result<ShooterStats, CatalogError> {
        match self {
            ShooterSpec::Pawn(name) => catalog.resolve_pawn_shooter(name),
            ShooterSpec::Simulated { skill, aim } => Ok(ShooterStats::Simulated(
                SimulatedShooter::new(*skill, *aim, &config.accuracy_curve()),
            )),
        }
    }
}

impl TargetSpec {
    pub fn build(&self, catalog: &Catalog) -> Result<TargetStats, CatalogError> {
        match self {
            TargetSpec::Simulated { size, cover, armor } => {
                Ok(TargetStats::simulated(*size, *cover, *armor))
            }
            TargetSpec::Pawn { name, cover } => {
                catalog.resolve_pawn_target(name, *cover, ArmorStats::default())
            }
        }
    }
}

fn parse_number(s: &str) -> Result<f64, String> {
    s.parse::<f64>()
        .map_err(|_| format!("expected a number, got {}", s))
}

fn non_empty(s: &str, what: &str) -> Result<String, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err(format!("missing {}", what));
    }
    Ok(s.to_string())
}
