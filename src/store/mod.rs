//! SQLite persistence for favorite weapons, pawns and turrets.

use crate::config::Quality;
use crate::util::normalize_id;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS favorites (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    kind TEXT NOT NULL,
    def_name TEXT NOT NULL,
    quality TEXT NOT NULL,
    added_at TEXT NOT NULL,
    UNIQUE (kind, def_name, quality)
);

CREATE INDEX IF NOT EXISTS idx_favorites_kind ON favorites(kind);
";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteKind {
    Weapon,
    /// Stored with normal quality; pawns carry their own weapon.
    Pawn,
    Turret,
}

impl FavoriteKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FavoriteKind::Weapon => "weapon",
            FavoriteKind::Pawn => "pawn",
            FavoriteKind::Turret => "turret",
        }
    }
}

impl FromStr for FavoriteKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_id(s).as_str() {
            "weapon" | "gun" => Ok(FavoriteKind::Weapon),
            "pawn" => Ok(FavoriteKind::Pawn),
            "turret" => Ok(FavoriteKind::Turret),
            other => Err(format!("unknown favorite kind: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: i64,
    pub kind: FavoriteKind,
    pub def_name: String,
    pub quality: Quality,
    pub added_at: String,
}

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self, String> {
        let conn = Connection::open(path).map_err(|e| e.to_string())?;
        conn.execute_batch(SCHEMA).map_err(|e| e.to_string())?;
        Ok(Store { conn })
    }

    /// Add a favorite. Returns false when the same entry is already stored.
    pub fn add(
        &self,
        kind: FavoriteKind,
        def_name: &str,
        quality: Quality,
    ) -> Result<bool, String> {
        let now: DateTime<Utc> = Utc::now();
        let changed = self
            .conn
            .execute(
                "INSERT OR IGNORE INTO favorites (kind, def_name, quality, added_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![kind.as_str(), def_name, quality.as_str(), now.to_rfc3339()],
            )
            .map_err(|e| e.to_string())?;
        Ok(changed > 0)
    }

    /// Remove a favorite. Returns false when nothing matched.
    pub fn remove(
        &self,
        kind: FavoriteKind,
        def_name: &str,
        quality: Quality,
    ) -> Result<bool, String> {
        let changed = self
            .conn
            .execute(
                "DELETE FROM favorites WHERE kind = ?1 AND def_name = ?2 AND quality = ?3",
                params![kind.as_str(), def_name, quality.as_str()],
            )
            .map_err(|e| e.to_string())?;
        Ok(changed > 0)
    }

    /// Favorites in the order they were added.
    pub fn list(&self) -> Result<Vec<Favorite>, String> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, kind, def_name, quality, added_at FROM favorites ORDER BY id")
            .map_err(|e| e.to_string())?;
        let rows = stmt
            .query_map([], |r| {
                Ok((
                    r.get::<_, i64>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, String>(2)?,
                    r.get::<_, String>(3)?,
                    r.get::<_, String>(4)?,
                ))
            })
            .map_err(|e| e.to_string())?;
        let mut out = Vec::new();
        for row in rows {
            let (id, kind, def_name, quality, added_at) = row.map_err(|e| e.to_string())?;
            out.push(Favorite {
                id,
                kind: kind.parse()?,
                def_name,
                quality: quality.parse()?,
                added_at,
            });
        }
        Ok(out)
    }
}
