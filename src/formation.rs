use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Position;

pub const LINEUP_SIZE: u32 = 11;
pub const DEFAULT_FORMATION: &str = "4-3-3";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormationError {
    #[error("formation {name} has {total} slots, expected {LINEUP_SIZE}")]
    WrongSlotCount { name: String, total: u32 },
    #[error("formation {name} needs exactly one goalkeeper, got {goalkeepers}")]
    Goalkeepers { name: String, goalkeepers: u32 },
    #[error("formation name must not be empty")]
    EmptyName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotMap {
    #[serde(rename = "GK")]
    pub gk: u32,
    #[serde(rename = "DEF")]
    pub def: u32,
    #[serde(rename = "MID")]
    pub mid: u32,
    #[serde(rename = "FWD")]
    pub fwd: u32,
}

impl SlotMap {
    pub fn get(&self, position: Position) -> u32 {
        match position {
            Position::Goalkeeper => self.gk,
            Position::Defender => self.def,
            Position::Midfielder => self.mid,
            Position::Forward => self.fwd,
        }
    }

    pub fn total(&self) -> u32 {
        self.gk + self.def + self.mid + self.fwd
    }
}

/// A named lineup shape. Only built through `new`, deserialization included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FormationFields")]
pub struct Formation {
    name: String,
    structure: String,
    positions: SlotMap,
}

#[derive(Deserialize)]
struct FormationFields {
    name: String,
    structure: String,
    positions: SlotMap,
}

impl TryFrom<FormationFields> for Formation {
    type Error = FormationError;

    fn try_from(fields: FormationFields) -> Result<Self, Self::Error> {
        Formation::new(fields.name, fields.structure, fields.positions)
    }
}

impl Formation {
    /// Builds a formation, rejecting slot maps that do not field a full XI.
    pub fn new(
        name: impl Into<String>,
        structure: impl Into<String>,
        positions: SlotMap,
    ) -> Result<Self, FormationError> {
        let formation = Self {
            name: name.into(),
            structure: structure.into(),
            positions,
        };
        formation.validate()?;
        Ok(formation)
    }

    /// Shorthand for the usual case where the outfield lines spell the name, e.g. "4-3-3".
    pub fn from_lines(def: u32, mid: u32, fwd: u32) -> Result<Self, FormationError> {
        let name = format!("{def}-{mid}-{fwd}");
        Self::new(
            name.clone(),
            name,
            SlotMap {
                gk: 1,
                def,
                mid,
                fwd,
            },
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn structure(&self) -> &str {
        &self.structure
    }

    pub fn positions(&self) -> SlotMap {
        self.positions
    }

    /// Eleven slots and exactly one goalkeeper.
    fn validate(&self) -> Result<(), FormationError> {
        if self.name.trim().is_empty() {
            return Err(FormationError::EmptyName);
        }
        if self.positions.gk != 1 {
            return Err(FormationError::Goalkeepers {
                name: self.name.clone(),
                goalkeepers: self.positions.gk,
            });
        }
        let total = self.positions.total();
        if total != LINEUP_SIZE {
            return Err(FormationError::WrongSlotCount {
                name: self.name.clone(),
                total,
            });
        }
        Ok(())
    }

    pub fn slots(&self, position: Position) -> u32 {
        self.positions.get(position)
    }
}

const CATALOG_LINES: [(u32, u32, u32); 5] = [(4, 3, 3), (4, 4, 2), (3, 5, 2), (3, 4, 3), (5, 3, 2)];

static CATALOG: Lazy<Vec<Formation>> = Lazy::new(|| {
    CATALOG_LINES
        .iter()
        .filter_map(|&(def, mid, fwd)| match Formation::from_lines(def, mid, fwd) {
            Ok(formation) => Some(formation),
            Err(err) => {
                tracing::warn!(%err, "dropping invalid catalog formation");
                None
            }
        })
        .collect()
});

/// The selectable formations, default first.
pub fn formations() -> &'static [Formation] {
    &CATALOG
}

pub fn find_formation(name: &str) -> Option<&'static Formation> {
    let wanted = name.trim();
    CATALOG.iter().find(|f| f.name == wanted)
}

pub fn default_formation() -> Option<&'static Formation> {
    find_formation(DEFAULT_FORMATION).or_else(|| CATALOG.first())
}

/// Next formation in catalog order, wrapping around. Used by the formation picker.
pub fn next_formation(current: &str) -> Option<&'static Formation> {
    let idx = CATALOG.iter().position(|f| f.name == current)?;
    CATALOG.get((idx + 1) % CATALOG.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_formation_wraps() {
        assert_eq!(next_formation("4-3-3").map(Formation::name), Some("4-4-2"));
        assert_eq!(next_formation("5-3-2").map(Formation::name), Some("4-3-3"));
        assert!(next_formation("2-3-5").is_none());
    }
}
