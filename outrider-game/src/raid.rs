//! Raid parameters supplied by the host engine's incident generator.

use serde::{Deserialize, Serialize};

use crate::biome::{AreaId, TileId};

/// How the raid's characters arrive at the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrivalMode {
    EdgeWalkIn,
    Undecided,
    EdgeDrop,
    CenterDrop,
}

impl ArrivalMode {
    /// Only ground arrivals can bring mounts along.
    #[must_use]
    pub const fn supports_mounts(self) -> bool {
        matches!(self, Self::EdgeWalkIn | Self::Undecided)
    }
}

/// The raid's overall strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaidStrategy {
    ImmediateAttack,
    StageThenAttack,
    Siege,
}

impl RaidStrategy {
    /// Siege crews set up emplacements instead of riding in.
    #[must_use]
    pub const fn is_siege(self) -> bool {
        matches!(self, Self::Siege)
    }
}

/// Category of the raiding faction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactionCategory {
    Tribal,
    Outlander,
    Spacer,
    SpacerHostile,
    Mechanoid,
}

impl FactionCategory {
    /// Factions that never field mounted raiders.
    #[must_use]
    pub const fn mount_exempt(self) -> bool {
        matches!(self, Self::Spacer | Self::SpacerHostile | Self::Mechanoid)
    }
}

/// Cardinal facing used when placing spawned animals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    North,
    East,
    #[default]
    South,
    West,
}

/// Cell position within a playable area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Position {
    pub x: i32,
    pub z: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

/// What the raid is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaidTarget {
    /// A concrete playable area.
    Area(AreaId),
    /// A caravan-like multi-area token, resolvable through its tile.
    Caravan { tile: TileId },
}

/// Parameters of a single hostile raid incident.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RaidContext {
    pub arrival_mode: ArrivalMode,
    pub strategy: RaidStrategy,
    pub faction: FactionCategory,
    pub target: RaidTarget,
    #[serde(default)]
    pub spawn_facing: Facing,
}

/// One raid member eligible to receive a mount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Raider {
    pub id: String,
    /// Animal-handling skill level.
    #[serde(default)]
    pub handling_skill: u8,
    /// Spawn anchor for this raider's mount.
    #[serde(default)]
    pub position: Position,
}

impl Raider {
    #[must_use]
    pub fn new(id: &str, handling_skill: u8, position: Position) -> Self {
        Self {
            id: id.to_string(),
            handling_skill,
            position,
        }
    }
}
