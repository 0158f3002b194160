//! Biome profiles, playable-area context, and area resolution.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::species::SpeciesDef;

const DEFAULT_BIOME_DATA: &str = include_str!("../assets/data/biomes.json");

/// Fallback ambient temperature when a biome has no entry for a season.
const DEFAULT_SEASON_TEMPERATURE: f32 = 21.0;

/// Season of the year at the raid target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    #[default]
    Spring,
    Summer,
    Fall,
    Winter,
}

/// Identifier of a concrete playable area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AreaId(pub u32);

/// Identifier of a world tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileId(pub i32);

/// Biome classification determining native species and seasonal climate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomeProfile {
    pub id: String,
    /// Wild species native to this biome.
    #[serde(default)]
    pub natives: Vec<String>,
    /// Frequency score of each species within the biome.
    #[serde(default)]
    pub commonality: HashMap<String, f32>,
    /// Typical ambient temperature per season, in celsius.
    #[serde(default)]
    pub season_temperatures: HashMap<Season, f32>,
}

impl BiomeProfile {
    /// Commonality score of a species in this biome; unknown species score zero.
    #[must_use]
    pub fn commonality_of(&self, species_id: &str) -> f32 {
        self.commonality.get(species_id).copied().unwrap_or(0.0)
    }

    /// Whether the species spawns natively in this biome.
    #[must_use]
    pub fn is_native(&self, species_id: &str) -> bool {
        self.natives.iter().any(|native| native == species_id)
    }

    /// Ambient temperature for the given season.
    #[must_use]
    pub fn temperature_in(&self, season: Season) -> f32 {
        self.season_temperatures
            .get(&season)
            .copied()
            .unwrap_or(DEFAULT_SEASON_TEMPERATURE)
    }
}

/// Container for all known biome profiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BiomeCatalog {
    pub biomes: Vec<BiomeProfile>,
}

impl BiomeCatalog {
    /// Load a catalog from a JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into valid biome data.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Look up a biome profile by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&BiomeProfile> {
        self.biomes.iter().find(|biome| biome.id == id)
    }
}

/// Built-in biome profiles shipped with the crate.
#[must_use]
pub fn builtin_biomes() -> &'static BiomeCatalog {
    static CATALOG: OnceLock<BiomeCatalog> = OnceLock::new();
    CATALOG.get_or_init(|| BiomeCatalog::from_json(DEFAULT_BIOME_DATA).unwrap_or_default())
}

/// A resolved playable area: biome plus the season in effect there.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaContext {
    pub id: AreaId,
    pub biome: BiomeProfile,
    pub season: Season,
}

impl AreaContext {
    /// Ambient temperature at the area for the current season.
    #[must_use]
    pub fn seasonal_temperature(&self) -> f32 {
        self.biome.temperature_in(self.season)
    }

    /// Whether the species tolerates this area's current seasonal climate.
    #[must_use]
    pub fn season_acceptable(&self, species: &SpeciesDef) -> bool {
        species.tolerates(self.seasonal_temperature())
    }

    /// Commonality score of a species in the area's biome.
    #[must_use]
    pub fn commonality_of(&self, species: &SpeciesDef) -> f32 {
        self.biome.commonality_of(&species.id)
    }

    /// Whether the species spawns natively in the area's biome.
    #[must_use]
    pub fn is_native(&self, species: &SpeciesDef) -> bool {
        self.biome.is_native(&species.id)
    }
}

/// Host-engine seam resolving raid targets to concrete playable areas.
///
/// Implementations may lazily instantiate an area on lookup; that side
/// effect is the host's and must be idempotent. A `None` simply means
/// the area is not available yet.
pub trait AreaDirectory {
    /// Resolve a direct area reference.
    fn area(&self, id: AreaId) -> Option<AreaContext>;

    /// Resolve the area covering a world tile, if one is loaded.
    fn area_at_tile(&self, tile: TileId) -> Option<AreaContext>;
}
