//! Species definitions and the catalog the selector draws from.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::numbers::clamp_unit;

const DEFAULT_SPECIES_DATA: &str = include_str!("../assets/data/species.json");

const fn default_true() -> bool {
    true
}

/// A mountable animal species definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesDef {
    pub id: String,
    pub name: String,
    /// Whether the definition describes an animal race at all.
    #[serde(default = "default_true")]
    pub animal: bool,
    /// Whether the species spawns in the wild (anywhere on the planet).
    #[serde(default)]
    pub wild_spawn: bool,
    /// 0.0 = fully domesticated, 1.0 = fully wild.
    #[serde(default)]
    pub wildness: f32,
    /// Coldest ambient temperature the species tolerates, in celsius.
    #[serde(default = "SpeciesDef::default_min_temperature")]
    pub min_temperature: f32,
    /// Hottest ambient temperature the species tolerates, in celsius.
    #[serde(default = "SpeciesDef::default_max_temperature")]
    pub max_temperature: f32,
}

impl SpeciesDef {
    const fn default_min_temperature() -> f32 {
        -40.0
    }

    const fn default_max_temperature() -> f32 {
        45.0
    }

    /// Wildness sanitized to the unit interval.
    #[must_use]
    pub fn wildness(&self) -> f32 {
        clamp_unit(self.wildness)
    }

    /// Whether the species tolerates the given ambient temperature.
    #[must_use]
    pub fn tolerates(&self, celsius: f32) -> bool {
        (self.min_temperature..=self.max_temperature).contains(&celsius)
    }
}

/// Container for all known species definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SpeciesCatalog {
    pub species: Vec<SpeciesDef>,
}

impl SpeciesCatalog {
    /// Create an empty catalog (useful for tests)
    #[must_use]
    pub fn empty() -> Self {
        Self {
            species: Vec::new(),
        }
    }

    /// Create a catalog from pre-parsed species definitions
    #[must_use]
    pub fn from_species(species: Vec<SpeciesDef>) -> Self {
        Self { species }
    }

    /// Load a catalog from a JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into valid species data.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Look up a species definition by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SpeciesDef> {
        self.species.iter().find(|species| species.id == id)
    }

    /// Iterate all species definitions.
    pub fn iter(&self) -> impl Iterator<Item = &SpeciesDef> {
        self.species.iter()
    }
}

/// Built-in species catalog shipped with the crate.
#[must_use]
pub fn builtin_catalog() -> &'static SpeciesCatalog {
    static CATALOG: OnceLock<SpeciesCatalog> = OnceLock::new();
    CATALOG.get_or_init(|| {
        SpeciesCatalog::from_json(DEFAULT_SPECIES_DATA).unwrap_or_default()
    })
}
