//! The mountable allow-list: which species may ever be used as mounts.
//!
//! The roster is per-installation configuration owned by the host; a
//! species missing from the roster is never mountable.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::species::SpeciesCatalog;

/// Per-species roster entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RosterEntry {
    #[serde(default)]
    pub selected: bool,
}

/// Keyed store marking which species may be used as mounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MountRoster {
    #[serde(default)]
    pub animals: HashMap<String, RosterEntry>,
}

impl MountRoster {
    /// Create an empty roster; nothing is mountable.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            animals: HashMap::new(),
        }
    }

    /// Create a roster marking every animal in the catalog as mountable.
    #[must_use]
    pub fn permissive(catalog: &SpeciesCatalog) -> Self {
        let animals = catalog
            .iter()
            .filter(|species| species.animal)
            .map(|species| (species.id.clone(), RosterEntry { selected: true }))
            .collect();
        Self { animals }
    }

    /// Load a roster from a JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into valid roster data.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Whether the species may be used as a mount. Lookup miss means no.
    #[must_use]
    pub fn is_mountable(&self, species_id: &str) -> bool {
        self.animals
            .get(species_id)
            .is_some_and(|entry| entry.selected)
    }

    /// Mark a species as mountable.
    pub fn allow(&mut self, species_id: &str) {
        self.animals
            .insert(species_id.to_string(), RosterEntry { selected: true });
    }

    /// Mark a species as not mountable, keeping the entry.
    pub fn deny(&mut self, species_id: &str) {
        self.animals
            .insert(species_id.to_string(), RosterEntry { selected: false });
    }
}
