//! Mount assignment configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::numbers::clamp_f64_to_f32;

/// Relative weights of the three species tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierWeights {
    #[serde(default = "TierWeights::default_in_biome")]
    pub in_biome: u32,
    #[serde(default = "TierWeights::default_out_biome")]
    pub out_biome: u32,
    #[serde(default = "TierWeights::default_non_wild")]
    pub non_wild: u32,
}

impl TierWeights {
    const fn default_in_biome() -> u32 {
        70
    }

    const fn default_out_biome() -> u32 {
        15
    }

    const fn default_non_wild() -> u32 {
        15
    }

    /// Sum of all tier weights.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.in_biome + self.out_biome + self.non_wild
    }

    /// Normalize the tier weights to cumulative percentage boundaries.
    ///
    /// A tier roll in [1,100] lands in-biome when at or below `in_pct`,
    /// out-of-biome when at or below `in_pct + out_pct`, non-wild otherwise.
    #[must_use]
    pub fn normalized(&self) -> NormalizedTierWeights {
        let total = f64::from(self.total().max(1));
        NormalizedTierWeights {
            in_pct: clamp_f64_to_f32(f64::from(self.in_biome) / total * 100.0),
            out_pct: clamp_f64_to_f32(f64::from(self.out_biome) / total * 100.0),
        }
    }
}

impl Default for TierWeights {
    fn default() -> Self {
        Self {
            in_biome: Self::default_in_biome(),
            out_biome: Self::default_out_biome(),
            non_wild: Self::default_non_wild(),
        }
    }
}

/// Tier boundaries expressed as percentages of the roll range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedTierWeights {
    pub in_pct: f32,
    pub out_pct: f32,
}

/// Configuration for raid mount assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountConfig {
    #[serde(default)]
    pub tier_weights: TierWeights,
    /// Percent chance for each tribal raider to arrive mounted.
    #[serde(default = "MountConfig::default_tribal_chance")]
    pub tribal_chance: u8,
    /// Percent chance for each raider of other non-exempt factions.
    #[serde(default = "MountConfig::default_outlander_chance")]
    pub outlander_chance: u8,
}

impl MountConfig {
    const fn default_tribal_chance() -> u8 {
        40
    }

    const fn default_outlander_chance() -> u8 {
        20
    }

    /// Validate configuration invariants after loading.
    ///
    /// # Errors
    ///
    /// Returns `MountConfigError` when any field violates the documented bounds.
    pub fn validate(&self) -> Result<(), MountConfigError> {
        if self.tier_weights.total() == 0 {
            return Err(MountConfigError::ZeroTierWeights);
        }
        Self::validate_chance("tribal_chance", self.tribal_chance)?;
        Self::validate_chance("outlander_chance", self.outlander_chance)?;
        Ok(())
    }

    fn validate_chance(field: &'static str, value: u8) -> Result<(), MountConfigError> {
        if value > 100 {
            return Err(MountConfigError::ChanceRange { field, value });
        }
        Ok(())
    }
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            tier_weights: TierWeights::default(),
            tribal_chance: Self::default_tribal_chance(),
            outlander_chance: Self::default_outlander_chance(),
        }
    }
}

/// Errors raised when mount configuration invariants are violated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MountConfigError {
    #[error("tier weights must have a positive total")]
    ZeroTierWeights,
    #[error("{field} must be at most 100 (got {value})")]
    ChanceRange { field: &'static str, value: u8 },
}
