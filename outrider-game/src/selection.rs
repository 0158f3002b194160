//! Mount selection: chance gate, tier lottery, and weighted species draw.

use log::{debug, error, log_enabled};
use rand::Rng;
use std::fmt;
use thiserror::Error;

use crate::biome::AreaContext;
use crate::config::TierWeights;
use crate::raid::{Position, Raider};
use crate::rng::RaidRngBundle;
use crate::roster::MountRoster;
use crate::species::{SpeciesCatalog, SpeciesDef};
use crate::trace::{FactorSet, MountDecisionTrace, RollValue, WeightFactor, WeightedCandidate};

/// Handling levels below this give no selection bonus.
const HANDLING_BONUS_FLOOR: u8 = 5;

/// Scale shared by the commonality and wildness formulas.
const HANDLING_SCALE: f32 = 15.0;

/// The three candidate tiers a mount can be drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MountTier {
    /// Species native to the area's biome.
    InBiome,
    /// Wild-spawning species from anywhere on the planet.
    OutBiome,
    /// Domesticated species that never spawn wild.
    NonWild,
}

impl MountTier {
    /// Identifier of the weighted pool this tier draws from.
    #[must_use]
    pub const fn pool_id(self) -> &'static str {
        match self {
            Self::InBiome => "outrider.mount.in_biome",
            Self::OutBiome => "outrider.mount.out_biome",
            Self::NonWild => "outrider.mount.non_wild",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InBiome => "in-biome",
            Self::OutBiome => "out-of-biome",
            Self::NonWild => "non-wild",
        }
    }
}

impl fmt::Display for MountTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fatal selection condition: the chosen tier has no drawable species.
///
/// This halts the remainder of the raid; decisions made for earlier
/// raiders stand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no mountable species available for the {tier} tier (raider {raider_id})")]
pub struct PoolExhausted {
    pub raider_id: String,
    pub tier: MountTier,
}

/// A pure mount decision; engine side effects happen in `apply`.
#[derive(Debug, Clone, PartialEq)]
pub struct MountDecision {
    pub raider_id: String,
    pub species_id: String,
    pub tier: MountTier,
    /// Spawn anchor carried over from the rider.
    pub position: Position,
    pub trace: MountDecisionTrace,
}

/// Decisions for one raid, in raider order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RaidMountPlan {
    pub decisions: Vec<MountDecision>,
    /// Set when selection halted before reaching the end of the raid.
    pub halted: Option<PoolExhausted>,
}

impl RaidMountPlan {
    #[must_use]
    pub const fn is_halted(&self) -> bool {
        self.halted.is_some()
    }
}

/// Draw a uniform roll in [1,100].
pub fn draw_percent<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.gen_range(1..=100)
}

/// Whether a chance roll wins a mount attempt. A roll equal to the
/// chance loses.
#[must_use]
pub const fn chance_gate(roll: u8, chance_pct: u8) -> bool {
    roll < chance_pct
}

/// Map a tier roll in [1,100] onto a candidate tier.
#[must_use]
pub fn tier_for_roll(roll: u8, weights: &TierWeights) -> MountTier {
    let normalized = weights.normalized();
    let roll = f32::from(roll);
    if roll <= normalized.in_pct {
        MountTier::InBiome
    } else if roll <= normalized.in_pct + normalized.out_pct {
        MountTier::OutBiome
    } else {
        MountTier::NonWild
    }
}

fn effective_handling(handling_skill: u8) -> f32 {
    f32::from(handling_skill.saturating_sub(HANDLING_BONUS_FLOOR))
}

/// Wildness penalty on selectability; shrinks as handling skill rises.
#[must_use]
pub fn wildness_penalty(species: &SpeciesDef, handling_skill: u8) -> f32 {
    let handling = effective_handling(handling_skill);
    1.0 - species.wildness() * ((HANDLING_SCALE - handling) / HANDLING_SCALE)
}

/// Commonality term before the wildness penalty: common species dominate
/// at low skill, rare species become reachable as skill rises.
#[must_use]
pub fn commonality_adjusted(species: &SpeciesDef, area: &AreaContext, handling_skill: u8) -> f32 {
    let commonality = area.commonality_of(species);
    let handling = effective_handling(handling_skill);
    commonality * (HANDLING_SCALE - commonality) / HANDLING_SCALE
        + (1.0 - commonality) * handling / HANDLING_SCALE
}

/// Selection weight for wild tiers. Unclamped; the draw excludes
/// candidates whose weight is not positive.
#[must_use]
pub fn commonality_weight(species: &SpeciesDef, area: &AreaContext, handling_skill: u8) -> f32 {
    commonality_adjusted(species, area, handling_skill) * wildness_penalty(species, handling_skill)
}

/// Selection weight for the non-wild tier; more domesticated species
/// are more likely.
#[must_use]
pub fn domestication_weight(species: &SpeciesDef) -> f32 {
    1.0 - species.wildness()
}

/// Filter the catalog down to the candidates of one tier.
#[must_use]
pub fn tier_candidates<'a>(
    tier: MountTier,
    catalog: &'a SpeciesCatalog,
    roster: &MountRoster,
    area: &AreaContext,
) -> Vec<&'a SpeciesDef> {
    catalog
        .iter()
        .filter(|species| match tier {
            MountTier::InBiome => area.is_native(species),
            MountTier::OutBiome => species.animal && species.wild_spawn,
            MountTier::NonWild => species.animal && !species.wild_spawn,
        })
        .filter(|species| area.season_acceptable(species) && roster.is_mountable(&species.id))
        .collect()
}

fn score_candidate(
    tier: MountTier,
    species: &SpeciesDef,
    area: &AreaContext,
    handling_skill: u8,
) -> WeightedCandidate {
    let mut multipliers = FactorSet::new();
    match tier {
        MountTier::InBiome | MountTier::OutBiome => {
            let adjusted = commonality_adjusted(species, area, handling_skill);
            let penalty = wildness_penalty(species, handling_skill);
            multipliers.push(WeightFactor::new("wildness_penalty", f64::from(penalty)));
            WeightedCandidate {
                id: species.id.clone(),
                base_weight: f64::from(adjusted),
                multipliers,
                final_weight: f64::from(adjusted * penalty),
            }
        }
        MountTier::NonWild => {
            let weight = domestication_weight(species);
            multipliers.push(WeightFactor::new("domestication", f64::from(weight)));
            WeightedCandidate {
                id: species.id.clone(),
                base_weight: 1.0,
                multipliers,
                final_weight: f64::from(weight),
            }
        }
    }
}

/// Weighted draw over a tier's candidate pool.
///
/// Candidates whose final weight is not positive are excluded. Returns
/// `None` when the pool is empty or carries no positive weight.
pub fn pick_species<'a, R: Rng + ?Sized>(
    tier: MountTier,
    pool: &[&'a SpeciesDef],
    area: &AreaContext,
    handling_skill: u8,
    rng: &mut R,
) -> Option<(&'a SpeciesDef, MountDecisionTrace)> {
    let mut candidates = Vec::with_capacity(pool.len());
    let mut total_weight = 0.0_f64;
    for species in pool {
        let candidate = score_candidate(tier, species, area, handling_skill);
        if candidate.final_weight > 0.0 {
            total_weight += candidate.final_weight;
        }
        candidates.push(candidate);
    }

    if total_weight <= 0.0 {
        return None;
    }

    let roll = rng.r#gen::<f64>() * total_weight;
    let mut remaining = roll;
    let mut chosen_idx = candidates
        .iter()
        .position(|candidate| candidate.final_weight > 0.0)?;
    for (idx, candidate) in candidates.iter().enumerate() {
        if candidate.final_weight <= 0.0 {
            continue;
        }
        if remaining < candidate.final_weight {
            chosen_idx = idx;
            break;
        }
        remaining -= candidate.final_weight;
    }

    let trace = MountDecisionTrace {
        pool_id: tier.pool_id().to_string(),
        roll: RollValue::F64(roll),
        chosen_id: candidates[chosen_idx].id.clone(),
        candidates,
    };
    Some((pool[chosen_idx], trace))
}

/// Decide a single raider's mount, drawing from the bundle's streams.
///
/// # Errors
///
/// Returns `PoolExhausted` when the rolled tier has no drawable species;
/// the caller must halt the remainder of the raid.
pub fn decide_mount(
    raider: &Raider,
    area: &AreaContext,
    chance_pct: u8,
    catalog: &SpeciesCatalog,
    roster: &MountRoster,
    weights: &TierWeights,
    rng: &RaidRngBundle,
) -> Result<Option<MountDecision>, PoolExhausted> {
    let chance_roll = draw_percent(&mut *rng.chance());
    if !chance_gate(chance_roll, chance_pct) {
        return Ok(None);
    }

    let tier_roll = draw_percent(&mut *rng.tier());
    let tier = tier_for_roll(tier_roll, weights);
    let pool = tier_candidates(tier, catalog, roster, area);
    let Some((species, trace)) = pick_species(
        tier,
        &pool,
        area,
        raider.handling_skill,
        &mut *rng.species(),
    ) else {
        error!(
            "no spawnable {} mounts at {} (raider {})",
            tier, area.biome.id, raider.id
        );
        return Err(PoolExhausted {
            raider_id: raider.id.clone(),
            tier,
        });
    };

    if log_enabled!(log::Level::Debug) {
        for candidate in &trace.candidates {
            debug!(
                "mount candidate {}: base {:.3}, final {:.3}",
                candidate.id, candidate.base_weight, candidate.final_weight
            );
        }
        debug!("raider {} mounts {} ({})", raider.id, species.id, tier);
    }

    Ok(Some(MountDecision {
        raider_id: raider.id.clone(),
        species_id: species.id.clone(),
        tier,
        position: raider.position,
        trace,
    }))
}

/// Decide mounts for a whole raid. Pool exhaustion halts the remainder
/// of the raid; decisions already made are kept on the plan.
#[must_use]
pub fn plan_raid_mounts(
    raiders: &[Raider],
    area: &AreaContext,
    chance_pct: u8,
    catalog: &SpeciesCatalog,
    roster: &MountRoster,
    weights: &TierWeights,
    rng: &RaidRngBundle,
) -> RaidMountPlan {
    let mut decisions = Vec::new();
    for raider in raiders {
        match decide_mount(raider, area, chance_pct, catalog, roster, weights, rng) {
            Ok(Some(decision)) => decisions.push(decision),
            Ok(None) => {}
            Err(halt) => {
                return RaidMountPlan {
                    decisions,
                    halted: Some(halt),
                };
            }
        }
    }
    RaidMountPlan {
        decisions,
        halted: None,
    }
}
