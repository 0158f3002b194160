//! Outrider Mount Engine
//!
//! Platform-agnostic core logic deciding which hostile raiders arrive
//! mounted and on which animal species. This crate provides the whole
//! assignment mechanic without engine or platform-specific dependencies;
//! hosts plug in area resolution, data loading, and entity side effects
//! through the trait seams.

pub mod apply;
pub mod biome;
pub mod config;
pub mod eligibility;
pub mod numbers;
pub mod raid;
pub mod rng;
pub mod roster;
pub mod selection;
pub mod species;
pub mod trace;

// Re-export commonly used types
pub use apply::{AnimalHandle, MountApplier, MountAssignment, apply_plan};
pub use biome::{
    AreaContext, AreaDirectory, AreaId, BiomeCatalog, BiomeProfile, Season, TileId, builtin_biomes,
};
pub use config::{MountConfig, MountConfigError, NormalizedTierWeights, TierWeights};
pub use eligibility::{RaidEligibility, StandDownReason, evaluate_raid, mount_chance};
pub use raid::{
    ArrivalMode, FactionCategory, Facing, Position, RaidContext, RaidStrategy, RaidTarget, Raider,
};
pub use rng::{CountingRng, RaidRngBundle};
pub use roster::{MountRoster, RosterEntry};
pub use selection::{
    MountDecision, MountTier, PoolExhausted, RaidMountPlan, chance_gate, commonality_weight,
    decide_mount, domestication_weight, draw_percent, pick_species, plan_raid_mounts,
    tier_candidates, tier_for_roll, wildness_penalty,
};
pub use species::{SpeciesCatalog, SpeciesDef, builtin_catalog};
pub use trace::{MountDecisionTrace, RollValue, WeightFactor, WeightedCandidate};

/// Trait for abstracting data loading operations
/// Platform-specific implementations should provide this
pub trait MountDataSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the species catalog from the platform-specific source
    ///
    /// # Errors
    ///
    /// Returns an error if the species catalog cannot be loaded.
    fn load_species_catalog(&self) -> Result<SpeciesCatalog, Self::Error>;

    /// Load configuration data for a specific system
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or parsed.
    fn load_config<T>(&self, config_name: &str) -> Result<T, Self::Error>
    where
        T: serde::de::DeserializeOwned;
}

/// Result of one whole-raid mount assignment pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RaidMountOutcome {
    pub assignments: Vec<MountAssignment>,
    /// Why the raid was quietly skipped, when it was.
    pub stood_down: Option<StandDownReason>,
    /// Set when selection halted partway through the raid.
    pub halted: Option<PoolExhausted>,
}

impl RaidMountOutcome {
    fn from_stand_down(reason: StandDownReason) -> Self {
        Self {
            assignments: Vec::new(),
            stood_down: Some(reason),
            halted: None,
        }
    }

    /// Number of raiders that received a mount.
    #[must_use]
    pub fn mounted_count(&self) -> usize {
        self.assignments.len()
    }
}

/// Main engine wiring eligibility, selection, and application together.
pub struct MountEngine<D, A>
where
    D: MountDataSource,
    A: MountApplier,
{
    data: D,
    applier: A,
}

impl<D, A> MountEngine<D, A>
where
    D: MountDataSource,
    A: MountApplier,
{
    /// Create a new engine with the provided data source and applier
    pub const fn new(data: D, applier: A) -> Self {
        Self { data, applier }
    }

    /// Access the applier, e.g. to hand spawned handles back to the host.
    pub const fn applier(&self) -> &A {
        &self.applier
    }

    /// Assign mounts for one raid, end to end.
    ///
    /// Runs the eligibility gate, plans every raider's mount with the
    /// provided RNG streams, and applies the plan through the host
    /// engine. Completes synchronously before returning.
    ///
    /// # Errors
    ///
    /// Returns an error when data loading fails or the loaded
    /// configuration is invalid. Stand-downs and pool exhaustion are
    /// reported on the outcome, not as errors.
    pub fn assign_raid_mounts(
        &mut self,
        ctx: &RaidContext,
        raiders: &[Raider],
        areas: &impl AreaDirectory,
        rng: &RaidRngBundle,
    ) -> Result<RaidMountOutcome, anyhow::Error>
    where
        D::Error: Into<anyhow::Error>,
    {
        let catalog = self.data.load_species_catalog().map_err(Into::into)?;
        let roster: MountRoster = self.data.load_config("mount_roster").map_err(Into::into)?;
        let cfg: MountConfig = self.data.load_config("mounts").map_err(Into::into)?;
        cfg.validate()?;

        match evaluate_raid(ctx, raiders, areas, &cfg) {
            RaidEligibility::StandDown(reason) => Ok(RaidMountOutcome::from_stand_down(reason)),
            RaidEligibility::Proceed { area, chance_pct } => {
                let plan = plan_raid_mounts(
                    raiders,
                    &area,
                    chance_pct,
                    &catalog,
                    &roster,
                    &cfg.tier_weights,
                    rng,
                );
                let assignments = apply_plan(&plan, ctx, &catalog, &mut self.applier);
                Ok(RaidMountOutcome {
                    assignments,
                    stood_down: None,
                    halted: plan.halted,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::DeserializeOwned;
    use std::convert::Infallible;

    #[derive(Clone, Copy, Default)]
    struct FixtureSource;

    impl MountDataSource for FixtureSource {
        type Error = Infallible;

        fn load_species_catalog(&self) -> Result<SpeciesCatalog, Self::Error> {
            Ok(builtin_catalog().clone())
        }

        fn load_config<T>(&self, config_name: &str) -> Result<T, Self::Error>
        where
            T: DeserializeOwned,
        {
            let json = match config_name {
                "mount_roster" => serde_json::to_string(&MountRoster::permissive(builtin_catalog()))
                    .unwrap_or_else(|_| String::from("{}")),
                _ => String::from("{}"),
            };
            let parsed = serde_json::from_str(&json)
                .or_else(|_| serde_json::from_str("{}"))
                .unwrap();
            Ok(parsed)
        }
    }

    #[derive(Debug, Default)]
    struct CountingApplier {
        next_handle: u64,
        calls: usize,
    }

    impl MountApplier for CountingApplier {
        fn spawn_mount(
            &mut self,
            _species: &SpeciesDef,
            _faction: FactionCategory,
            _position: Position,
            _facing: Facing,
        ) -> AnimalHandle {
            self.next_handle += 1;
            self.calls += 1;
            AnimalHandle(self.next_handle)
        }

        fn bind_mount(&mut self, _raider_id: &str, _mount: AnimalHandle) {
            self.calls += 1;
        }

        fn issue_mount_order(&mut self, _mount: AnimalHandle, _raider_id: &str) {
            self.calls += 1;
        }
    }

    struct SingleArea(AreaContext);

    impl AreaDirectory for SingleArea {
        fn area(&self, id: AreaId) -> Option<AreaContext> {
            (id == self.0.id).then(|| self.0.clone())
        }

        fn area_at_tile(&self, _tile: TileId) -> Option<AreaContext> {
            None
        }
    }

    fn forest() -> SingleArea {
        SingleArea(AreaContext {
            id: AreaId(1),
            biome: builtin_biomes()
                .get("temperate_forest")
                .expect("builtin biome")
                .clone(),
            season: Season::Summer,
        })
    }

    fn walk_in(faction: FactionCategory) -> RaidContext {
        RaidContext {
            arrival_mode: ArrivalMode::EdgeWalkIn,
            strategy: RaidStrategy::ImmediateAttack,
            faction,
            target: RaidTarget::Area(AreaId(1)),
            spawn_facing: Facing::South,
        }
    }

    #[test]
    fn engine_runs_a_raid_end_to_end() {
        let mut engine = MountEngine::new(FixtureSource, CountingApplier::default());
        let raiders: Vec<Raider> = (0..10)
            .map(|i| Raider::new(&format!("raider-{i}"), 7, Position::new(i, 0)))
            .collect();
        let outcome = engine
            .assign_raid_mounts(
                &walk_in(FactionCategory::Tribal),
                &raiders,
                &forest(),
                &RaidRngBundle::from_user_seed(11),
            )
            .expect("engine run");

        assert!(outcome.stood_down.is_none());
        assert!(outcome.halted.is_none());
        // spawn + bind + order per assignment
        assert_eq!(engine.applier().calls, outcome.mounted_count() * 3);
    }

    #[test]
    fn exempt_faction_makes_no_engine_calls() {
        let mut engine = MountEngine::new(FixtureSource, CountingApplier::default());
        let raiders = vec![Raider::new("raider-0", 4, Position::new(0, 0))];
        let outcome = engine
            .assign_raid_mounts(
                &walk_in(FactionCategory::Mechanoid),
                &raiders,
                &forest(),
                &RaidRngBundle::from_user_seed(11),
            )
            .expect("engine run");

        assert_eq!(outcome.stood_down, Some(StandDownReason::ExemptFaction));
        assert_eq!(outcome.mounted_count(), 0);
        assert_eq!(engine.applier().calls, 0);
    }

    #[test]
    fn engine_is_deterministic_per_seed() {
        let raiders: Vec<Raider> = (0..6)
            .map(|i| Raider::new(&format!("raider-{i}"), 12, Position::new(i, 1)))
            .collect();
        let run = |seed: u64| {
            let mut engine = MountEngine::new(FixtureSource, CountingApplier::default());
            engine
                .assign_raid_mounts(
                    &walk_in(FactionCategory::Outlander),
                    &raiders,
                    &forest(),
                    &RaidRngBundle::from_user_seed(seed),
                )
                .expect("engine run")
        };
        assert_eq!(run(99), run(99));
    }
}
