//! Applies a raid mount plan through the host engine.

use log::debug;

use crate::raid::{FactionCategory, Facing, Position, RaidContext};
use crate::selection::{MountTier, RaidMountPlan};
use crate::species::{SpeciesCatalog, SpeciesDef};

/// Opaque handle to an engine-owned animal entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimalHandle(pub u64);

/// Host-engine seam performing the side effects of a mount decision.
///
/// The engine owns every spawned animal from the moment `spawn_mount`
/// returns; this crate never retains it.
pub trait MountApplier {
    /// Instantiate the species under the raiding faction and place it.
    fn spawn_mount(
        &mut self,
        species: &SpeciesDef,
        faction: FactionCategory,
        position: Position,
        facing: Facing,
    ) -> AnimalHandle;

    /// Record the ridden-by relation on the rider's extension data and
    /// refresh the rider's visual draw offset.
    fn bind_mount(&mut self, raider_id: &str, mount: AnimalHandle);

    /// Issue the single-use "mounted" order binding the animal to its rider.
    fn issue_mount_order(&mut self, mount: AnimalHandle, raider_id: &str);
}

/// A rider paired with its materialized mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountAssignment {
    pub raider_id: String,
    pub species_id: String,
    pub tier: MountTier,
    pub animal: AnimalHandle,
}

/// Walk the plan in order, spawning and binding each decided mount.
pub fn apply_plan(
    plan: &RaidMountPlan,
    ctx: &RaidContext,
    catalog: &SpeciesCatalog,
    applier: &mut impl MountApplier,
) -> Vec<MountAssignment> {
    let mut assignments = Vec::with_capacity(plan.decisions.len());
    for decision in &plan.decisions {
        let Some(species) = catalog.get(&decision.species_id) else {
            // Decisions come from this catalog; a miss means it changed
            // between decide and apply.
            debug!("species {} vanished before apply", decision.species_id);
            continue;
        };
        let animal = applier.spawn_mount(species, ctx.faction, decision.position, ctx.spawn_facing);
        applier.bind_mount(&decision.raider_id, animal);
        applier.issue_mount_order(animal, &decision.raider_id);
        assignments.push(MountAssignment {
            raider_id: decision.raider_id.clone(),
            species_id: decision.species_id.clone(),
            tier: decision.tier,
            animal,
        });
    }
    assignments
}
