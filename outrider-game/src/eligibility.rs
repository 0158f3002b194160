//! Per-raid eligibility gate for mount assignment.

use crate::biome::{AreaContext, AreaDirectory};
use crate::config::MountConfig;
use crate::raid::{FactionCategory, RaidContext, RaidTarget, Raider};

/// Why a raid was quietly skipped. Stand-downs are expected control
/// flow, never logged and never errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandDownReason {
    EmptyRaid,
    ArrivalMode,
    SiegeStrategy,
    AreaUnavailable,
    ExemptFaction,
}

/// Outcome of the per-raid eligibility gate.
#[derive(Debug, Clone, PartialEq)]
pub enum RaidEligibility {
    /// Mounts are allowed; each raider rolls against `chance_pct`.
    Proceed {
        area: AreaContext,
        chance_pct: u8,
    },
    StandDown(StandDownReason),
}

impl RaidEligibility {
    /// Stand-down reason, if the raid was skipped.
    #[must_use]
    pub const fn stand_down(&self) -> Option<StandDownReason> {
        match self {
            Self::Proceed { .. } => None,
            Self::StandDown(reason) => Some(*reason),
        }
    }
}

/// Per-character base mount chance for a faction category.
///
/// `None` is the abort sentinel: the faction never fields mounts.
#[must_use]
pub fn mount_chance(faction: FactionCategory, cfg: &MountConfig) -> Option<u8> {
    match faction {
        FactionCategory::Tribal => Some(cfg.tribal_chance),
        _ if faction.mount_exempt() => None,
        _ => Some(cfg.outlander_chance),
    }
}

/// Decide whether a raid is eligible for mounts at all.
///
/// Pure apart from area resolution, which may lazily instantiate the
/// area inside the host (documented on [`AreaDirectory`]).
pub fn evaluate_raid(
    ctx: &RaidContext,
    raiders: &[Raider],
    areas: &impl AreaDirectory,
    cfg: &MountConfig,
) -> RaidEligibility {
    if raiders.is_empty() {
        return RaidEligibility::StandDown(StandDownReason::EmptyRaid);
    }
    if !ctx.arrival_mode.supports_mounts() {
        return RaidEligibility::StandDown(StandDownReason::ArrivalMode);
    }
    if ctx.strategy.is_siege() {
        return RaidEligibility::StandDown(StandDownReason::SiegeStrategy);
    }

    let area = match ctx.target {
        RaidTarget::Area(id) => areas.area(id),
        RaidTarget::Caravan { tile } => areas.area_at_tile(tile),
    };
    let Some(area) = area else {
        return RaidEligibility::StandDown(StandDownReason::AreaUnavailable);
    };

    match mount_chance(ctx.faction, cfg) {
        Some(chance_pct) => RaidEligibility::Proceed { area, chance_pct },
        None => RaidEligibility::StandDown(StandDownReason::ExemptFaction),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::{AreaId, Season, TileId, builtin_biomes};
    use crate::raid::{ArrivalMode, Facing, Position, RaidStrategy};

    struct OneAreaDirectory {
        area: AreaContext,
    }

    impl AreaDirectory for OneAreaDirectory {
        fn area(&self, id: AreaId) -> Option<AreaContext> {
            (id == self.area.id).then(|| self.area.clone())
        }

        fn area_at_tile(&self, tile: TileId) -> Option<AreaContext> {
            (tile == TileId(7)).then(|| self.area.clone())
        }
    }

    fn forest_area() -> AreaContext {
        AreaContext {
            id: AreaId(1),
            biome: builtin_biomes()
                .get("temperate_forest")
                .expect("builtin biome")
                .clone(),
            season: Season::Summer,
        }
    }

    fn directory() -> OneAreaDirectory {
        OneAreaDirectory {
            area: forest_area(),
        }
    }

    fn walk_in_raid(faction: FactionCategory) -> RaidContext {
        RaidContext {
            arrival_mode: ArrivalMode::EdgeWalkIn,
            strategy: RaidStrategy::ImmediateAttack,
            faction,
            target: RaidTarget::Area(AreaId(1)),
            spawn_facing: Facing::South,
        }
    }

    fn one_raider() -> Vec<Raider> {
        vec![Raider::new("raider-1", 6, Position::new(10, 12))]
    }

    #[test]
    fn empty_raid_stands_down() {
        let outcome = evaluate_raid(
            &walk_in_raid(FactionCategory::Tribal),
            &[],
            &directory(),
            &MountConfig::default(),
        );
        assert_eq!(
            outcome.stand_down(),
            Some(StandDownReason::EmptyRaid)
        );
    }

    #[test]
    fn drop_arrivals_stand_down() {
        let mut ctx = walk_in_raid(FactionCategory::Tribal);
        ctx.arrival_mode = ArrivalMode::EdgeDrop;
        let outcome = evaluate_raid(&ctx, &one_raider(), &directory(), &MountConfig::default());
        assert_eq!(outcome.stand_down(), Some(StandDownReason::ArrivalMode));
    }

    #[test]
    fn siege_stands_down() {
        let mut ctx = walk_in_raid(FactionCategory::Tribal);
        ctx.strategy = RaidStrategy::Siege;
        let outcome = evaluate_raid(&ctx, &one_raider(), &directory(), &MountConfig::default());
        assert_eq!(outcome.stand_down(), Some(StandDownReason::SiegeStrategy));
    }

    #[test]
    fn exempt_factions_stand_down() {
        for faction in [
            FactionCategory::Spacer,
            FactionCategory::SpacerHostile,
            FactionCategory::Mechanoid,
        ] {
            assert_eq!(mount_chance(faction, &MountConfig::default()), None);
            let outcome = evaluate_raid(
                &walk_in_raid(faction),
                &one_raider(),
                &directory(),
                &MountConfig::default(),
            );
            assert_eq!(outcome.stand_down(), Some(StandDownReason::ExemptFaction));
        }
    }

    #[test]
    fn faction_chances_come_from_config() {
        let cfg = MountConfig {
            tribal_chance: 55,
            outlander_chance: 15,
            ..MountConfig::default()
        };
        assert_eq!(mount_chance(FactionCategory::Tribal, &cfg), Some(55));
        assert_eq!(mount_chance(FactionCategory::Outlander, &cfg), Some(15));
    }

    #[test]
    fn caravan_target_resolves_through_tile() {
        let mut ctx = walk_in_raid(FactionCategory::Tribal);
        ctx.target = RaidTarget::Caravan { tile: TileId(7) };
        let outcome = evaluate_raid(&ctx, &one_raider(), &directory(), &MountConfig::default());
        assert!(matches!(outcome, RaidEligibility::Proceed { .. }));

        ctx.target = RaidTarget::Caravan { tile: TileId(8) };
        let outcome = evaluate_raid(&ctx, &one_raider(), &directory(), &MountConfig::default());
        assert_eq!(outcome.stand_down(), Some(StandDownReason::AreaUnavailable));
    }

    #[test]
    fn undecided_walk_in_proceeds_with_tribal_chance() {
        let mut ctx = walk_in_raid(FactionCategory::Tribal);
        ctx.arrival_mode = ArrivalMode::Undecided;
        let outcome = evaluate_raid(&ctx, &one_raider(), &directory(), &MountConfig::default());
        match outcome {
            RaidEligibility::Proceed { chance_pct, .. } => assert_eq!(chance_pct, 40),
            RaidEligibility::StandDown(reason) => panic!("unexpected stand-down: {reason:?}"),
        }
    }
}
