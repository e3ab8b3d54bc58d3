// The enclosure feature: one placement, start to finish.
//
// `EnclosureFeature::generate_report` runs the stages in a fixed order,
// threading one `PitRng` through all of them:
//
//   1. draw the pit depth,
//   2. search for a clear site (abort with no writes on failure),
//   3. grow the footprint against untouched terrain,
//   4. derive the outline and cut drop-offs under the frontier,
//   5. carve the hole columns and roll pit mobs,
//   6. pair fences on the outline, then refresh neighbours,
//   7. place the rim guard on an unfenced outline cell,
//   8. stamp decorations, when enabled.
//
// The feature holds only its config, validated once at construction, so a
// placement never meets a zero bound. Every set, tally, and counter is local
// to the call, so one instance can serve any number of placements in
// sequence or from several threads at once.
//
// See also: `site.rs`, `hole.rs`, `outline.rs`, `carve.rs`, `fence.rs`,
// `spawn.rs`, `decoration.rs` for the stages, `survey.rs` for the parallel
// driver.
//
// **Critical constraint: determinism.** Given the same seed, config, and
// starting terrain, the sequence of world writes and entity spawns is
// identical. Stage order and the iteration order of every `PositionSet`
// are part of that contract.

use crate::carve::carve_hole;
use crate::config::EnclosureConfig;
use crate::decoration::{DecorationOutcome, decorate};
use crate::entity::EntityFactory;
use crate::error::ConfigError;
use crate::fence::{FenceLayout, build_fences};
use crate::hole::{GrowthStats, grow_hole};
use crate::outline::derive_outline;
use crate::position_set::PositionSet;
use crate::site::locate_site;
use crate::spawn::spawn_rim_guard;
use crate::types::{EntityId, VoxelCoord};
use crate::world::WorldAccess;
use enclosure_prng::PitRng;
use tracing::debug;

/// A world-generation feature placed at a requested position.
pub trait Feature {
    /// Place the feature near `center`. `false` means nothing was written
    /// and nothing was spawned.
    fn generate<W: WorldAccess, E: EntityFactory>(
        &self,
        center: VoxelCoord,
        rng: &mut PitRng,
        world: &mut W,
        entities: &mut E,
    ) -> bool;
}

/// Everything one successful placement decided.
#[derive(Clone, Debug, PartialEq)]
pub struct EnclosureReport {
    /// The chosen site; may differ from the requested position.
    pub center: VoxelCoord,
    pub min_y: i32,
    pub rounds: u32,
    pub hole: PositionSet,
    pub edge: PositionSet,
    pub outline: PositionSet,
    pub drop_offs: Vec<VoxelCoord>,
    pub fences: FenceLayout,
    pub pit_spawns: Vec<EntityId>,
    pub rim_guard: Option<EntityId>,
    pub decorations: Option<DecorationOutcome>,
    pub stats: GrowthStats,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnclosureFeature {
    config: EnclosureConfig,
}

impl EnclosureFeature {
    /// Wrap a config after checking it with `EnclosureConfig::validate`.
    pub fn new(config: EnclosureConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EnclosureConfig {
        &self.config
    }

    /// Run one placement and describe what it did, or `None` when no site
    /// was found.
    pub fn generate_report<W: WorldAccess, E: EntityFactory>(
        &self,
        center: VoxelCoord,
        rng: &mut PitRng,
        world: &mut W,
        entities: &mut E,
    ) -> Option<EnclosureReport> {
        let config = &self.config;
        let depth = config.min_depth + rng.next_below(config.depth_variance) as i32;
        let min_y = center.y - depth;

        let Some(site) = locate_site(&*world, center, min_y, config, rng) else {
            debug!(%center, min_y, "no clear site for enclosure");
            return None;
        };
        debug!(%center, %site, min_y, "enclosure site chosen");

        let shape = grow_hole(&*world, site, config, rng);
        debug!(
            rounds = shape.rounds,
            hole = shape.hole.len(),
            edge = shape.edge.len(),
            "hole grown"
        );

        let outline = derive_outline(world, &shape, config, rng);
        debug!(
            outline = outline.cells.len(),
            drop_offs = outline.drop_offs.len(),
            "outline derived"
        );

        let carved = carve_hole(world, entities, &shape.hole, min_y, config, rng);
        let fences = build_fences(world, &outline.cells, config, rng);
        let rim_guard = spawn_rim_guard(&*world, entities, &fences.remaining, rng);

        let decorations = config.decorations.enabled.then(|| {
            decorate(
                world,
                entities,
                &shape.hole,
                &shape.edge,
                &outline.cells,
                &config.decorations,
                rng,
            )
        });

        debug!(
            pit_spawns = carved.spawned.len(),
            refused = carved.refused,
            rim_guard = rim_guard.is_some(),
            "enclosure placed"
        );

        Some(EnclosureReport {
            center: site,
            min_y,
            rounds: shape.rounds,
            hole: shape.hole,
            edge: shape.edge,
            outline: outline.cells,
            drop_offs: outline.drop_offs,
            fences,
            pit_spawns: carved.spawned,
            rim_guard,
            decorations,
            stats: shape.stats,
        })
    }
}

impl Feature for EnclosureFeature {
    fn generate<W: WorldAccess, E: EntityFactory>(
        &self,
        center: VoxelCoord,
        rng: &mut PitRng,
        world: &mut W,
        entities: &mut E,
    ) -> bool {
        self.generate_report(center, rng, world, entities).is_some()
    }
}
