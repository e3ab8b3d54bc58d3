// Optional decoration pass: small structures stamped just outside the rim.
//
// Anchors are found by probing `probe_distance` cells outward from every
// edge cell in every horizontal direction. A probe is usable when it is not
// classified (hole, edge, or outline) and a rectangle around it is clear:
// from one cell behind the probe to the big cage's button row one past the
// grid, `lateral_reach` cells to either side, and one layer below to one
// above the surface. "Clear" means solid below the surface layer, open at
// and above it, and not classified.
//
// Structures are laid out on a 5x5 grid in front of the anchor. Grid
// column `k` runs sideways (2 is the anchor's own line, lower values toward
// the counter-clockwise side) and row `j` runs outward along the facing.
//
//   rows  ->  j = 0 .. 4 (away from the pit), plus the button at j = 5
//   cols  ->  k = 0 .. 4 (ccw .. cw)
//
// The first two chosen anchors get a cage (big cage with a spore bomb and
// a button, medium cage holding creepers, or a small pen). Later anchors get
// a camp; the spore-sack camp is only drawn when `companion_content` is set.
//
// After stamping, every written cell and the cell above it receives a
// neighbour update so fence posts join.

use crate::config::DecorationConfig;
use crate::entity::EntityFactory;
use crate::position_set::PositionSet;
use crate::spawn::spawn_creature;
use crate::types::{CreatureKind, Direction, EntityId, Material, VoxelCoord};
use crate::world::{WorldAccess, WriteFlags};
use enclosure_prng::PitRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Rows a structure's grid occupies along its facing. The big cage's button
/// sits on the row just past it.
const STRUCTURE_DEPTH: i32 = 5;

/// A candidate structure origin and the direction it faces (away from the pit).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecorationAnchor {
    pub facing: Direction,
    pub origin: VoxelCoord,
}

impl DecorationAnchor {
    /// World cell of grid column `k`, row `j`.
    pub fn grid(&self, k: i32, j: i32) -> VoxelCoord {
        self.origin
            .offset_by(self.facing.rotate_cw(), k - 2)
            .offset_by(self.facing, j)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Structure {
    BigCage,
    MediumCage,
    SmallPen,
    WorkbenchCamp,
    PlateCamp,
    SporeSackPost,
}

impl Structure {
    fn cage(roll: u32) -> Self {
        match roll {
            0 => Structure::BigCage,
            1 => Structure::MediumCage,
            _ => Structure::SmallPen,
        }
    }

    fn camp(roll: u32) -> Self {
        match roll {
            0 => Structure::WorkbenchCamp,
            1 => Structure::PlateCamp,
            _ => Structure::SporeSackPost,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DecorationOutcome {
    pub placed: Vec<(DecorationAnchor, Structure)>,
    pub spawned: Vec<EntityId>,
    /// Every cell written by a stamp, in write order.
    pub cells: PositionSet,
}

// ---------------------------------------------------------------------------
// Anchor search
// ---------------------------------------------------------------------------

fn rectangle_clear(
    world: &impl WorldAccess,
    anchor: DecorationAnchor,
    reach: i32,
    classified: &impl Fn(VoxelCoord) -> bool,
) -> bool {
    let surface = anchor.origin.y;
    let side = anchor.facing.rotate_cw();
    for along in -1..=STRUCTURE_DEPTH {
        for lateral in -reach..=reach {
            let column = anchor.origin.offset_by(anchor.facing, along).offset_by(side, lateral);
            if classified(column) {
                return false;
            }
            for y in surface - 1..=surface + 1 {
                let open_layer = y >= surface;
                if open_layer == world.is_solid(column.with_y(y)) {
                    return false;
                }
            }
        }
    }
    true
}

/// Every usable anchor around the rim, in edge order then direction order.
pub fn find_anchors(
    world: &impl WorldAccess,
    hole: &PositionSet,
    edge: &PositionSet,
    outline: &PositionSet,
    config: &DecorationConfig,
) -> Vec<DecorationAnchor> {
    let classified =
        |p: VoxelCoord| hole.contains(p) || edge.contains(p) || outline.contains(p);
    let mut anchors = Vec::new();
    for cell in edge.iter() {
        for facing in Direction::HORIZONTAL {
            let origin = cell.offset_by(facing, config.probe_distance);
            if classified(origin) {
                continue;
            }
            let anchor = DecorationAnchor { facing, origin };
            if rectangle_clear(world, anchor, config.lateral_reach, &classified)
                && !anchors.contains(&anchor)
            {
                anchors.push(anchor);
            }
        }
    }
    anchors
}

/// Spread up to `max` picks evenly over the anchor list by index:
/// `i * len / (max + 1)` for `i = 1..=max`, duplicates dropped.
pub fn choose_anchors(anchors: &[DecorationAnchor], max: usize) -> Vec<DecorationAnchor> {
    let mut indices: Vec<usize> = Vec::with_capacity(max);
    if !anchors.is_empty() {
        for i in 1..=max {
            let index = i * anchors.len() / (max + 1);
            if !indices.contains(&index) {
                indices.push(index);
            }
        }
    }
    indices.into_iter().map(|i| anchors[i]).collect()
}

// ---------------------------------------------------------------------------
// Stamping
// ---------------------------------------------------------------------------

struct Stamper<'a, W, E> {
    world: &'a mut W,
    entities: &'a mut E,
    anchor: DecorationAnchor,
    outcome: &'a mut DecorationOutcome,
}

impl<W: WorldAccess, E: EntityFactory> Stamper<'_, W, E> {
    fn put(&mut self, pos: VoxelCoord, material: Material) {
        self.world.set(pos, material, WriteFlags::DEFAULT);
        self.outcome.cells.insert(pos);
    }

    fn block(&mut self, k: i32, j: i32, material: Material) {
        let pos = self.anchor.grid(k, j);
        self.put(pos, material);
    }

    /// Two-high fence post.
    fn post(&mut self, k: i32, j: i32) {
        let pos = self.anchor.grid(k, j);
        self.put(pos, Material::OakFence);
        self.put(pos.up(), Material::OakFence);
    }

    fn creeper(&mut self, k: i32, j: i32) {
        let pos = self.anchor.grid(k, j);
        let position = [pos.x as f64 + 0.5, pos.y as f64, pos.z as f64 + 0.5];
        if let Some(id) =
            spawn_creature(&*self.world, self.entities, CreatureKind::Creeper, position, pos)
        {
            self.outcome.spawned.push(id);
        }
    }
}

/// Stamp one structure in front of `anchor`.
pub fn stamp_structure(
    world: &mut impl WorldAccess,
    entities: &mut impl EntityFactory,
    anchor: DecorationAnchor,
    structure: Structure,
    rng: &mut PitRng,
    outcome: &mut DecorationOutcome,
) {
    let mut s = Stamper {
        world,
        entities,
        anchor,
        outcome,
    };
    match structure {
        Structure::BigCage => {
            for j in [0, 4] {
                for k in 0..5 {
                    s.post(k, j);
                }
            }
            s.block(2, 4, Material::OakPlanks);
            s.block(2, 5, Material::OakButton(anchor.facing));
            for j in 1..4 {
                s.post(0, j);
                s.post(4, j);
            }
            s.block(2, 3, Material::SporeBomb);
        }
        Structure::MediumCage => {
            for j in 1..3 {
                s.post(1, j);
                s.post(4, j);
                let k = 2 + rng.next_below(2) as i32;
                s.creeper(k, j);
            }
            for j in [0, 3] {
                for k in 1..5 {
                    s.post(k, j);
                }
            }
        }
        Structure::SmallPen => {
            s.post(1, 1);
            s.post(3, 1);
            for j in [0, 2] {
                for k in 1..4 {
                    s.post(k, j);
                }
            }
        }
        Structure::WorkbenchCamp => {
            s.block(1, 1, Material::CraftingTable);
            s.block(3, 1, Material::CraftingTable);
            s.post(2, 2);
        }
        Structure::PlateCamp => {
            for j in 1..4 {
                for k in 1..4 {
                    s.block(k, j, Material::BlastProofPlate);
                }
            }
        }
        Structure::SporeSackPost => {
            let post = anchor.grid(2, 2);
            s.put(post, Material::OakFence);
            s.put(post.up(), Material::SporeSack);
        }
    }
}

/// Choose anchors around the rim and stamp a structure at each.
pub fn decorate(
    world: &mut impl WorldAccess,
    entities: &mut impl EntityFactory,
    hole: &PositionSet,
    edge: &PositionSet,
    outline: &PositionSet,
    config: &DecorationConfig,
    rng: &mut PitRng,
) -> DecorationOutcome {
    let anchors = find_anchors(&*world, hole, edge, outline, config);
    let chosen = choose_anchors(&anchors, config.max_anchors);
    let mut outcome = DecorationOutcome::default();

    for (i, anchor) in chosen.into_iter().enumerate() {
        let structure = if i < 2 {
            Structure::cage(rng.next_below(3))
        } else {
            let variants = if config.companion_content { 3 } else { 2 };
            Structure::camp(rng.next_below(variants))
        };
        stamp_structure(world, entities, anchor, structure, rng, &mut outcome);
        outcome.placed.push((anchor, structure));
    }

    let mut targets = PositionSet::with_capacity(outcome.cells.len() * 2);
    for cell in outcome.cells.iter() {
        targets.insert(cell);
        targets.insert(cell.up());
    }
    for cell in targets.iter() {
        world.update_neighbors(cell);
    }

    debug!(
        anchors = anchors.len(),
        placed = outcome.placed.len(),
        cells = outcome.cells.len(),
        "decorations stamped"
    );
    outcome
}
