// Outline derivation around the final frontier.
//
// The outline is the ring of untouched cells bordering the frontier: for each
// edge cell, its four orthogonal neighbours and four diagonal neighbours
// (an orthogonal step followed by a clockwise quarter turn) that are neither
// hole nor edge. Fences, the rim guard, and decoration probes all work from
// this ring.
//
// The same pass cuts the drop-off lip: under each edge cell the ground is
// removed with `drop_off_chance`, so the rim slopes into the pit instead of
// ending in a clean wall.

use crate::config::EnclosureConfig;
use crate::hole::HoleShape;
use crate::position_set::PositionSet;
use crate::types::{Direction, Material, VoxelCoord};
use crate::world::{WorldAccess, WriteFlags};
use enclosure_prng::PitRng;

/// Cells one step (orthogonally or diagonally) outside the frontier.
pub fn outline_of(hole: &PositionSet, edge: &PositionSet) -> PositionSet {
    let mut outline = PositionSet::with_capacity(edge.len() * 2);
    let unclassified = |p: VoxelCoord| !edge.contains(p) && !hole.contains(p);
    for cell in edge.iter() {
        for dir in Direction::HORIZONTAL {
            let side = cell.offset(dir);
            if unclassified(side) {
                outline.insert(side);
            }
            let corner = side.offset(dir.rotate_cw());
            if unclassified(corner) {
                outline.insert(corner);
            }
        }
    }
    outline
}

/// Result of outline derivation.
#[derive(Clone, Debug, PartialEq)]
pub struct Outline {
    pub cells: PositionSet,
    /// Ground cells removed under the frontier.
    pub drop_offs: Vec<VoxelCoord>,
}

/// Derive the outline and cut drop-offs under the frontier.
pub fn derive_outline(
    world: &mut impl WorldAccess,
    shape: &HoleShape,
    config: &EnclosureConfig,
    rng: &mut PitRng,
) -> Outline {
    let cells = outline_of(&shape.hole, &shape.edge);
    let mut drop_offs = Vec::new();
    for cell in shape.edge.iter() {
        if rng.chance(config.drop_off_chance) {
            let below = cell.down();
            world.set(below, Material::Air, WriteFlags::DEFAULT);
            drop_offs.push(below);
        }
    }
    Outline { cells, drop_offs }
}
