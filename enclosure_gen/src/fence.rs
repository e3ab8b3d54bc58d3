// Fence pairs along the outline.
//
// Walks the outline in order. An origin cell that is still unfenced starts a
// pair with `fence_chance`: its orthogonal neighbours are scanned (north,
// east, south, west) for one that is still an unfenced outline cell standing
// on solid ground, and the first match wins. Both cells become spruce fence
// and leave the working set, so no cell is ever fenced twice and no fence
// stands alone.
//
// Once every pair is decided, every outline cell, fenced or not, gets a
// neighbour-update pass so adjacent fence posts join up. Running it earlier
// would connect posts against a half-built rim.

use crate::config::EnclosureConfig;
use crate::position_set::PositionSet;
use crate::types::{Direction, Material, VoxelCoord};
use crate::world::{WorldAccess, WriteFlags};
use enclosure_prng::PitRng;
use tracing::debug;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FenceLayout {
    /// Fenced pairs, origin first.
    pub pairs: Vec<(VoxelCoord, VoxelCoord)>,
    /// Outline cells that stayed open, in outline order.
    pub remaining: PositionSet,
}

impl FenceLayout {
    pub fn fenced_cells(&self) -> impl Iterator<Item = VoxelCoord> + '_ {
        self.pairs.iter().flat_map(|&(a, b)| [a, b])
    }
}

/// Choose fence pairs on `outline`, write them, then refresh connections.
pub fn build_fences(
    world: &mut impl WorldAccess,
    outline: &PositionSet,
    config: &EnclosureConfig,
    rng: &mut PitRng,
) -> FenceLayout {
    let mut remaining = outline.clone();
    let mut pairs = Vec::new();

    for origin in outline.iter() {
        if !remaining.contains(origin) || !rng.chance(config.fence_chance) {
            continue;
        }
        let partner = Direction::HORIZONTAL
            .iter()
            .map(|&d| origin.offset(d))
            .find(|&n| remaining.contains(n) && world.is_solid(n.down()));
        if let Some(partner) = partner {
            world.set(origin, Material::SpruceFence, WriteFlags::DEFAULT);
            world.set(partner, Material::SpruceFence, WriteFlags::DEFAULT);
            remaining.remove(origin);
            remaining.remove(partner);
            pairs.push((origin, partner));
        }
    }

    for cell in outline.iter() {
        world.update_neighbors(cell);
    }

    debug!(
        outline = outline.len(),
        pairs = pairs.len(),
        remaining = remaining.len(),
        "fences placed"
    );
    FenceLayout { pairs, remaining }
}
