// Suitable-site search.
//
// Scans candidate centres in a square window around the requested position
// and keeps those whose surrounding column is "clear": solid below the
// surface layer and open at and above it, all the way down to the pit floor.
// One clear candidate is chosen uniformly with the placement's RNG.
//
// A failed search means the placement is abandoned before any write.

use crate::config::EnclosureConfig;
use crate::types::VoxelCoord;
use crate::world::WorldAccess;
use enclosure_prng::PitRng;

/// Whether the column around `center` is clear from `min_y` up to one layer
/// above the surface. `center.y` is the surface layer.
pub fn is_column_clear(
    world: &impl WorldAccess,
    center: VoxelCoord,
    min_y: i32,
    radius: i32,
) -> bool {
    for x in center.x - radius..=center.x + radius {
        for z in center.z - radius..=center.z + radius {
            for y in min_y..=center.y + 1 {
                let open_layer = y >= center.y;
                if open_layer == world.is_solid(VoxelCoord::new(x, y, z)) {
                    return false;
                }
            }
        }
    }
    true
}

/// Whether a single surface cell can be dug: open at the surface layer with
/// solid ground directly beneath.
pub fn is_surface_clear(world: &impl WorldAccess, pos: VoxelCoord) -> bool {
    !world.is_solid(pos) && world.is_solid(pos.down())
}

/// All clear candidates around `requested`, in scan order (x outer, z inner).
pub fn clear_candidates(
    world: &impl WorldAccess,
    requested: VoxelCoord,
    min_y: i32,
    config: &EnclosureConfig,
) -> Vec<VoxelCoord> {
    let r = config.search_radius;
    let mut candidates = Vec::new();
    for x in requested.x - r..requested.x + r {
        for z in requested.z - r..requested.z + r {
            let candidate = VoxelCoord::new(x, requested.y, z);
            if is_column_clear(world, candidate, min_y, config.clearance_radius) {
                candidates.push(candidate);
            }
        }
    }
    candidates
}

/// Pick a clear centre near `requested`, or `None` if the window has none.
pub fn locate_site(
    world: &impl WorldAccess,
    requested: VoxelCoord,
    min_y: i32,
    config: &EnclosureConfig,
    rng: &mut PitRng,
) -> Option<VoxelCoord> {
    let candidates = clear_candidates(world, requested, min_y, config);
    rng.pick(&candidates).copied()
}
