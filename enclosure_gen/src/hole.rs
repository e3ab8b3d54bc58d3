// Region growing for the pit footprint.
//
// Starts from a committed centre cell (the hole) and those of its four
// orthogonal neighbours that pass surface clearance (the frontier, or
// "edge"), then runs a randomised number of rounds. In each round every frontier cell faces an acceptance test whose
// odds fall with squared distance from the centre:
//
//   accept  <=>  next_below(acceptance_bound) > distance_sq
//
// Accepted cells look at their four neighbours. Hole neighbours mark the
// cell as hole-adjacent, frontier neighbours are already pending, and every
// other neighbour must pass the surface clearance check. A single failing
// neighbour blocks the whole cell for this round. An unblocked hole-adjacent
// cell with no fresh neighbours is committed outright (it would otherwise be
// left as a lone pillar); one with `n` fresh neighbours is committed with
// probability `1 / (n + 1)` and pushes those neighbours onto the frontier.
// Frontier cells that lost contact with the hole are dropped. Every cell
// that ever joins the frontier is itself clear, so an obstruction can never
// be promoted into the hole.
//
// Rounds are two-phase: decisions are made against the hole and frontier as
// they stood when the round began, then promotions, drops, and discoveries
// are applied together. Hole and frontier stay disjoint across every round.
//
// Clearance reads happen before any carving, so they see untouched terrain.
//
// See also: `site.rs` for `is_surface_clear`, `outline.rs` which consumes
// the final frontier, `config.rs` for the round and acceptance tunables.

use crate::config::EnclosureConfig;
use crate::position_set::PositionSet;
use crate::site::is_surface_clear;
use crate::types::{Direction, VoxelCoord};
use crate::world::WorldAccess;
use enclosure_prng::PitRng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;
use tracing::trace;

/// Attempts and successes of the acceptance test at one squared distance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptanceTally {
    pub attempts: u64,
    pub accepted: u64,
}

/// Acceptance-test outcomes keyed by squared distance from the centre.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthStats {
    pub by_distance_sq: BTreeMap<i32, AcceptanceTally>,
}

impl GrowthStats {
    pub fn record(&mut self, distance_sq: i32, accepted: bool) {
        let tally = self.by_distance_sq.entry(distance_sq).or_default();
        tally.attempts += 1;
        if accepted {
            tally.accepted += 1;
        }
    }

    pub fn merge(&mut self, other: &GrowthStats) {
        for (d, t) in &other.by_distance_sq {
            let tally = self.by_distance_sq.entry(*d).or_default();
            tally.attempts += t.attempts;
            tally.accepted += t.accepted;
        }
    }

    /// Empirical acceptance rate at a squared distance, if ever attempted.
    pub fn acceptance_rate(&self, distance_sq: i32) -> Option<f64> {
        self.by_distance_sq
            .get(&distance_sq)
            .filter(|t| t.attempts > 0)
            .map(|t| t.accepted as f64 / t.attempts as f64)
    }

    pub fn total_attempts(&self) -> u64 {
        self.by_distance_sq.values().map(|t| t.attempts).sum()
    }
}

/// Final footprint of a grown pit. Both sets sit on the surface layer.
#[derive(Clone, Debug, PartialEq)]
pub struct HoleShape {
    pub center: VoxelCoord,
    pub hole: PositionSet,
    pub edge: PositionSet,
    pub rounds: u32,
    pub stats: GrowthStats,
}

/// The distance-decaying acceptance test.
pub fn accepts(rng: &mut PitRng, acceptance_bound: u32, distance_sq: i32) -> bool {
    rng.next_below(acceptance_bound) as i32 > distance_sq
}

/// How a frontier cell's neighbours look at the start of a round.
#[derive(Debug, PartialEq, Eq)]
enum Neighborhood {
    /// Some unclassified neighbour failed surface clearance.
    Blocked,
    Open {
        hole_adjacent: bool,
        fresh: SmallVec<[VoxelCoord; 4]>,
    },
}

fn survey_neighbors(
    world: &impl WorldAccess,
    cell: VoxelCoord,
    hole: &PositionSet,
    edge: &PositionSet,
) -> Neighborhood {
    let mut hole_adjacent = false;
    let mut fresh = SmallVec::new();
    for dir in Direction::HORIZONTAL {
        let neighbor = cell.offset(dir);
        if hole.contains(neighbor) {
            hole_adjacent = true;
        } else if edge.contains(neighbor) {
            continue;
        } else if is_surface_clear(world, neighbor) {
            fresh.push(neighbor);
        } else {
            return Neighborhood::Blocked;
        }
    }
    Neighborhood::Open {
        hole_adjacent,
        fresh,
    }
}

/// The initial frontier: the centre's orthogonal neighbours that can be dug,
/// in north, east, south, west order.
pub fn seed_frontier(world: &impl WorldAccess, center: VoxelCoord) -> PositionSet {
    Direction::HORIZONTAL
        .iter()
        .map(|&d| center.offset(d))
        .filter(|&n| is_surface_clear(world, n))
        .collect()
}

/// Grow a pit footprint around `center`.
pub fn grow_hole(
    world: &impl WorldAccess,
    center: VoxelCoord,
    config: &EnclosureConfig,
    rng: &mut PitRng,
) -> HoleShape {
    let rounds = config.min_rounds + rng.next_below(config.round_variance);

    let mut hole = PositionSet::new();
    hole.insert(center);
    let mut edge = seed_frontier(world, center);
    let mut stats = GrowthStats::default();

    for round in 0..rounds {
        expand_round(
            world,
            center,
            &mut hole,
            &mut edge,
            config.acceptance_bound,
            rng,
            &mut stats,
        );
        debug_assert!(hole.is_disjoint(&edge), "hole and frontier overlap");
        trace!(round, hole = hole.len(), edge = edge.len(), "growth round");
    }

    HoleShape {
        center,
        hole,
        edge,
        rounds,
        stats,
    }
}

/// One two-phase growth round.
pub fn expand_round(
    world: &impl WorldAccess,
    center: VoxelCoord,
    hole: &mut PositionSet,
    edge: &mut PositionSet,
    acceptance_bound: u32,
    rng: &mut PitRng,
    stats: &mut GrowthStats,
) {
    let mut leaving = PositionSet::new();
    let mut promoted = Vec::new();
    let mut discovered = Vec::new();

    for cell in edge.iter() {
        let distance_sq = cell.distance_sq(center);
        let accepted = accepts(rng, acceptance_bound, distance_sq);
        stats.record(distance_sq, accepted);
        if !accepted {
            continue;
        }
        let Neighborhood::Open {
            hole_adjacent,
            fresh,
        } = survey_neighbors(world, cell, hole, edge)
        else {
            continue;
        };

        if !hole_adjacent {
            leaving.insert(cell);
        } else if fresh.is_empty() {
            leaving.insert(cell);
            promoted.push(cell);
        } else if rng.chance(1.0 / (fresh.len() as f32 + 1.0)) {
            leaving.insert(cell);
            promoted.push(cell);
            discovered.extend(fresh);
        }
    }

    if leaving.is_empty() {
        return;
    }
    hole.extend(promoted);
    let next: PositionSet = edge
        .iter()
        .filter(|c| !leaving.contains(*c))
        .chain(discovered)
        .collect();
    *edge = next;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Material;
    use crate::world::VoxelWorld;

    const SURFACE: i32 = 64;

    fn center() -> VoxelCoord {
        VoxelCoord::new(0, SURFACE, 0)
    }

    #[test]
    fn seeds_center_and_four_neighbors() {
        let world = VoxelWorld::flat_terrain(0, 0, 20, SURFACE);
        let config = EnclosureConfig {
            min_rounds: 0,
            round_variance: 1,
            ..EnclosureConfig::default()
        };
        let shape = grow_hole(&world, center(), &config, &mut PitRng::new(5));
        assert_eq!(shape.rounds, 0);
        assert_eq!(shape.hole.iter().collect::<Vec<_>>(), vec![center()]);
        assert_eq!(shape.edge.len(), 4);
        for dir in Direction::HORIZONTAL {
            assert!(shape.edge.contains(center().offset(dir)));
        }
    }

    #[test]
    fn sets_stay_disjoint_every_round() {
        let world = VoxelWorld::flat_terrain(0, 0, 20, SURFACE);
        for seed in 0..40 {
            let mut rng = PitRng::new(seed);
            let mut hole: PositionSet = [center()].into_iter().collect();
            let mut edge: PositionSet = Direction::HORIZONTAL
                .iter()
                .map(|&d| center().offset(d))
                .collect();
            let mut stats = GrowthStats::default();
            for _ in 0..10 {
                expand_round(&world, center(), &mut hole, &mut edge, 49, &mut rng, &mut stats);
                assert!(hole.is_disjoint(&edge), "seed {seed} overlapped");
            }
        }
    }

    #[test]
    fn hole_stays_within_acceptance_radius() {
        // With bound 49 a cell at distance_sq >= 48 can never pass, so no
        // committed cell can lie beyond that radius.
        let world = VoxelWorld::flat_terrain(0, 0, 20, SURFACE);
        let config = EnclosureConfig::default();
        for seed in 0..40 {
            let shape = grow_hole(&world, center(), &config, &mut PitRng::new(seed));
            assert!(shape.hole.contains(center()));
            for cell in shape.hole.iter() {
                assert!(cell.distance_sq(center()) < 48, "seed {seed}: {cell}");
                assert_eq!(cell.y, SURFACE);
            }
        }
    }

    #[test]
    fn every_committed_cell_touches_the_hole() {
        let world = VoxelWorld::flat_terrain(0, 0, 20, SURFACE);
        let config = EnclosureConfig::default();
        for seed in 0..40 {
            let shape = grow_hole(&world, center(), &config, &mut PitRng::new(seed));
            for cell in shape.hole.iter().filter(|c| *c != center()) {
                let touching = Direction::HORIZONTAL
                    .iter()
                    .any(|&d| shape.hole.contains(cell.offset(d)));
                assert!(touching, "seed {seed}: detached hole cell {cell}");
            }
        }
    }

    #[test]
    fn wall_on_one_side_keeps_growth_off_it() {
        let mut world = VoxelWorld::flat_terrain(0, 0, 20, SURFACE);
        // A wall one cell east of the centre, raised through the surface layer.
        world.fill_box(
            VoxelCoord::new(1, SURFACE, -20),
            VoxelCoord::new(1, SURFACE + 1, 20),
            Material::Stone,
        );
        let config = EnclosureConfig::default();
        for seed in 0..40 {
            let shape = grow_hole(&world, center(), &config, &mut PitRng::new(seed));
            for cell in shape.hole.iter() {
                assert!(cell.x <= 0, "seed {seed}: hole crossed the wall at {cell}");
            }
            assert!(!shape.hole.contains(center().offset(Direction::East)));
        }
    }

    #[test]
    fn obstructed_seed_neighbor_stays_out_of_the_frontier() {
        let mut world = VoxelWorld::flat_terrain(0, 0, 20, SURFACE);
        let stone = center().offset(Direction::East);
        world.put(stone, Material::Stone);
        let edge = seed_frontier(&world, center());
        let expected: Vec<_> = [Direction::North, Direction::South, Direction::West]
            .iter()
            .map(|&d| center().offset(d))
            .collect();
        assert_eq!(edge.iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn single_obstruction_beside_the_seed_is_never_dug() {
        let mut world = VoxelWorld::flat_terrain(0, 0, 20, SURFACE);
        let stone = center().offset(Direction::East);
        world.put(stone, Material::Stone);
        let config = EnclosureConfig::default();
        for seed in 0..100 {
            let shape = grow_hole(&world, center(), &config, &mut PitRng::new(seed));
            assert!(!shape.hole.contains(stone), "seed {seed}: obstruction in hole");
            assert!(!shape.edge.contains(stone), "seed {seed}: obstruction in frontier");
            // Anything touching the stone would have had it as a blocking
            // neighbour, so only the centre may border it.
            for dir in Direction::HORIZONTAL {
                let beside = stone.offset(dir);
                if beside != center() {
                    assert!(!shape.hole.contains(beside), "seed {seed}: {beside} dug");
                }
            }
        }
    }

    #[test]
    fn fully_enclosed_seed_never_grows() {
        let mut world = VoxelWorld::flat_terrain(0, 0, 20, SURFACE);
        // Raise a solid ring two cells out so every first neighbour is blocked.
        for x in -2i32..=2 {
            for z in -2i32..=2 {
                if x.abs() == 2 || z.abs() == 2 {
                    world.put(VoxelCoord::new(x, SURFACE, z), Material::Stone);
                }
            }
        }
        // Diagonal cells are unclassified, so they block too.
        for (x, z) in [(1, 1), (1, -1), (-1, 1), (-1, -1)] {
            world.put(VoxelCoord::new(x, SURFACE, z), Material::Stone);
        }
        let config = EnclosureConfig::default();
        let shape = grow_hole(&world, center(), &config, &mut PitRng::new(9));
        assert_eq!(shape.hole.len(), 1);
        assert_eq!(shape.edge.len(), 4);
    }

    #[test]
    fn acceptance_rate_decays_with_distance() {
        let mut rng = PitRng::new(2024);
        let mut stats = GrowthStats::default();
        for d in [0, 1, 4, 9, 16, 25, 36, 47, 48] {
            for _ in 0..20_000 {
                let ok = accepts(&mut rng, 49, d);
                stats.record(d, ok);
            }
        }
        let rates: Vec<f64> = [0, 1, 4, 9, 16, 25, 36, 47, 48]
            .iter()
            .map(|d| stats.acceptance_rate(*d).unwrap())
            .collect();
        for pair in rates.windows(2) {
            assert!(pair[0] > pair[1], "rates not decreasing: {rates:?}");
        }
        assert_eq!(stats.acceptance_rate(48), Some(0.0));
        assert!(stats.acceptance_rate(2).is_none());
    }

    #[test]
    fn growth_is_deterministic() {
        let world = VoxelWorld::flat_terrain(0, 0, 20, SURFACE);
        let config = EnclosureConfig::default();
        let a = grow_hole(&world, center(), &config, &mut PitRng::new(77));
        let b = grow_hole(&world, center(), &config, &mut PitRng::new(77));
        assert_eq!(a, b);
    }

    #[test]
    fn stats_merge_sums_tallies() {
        let mut a = GrowthStats::default();
        a.record(1, true);
        a.record(1, false);
        let mut b = GrowthStats::default();
        b.record(1, true);
        b.record(4, false);
        a.merge(&b);
        assert_eq!(a.by_distance_sq[&1].attempts, 3);
        assert_eq!(a.by_distance_sq[&1].accepted, 2);
        assert_eq!(a.by_distance_sq[&4].attempts, 1);
        assert_eq!(a.total_attempts(), 4);
    }
}
