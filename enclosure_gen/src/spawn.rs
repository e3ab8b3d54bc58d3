// Creature placement.
//
// `spawn_creature` is the one path every spawn takes: ask the factory for a
// handle, place it, apply per-kind setup, and hand it to the world with the
// local difficulty. A refused handle is logged and skipped.
//
// `spawn_rim_guard` places the griefer on a random outline cell that did not
// become a fence.

use crate::entity::{EntityFactory, SpawnContext, SpawnReason};
use crate::position_set::PositionSet;
use crate::types::{CreatureKind, EntityId, VoxelCoord};
use crate::world::WorldAccess;
use enclosure_prng::PitRng;
use tracing::debug;

/// Create, place, and spawn one creature. `None` if the factory refused.
pub fn spawn_creature(
    world: &impl WorldAccess,
    entities: &mut impl EntityFactory,
    kind: CreatureKind,
    position: [f64; 3],
    difficulty_pos: VoxelCoord,
) -> Option<EntityId> {
    let Some(mut handle) = entities.create(kind) else {
        debug!(?kind, %difficulty_pos, "entity factory refused creature, skipping");
        return None;
    };
    entities.place(&mut handle, position, 0.0, 0.0);
    if kind == CreatureKind::Creepie {
        handle.attack_players_only = true;
    }
    let id = handle.id;
    let ctx = SpawnContext {
        reason: SpawnReason::ChunkGeneration,
        difficulty: world.difficulty_at(difficulty_pos),
    };
    entities.spawn_into_world(handle, ctx);
    Some(id)
}

/// Spawn a griefer on a uniformly chosen cell of `rim`. Draws nothing and
/// spawns nothing when `rim` is empty.
pub fn spawn_rim_guard(
    world: &impl WorldAccess,
    entities: &mut impl EntityFactory,
    rim: &PositionSet,
    rng: &mut PitRng,
) -> Option<EntityId> {
    let cell = rim.pick(rng)?;
    spawn_creature(
        world,
        entities,
        CreatureKind::Griefer,
        [cell.x as f64, cell.y as f64, cell.z as f64],
        cell,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::RecordingEntities;
    use crate::world::VoxelWorld;

    #[test]
    fn creepie_targets_players_only() {
        let world = VoxelWorld::flat_terrain(0, 0, 4, 10);
        let mut entities = RecordingEntities::new();
        let pos = VoxelCoord::new(0, 10, 0);
        spawn_creature(&world, &mut entities, CreatureKind::Creepie, [0.5, 6.0, 0.5], pos).unwrap();
        spawn_creature(&world, &mut entities, CreatureKind::Creeper, [1.5, 6.0, 0.5], pos).unwrap();
        assert!(entities.spawned[0].handle.attack_players_only);
        assert!(!entities.spawned[1].handle.attack_players_only);
        assert_eq!(entities.spawned[0].context.reason, SpawnReason::ChunkGeneration);
    }

    #[test]
    fn difficulty_comes_from_world() {
        let mut world = VoxelWorld::flat_terrain(0, 0, 4, 10);
        world.difficulty = 2.25;
        let mut entities = RecordingEntities::new();
        spawn_creature(
            &world,
            &mut entities,
            CreatureKind::Griefer,
            [0.0, 10.0, 0.0],
            VoxelCoord::new(0, 10, 0),
        );
        assert_eq!(entities.spawned[0].context.difficulty, 2.25);
    }

    #[test]
    fn refused_creature_is_skipped() {
        let world = VoxelWorld::flat_terrain(0, 0, 4, 10);
        let mut entities = RecordingEntities::refusing_all();
        let id = spawn_creature(
            &world,
            &mut entities,
            CreatureKind::Creeper,
            [0.0, 10.0, 0.0],
            VoxelCoord::new(0, 10, 0),
        );
        assert!(id.is_none());
        assert!(entities.spawned.is_empty());
    }

    #[test]
    fn rim_guard_lands_on_a_rim_cell() {
        let world = VoxelWorld::flat_terrain(0, 0, 8, 10);
        let rim: PositionSet = [VoxelCoord::new(3, 10, 1), VoxelCoord::new(-2, 10, 4)]
            .into_iter()
            .collect();
        for seed in 0..20 {
            let mut entities = RecordingEntities::new();
            spawn_rim_guard(&world, &mut entities, &rim, &mut PitRng::new(seed)).unwrap();
            let record = &entities.spawned[0];
            assert_eq!(record.handle.kind, CreatureKind::Griefer);
            assert!(rim.contains(record.handle.voxel()));
        }
    }

    #[test]
    fn empty_rim_spawns_nothing() {
        let world = VoxelWorld::flat_terrain(0, 0, 4, 10);
        let mut entities = RecordingEntities::new();
        let mut rng = PitRng::new(3);
        let before = rng.clone();
        assert!(spawn_rim_guard(&world, &mut entities, &PositionSet::new(), &mut rng).is_none());
        assert_eq!(entities.create_calls, 0);
        assert_eq!(rng, before);
    }
}
