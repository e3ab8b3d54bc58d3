// Commits the grown footprint into the voxel grid.
//
// Each hole column is rewritten from `min_y` up to, but excluding, its
// surface layer: coarse dirt at the bottom, optional cover (grass or a dead
// bush) one layer up, air above that. Some columns also get a creeper or a
// creepie standing on the floor.

use crate::config::EnclosureConfig;
use crate::entity::EntityFactory;
use crate::position_set::PositionSet;
use crate::spawn::spawn_creature;
use crate::types::{CreatureKind, EntityId, Material};
use crate::world::{WorldAccess, WriteFlags};
use enclosure_prng::PitRng;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CarveOutcome {
    pub spawned: Vec<EntityId>,
    /// Spawn rolls that succeeded but whose creature the factory refused.
    pub refused: u32,
}

fn cover(config: &EnclosureConfig, rng: &mut PitRng) -> Material {
    if !rng.chance(config.cover_chance) {
        Material::Air
    } else if rng.chance(config.grass_chance) {
        Material::Grass
    } else {
        Material::DeadBush
    }
}

pub fn carve_hole(
    world: &mut impl WorldAccess,
    entities: &mut impl EntityFactory,
    hole: &PositionSet,
    min_y: i32,
    config: &EnclosureConfig,
    rng: &mut PitRng,
) -> CarveOutcome {
    let mut outcome = CarveOutcome::default();
    for cell in hole.iter() {
        for y in min_y..cell.y {
            let material = match y - min_y {
                0 => Material::CoarseDirt,
                1 => cover(config, rng),
                _ => Material::Air,
            };
            world.set(cell.with_y(y), material, WriteFlags::DEFAULT);
        }

        if rng.chance(config.pit_spawn_chance) {
            let kind = if rng.chance(config.creeper_chance) {
                CreatureKind::Creeper
            } else {
                CreatureKind::Creepie
            };
            let position = [cell.x as f64 + 0.5, (min_y + 1) as f64, cell.z as f64 + 0.5];
            match spawn_creature(&*world, entities, kind, position, cell.with_y(min_y + 1)) {
                Some(id) => outcome.spawned.push(id),
                None => outcome.refused += 1,
            }
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::RecordingEntities;
    use crate::types::VoxelCoord;
    use crate::world::VoxelWorld;

    const SURFACE: i32 = 64;

    fn square_hole() -> PositionSet {
        let mut hole = PositionSet::new();
        for x in -1..=1 {
            for z in -1..=1 {
                hole.insert(VoxelCoord::new(x, SURFACE, z));
            }
        }
        hole
    }

    #[test]
    fn columns_get_floor_cover_and_air() {
        let mut world = VoxelWorld::flat_terrain(0, 0, 8, SURFACE);
        let mut entities = RecordingEntities::new();
        let min_y = SURFACE - 5;
        let hole = square_hole();
        carve_hole(
            &mut world,
            &mut entities,
            &hole,
            min_y,
            &EnclosureConfig::default(),
            &mut PitRng::new(8),
        );
        for cell in hole.iter() {
            assert_eq!(world.get(cell.with_y(min_y)), Material::CoarseDirt);
            assert!(matches!(
                world.get(cell.with_y(min_y + 1)),
                Material::Air | Material::Grass | Material::DeadBush
            ));
            for y in min_y + 2..SURFACE {
                assert_eq!(world.get(cell.with_y(y)), Material::Air, "{cell} y={y}");
            }
        }
        // Outside the footprint nothing changed.
        assert_eq!(world.get(VoxelCoord::new(2, SURFACE - 1, 0)), Material::Dirt);
        // Five layers per column.
        assert_eq!(world.write_count(), hole.len() * 5);
    }

    #[test]
    fn full_cover_chance_covers_every_floor() {
        let mut world = VoxelWorld::flat_terrain(0, 0, 8, SURFACE);
        let mut entities = RecordingEntities::new();
        let config = EnclosureConfig {
            cover_chance: 1.0,
            grass_chance: 1.0,
            pit_spawn_chance: 0.0,
            ..EnclosureConfig::default()
        };
        let hole = square_hole();
        carve_hole(&mut world, &mut entities, &hole, SURFACE - 4, &config, &mut PitRng::new(1));
        for cell in hole.iter() {
            assert_eq!(world.get(cell.with_y(SURFACE - 3)), Material::Grass);
        }
        assert!(entities.spawned.is_empty());
    }

    #[test]
    fn pit_mobs_stand_on_the_floor() {
        let mut world = VoxelWorld::flat_terrain(0, 0, 8, SURFACE);
        let mut entities = RecordingEntities::new();
        let config = EnclosureConfig {
            pit_spawn_chance: 1.0,
            ..EnclosureConfig::default()
        };
        let hole = square_hole();
        let min_y = SURFACE - 4;
        let outcome =
            carve_hole(&mut world, &mut entities, &hole, min_y, &config, &mut PitRng::new(4));
        assert_eq!(outcome.spawned.len(), hole.len());
        for record in &entities.spawned {
            assert!(matches!(
                record.handle.kind,
                CreatureKind::Creeper | CreatureKind::Creepie
            ));
            assert_eq!(record.handle.position[1], (min_y + 1) as f64);
            assert!(hole.contains(record.handle.voxel().with_y(SURFACE)));
            assert_eq!(
                record.handle.attack_players_only,
                record.handle.kind == CreatureKind::Creepie
            );
        }
    }

    #[test]
    fn refused_pit_mobs_do_not_stop_carving() {
        let mut world = VoxelWorld::flat_terrain(0, 0, 8, SURFACE);
        let mut entities = RecordingEntities::refusing_all();
        let config = EnclosureConfig {
            pit_spawn_chance: 1.0,
            ..EnclosureConfig::default()
        };
        let hole = square_hole();
        let outcome =
            carve_hole(&mut world, &mut entities, &hole, SURFACE - 4, &config, &mut PitRng::new(4));
        assert!(outcome.spawned.is_empty());
        assert_eq!(outcome.refused, hole.len() as u32);
        for cell in hole.iter() {
            assert_eq!(world.get(cell.with_y(SURFACE - 4)), Material::CoarseDirt);
        }
    }
}
