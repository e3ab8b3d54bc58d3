// World access seam and a dense in-memory voxel grid.
//
// The generator only talks to terrain through `WorldAccess`: read a voxel's
// material (and from it, solidity), write a material with update flags,
// request a neighbour-update pass, and query local difficulty for spawns.
// A host engine implements the trait over its own chunk storage.
//
// `VoxelWorld` is the crate's own implementation: a flat `Vec<Material>`
// indexed by `x + z * size_x + y * size_x * size_z` relative to an `origin`
// corner, so worlds can straddle negative coordinates. Out-of-bounds reads
// return `Air`; out-of-bounds writes are no-ops. Every mutation request,
// in or out of bounds, is appended to a `WorldOp` journal so callers can
// check exactly what a placement did and in what order.
//
// See also: `feature.rs`, the only caller that mutates through this seam.
//
// **Critical constraint: determinism.** Writes are applied immediately and
// are visible to later reads within the same placement.

use crate::types::{Material, VoxelCoord};
use serde::{Deserialize, Serialize};

/// Flags carried by a voxel write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteFlags {
    /// Notify adjacent voxels so shape-dependent blocks (fences) reconnect.
    pub update_neighbors: bool,
}

impl WriteFlags {
    pub const DEFAULT: WriteFlags = WriteFlags {
        update_neighbors: true,
    };
}

/// Read/write access to the terrain a feature is placed into.
pub trait WorldAccess {
    fn get(&self, pos: VoxelCoord) -> Material;

    /// Whether the voxel is a solid opaque cube.
    fn is_solid(&self, pos: VoxelCoord) -> bool {
        self.get(pos).is_opaque()
    }

    fn set(&mut self, pos: VoxelCoord, material: Material, flags: WriteFlags);

    /// Re-evaluate the voxel's connections to its neighbours.
    fn update_neighbors(&mut self, pos: VoxelCoord);

    /// Local difficulty used to configure freshly spawned creatures.
    fn difficulty_at(&self, pos: VoxelCoord) -> f32;
}

/// One recorded mutation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorldOp {
    Set {
        pos: VoxelCoord,
        material: Material,
        flags: WriteFlags,
    },
    UpdateNeighbors {
        pos: VoxelCoord,
    },
}

/// Dense 3D voxel grid with a mutation journal.
#[derive(Clone, Debug, Default)]
pub struct VoxelWorld {
    /// Flat storage relative to `origin`.
    voxels: Vec<Material>,
    /// Minimum corner of the stored volume.
    pub origin: VoxelCoord,
    pub size_x: u32,
    pub size_y: u32,
    pub size_z: u32,
    /// Value returned by `difficulty_at` everywhere.
    pub difficulty: f32,
    journal: Vec<WorldOp>,
}

impl VoxelWorld {
    /// Create a world filled with `Air` whose minimum corner is `origin`.
    pub fn new(origin: VoxelCoord, size_x: u32, size_y: u32, size_z: u32) -> Self {
        let total = (size_x as usize) * (size_y as usize) * (size_z as usize);
        Self {
            voxels: vec![Material::Air; total],
            origin,
            size_x,
            size_y,
            size_z,
            difficulty: 1.0,
            journal: Vec::new(),
        }
    }

    /// A square column of terrain centred on `(center_x, center_z)`: `Stone`
    /// below `surface_y - 1`, a `Dirt` top layer at `surface_y - 1`, and
    /// `Air` from `surface_y` up. `surface_y` is the first open layer.
    ///
    /// The build writes bypass the journal.
    pub fn flat_terrain(center_x: i32, center_z: i32, half_extent: i32, surface_y: i32) -> Self {
        let depth = 12;
        let side = (half_extent * 2 + 1) as u32;
        let origin = VoxelCoord::new(center_x - half_extent, surface_y - depth, center_z - half_extent);
        let mut world = Self::new(origin, side, (depth + 8) as u32, side);
        world.fill_box(
            origin,
            VoxelCoord::new(
                center_x + half_extent,
                surface_y - 2,
                center_z + half_extent,
            ),
            Material::Stone,
        );
        world.fill_box(
            VoxelCoord::new(origin.x, surface_y - 1, origin.z),
            VoxelCoord::new(
                center_x + half_extent,
                surface_y - 1,
                center_z + half_extent,
            ),
            Material::Dirt,
        );
        world
    }

    /// Check whether a coordinate is within bounds.
    pub fn in_bounds(&self, coord: VoxelCoord) -> bool {
        let x = coord.x as i64 - self.origin.x as i64;
        let y = coord.y as i64 - self.origin.y as i64;
        let z = coord.z as i64 - self.origin.z as i64;
        x >= 0
            && y >= 0
            && z >= 0
            && x < self.size_x as i64
            && y < self.size_y as i64
            && z < self.size_z as i64
    }

    fn index(&self, coord: VoxelCoord) -> Option<usize> {
        if self.in_bounds(coord) {
            let x = (coord.x - self.origin.x) as usize;
            let y = (coord.y - self.origin.y) as usize;
            let z = (coord.z - self.origin.z) as usize;
            let sx = self.size_x as usize;
            let sz = self.size_z as usize;
            Some(x + z * sx + y * sx * sz)
        } else {
            None
        }
    }

    /// Write without journaling. Used to build test and preview terrain.
    pub fn put(&mut self, coord: VoxelCoord, material: Material) {
        if let Some(i) = self.index(coord) {
            self.voxels[i] = material;
        }
    }

    /// Fill the inclusive box between two corners without journaling.
    pub fn fill_box(&mut self, a: VoxelCoord, b: VoxelCoord, material: Material) {
        for y in a.y.min(b.y)..=a.y.max(b.y) {
            for z in a.z.min(b.z)..=a.z.max(b.z) {
                for x in a.x.min(b.x)..=a.x.max(b.x) {
                    self.put(VoxelCoord::new(x, y, z), material);
                }
            }
        }
    }

    /// Every mutation requested since construction (or the last
    /// `take_journal`), in order.
    pub fn journal(&self) -> &[WorldOp] {
        &self.journal
    }

    pub fn take_journal(&mut self) -> Vec<WorldOp> {
        std::mem::take(&mut self.journal)
    }

    /// Number of `Set` requests in the journal.
    pub fn write_count(&self) -> usize {
        self.journal
            .iter()
            .filter(|op| matches!(op, WorldOp::Set { .. }))
            .count()
    }
}

impl WorldAccess for VoxelWorld {
    fn get(&self, pos: VoxelCoord) -> Material {
        self.index(pos)
            .map(|i| self.voxels[i])
            .unwrap_or(Material::Air)
    }

    fn set(&mut self, pos: VoxelCoord, material: Material, flags: WriteFlags) {
        self.journal.push(WorldOp::Set {
            pos,
            material,
            flags,
        });
        self.put(pos, material);
    }

    fn update_neighbors(&mut self, pos: VoxelCoord) {
        self.journal.push(WorldOp::UpdateNeighbors { pos });
    }

    fn difficulty_at(&self, _pos: VoxelCoord) -> f32 {
        self.difficulty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_world_is_all_air() {
        let world = VoxelWorld::new(VoxelCoord::new(-2, -2, -2), 4, 4, 4);
        for x in -2..2 {
            for y in -2..2 {
                for z in -2..2 {
                    assert_eq!(world.get(VoxelCoord::new(x, y, z)), Material::Air);
                }
            }
        }
    }

    #[test]
    fn set_and_get_with_negative_origin() {
        let mut world = VoxelWorld::new(VoxelCoord::new(-8, 0, -8), 16, 8, 16);
        let coord = VoxelCoord::new(-3, 5, 2);
        world.set(coord, Material::Stone, WriteFlags::DEFAULT);
        assert_eq!(world.get(coord), Material::Stone);
        assert!(world.is_solid(coord));
        assert_eq!(world.get(VoxelCoord::new(-3, 5, 3)), Material::Air);
    }

    #[test]
    fn out_of_bounds_read_returns_air() {
        let world = VoxelWorld::new(VoxelCoord::new(0, 0, 0), 4, 4, 4);
        assert_eq!(world.get(VoxelCoord::new(-1, 0, 0)), Material::Air);
        assert_eq!(world.get(VoxelCoord::new(4, 0, 0)), Material::Air);
        assert_eq!(world.get(VoxelCoord::new(0, 0, 100)), Material::Air);
    }

    #[test]
    fn out_of_bounds_write_is_journaled_but_ignored() {
        let mut world = VoxelWorld::new(VoxelCoord::new(0, 0, 0), 4, 4, 4);
        world.set(VoxelCoord::new(-1, 0, 0), Material::Stone, WriteFlags::DEFAULT);
        assert_eq!(world.write_count(), 1);
        assert_eq!(world.get(VoxelCoord::new(-1, 0, 0)), Material::Air);
    }

    #[test]
    fn journal_records_order() {
        let mut world = VoxelWorld::new(VoxelCoord::new(0, 0, 0), 4, 4, 4);
        let a = VoxelCoord::new(1, 1, 1);
        world.set(a, Material::SpruceFence, WriteFlags::DEFAULT);
        world.update_neighbors(a);
        assert_eq!(
            world.journal(),
            &[
                WorldOp::Set {
                    pos: a,
                    material: Material::SpruceFence,
                    flags: WriteFlags::DEFAULT,
                },
                WorldOp::UpdateNeighbors { pos: a },
            ]
        );
        let taken = world.take_journal();
        assert_eq!(taken.len(), 2);
        assert!(world.journal().is_empty());
    }

    #[test]
    fn flat_terrain_layers() {
        let world = VoxelWorld::flat_terrain(0, 0, 10, 64);
        assert_eq!(world.get(VoxelCoord::new(0, 64, 0)), Material::Air);
        assert_eq!(world.get(VoxelCoord::new(0, 63, 0)), Material::Dirt);
        assert_eq!(world.get(VoxelCoord::new(0, 62, 0)), Material::Stone);
        assert_eq!(world.get(VoxelCoord::new(-10, 55, 10)), Material::Stone);
        assert_eq!(world.get(VoxelCoord::new(3, 65, -4)), Material::Air);
        assert!(world.journal().is_empty());
    }

    #[test]
    fn indexing_is_correct() {
        let mut world = VoxelWorld::new(VoxelCoord::new(-5, 0, -3), 10, 8, 6);
        let coord = VoxelCoord::new(0, 3, 1);
        world.put(coord, Material::OakPlanks);
        assert_eq!(world.get(coord), Material::OakPlanks);
        assert_eq!(world.get(VoxelCoord::new(-1, 3, 1)), Material::Air);
        assert_eq!(world.get(VoxelCoord::new(0, 2, 1)), Material::Air);
        assert_eq!(world.get(VoxelCoord::new(0, 3, 0)), Material::Air);
    }
}
