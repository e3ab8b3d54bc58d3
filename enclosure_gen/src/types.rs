// Core types shared across enclosure generation.
//
// Defines voxel positions (`VoxelCoord`), the four horizontal `Direction`s
// with their rotations, the `Material` tags written into the world, and the
// creature kinds the generator can spawn.
//
// Positions handed around by the generator sit on the *surface layer*: the
// open voxel directly above the ground. `down()` is the ground itself.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Spatial types
// ---------------------------------------------------------------------------

/// A position in the 3D voxel grid. Each component is in voxel units.
///
/// - X: east  (positive) / west  (negative)
/// - Y: up    (positive) / down  (negative)
/// - Z: south (positive) / north (negative)
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct VoxelCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl VoxelCoord {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// One step in a horizontal direction.
    pub fn offset(self, dir: Direction) -> Self {
        self.offset_by(dir, 1)
    }

    /// `n` steps in a horizontal direction.
    pub fn offset_by(self, dir: Direction, n: i32) -> Self {
        let (dx, dz) = dir.delta();
        Self::new(self.x + dx * n, self.y, self.z + dz * n)
    }

    pub fn up(self) -> Self {
        Self::new(self.x, self.y + 1, self.z)
    }

    pub fn down(self) -> Self {
        Self::new(self.x, self.y - 1, self.z)
    }

    pub fn with_y(self, y: i32) -> Self {
        Self::new(self.x, y, self.z)
    }

    /// Squared Euclidean distance.
    pub fn distance_sq(self, other: Self) -> i32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }
}

impl fmt::Display for VoxelCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Horizontal facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All horizontal directions, clockwise from north. Every neighbour scan
    /// walks this order, so it is part of the deterministic output.
    pub const HORIZONTAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// `(dx, dz)` unit step.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// Quarter turn clockwise seen from above.
    pub const fn rotate_cw(self) -> Self {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}

// ---------------------------------------------------------------------------
// Materials
// ---------------------------------------------------------------------------

/// The material tag of a single voxel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Material {
    #[default]
    Air,
    Stone,
    Dirt,
    /// Pit floor.
    CoarseDirt,
    /// Surface cover, common variant.
    Grass,
    /// Surface cover, rare variant.
    DeadBush,
    /// Rim barrier placed by the fence builder.
    SpruceFence,
    OakFence,
    OakPlanks,
    /// Wall button mounted facing the given direction.
    OakButton(Direction),
    SporeBomb,
    CraftingTable,
    BlastProofPlate,
    SporeSack,
}

impl Material {
    /// Whether the material is a full opaque cube. This is the only
    /// classification the generator reads back from the world.
    pub fn is_opaque(self) -> bool {
        matches!(
            self,
            Material::Stone
                | Material::Dirt
                | Material::CoarseDirt
                | Material::OakPlanks
                | Material::SporeBomb
                | Material::CraftingTable
        )
    }
}

// ---------------------------------------------------------------------------
// Creatures
// ---------------------------------------------------------------------------

/// Hostile creatures the generator places.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CreatureKind {
    Creeper,
    /// Juvenile creeper; may be told to target players only.
    Creepie,
    /// Rim guard spawned on the outline.
    Griefer,
}

/// Compact identifier assigned by an entity factory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_follows_axis_conventions() {
        let origin = VoxelCoord::new(0, 64, 0);
        assert_eq!(origin.offset(Direction::North), VoxelCoord::new(0, 64, -1));
        assert_eq!(origin.offset(Direction::East), VoxelCoord::new(1, 64, 0));
        assert_eq!(origin.offset(Direction::South), VoxelCoord::new(0, 64, 1));
        assert_eq!(origin.offset(Direction::West), VoxelCoord::new(-1, 64, 0));
        assert_eq!(origin.offset_by(Direction::East, 4), VoxelCoord::new(4, 64, 0));
    }

    #[test]
    fn rotations_compose() {
        for dir in Direction::HORIZONTAL {
            assert_eq!(dir.rotate_cw().rotate_cw().rotate_cw().rotate_cw(), dir);
            assert_eq!(dir.rotate_cw().rotate_cw(), dir.opposite());
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn diagonal_from_rotation() {
        // North then a clockwise quarter turn lands on the north-east corner.
        let origin = VoxelCoord::new(5, 1, 5);
        let dir = Direction::North;
        let diag = origin.offset(dir).offset(dir.rotate_cw());
        assert_eq!(diag, VoxelCoord::new(6, 1, 4));
    }

    #[test]
    fn distance_sq() {
        let a = VoxelCoord::new(0, 0, 0);
        let b = VoxelCoord::new(3, 0, 4);
        assert_eq!(a.distance_sq(b), 25);
        assert_eq!(b.distance_sq(a), 25);
    }

    #[test]
    fn opacity_classification() {
        assert!(Material::Stone.is_opaque());
        assert!(Material::CoarseDirt.is_opaque());
        assert!(!Material::Air.is_opaque());
        assert!(!Material::Grass.is_opaque());
        assert!(!Material::SpruceFence.is_opaque());
        assert!(!Material::OakButton(Direction::East).is_opaque());
    }

    #[test]
    fn voxel_coord_ordering() {
        let a = VoxelCoord::new(0, 0, 0);
        let b = VoxelCoord::new(1, 0, 0);
        assert!(a < b);
    }
}
