// Insertion-ordered set of voxel positions.
//
// Hole, frontier, and outline bookkeeping all need O(1) membership tests, but
// the generator also iterates these sets while drawing random numbers, so the
// iteration order must be stable across runs. `PositionSet` wraps an
// `IndexSet` keyed with the Fx hasher: hashing only serves lookups, and
// iteration follows insertion order.
//
// Removal is order preserving (`shift_remove`), which the fence builder
// relies on when it reports the cells left unfenced.

use crate::types::VoxelCoord;
use enclosure_prng::PitRng;
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;

#[derive(Clone, Debug, Default)]
pub struct PositionSet {
    set: IndexSet<VoxelCoord, FxBuildHasher>,
}

impl PositionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            set: IndexSet::with_capacity_and_hasher(capacity, FxBuildHasher),
        }
    }

    /// Insert a position. Returns `false` if it was already present.
    pub fn insert(&mut self, pos: VoxelCoord) -> bool {
        self.set.insert(pos)
    }

    /// Remove a position, keeping the order of the rest. Returns `false` if
    /// it was not present.
    pub fn remove(&mut self, pos: VoxelCoord) -> bool {
        self.set.shift_remove(&pos)
    }

    pub fn contains(&self, pos: VoxelCoord) -> bool {
        self.set.contains(&pos)
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Positions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = VoxelCoord> + '_ {
        self.set.iter().copied()
    }

    /// The `index`-th position in insertion order.
    pub fn get_index(&self, index: usize) -> Option<VoxelCoord> {
        self.set.get_index(index).copied()
    }

    /// A uniformly chosen member. Draws exactly like `PitRng::pick` on the
    /// same positions in order, and draws nothing when the set is empty.
    pub fn pick(&self, rng: &mut PitRng) -> Option<VoxelCoord> {
        if self.is_empty() {
            return None;
        }
        self.get_index(rng.next_below(self.len() as u32) as usize)
    }

    /// True when no position is shared with `other`.
    pub fn is_disjoint(&self, other: &PositionSet) -> bool {
        self.set.is_disjoint(&other.set)
    }
}

impl Extend<VoxelCoord> for PositionSet {
    fn extend<I: IntoIterator<Item = VoxelCoord>>(&mut self, iter: I) {
        self.set.extend(iter);
    }
}

impl FromIterator<VoxelCoord> for PositionSet {
    fn from_iter<I: IntoIterator<Item = VoxelCoord>>(iter: I) -> Self {
        let mut set = PositionSet::new();
        set.extend(iter);
        set
    }
}

impl PartialEq for PositionSet {
    /// Order-sensitive: two sets are equal only if they were built in the
    /// same order. Determinism tests rely on this.
    fn eq(&self, other: &Self) -> bool {
        self.set.iter().eq(other.set.iter())
    }
}

impl Eq for PositionSet {}
