// Entity factory seam and an in-memory recording implementation.
//
// The generator asks a factory to `create` a creature of some kind, `place`s
// the returned handle, and hands it back through `spawn_into_world` together
// with a `SpawnContext` carrying the local difficulty. A factory may refuse
// to create an entity (returns `None`); callers treat that as a skipped
// spawn, never as an error.
//
// `RecordingEntities` assigns sequential `EntityId`s, keeps every spawned
// handle in order, and can be told to refuse particular kinds.

use crate::types::{CreatureKind, EntityId, VoxelCoord};
use serde::{Deserialize, Serialize};

/// Why an entity is being spawned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnReason {
    ChunkGeneration,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnContext {
    pub reason: SpawnReason,
    pub difficulty: f32,
}

/// A created but possibly not yet spawned creature.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntityHandle {
    pub id: EntityId,
    pub kind: CreatureKind,
    /// World-space position (block corner at integer values).
    pub position: [f64; 3],
    pub yaw: f32,
    pub pitch: f32,
    /// Only meaningful for creepies: target players, ignore other mobs.
    pub attack_players_only: bool,
}

impl EntityHandle {
    /// Voxel containing the handle's position.
    pub fn voxel(&self) -> VoxelCoord {
        VoxelCoord::new(
            self.position[0].floor() as i32,
            self.position[1].floor() as i32,
            self.position[2].floor() as i32,
        )
    }
}

pub trait EntityFactory {
    fn create(&mut self, kind: CreatureKind) -> Option<EntityHandle>;

    fn place(&mut self, handle: &mut EntityHandle, position: [f64; 3], yaw: f32, pitch: f32) {
        handle.position = position;
        handle.yaw = yaw;
        handle.pitch = pitch;
    }

    fn spawn_into_world(&mut self, handle: EntityHandle, ctx: SpawnContext);
}

/// A spawned entity plus the context it was spawned with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnRecord {
    pub handle: EntityHandle,
    pub context: SpawnContext,
}

#[derive(Clone, Debug, Default)]
pub struct RecordingEntities {
    next_id: u32,
    /// Kinds for which `create` returns `None`.
    pub refused: Vec<CreatureKind>,
    /// Number of successful `create` calls.
    pub created: u32,
    /// Number of `create` calls, successful or not.
    pub create_calls: u32,
    pub spawned: Vec<SpawnRecord>,
}

impl RecordingEntities {
    pub fn new() -> Self {
        Self::default()
    }

    /// A factory that refuses every creature kind.
    pub fn refusing_all() -> Self {
        Self {
            refused: vec![
                CreatureKind::Creeper,
                CreatureKind::Creepie,
                CreatureKind::Griefer,
            ],
            ..Self::default()
        }
    }

    pub fn spawned_of(&self, kind: CreatureKind) -> impl Iterator<Item = &SpawnRecord> {
        self.spawned.iter().filter(move |r| r.handle.kind == kind)
    }
}

impl EntityFactory for RecordingEntities {
    fn create(&mut self, kind: CreatureKind) -> Option<EntityHandle> {
        self.create_calls += 1;
        if self.refused.contains(&kind) {
            return None;
        }
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.created += 1;
        Some(EntityHandle {
            id,
            kind,
            position: [0.0; 3],
            yaw: 0.0,
            pitch: 0.0,
            attack_players_only: false,
        })
    }

    fn spawn_into_world(&mut self, handle: EntityHandle, ctx: SpawnContext) {
        self.spawned.push(SpawnRecord {
            handle,
            context: ctx,
        });
    }
}
