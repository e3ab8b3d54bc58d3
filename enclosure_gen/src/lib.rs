// enclosure_gen: procedural enclosure pits for voxel terrain.
//
// One placement carves an irregular pit into the ground near a requested
// position, rings it with a partial fence, and populates the pit and its rim
// with hostile creatures. Optionally, small cage and camp structures are
// stamped just outside the rim. The crate talks to its host only through the
// `WorldAccess` and `EntityFactory` traits, so it runs headless against the
// bundled `VoxelWorld` and `RecordingEntities` as well as inside an engine.
//
// Module overview:
// - `feature.rs`:      `Feature` trait and `EnclosureFeature`, which runs one placement end to end.
// - `site.rs`:         Clear-site search in a window around the requested position.
// - `hole.rs`:         Distance-decaying region growth of the hole and its frontier.
// - `outline.rs`:      Outline ring around the final frontier, drop-off lip.
// - `carve.rs`:        Writes pit columns (floor, cover, air) and rolls pit mobs.
// - `fence.rs`:        Pairs adjacent outline cells into fences, then refreshes neighbours.
// - `spawn.rs`:        Creature creation/placement through the entity factory; rim guard.
// - `decoration.rs`:   Optional anchored structure stamps (cages, camps).
// - `survey.rs`:       Runs many seeds in parallel over cloned terrain and aggregates.
// - `position_set.rs`: Insertion-ordered coordinate set used by every stage.
// - `world.rs`:        `WorldAccess` seam + dense `VoxelWorld` with a mutation journal.
// - `entity.rs`:       `EntityFactory` seam + `RecordingEntities`.
// - `config.rs`:       `EnclosureConfig` + `DecorationConfig`, JSON-loadable tunables.
// - `error.rs`:        `ConfigError`.
// - `prng`:            Re-exported from `enclosure_prng` (xoshiro256++ PRNG with SplitMix64 seeding).
// - `types.rs`:        VoxelCoord, Direction, Material, CreatureKind, EntityId.
//
// **Critical constraint: determinism.** A placement is a pure function of
// `(seed, config, starting terrain)`. All randomness comes from the seeded
// `PitRng`, and every collection the generator iterates has a fixed order
// (`PositionSet` keeps insertion order, stats use `BTreeMap`).

pub mod carve;
pub mod config;
pub mod decoration;
pub mod entity;
pub mod error;
pub mod feature;
pub mod fence;
pub mod hole;
pub mod outline;
pub mod position_set;
pub use enclosure_prng as prng;
pub mod site;
pub mod spawn;
pub mod survey;
pub mod types;
pub mod world;
