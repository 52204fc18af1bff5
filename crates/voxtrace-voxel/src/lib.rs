//! Sparse voxel storage: bit-packed voxel records, 64³ chunks with cached
//! upload snapshots, and a lazily populated world of chunks.

pub mod chunk;
pub mod coords;
pub mod error;
pub mod generate;
pub mod sink;
pub mod voxel;
pub mod world;

pub use chunk::Chunk;
pub use coords::{CHUNK_SIZE, CHUNK_VOLUME, ChunkCoord, local_position};
pub use error::VoxelError;
pub use generate::RandomFill;
pub use sink::{ChunkSink, CountingSink};
pub use voxel::{MaterialId, POSITION_BITS, POSITION_MAX, PackedPosition, VoxelRecord};
pub use world::World;
