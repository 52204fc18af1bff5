//! The rendering-side surface: where chunk snapshots are uploaded and drawn.

use crate::coords::ChunkCoord;
use crate::voxel::VoxelRecord;

/// Consumer of per-chunk snapshots, implemented by the rendering layer.
///
/// [`upload`](ChunkSink::upload) is only called after a chunk's snapshot has
/// been recomputed. [`draw_instanced`](ChunkSink::draw_instanced) is called
/// for every chunk on every sync, with the length of the current snapshot.
pub trait ChunkSink {
    /// Receives the freshly recomputed records of the chunk at `coord`.
    fn upload(&mut self, coord: ChunkCoord, records: &[VoxelRecord]);

    /// Draws `instances` voxel instances of the chunk at `coord`.
    fn draw_instanced(&mut self, coord: ChunkCoord, instances: usize);
}

/// A sink that only counts what passes through it.
///
/// Useful for headless runs and tests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CountingSink {
    /// Number of `upload` calls.
    pub uploads: usize,
    /// Total bytes handed to `upload`.
    pub uploaded_bytes: usize,
    /// Number of `draw_instanced` calls.
    pub draws: usize,
    /// Total instances drawn.
    pub instances: usize,
}

impl CountingSink {
    /// Creates a zeroed counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl ChunkSink for CountingSink {
    fn upload(&mut self, _coord: ChunkCoord, records: &[VoxelRecord]) {
        self.uploads += 1;
        self.uploaded_bytes += bytemuck::cast_slice::<VoxelRecord, u8>(records).len();
    }

    fn draw_instanced(&mut self, _coord: ChunkCoord, instances: usize) {
        self.draws += 1;
        self.instances += instances;
    }
}
