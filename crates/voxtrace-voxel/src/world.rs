//! Sparse world of chunks addressed by absolute voxel coordinates.
//!
//! Chunks are created lazily on the first write into their region and are
//! never removed. Reads from a region without a chunk see empty voxels.

use std::collections::hash_map::Entry;

use glam::IVec3;
use rustc_hash::FxHashMap;

use crate::chunk::Chunk;
use crate::coords::ChunkCoord;
use crate::error::VoxelError;
use crate::sink::ChunkSink;
use crate::voxel::{MaterialId, PackedPosition, VoxelRecord};

/// Owns every chunk and routes absolute-coordinate calls to them.
#[derive(Clone, Debug, Default)]
pub struct World {
    chunks: FxHashMap<ChunkCoord, Chunk>,
}

impl World {
    /// Creates a world with no chunks.
    pub fn new() -> Self {
        Self {
            chunks: FxHashMap::default(),
        }
    }

    /// Registers a pre-built chunk at `coord`.
    ///
    /// If a chunk already exists there it is kept and `chunk` is dropped;
    /// returns `true` only when `chunk` was registered.
    pub fn add_chunk(&mut self, coord: ChunkCoord, chunk: Chunk) -> bool {
        match self.chunks.entry(coord) {
            Entry::Vacant(slot) => {
                tracing::debug!(?coord, voxels = chunk.voxel_count(), "chunk registered");
                slot.insert(chunk);
                true
            }
            Entry::Occupied(_) => {
                tracing::warn!(?coord, "chunk already registered, keeping existing");
                false
            }
        }
    }

    /// Places a voxel of `material` at absolute position `pos`.
    ///
    /// Creates the owning chunk if needed. Returns `Ok(false)` when the
    /// position is already occupied (the existing voxel is kept). Fails with
    /// [`VoxelError::EmptyRecord`] for [`MaterialId::EMPTY`], without
    /// creating a chunk.
    pub fn add_voxel(&mut self, pos: IVec3, material: MaterialId) -> Result<bool, VoxelError> {
        let (coord, local) = ChunkCoord::split(pos);
        let record = VoxelRecord::new(PackedPosition::pack(local), material);
        if record.is_empty() {
            return Err(VoxelError::EmptyRecord {
                x: local.x,
                y: local.y,
                z: local.z,
            });
        }

        let chunk = self.chunks.entry(coord).or_insert_with(|| {
            tracing::debug!(?coord, "creating chunk on first write");
            Chunk::new()
        });
        chunk.add_voxel(record)
    }

    /// Removes the voxel at `pos`. Returns `true` if one was removed.
    pub fn remove_voxel(&mut self, pos: IVec3) -> bool {
        let (coord, local) = ChunkCoord::split(pos);
        self.chunks
            .get_mut(&coord)
            .is_some_and(|chunk| chunk.remove_voxel(PackedPosition::pack(local)))
    }

    /// Returns `true` if there is no voxel at `pos`.
    pub fn is_voxel_empty(&self, pos: IVec3) -> bool {
        let (coord, local) = ChunkCoord::split(pos);
        self.chunks
            .get(&coord)
            .is_none_or(|chunk| chunk.is_voxel_empty(PackedPosition::pack(local)))
    }

    /// Returns the voxel at `pos`.
    ///
    /// The record carries the chunk-local position; an absent voxel is
    /// reported as an empty record at that local position.
    pub fn get_voxel(&self, pos: IVec3) -> VoxelRecord {
        let (coord, local) = ChunkCoord::split(pos);
        let packed = PackedPosition::pack(local);
        match self.chunks.get(&coord) {
            Some(chunk) => chunk.get_voxel(packed),
            None => VoxelRecord::empty(packed),
        }
    }

    /// Total number of occupied voxels across all chunks.
    pub fn voxel_count(&self) -> usize {
        self.chunks.values().map(Chunk::voxel_count).sum()
    }

    /// Number of registered chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Immutable access to the chunk at `coord`.
    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    /// Calls `visitor` with every chunk and its coordinate.
    ///
    /// Order is unspecified but stable while the set of chunks is unchanged.
    /// The `&mut Chunk` gives access to [`Chunk::snapshot`].
    pub fn for_each_chunk<F>(&mut self, mut visitor: F)
    where
        F: FnMut(ChunkCoord, &mut Chunk),
    {
        for (coord, chunk) in self.chunks.iter_mut() {
            visitor(*coord, chunk);
        }
    }

    /// Runs [`Chunk::sync`] on every chunk. Returns the number of uploads.
    pub fn sync_chunks<S: ChunkSink + ?Sized>(&mut self, sink: &mut S) -> usize {
        let mut uploads = 0;
        self.for_each_chunk(|coord, chunk| {
            if chunk.sync(coord, &mut *sink) {
                uploads += 1;
            }
        });
        if uploads > 0 {
            tracing::trace!(uploads, "chunk snapshots uploaded");
        }
        uploads
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use glam::UVec3;

    use super::*;
    use crate::sink::CountingSink;

    #[test]
    fn test_new_world_is_empty() {
        let world = World::new();
        assert_eq!(world.chunk_count(), 0);
        assert_eq!(world.voxel_count(), 0);
        assert!(world.is_voxel_empty(IVec3::new(10, -10, 3)));
    }

    #[test]
    fn test_add_voxel_creates_chunk_lazily() {
        let mut world = World::new();
        assert_eq!(world.add_voxel(IVec3::new(70, 1, 2), MaterialId(4)), Ok(true));
        assert_eq!(world.chunk_count(), 1);
        assert!(world.chunk(ChunkCoord::new(1, 0, 0)).is_some());

        // Second voxel in the same chunk reuses it.
        world.add_voxel(IVec3::new(64, 0, 0), MaterialId(4)).unwrap();
        assert_eq!(world.chunk_count(), 1);
        assert_eq!(world.voxel_count(), 2);
    }

    #[test]
    fn test_negative_coordinates_land_in_negative_chunk() {
        let mut world = World::new();
        world.add_voxel(IVec3::new(-1, -1, -1), MaterialId(1)).unwrap();
        let chunk = world
            .chunk(ChunkCoord::new(-1, -1, -1))
            .expect("chunk at -1");
        let stored = chunk.iter().next().expect("one voxel");
        assert_eq!(stored.position(), UVec3::new(63, 63, 63));
        assert!(!world.is_voxel_empty(IVec3::new(-1, -1, -1)));
        assert!(world.is_voxel_empty(IVec3::new(63, 63, 63)));
    }

    #[test]
    fn test_add_empty_material_fails_without_creating_chunk() {
        let mut world = World::new();
        let err = world
            .add_voxel(IVec3::new(-2, 0, 0), MaterialId::EMPTY)
            .unwrap_err();
        assert_eq!(err, VoxelError::EmptyRecord { x: 62, y: 0, z: 0 });
        assert_eq!(world.chunk_count(), 0);
    }

    #[test]
    fn test_add_voxel_keeps_existing_material() {
        let mut world = World::new();
        let p = IVec3::new(5, 5, 5);
        assert_eq!(world.add_voxel(p, MaterialId(1)), Ok(true));
        assert_eq!(world.add_voxel(p, MaterialId(2)), Ok(false));
        assert_eq!(world.get_voxel(p).material(), MaterialId(1));
        assert_eq!(world.voxel_count(), 1);
    }

    #[test]
    fn test_remove_without_chunk_is_noop() {
        let mut world = World::new();
        assert!(!world.remove_voxel(IVec3::new(100, 100, 100)));
        assert_eq!(world.chunk_count(), 0);
    }

    #[test]
    fn test_remove_keeps_chunk_registered() {
        let mut world = World::new();
        let p = IVec3::new(-70, 3, 3);
        world.add_voxel(p, MaterialId(1)).unwrap();
        assert!(world.remove_voxel(p));
        assert!(!world.remove_voxel(p));
        assert!(world.is_voxel_empty(p));
        assert_eq!(world.chunk_count(), 1);
        assert_eq!(world.voxel_count(), 0);
    }

    #[test]
    fn test_get_voxel_without_chunk_returns_local_empty() {
        let world = World::new();
        let record = world.get_voxel(IVec3::new(-1, 64, 130));
        assert!(record.is_empty());
        assert_eq!(record.position(), UVec3::new(63, 0, 2));
    }

    #[test]
    fn test_voxel_count_sums_chunks() {
        let mut world = World::new();
        for x in [-100, -1, 0, 63, 64, 200] {
            world.add_voxel(IVec3::new(x, 0, 0), MaterialId(0)).unwrap();
        }
        assert_eq!(world.chunk_count(), 5);
        assert_eq!(world.voxel_count(), 6);
    }

    #[test]
    fn test_add_chunk_keeps_first_registration() {
        let mut world = World::new();
        let coord = ChunkCoord::new(0, 0, 0);
        let mut first = Chunk::new();
        first
            .add_voxel(VoxelRecord::at(UVec3::ZERO, MaterialId(1)).unwrap())
            .unwrap();
        assert!(world.add_chunk(coord, first));
        assert!(!world.add_chunk(coord, Chunk::new()));
        assert_eq!(world.voxel_count(), 1);
    }

    #[test]
    fn test_for_each_chunk_visits_every_chunk_once() {
        let mut world = World::new();
        world.add_voxel(IVec3::new(0, 0, 0), MaterialId(0)).unwrap();
        world.add_voxel(IVec3::new(0, -64, 0), MaterialId(0)).unwrap();
        world.add_voxel(IVec3::new(0, 0, 128), MaterialId(0)).unwrap();

        let mut seen = Vec::new();
        world.for_each_chunk(|coord, chunk| {
            assert_eq!(chunk.snapshot().len(), 1);
            seen.push(coord);
        });
        seen.sort();
        assert_eq!(
            seen,
            vec![
                ChunkCoord::new(0, -1, 0),
                ChunkCoord::new(0, 0, 0),
                ChunkCoord::new(0, 0, 2),
            ]
        );
    }

    #[test]
    fn test_for_each_chunk_order_is_stable() {
        let mut world = World::new();
        for i in 0..20 {
            world.add_voxel(IVec3::new(i * 64, 0, 0), MaterialId(0)).unwrap();
        }
        let mut first = Vec::new();
        world.for_each_chunk(|coord, _| first.push(coord));
        let mut second = Vec::new();
        world.for_each_chunk(|coord, _| second.push(coord));
        assert_eq!(first, second);
    }

    #[test]
    fn test_sync_chunks_uploads_dirty_chunks_only() {
        let mut world = World::new();
        world.add_voxel(IVec3::new(0, 0, 0), MaterialId(0)).unwrap();
        world.add_voxel(IVec3::new(64, 0, 0), MaterialId(0)).unwrap();

        let mut sink = CountingSink::new();
        assert_eq!(world.sync_chunks(&mut sink), 2);
        assert_eq!(world.sync_chunks(&mut sink), 0);

        world.remove_voxel(IVec3::new(64, 0, 0));
        assert_eq!(world.sync_chunks(&mut sink), 1);

        assert_eq!(sink.uploads, 3);
        assert_eq!(sink.draws, 6);
        assert_eq!(sink.instances, 2 + 2 + 1);
    }
}
