//! Sparse 64×64×64 voxel chunk with a lazily recomputed upload snapshot.
//!
//! Occupied voxels live in an ordered map keyed by [`PackedPosition`]; empty
//! cells are simply absent. Every mutation invalidates the cached flat
//! snapshot, which is rebuilt on the next [`Chunk::snapshot`] call.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::coords::{CHUNK_VOLUME, ChunkCoord, index_to_local};
use crate::error::VoxelError;
use crate::sink::ChunkSink;
use crate::voxel::{PackedPosition, VoxelRecord};

/// Cached flat copy of a chunk's records.
///
/// `None` while stale. Only a recompute fills it; any mutation clears it.
#[derive(Clone, Debug, PartialEq, Eq)]
struct SnapshotCache {
    records: Option<Vec<VoxelRecord>>,
}

impl SnapshotCache {
    fn clean(records: Vec<VoxelRecord>) -> Self {
        Self {
            records: Some(records),
        }
    }

    fn invalidate(&mut self) {
        self.records = None;
    }

    fn is_dirty(&self) -> bool {
        self.records.is_none()
    }

    fn get_or_recompute(&mut self, recompute: impl FnOnce() -> Vec<VoxelRecord>) -> &[VoxelRecord] {
        self.records.get_or_insert_with(recompute).as_slice()
    }
}

/// A sparse cubic region of [`CHUNK_SIZE`](crate::CHUNK_SIZE)³ voxels.
///
/// Storage identity is by position only: adding a record at an occupied
/// position leaves the original occupant in place.
#[derive(Clone, Debug)]
pub struct Chunk {
    /// Occupied records, ordered by packed position.
    voxels: BTreeMap<PackedPosition, VoxelRecord>,
    /// Upload snapshot.
    cache: SnapshotCache,
    /// Incremented by every call that dirties the chunk.
    version: u64,
}

impl Chunk {
    /// Creates an empty, clean chunk.
    pub fn new() -> Self {
        Self {
            voxels: BTreeMap::new(),
            cache: SnapshotCache::clean(Vec::new()),
            version: 0,
        }
    }

    /// Populates the chunk by calling `generator` once for every local
    /// position, x slowest and z fastest.
    ///
    /// Returned records are inserted at their own position; a position that
    /// is already occupied (before or earlier in this call) keeps its first
    /// record. Returns the number of records inserted.
    ///
    /// Fails with [`VoxelError::EmptyRecord`] if the generator ever returns an
    /// empty record, in which case the chunk is left untouched.
    pub fn fill<F>(&mut self, mut generator: F) -> Result<usize, VoxelError>
    where
        F: FnMut(PackedPosition) -> Option<VoxelRecord>,
    {
        let mut staged = BTreeMap::new();
        for index in 0..CHUNK_VOLUME {
            let Some(record) = generator(PackedPosition::pack(index_to_local(index))) else {
                continue;
            };
            if record.is_empty() {
                return Err(empty_record_error(&record));
            }
            let key = record.packed_position();
            if !self.voxels.contains_key(&key) {
                staged.entry(key).or_insert(record);
            }
        }

        let inserted = staged.len();
        self.voxels.extend(staged);
        self.mark_dirty();
        tracing::debug!(inserted, total = self.voxels.len(), "chunk filled");
        Ok(inserted)
    }

    /// Returns the record at `pos`, or an empty record if nothing is stored there.
    pub fn get_voxel(&self, pos: PackedPosition) -> VoxelRecord {
        self.voxels
            .get(&pos)
            .copied()
            .unwrap_or_else(|| VoxelRecord::empty(pos))
    }

    /// Inserts `record` if its position is vacant.
    ///
    /// Returns `Ok(true)` if inserted and `Ok(false)` if the position was
    /// already occupied (the existing record is kept). Marks the chunk dirty
    /// either way.
    pub fn add_voxel(&mut self, record: VoxelRecord) -> Result<bool, VoxelError> {
        if record.is_empty() {
            return Err(empty_record_error(&record));
        }
        let inserted = match self.voxels.entry(record.packed_position()) {
            Entry::Vacant(slot) => {
                slot.insert(record);
                true
            }
            Entry::Occupied(_) => false,
        };
        self.mark_dirty();
        Ok(inserted)
    }

    /// Removes the record at `pos`. Returns `true` if one was removed.
    ///
    /// The chunk is only marked dirty when something was removed.
    pub fn remove_voxel(&mut self, pos: PackedPosition) -> bool {
        if self.voxels.remove(&pos).is_some() {
            self.mark_dirty();
            true
        } else {
            false
        }
    }

    /// Returns `true` if no record is stored at `pos`.
    pub fn is_voxel_empty(&self, pos: PackedPosition) -> bool {
        self.get_voxel(pos).is_empty()
    }

    /// Returns the flat, position-ordered snapshot, recomputing it if dirty.
    ///
    /// The slice length is the instance count for rendering.
    pub fn snapshot(&mut self) -> &[VoxelRecord] {
        let voxels = &self.voxels;
        self.cache.get_or_recompute(|| {
            tracing::trace!(count = voxels.len(), "recomputing chunk snapshot");
            voxels.values().copied().collect()
        })
    }

    /// Per-frame render step for this chunk.
    ///
    /// If the chunk is dirty its snapshot is recomputed and uploaded; the
    /// chunk is then drawn with the snapshot length as instance count.
    /// Returns `true` if an upload happened.
    pub fn sync<S: ChunkSink + ?Sized>(&mut self, coord: ChunkCoord, sink: &mut S) -> bool {
        let uploaded = self.is_dirty();
        let records = self.snapshot();
        if uploaded {
            sink.upload(coord, records);
        }
        sink.draw_instanced(coord, records.len());
        uploaded
    }

    /// Number of occupied voxels.
    pub fn voxel_count(&self) -> usize {
        self.voxels.len()
    }

    /// Returns `true` if the snapshot is stale.
    pub fn is_dirty(&self) -> bool {
        self.cache.is_dirty()
    }

    /// Mutation counter.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Iterates over stored records in position order.
    pub fn iter(&self) -> impl Iterator<Item = &VoxelRecord> {
        self.voxels.values()
    }

    fn mark_dirty(&mut self) {
        self.cache.invalidate();
        self.version += 1;
    }
}

impl Default for Chunk {
    fn default() -> Self {
        Self::new()
    }
}

fn empty_record_error(record: &VoxelRecord) -> VoxelError {
    let pos = record.position();
    VoxelError::EmptyRecord {
        x: pos.x,
        y: pos.y,
        z: pos.z,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
