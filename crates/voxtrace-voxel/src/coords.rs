//! Chunk-grid coordinates and the absolute ↔ (chunk, local) split.
//!
//! Absolute voxel coordinates are `i32`. The chunk coordinate is the floor of
//! `p / CHUNK_SIZE` (toward negative infinity) and the local coordinate is the
//! Euclidean remainder, always in `[0, CHUNK_SIZE)`.

use glam::{IVec3, UVec3};
use serde::{Deserialize, Serialize};

/// Side length of a chunk in voxels.
pub const CHUNK_SIZE: i32 = 64;

/// Total number of voxel positions in a chunk (64³).
pub const CHUNK_VOLUME: usize = (CHUNK_SIZE * CHUNK_SIZE * CHUNK_SIZE) as usize;

/// Identifies a chunk's position on the chunk grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoord {
    /// Chunk-grid X coordinate.
    pub x: i32,
    /// Chunk-grid Y coordinate.
    pub y: i32,
    /// Chunk-grid Z coordinate.
    pub z: i32,
}

impl ChunkCoord {
    /// Creates a new chunk coordinate.
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The chunk containing absolute voxel position `pos`.
    pub fn from_world(pos: IVec3) -> Self {
        Self {
            x: pos.x.div_euclid(CHUNK_SIZE),
            y: pos.y.div_euclid(CHUNK_SIZE),
            z: pos.z.div_euclid(CHUNK_SIZE),
        }
    }

    /// Splits an absolute position into its chunk and local coordinates.
    pub fn split(pos: IVec3) -> (Self, UVec3) {
        (Self::from_world(pos), local_position(pos))
    }

    /// Absolute position of the chunk's `(0, 0, 0)` voxel.
    pub fn origin(self) -> IVec3 {
        IVec3::new(self.x, self.y, self.z) * CHUNK_SIZE
    }

    /// Absolute position of the local voxel `local` in this chunk.
    pub fn to_world(self, local: UVec3) -> IVec3 {
        self.origin() + local.as_ivec3()
    }
}

impl From<IVec3> for ChunkCoord {
    fn from(v: IVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<ChunkCoord> for IVec3 {
    fn from(c: ChunkCoord) -> Self {
        IVec3::new(c.x, c.y, c.z)
    }
}

/// Local coordinate of absolute position `pos`, each component in `[0, CHUNK_SIZE)`.
pub fn local_position(pos: IVec3) -> UVec3 {
    UVec3::new(
        pos.x.rem_euclid(CHUNK_SIZE) as u32,
        pos.y.rem_euclid(CHUNK_SIZE) as u32,
        pos.z.rem_euclid(CHUNK_SIZE) as u32,
    )
}

/// Local position for a linear scan index (x slowest, z fastest).
pub(crate) fn index_to_local(index: usize) -> UVec3 {
    let size = CHUNK_SIZE as usize;
    UVec3::new(
        (index / (size * size)) as u32,
        ((index % (size * size)) / size) as u32,
        (index % size) as u32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minus_one_maps_to_last_voxel_of_previous_chunk() {
        let (chunk, local) = ChunkCoord::split(IVec3::new(-1, -1, -1));
        assert_eq!(chunk, ChunkCoord::new(-1, -1, -1));
        assert_eq!(local, UVec3::new(63, 63, 63));
    }

    #[test]
    fn test_chunk_boundaries() {
        let cases = [
            (0, 0, 0),
            (63, 0, 63),
            (64, 1, 0),
            (127, 1, 63),
            (128, 2, 0),
            (-1, -1, 63),
            (-63, -1, 1),
            (-64, -1, 0),
            (-65, -2, 63),
            (-128, -2, 0),
        ];
        for (p, chunk, local) in cases {
            let (c, l) = ChunkCoord::split(IVec3::new(p, 0, 0));
            assert_eq!(c.x, chunk, "chunk of {p}");
            assert_eq!(l.x, local, "local of {p}");
        }
    }

    #[test]
    fn test_split_reconstructs_absolute_position() {
        for p in -300..300 {
            let pos = IVec3::new(p, -p, p * 3);
            let (chunk, local) = ChunkCoord::split(pos);
            assert_eq!(chunk.to_world(local), pos);
            assert!(local.max_element() < CHUNK_SIZE as u32);
        }
    }

    #[test]
    fn test_extreme_coordinates_do_not_overflow() {
        let (chunk, local) = ChunkCoord::split(IVec3::new(i32::MIN, i32::MAX, 0));
        assert_eq!(chunk.x, i32::MIN / CHUNK_SIZE);
        assert_eq!(local.x, 0);
        assert_eq!(chunk.y, i32::MAX / CHUNK_SIZE);
        assert_eq!(local.y, 63);
    }

    #[test]
    fn test_index_to_local_scan_order() {
        assert_eq!(index_to_local(0), UVec3::ZERO);
        assert_eq!(index_to_local(1), UVec3::new(0, 0, 1));
        assert_eq!(index_to_local(64), UVec3::new(0, 1, 0));
        assert_eq!(index_to_local(64 * 64), UVec3::new(1, 0, 0));
        assert_eq!(index_to_local(CHUNK_VOLUME - 1), UVec3::splat(63));
    }
}
