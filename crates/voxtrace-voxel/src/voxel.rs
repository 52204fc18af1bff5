//! Bit-packed voxel records: a 30-bit local position plus a material reference.
//!
//! A [`VoxelRecord`] is exactly 8 bytes and `Pod`, so a chunk snapshot can be
//! handed to a GPU upload sink without conversion.

use glam::UVec3;
use serde::{Deserialize, Serialize};

use crate::error::VoxelError;

// ---------------------------------------------------------------------------
// Material
// ---------------------------------------------------------------------------

/// Opaque index into an externally owned material table.
#[repr(transparent)]
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    bytemuck::Pod,
    bytemuck::Zeroable,
)]
pub struct MaterialId(pub u32);

impl MaterialId {
    /// Reserved sentinel meaning "no voxel here".
    pub const EMPTY: MaterialId = MaterialId(u32::MAX);

    /// Returns `true` if this is the empty sentinel.
    pub fn is_empty(self) -> bool {
        self == Self::EMPTY
    }
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Bits per packed coordinate.
pub const POSITION_BITS: u32 = 10;

/// Largest value a packed coordinate can hold (1023).
pub const POSITION_MAX: u32 = (1 << POSITION_BITS) - 1;

/// A local position packed as `x << 20 | y << 10 | z`.
///
/// The derived ordering is the packed integer order, i.e. x slowest and z
/// fastest. Chunk storage and snapshots rely on this.
#[repr(transparent)]
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    bytemuck::Pod,
    bytemuck::Zeroable,
)]
pub struct PackedPosition(u32);

impl PackedPosition {
    /// Packs `pos`, failing if any component exceeds [`POSITION_MAX`].
    pub fn new(pos: UVec3) -> Result<Self, VoxelError> {
        if pos.x > POSITION_MAX || pos.y > POSITION_MAX || pos.z > POSITION_MAX {
            return Err(VoxelError::PositionOutOfRange {
                x: pos.x,
                y: pos.y,
                z: pos.z,
            });
        }
        Ok(Self::pack(pos))
    }

    /// Packs a position already known to be in range.
    pub(crate) fn pack(pos: UVec3) -> Self {
        debug_assert!(pos.max_element() <= POSITION_MAX);
        Self((pos.x << (2 * POSITION_BITS)) | (pos.y << POSITION_BITS) | pos.z)
    }

    /// Unpacks into `(x, y, z)`.
    pub fn unpack(self) -> UVec3 {
        UVec3::new(
            (self.0 >> (2 * POSITION_BITS)) & POSITION_MAX,
            (self.0 >> POSITION_BITS) & POSITION_MAX,
            self.0 & POSITION_MAX,
        )
    }

    /// Raw packed bits.
    pub fn to_bits(self) -> u32 {
        self.0
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// One voxel cell: local position and material, 8 bytes.
///
/// Layout:
///   - `[0..4]` packed position (see [`PackedPosition`])
///   - `[4..8]` material reference, [`MaterialId::EMPTY`] for an empty cell
#[repr(C)]
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    bytemuck::Pod,
    bytemuck::Zeroable,
)]
pub struct VoxelRecord {
    position: PackedPosition,
    material: MaterialId,
}

static_assertions::assert_eq_size!(VoxelRecord, [u8; 8]);

impl VoxelRecord {
    /// Creates a record at `position` referencing `material`.
    ///
    /// Passing [`MaterialId::EMPTY`] yields an empty record.
    pub fn new(position: PackedPosition, material: MaterialId) -> Self {
        Self { position, material }
    }

    /// Creates an empty record at `position`.
    pub fn empty(position: PackedPosition) -> Self {
        Self::new(position, MaterialId::EMPTY)
    }

    /// Packs `position` and builds a record in one step.
    pub fn at(position: UVec3, material: MaterialId) -> Result<Self, VoxelError> {
        Ok(Self::new(PackedPosition::new(position)?, material))
    }

    /// Unpacked local position.
    pub fn position(&self) -> UVec3 {
        self.position.unpack()
    }

    /// Packed local position.
    pub fn packed_position(&self) -> PackedPosition {
        self.position
    }

    /// Material reference.
    pub fn material(&self) -> MaterialId {
        self.material
    }

    /// `true` iff the material is the empty sentinel.
    pub fn is_empty(&self) -> bool {
        self.material.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
