//! Error types for voxel storage.

use thiserror::Error;

/// Precondition violations raised by voxel, chunk and world operations.
///
/// Both variants are invalid-argument errors: the caller asked for something
/// the storage cannot represent. Nothing is modified when one is returned.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum VoxelError {
    /// A coordinate component does not fit the packed 10-bit field.
    #[error("invalid argument: position ({x}, {y}, {z}) exceeds the packed field range")]
    PositionOutOfRange {
        /// X component as supplied.
        x: u32,
        /// Y component as supplied.
        y: u32,
        /// Z component as supplied.
        z: u32,
    },
    /// An empty-sentinel record was offered for storage.
    #[error("invalid argument: empty voxel record at ({x}, {y}, {z}) cannot be stored")]
    EmptyRecord {
        /// Local X of the rejected record.
        x: u32,
        /// Local Y of the rejected record.
        y: u32,
        /// Local Z of the rejected record.
        z: u32,
    },
}
