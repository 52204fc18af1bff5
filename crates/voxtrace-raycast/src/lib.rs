//! Voxel ray traversal (Amanatides & Woo) and the pick/edit operations built on it.

pub mod edit;
pub mod traversal;

pub use edit::{
    DEFAULT_REACH, EditAction, EditOutcome, Placement, VoxelPick, apply_edit, pick,
    place_adjacent, remove_under_cursor,
};
pub use traversal::{GridTraversal, TraversalStep, VoxelRay, traverse};
