//! Cursor picking and the remove/place edits built on [`traverse`].

use glam::IVec3;
use voxtrace_voxel::{MaterialId, VoxelError, VoxelRecord, World};

use crate::traversal::{VoxelRay, traverse};

/// Default reach of a cursor ray, in voxels.
pub const DEFAULT_REACH: f32 = 50.0;

/// Result of a successful [`pick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoxelPick {
    /// First occupied cell along the ray.
    pub cell: IVec3,
    /// Cell visited just before `cell`; equal to `cell` when the ray starts inside it.
    pub previous: IVec3,
    /// The record stored at `cell`.
    pub voxel: VoxelRecord,
}

impl VoxelPick {
    /// Whether the ray started inside the picked cell.
    pub fn started_inside(&self) -> bool {
        self.cell == self.previous
    }
}

/// Outcome of a [`place_adjacent`] that hit something.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// The occupied cell the ray hit.
    pub hit: IVec3,
    /// The cell a voxel was placed into (the one before `hit`).
    pub target: IVec3,
    /// `false` when `target` was already occupied and nothing was added.
    pub placed: bool,
}

/// Finds the first occupied cell along `ray`.
pub fn pick(world: &World, ray: &VoxelRay) -> Option<VoxelPick> {
    let step = traverse(ray, |cell, _| !world.is_voxel_empty(cell))?;
    Some(VoxelPick {
        cell: step.cell,
        previous: step.previous,
        voxel: world.get_voxel(step.cell),
    })
}

/// Removes the first voxel along `ray`. Returns the cell it occupied.
pub fn remove_under_cursor(world: &mut World, ray: &VoxelRay) -> Option<IVec3> {
    let removed = traverse(ray, |cell, _| world.remove_voxel(cell))?.cell;
    tracing::debug!(?removed, "voxel removed under cursor");
    Some(removed)
}

/// Places a voxel of `material` in the cell just before the first occupied
/// cell along `ray`.
///
/// Returns `Ok(None)` when the ray hits nothing.
pub fn place_adjacent(
    world: &mut World,
    ray: &VoxelRay,
    material: MaterialId,
) -> Result<Option<Placement>, VoxelError> {
    let Some(step) = traverse(ray, |cell, _| !world.is_voxel_empty(cell)) else {
        return Ok(None);
    };
    let placed = world.add_voxel(step.previous, material)?;
    tracing::debug!(hit = ?step.cell, target = ?step.previous, placed, "voxel placed adjacent");
    Ok(Some(Placement {
        hit: step.cell,
        target: step.previous,
        placed,
    }))
}

/// A cursor edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditAction {
    /// Remove the voxel under the cursor.
    Remove,
    /// Place a voxel of the given material next to the one under the cursor.
    Place(MaterialId),
}

/// What an [`apply_edit`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    /// The voxel at this cell was removed.
    Removed(IVec3),
    /// The ray hit a voxel; see [`Placement::placed`] for whether one was added.
    Placed(Placement),
    /// The ray hit nothing within reach.
    Missed,
}

/// Applies `action` along `ray`.
pub fn apply_edit(
    world: &mut World,
    ray: &VoxelRay,
    action: EditAction,
) -> Result<EditOutcome, VoxelError> {
    let outcome = match action {
        EditAction::Remove => remove_under_cursor(world, ray).map(EditOutcome::Removed),
        EditAction::Place(material) => place_adjacent(world, ray, material)?.map(EditOutcome::Placed),
    };
    Ok(outcome.unwrap_or(EditOutcome::Missed))
}
