//! Grid traversal using the DDA (Amanatides & Woo) algorithm.
//!
//! Walks every voxel cell a ray segment passes through, in order, without
//! skipping or revisiting cells. The walk starts at `floor(origin)` and ends
//! at `floor(origin + direction * max_length)`.

use std::iter::FusedIterator;

use glam::{IVec3, Vec3};

/// A ray segment in absolute voxel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoxelRay {
    /// World-space origin.
    pub origin: Vec3,
    /// Direction; expected to be normalized.
    pub direction: Vec3,
    /// Length of the segment along `direction`.
    pub max_length: f32,
}

impl VoxelRay {
    /// Creates a ray segment.
    pub fn new(origin: Vec3, direction: Vec3, max_length: f32) -> Self {
        Self {
            origin,
            direction,
            max_length,
        }
    }

    /// Cell containing the origin.
    pub fn start_cell(&self) -> IVec3 {
        self.origin.floor().as_ivec3()
    }

    /// Cell containing the far end of the segment.
    pub fn end_cell(&self) -> IVec3 {
        (self.origin + self.direction * self.max_length)
            .floor()
            .as_ivec3()
    }

    /// Iterator over the cells this ray visits.
    pub fn cells(&self) -> GridTraversal {
        GridTraversal::new(self)
    }
}

/// One visited cell and the cell visited before it.
///
/// For the first cell of a traversal `previous == cell`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraversalStep {
    /// The cell being visited.
    pub cell: IVec3,
    /// The cell visited immediately before.
    pub previous: IVec3,
}

/// Lazy cell-by-cell walk along a [`VoxelRay`].
///
/// Yields the start cell first and the end cell last. Not restartable.
#[derive(Clone, Debug)]
pub struct GridTraversal {
    current: IVec3,
    previous: IVec3,
    end: IVec3,
    /// Per-axis step: +1, -1, or 0 for an axis the ray never crosses.
    step: IVec3,
    /// Ray parameter at which each axis crosses its next grid line.
    t_max: Vec3,
    /// Ray parameter needed to cross one full cell on each axis.
    t_delta: Vec3,
    /// Steps left before the end cell must have been reached.
    remaining: u64,
    finished: bool,
}

impl GridTraversal {
    /// Prepares the walk for `ray`.
    pub fn new(ray: &VoxelRay) -> Self {
        let origin = ray.origin;
        let dir = ray.direction;
        let start = ray.start_cell();
        let end = ray.end_cell();

        let step = IVec3::new(axis_step(dir.x), axis_step(dir.y), axis_step(dir.z));
        let t_max = Vec3::new(
            initial_t_max(start.x, origin.x, dir.x),
            initial_t_max(start.y, origin.y, dir.y),
            initial_t_max(start.z, origin.z, dir.z),
        );
        let t_delta = Vec3::new(axis_t_delta(dir.x), axis_t_delta(dir.y), axis_t_delta(dir.z));

        // Exactly one axis moves per step, so the end cell is this many steps away.
        let remaining = axis_distance(start.x, end.x)
            + axis_distance(start.y, end.y)
            + axis_distance(start.z, end.z);

        tracing::trace!(?start, ?end, remaining, "grid traversal prepared");

        Self {
            current: start,
            previous: start,
            end,
            step,
            t_max,
            t_delta,
            remaining,
            finished: false,
        }
    }

    /// The cell the walk stops at if nothing stops it earlier.
    pub fn end(&self) -> IVec3 {
        self.end
    }

    /// Moves to the neighbouring cell along the axis whose next grid line is
    /// closest. Ties resolve x, then y, then z.
    fn advance(&mut self) {
        self.previous = self.current;
        self.remaining -= 1;
        if self.t_max.x < self.t_max.y && self.t_max.x < self.t_max.z {
            self.current.x += self.step.x;
            self.t_max.x += self.t_delta.x;
        } else if self.t_max.y < self.t_max.z {
            self.current.y += self.step.y;
            self.t_max.y += self.t_delta.y;
        } else {
            self.current.z += self.step.z;
            self.t_max.z += self.t_delta.z;
        }
    }
}

impl Iterator for GridTraversal {
    type Item = TraversalStep;

    fn next(&mut self) -> Option<TraversalStep> {
        if self.finished {
            return None;
        }
        let visited = TraversalStep {
            cell: self.current,
            previous: self.previous,
        };
        if self.current == self.end || self.remaining == 0 {
            self.finished = true;
        } else {
            self.advance();
        }
        Some(visited)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            (0, Some(0))
        } else {
            (1, usize::try_from(self.remaining).ok().map(|n| n.saturating_add(1)))
        }
    }
}

impl FusedIterator for GridTraversal {}

/// Walks `ray`, calling `predicate(cell, previous)` at every visited cell
/// (the start cell included) until it returns `true`.
///
/// Returns the accepted step, or `None` if the end cell was visited without
/// the predicate accepting.
pub fn traverse<F>(ray: &VoxelRay, mut predicate: F) -> Option<TraversalStep>
where
    F: FnMut(IVec3, IVec3) -> bool,
{
    GridTraversal::new(ray).find(|step| predicate(step.cell, step.previous))
}

fn axis_step(d: f32) -> i32 {
    if d > 0.0 {
        1
    } else if d < 0.0 {
        -1
    } else {
        0
    }
}

/// Ray parameter at which the ray first crosses a grid line on this axis.
fn initial_t_max(cell: i32, origin: f32, d: f32) -> f32 {
    if d > 0.0 {
        (cell as f32 + 1.0 - origin) / d
    } else if d < 0.0 {
        (cell as f32 - origin) / d
    } else {
        f32::INFINITY
    }
}

/// `|1 / d|`, infinite for a zero (or NaN) component.
fn axis_t_delta(d: f32) -> f32 {
    if d > 0.0 || d < 0.0 {
        (1.0 / d).abs()
    } else {
        f32::INFINITY
    }
}

fn axis_distance(from: i32, to: i32) -> u64 {
    (i64::from(to) - i64::from(from)).unsigned_abs()
}
