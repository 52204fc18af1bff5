//! Seeded random fill, a stub data source for populating chunks.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

use crate::chunk::Chunk;
use crate::error::VoxelError;
use crate::voxel::{MaterialId, PackedPosition, VoxelRecord};

/// Occupies each position with probability `density` and a uniformly random
/// material in `[0, material_count)`.
///
/// The same seed always produces the same chunk.
#[derive(Clone, Debug)]
pub struct RandomFill {
    density: f64,
    material_count: u32,
    rng: Xoshiro256StarStar,
}

impl RandomFill {
    /// Creates a generator. `density` is clamped to `[0, 1]` (NaN counts as
    /// 0) and `material_count` to at least 1.
    pub fn new(seed: u64, density: f32, material_count: u32) -> Self {
        let density = if density.is_nan() {
            0.0
        } else {
            f64::from(density.clamp(0.0, 1.0))
        };
        Self {
            density,
            material_count: material_count.max(1),
            rng: Xoshiro256StarStar::seed_from_u64(seed),
        }
    }

    /// Draws the record for one position, or `None` to leave it empty.
    pub fn sample(&mut self, pos: PackedPosition) -> Option<VoxelRecord> {
        if !self.rng.gen_bool(self.density) {
            return None;
        }
        let material = MaterialId(self.rng.gen_range(0..self.material_count));
        Some(VoxelRecord::new(pos, material))
    }

    /// Runs [`Chunk::fill`] with this generator.
    pub fn fill_chunk(&mut self, chunk: &mut Chunk) -> Result<usize, VoxelError> {
        chunk.fill(|pos| self.sample(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::CHUNK_VOLUME;

    #[test]
    fn test_density_zero_leaves_chunk_empty() {
        let mut chunk = Chunk::new();
        let inserted = RandomFill::new(1, 0.0, 8).fill_chunk(&mut chunk).unwrap();
        assert_eq!(inserted, 0);
        assert_eq!(chunk.voxel_count(), 0);
    }

    #[test]
    fn test_density_one_fills_every_position() {
        let mut chunk = Chunk::new();
        let inserted = RandomFill::new(1, 1.0, 8).fill_chunk(&mut chunk).unwrap();
        assert_eq!(inserted, CHUNK_VOLUME);
    }

    #[test]
    fn test_density_is_roughly_respected() {
        let mut chunk = Chunk::new();
        RandomFill::new(42, 0.1, 8).fill_chunk(&mut chunk).unwrap();
        let ratio = chunk.voxel_count() as f64 / CHUNK_VOLUME as f64;
        assert!((ratio - 0.1).abs() < 0.01, "ratio = {ratio}");
    }

    #[test]
    fn test_materials_stay_in_range() {
        let mut chunk = Chunk::new();
        RandomFill::new(7, 0.2, 3).fill_chunk(&mut chunk).unwrap();
        assert!(chunk.iter().all(|r| r.material().0 < 3));
    }

    #[test]
    fn test_same_seed_is_deterministic() {
        let mut a = Chunk::new();
        let mut b = Chunk::new();
        RandomFill::new(99, 0.05, 16).fill_chunk(&mut a).unwrap();
        RandomFill::new(99, 0.05, 16).fill_chunk(&mut b).unwrap();
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_degenerate_parameters_are_clamped() {
        let mut chunk = Chunk::new();
        RandomFill::new(3, f32::NAN, 0).fill_chunk(&mut chunk).unwrap();
        assert_eq!(chunk.voxel_count(), 0);

        let mut chunk = Chunk::new();
        RandomFill::new(3, 2.5, 0).fill_chunk(&mut chunk).unwrap();
        assert_eq!(chunk.voxel_count(), CHUNK_VOLUME);
        assert!(chunk.iter().all(|r| r.material() == MaterialId(0)));
    }
}
