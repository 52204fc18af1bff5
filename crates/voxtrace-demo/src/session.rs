//! Headless pick/edit session: a camera sweeping over a randomly filled world,
//! alternating remove and place edits every frame.

use glam::Vec3;
use voxtrace_config::Config;
use voxtrace_raycast::{EditAction, EditOutcome, VoxelRay, apply_edit};
use voxtrace_voxel::{Chunk, ChunkCoord, CountingSink, MaterialId, RandomFill, VoxelError, World};

/// Unit look vector for a yaw around +Y (0° = +X, 90° = +Z) and a pitch
/// (positive looks up), both in degrees.
pub fn look_direction(yaw_degrees: f32, pitch_degrees: f32) -> Vec3 {
    let (yaw_sin, yaw_cos) = yaw_degrees.to_radians().sin_cos();
    let (pitch_sin, pitch_cos) = pitch_degrees.to_radians().sin_cos();
    Vec3::new(yaw_cos * pitch_cos, pitch_sin, yaw_sin * pitch_cos)
}

/// Builds a world with every chunk in `config.world.prefill_chunks` randomly
/// filled from one seeded generator.
pub fn build_world(config: &Config) -> Result<World, VoxelError> {
    let world_config = &config.world;
    let mut fill = RandomFill::new(
        world_config.seed,
        world_config.fill_density,
        world_config.material_count,
    );
    let mut world = World::new();
    for &[x, y, z] in &world_config.prefill_chunks {
        let coord = ChunkCoord::new(x, y, z);
        let mut chunk = Chunk::new();
        let inserted = fill.fill_chunk(&mut chunk)?;
        tracing::debug!(?coord, inserted, "chunk prefilled");
        world.add_chunk(coord, chunk);
    }
    tracing::info!(
        chunks = world.chunk_count(),
        voxels = world.voxel_count(),
        seed = world_config.seed,
        "world built"
    );
    Ok(world)
}

/// Running totals of edit outcomes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EditStats {
    /// Remove edits that removed a voxel.
    pub removed: u32,
    /// Place edits that added a voxel.
    pub placed: u32,
    /// Place edits whose target cell was already occupied.
    pub blocked: u32,
    /// Edits whose ray hit nothing within reach.
    pub missed: u32,
}

impl EditStats {
    fn record(&mut self, outcome: &EditOutcome) {
        match outcome {
            EditOutcome::Removed(_) => self.removed += 1,
            EditOutcome::Placed(placement) if placement.placed => self.placed += 1,
            EditOutcome::Placed(_) => self.blocked += 1,
            EditOutcome::Missed => self.missed += 1,
        }
    }
}

/// State of a headless session.
pub struct Session {
    world: World,
    sink: CountingSink,
    camera: Vec3,
    base_yaw: f32,
    pitch: f32,
    yaw_sweep: f32,
    reach: f32,
    material: MaterialId,
    frames: u32,
    report_interval: u32,
    frame: u32,
    stats: EditStats,
}

impl Session {
    /// Builds the world described by `config` and positions the camera.
    pub fn new(config: &Config) -> Result<Self, VoxelError> {
        Ok(Self::with_world(config, build_world(config)?))
    }

    /// Starts a session over an already populated `world`.
    pub fn with_world(config: &Config, world: World) -> Self {
        let session = &config.session;
        Self {
            world,
            sink: CountingSink::new(),
            camera: Vec3::from_array(session.camera_position),
            base_yaw: session.look_yaw_degrees,
            pitch: session.look_pitch_degrees,
            yaw_sweep: session.yaw_sweep_degrees,
            reach: config.edit.reach,
            material: MaterialId(config.edit.place_material),
            frames: session.frames,
            report_interval: session.report_interval,
            frame: 0,
            stats: EditStats::default(),
        }
    }

    /// Yaw at `frame`, sweeping linearly across the session centred on the
    /// configured yaw.
    pub fn yaw_degrees_at(&self, frame: u32) -> f32 {
        let last = self.frames.saturating_sub(1).max(1) as f32;
        self.base_yaw + self.yaw_sweep * (frame as f32 / last - 0.5)
    }

    /// Cursor ray for `frame`.
    pub fn cursor_ray(&self, frame: u32) -> VoxelRay {
        VoxelRay::new(
            self.camera,
            look_direction(self.yaw_degrees_at(frame), self.pitch),
            self.reach,
        )
    }

    /// Runs one frame: one edit along the cursor ray, then a chunk sync.
    pub fn step(&mut self) -> Result<EditOutcome, VoxelError> {
        let action = if self.frame % 2 == 0 {
            EditAction::Remove
        } else {
            EditAction::Place(self.material)
        };
        let ray = self.cursor_ray(self.frame);
        let outcome = apply_edit(&mut self.world, &ray, action)?;
        self.stats.record(&outcome);
        tracing::trace!(frame = self.frame, ?action, ?outcome, "edit applied");

        self.world.sync_chunks(&mut self.sink);
        self.frame += 1;
        Ok(outcome)
    }

    /// Runs every remaining frame, reporting every `report_interval` frames.
    pub fn run(&mut self) -> Result<EditStats, VoxelError> {
        while self.frame < self.frames {
            self.step()?;
            if self.report_interval > 0 && self.frame % self.report_interval == 0 {
                self.report();
            }
        }
        Ok(self.stats)
    }

    fn report(&mut self) {
        let sink = &self.sink;
        tracing::info!(
            frame = self.frame,
            voxels = self.world.voxel_count(),
            chunks = self.world.chunk_count(),
            uploads = sink.uploads,
            uploaded_bytes = sink.uploaded_bytes,
            draws = sink.draws,
            instances = sink.instances,
            removed = self.stats.removed,
            placed = self.stats.placed,
            missed = self.stats.missed,
            "session stats"
        );
        self.sink.reset();
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn sink(&self) -> &CountingSink {
        &self.sink
    }

    pub fn stats(&self) -> EditStats {
        self.stats
    }
}
