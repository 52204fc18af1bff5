//! Command-line argument parsing for voxtrace sessions.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// voxtrace command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "voxtrace", about = "Headless voxel pick/edit session")]
pub struct CliArgs {
    /// Seed for the random world fill.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Fill density (0.0 - 1.0).
    #[arg(long)]
    pub density: Option<f32>,

    /// Cursor reach in voxels.
    #[arg(long)]
    pub reach: Option<f32>,

    /// Number of frames to simulate.
    #[arg(long)]
    pub frames: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.world.seed = seed;
        }
        if let Some(density) = args.density {
            self.world.fill_density = density;
        }
        if let Some(reach) = args.reach {
            self.edit.reach = reach;
        }
        if let Some(frames) = args.frames {
            self.session.frames = frames;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
