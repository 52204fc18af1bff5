//! Headless voxtrace session.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.

mod session;

use clap::Parser;
use voxtrace_config::{CliArgs, Config, ConfigError, default_config_dir};
use voxtrace_voxel::VoxelError;

use crate::session::Session;

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Voxel(#[from] VoxelError),
}

fn main() -> Result<(), DemoError> {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = match args.config.clone() {
        Some(dir) => dir,
        None => default_config_dir()?,
    };

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);
    config.validate()?;

    let log_dir = config
        .debug
        .log_dir
        .clone()
        .unwrap_or_else(|| config_dir.join("logs"));
    voxtrace_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    tracing::info!(
        config_dir = %config_dir.display(),
        frames = config.session.frames,
        reach = config.edit.reach,
        "starting session"
    );

    let mut session = Session::new(&config)?;
    session.run()?;
    let stats = session.stats();

    tracing::info!(
        removed = stats.removed,
        placed = stats.placed,
        blocked = stats.blocked,
        missed = stats.missed,
        voxels = session.world().voxel_count(),
        draws_since_last_report = session.sink().draws,
        "session finished"
    );
    Ok(())
}
