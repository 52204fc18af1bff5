//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the persisted config inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Per-user config directory (`<platform config dir>/voxtrace`).
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("voxtrace"))
        .ok_or(ConfigError::NoConfigDir)
}

/// Top-level session configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// World population settings.
    pub world: WorldConfig,
    /// Cursor edit settings.
    pub edit: EditConfig,
    /// Headless session settings.
    pub session: SessionConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// How the initial world is populated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed for the random fill.
    pub seed: u64,
    /// Probability that a position is occupied (0.0 - 1.0).
    pub fill_density: f32,
    /// Materials are drawn uniformly from `0..material_count`.
    pub material_count: u32,
    /// Chunk coordinates filled at startup.
    pub prefill_chunks: Vec<[i32; 3]>,
}

/// Cursor edit configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditConfig {
    /// Ray length for pick and edit, in voxels.
    pub reach: f32,
    /// Material placed by place edits.
    pub place_material: u32,
}

/// Headless session configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// Number of frames to simulate.
    pub frames: u32,
    /// Camera position in voxel space.
    pub camera_position: [f32; 3],
    /// Initial look yaw around +Y, in degrees (0 = +X, 90 = +Z).
    pub look_yaw_degrees: f32,
    /// Look pitch, in degrees (positive looks up).
    pub look_pitch_degrees: f32,
    /// Total yaw swept over the session, in degrees.
    pub yaw_sweep_degrees: f32,
    /// Frames between stats reports (0 disables reports).
    pub report_interval: u32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Directory for JSON log files; defaults to `<config dir>/logs`.
    pub log_dir: Option<PathBuf>,
}

// --- Default implementations ---

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            fill_density: 0.1,
            material_count: 16,
            prefill_chunks: vec![[0, 0, 0]],
        }
    }
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            reach: 50.0,
            place_material: 0,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            frames: 120,
            camera_position: [32.0, 32.0, -8.0],
            look_yaw_degrees: 90.0,
            look_pitch_degrees: 0.0,
            yaw_sweep_degrees: 30.0,
            report_interval: 60,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE_NAME))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Rejects values a session cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let density = self.world.fill_density;
        if !(0.0..=1.0).contains(&density) {
            return Err(invalid("world.fill_density", format!("{density} is not in 0.0..=1.0")));
        }
        if self.world.material_count == 0 {
            return Err(invalid("world.material_count", "must be at least 1".to_string()));
        }
        let reach = self.edit.reach;
        if !reach.is_finite() || reach < 0.0 {
            return Err(invalid("edit.reach", format!("{reach} is not a finite, non-negative length")));
        }
        if self.edit.place_material == u32::MAX {
            return Err(invalid("edit.place_material", "u32::MAX marks empty voxels".to_string()));
        }
        if self.session.camera_position.iter().any(|c| !c.is_finite()) {
            return Err(invalid("session.camera_position", "components must be finite".to_string()));
        }
        Ok(())
    }

    fn read(config_path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(config_path).map_err(ConfigError::ReadError)?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::InvalidValue { field, reason }
}
