//! Engine configuration loaded from TOML.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

/// Master seed used when a configuration does not name one.
pub const DEFAULT_SEED: u64 = 0x0f70_d3f3_5eed_2024;

/// What the engine does once base health reaches zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseDestroyedPolicy {
    /// Reset the world and request a fresh map on the next tick.
    #[default]
    Restart,
    /// Stop advancing until [`crate::Simulation::restart`] is called.
    Halt,
}

/// Tunables for a [`crate::Simulation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Money after construction and after every reset.
    pub starting_money: u64,
    /// Starting and maximum base health.
    pub base_health: i32,
    /// Snapshot publishing period in frames.
    pub snapshot_interval: u64,
    /// Countdown seeded by `start_game` before the first wave.
    pub opening_grace_frames: u32,
    /// Countdown after a completed wave.
    pub inter_wave_grace_frames: u32,
    /// Countdown after an admin wave skip.
    pub skip_grace_frames: u32,
    /// Master seed for maps, waves and random targeting.
    pub seed: u64,
    /// Reaction to the base being destroyed.
    pub on_base_destroyed: BaseDestroyedPolicy,
    /// Map requests per tick before giving up until the next tick.
    pub max_map_attempts: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            starting_money: 800,
            base_health: 150,
            snapshot_interval: 5,
            opening_grace_frames: 300,
            inter_wave_grace_frames: 180,
            skip_grace_frames: 60,
            seed: DEFAULT_SEED,
            on_base_destroyed: BaseDestroyedPolicy::Restart,
            max_map_attempts: 8,
        }
    }
}

/// Failure to load an [`EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config at {path}")]
    Read {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The contents were not valid TOML for this schema.
    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),
    /// A field held a value the engine cannot run with.
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

impl EngineConfig {
    /// Parses a configuration, filling omitted fields with defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.snapshot_interval == 0 {
            return Err(ConfigError::Invalid("snapshot_interval must be positive"));
        }
        if self.max_map_attempts == 0 {
            return Err(ConfigError::Invalid("max_map_attempts must be positive"));
        }
        if self.base_health <= 0 {
            return Err(ConfigError::Invalid("base_health must be positive"));
        }
        Ok(())
    }
}
