use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use zenith_core::LevelLayout;
use zenith_system_spawning::{ArenaPools, Config as SpawningConfig};
use zenith_world::WorldConfig;

use crate::autopilot::AutopilotConfig;

/// Arena pools and the geometry every arena is loaded with.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ArenaSettings {
    /// Arena pools per floor bracket.
    pub pools: ArenaPools,
    /// Geometry handed to the world on every level load.
    pub layout: LevelLayout,
}

/// Every tunable of a headless session.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// World rules and catalogues.
    pub world: WorldConfig,
    /// Encounter directors.
    pub spawning: SpawningConfig,
    /// Arena selection.
    pub arenas: ArenaSettings,
    /// Scripted player.
    pub autopilot: AutopilotConfig,
    /// Half of the visible width used when hiding spawns off screen.
    pub camera_half_width: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            spawning: SpawningConfig::default(),
            arenas: ArenaSettings::default(),
            autopilot: AutopilotConfig::default(),
            camera_half_width: 10.0,
        }
    }
}

impl GameConfig {
    /// Parses a TOML document; missing keys keep their defaults.
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse game configuration")
    }

    /// Loads the configuration at `path`, or the defaults without one.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration at {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("invalid configuration in {}", path.display()))
    }

    /// Reseeds every random stream from a single seed.
    pub fn reseed(&mut self, seed: u64) {
        self.world.rng_seed = seed;
        self.spawning.rng_seed = seed.rotate_left(21) ^ 0x5a5a_5a5a;
    }
}
