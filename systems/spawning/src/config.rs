use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use zenith_core::{ArchetypeId, RunMode};
use zenith_world::catalog;

use crate::{
    scaling::{CrowdSize, EliteCurve, Pacing, WaveContext},
    tiers::TierTable,
};

/// Reasons a spawning configuration is rejected.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Nothing could spawn on the first floor or wave.
    #[error("{0:?} has no basic tier available at index 1")]
    NoBasicTier(RunMode),
    /// A tier unlocks after it locks.
    #[error("tier {archetype:?} unlocks at {unlock} but locks at {lock}")]
    InvertedTier {
        /// Archetype of the offending tier.
        archetype: ArchetypeId,
        /// Unlock index of the tier.
        unlock: u32,
        /// Lock index of the tier.
        lock: u32,
    },
}

/// Rules shared by the tower and survival directors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Encounter {
    /// Quiet period between the level load and the first wave.
    #[serde(with = "zenith_core::seconds")]
    pub initial_delay: Duration,
    /// Wave and spawn cadence.
    pub pacing: Pacing,
    /// Enemies per wave.
    pub crowd: CrowdSize,
    /// Chance of drawing from the elite tiers.
    pub elite: EliteCurve,
    /// Archetypes drawn for regular spawns.
    pub tiers: TierTable,
    /// Bosses drawn on periodic boss indices.
    pub bosses: Vec<ArchetypeId>,
    /// Boss reserved for the final index.
    pub final_boss: Option<ArchetypeId>,
    /// Period of boss indices; zero disables periodic bosses.
    pub boss_every: u32,
    /// Horizontal distance from the player at which enemies appear.
    pub spawn_distance: f32,
}

impl Default for Encounter {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(2),
            pacing: Pacing::default(),
            crowd: CrowdSize::default(),
            elite: EliteCurve::default(),
            tiers: TierTable::default(),
            bosses: vec![catalog::WARDEN, catalog::GATLING],
            final_boss: Some(catalog::OVERSEER),
            boss_every: 5,
            spawn_distance: 15.0,
        }
    }
}

impl Encounter {
    /// Scaled parameters at `index`.
    #[must_use]
    pub fn wave_context(&self, index: u32) -> WaveContext {
        WaveContext::at(index, &self.pacing, &self.elite, &self.crowd)
    }
}

/// Floor-indexed director used by tower runs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TowerConfig {
    /// Shared encounter rules, indexed by floor.
    pub encounter: Encounter,
    /// Waves on every floor before floor growth.
    pub base_waves: u32,
    /// Floors per extra wave; zero disables growth.
    pub waves_per_floor: u32,
    /// Floor that hosts the final boss.
    pub final_boss_floor: u32,
}

impl Default for TowerConfig {
    fn default() -> Self {
        Self {
            encounter: Encounter::default(),
            base_waves: 3,
            waves_per_floor: 2,
            final_boss_floor: 20,
        }
    }
}

impl TowerConfig {
    /// Waves on `floor` before any boss reduction.
    #[must_use]
    pub fn waves_for(&self, floor: u32) -> u32 {
        let growth = floor.checked_div(self.waves_per_floor).unwrap_or(0);
        self.base_waves.saturating_add(growth)
    }
}

/// Endless wave-indexed director used by survival runs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurvivalConfig {
    /// Shared encounter rules, indexed by wave.
    pub encounter: Encounter,
    /// Wave that brings the final boss; zero disables it.
    pub final_boss_wave: u32,
}

impl Default for SurvivalConfig {
    fn default() -> Self {
        Self {
            encounter: Encounter {
                crowd: CrowdSize {
                    base: 3,
                    growth: 1,
                    min: 3,
                    max: 14,
                },
                elite: EliteCurve {
                    base: 0.15,
                    per_index: 0.005,
                    max: 0.45,
                },
                boss_every: 25,
                ..Encounter::default()
            },
            final_boss_wave: 0,
        }
    }
}

/// Complete configuration of the spawning system.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tower director rules.
    pub tower: TowerConfig,
    /// Survival director rules.
    pub survival: SurvivalConfig,
    /// Seed of the tier, boss and placement rolls.
    pub rng_seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tower: TowerConfig::default(),
            survival: SurvivalConfig::default(),
            rng_seed: 0x0005_9a57_e2d1,
        }
    }
}

impl Config {
    /// Checks that both directors can always spawn something on their first index.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (mode, encounter) in [
            (RunMode::Tower, &self.tower.encounter),
            (RunMode::Survival, &self.survival.encounter),
        ] {
            if let Some(tier) = encounter.tiers.inverted() {
                return Err(ConfigError::InvertedTier {
                    archetype: tier.archetype,
                    unlock: tier.unlock,
                    lock: tier.lock,
                });
            }
            if !encounter.tiers.has_basic_at(1) {
                return Err(ConfigError::NoBasicTier(mode));
            }
        }
        Ok(())
    }

    pub(crate) fn encounter(&self, mode: RunMode) -> &Encounter {
        match mode {
            RunMode::Tower => &self.tower.encounter,
            RunMode::Survival => &self.survival.encounter,
        }
    }
}
