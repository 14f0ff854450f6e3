//! Difficulty curves indexed by floor (tower) or wave (survival).

use std::time::Duration;

use serde::{Deserialize, Serialize};

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Wave and spawn cadence that tightens geometrically with the index.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pacing {
    /// Pause after a wave on the first index.
    #[serde(with = "zenith_core::seconds")]
    pub base_wave_interval: Duration,
    /// Factor applied to the wave pause per index.
    pub wave_multiplier: f32,
    /// Shortest pause after a wave.
    #[serde(with = "zenith_core::seconds")]
    pub min_wave_interval: Duration,
    /// Delay between two spawns of a wave on the first index.
    #[serde(with = "zenith_core::seconds")]
    pub base_spawn_interval: Duration,
    /// Factor applied to the spawn delay per index.
    pub spawn_multiplier: f32,
    /// Shortest delay between two spawns.
    #[serde(with = "zenith_core::seconds")]
    pub min_spawn_interval: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            base_wave_interval: Duration::from_secs(4),
            wave_multiplier: 0.985,
            min_wave_interval: Duration::from_millis(1500),
            base_spawn_interval: Duration::from_millis(250),
            spawn_multiplier: 0.99,
            min_spawn_interval: Duration::from_millis(80),
        }
    }
}

impl Pacing {
    /// Pause after each wave at `index`.
    #[must_use]
    pub fn wave_interval(&self, index: u32) -> Duration {
        decay(
            self.base_wave_interval,
            self.wave_multiplier,
            self.min_wave_interval,
            index,
        )
    }

    /// Delay between consecutive spawns at `index`.
    #[must_use]
    pub fn spawn_interval(&self, index: u32) -> Duration {
        decay(
            self.base_spawn_interval,
            self.spawn_multiplier,
            self.min_spawn_interval,
            index,
        )
    }
}

/// `max(min, base * multiplier^(index - 1))`, never below one millisecond.
fn decay(base: Duration, multiplier: f32, min: Duration, index: u32) -> Duration {
    let exponent = i32::try_from(index.saturating_sub(1)).unwrap_or(i32::MAX);
    let scaled = base.as_secs_f64() * f64::from(multiplier).powi(exponent);
    let seconds = if scaled.is_finite() {
        scaled.max(min.as_secs_f64())
    } else {
        min.as_secs_f64()
    };
    Duration::try_from_secs_f64(seconds.max(0.0))
        .unwrap_or(Duration::MAX)
        .max(MIN_INTERVAL)
}

/// Probability that a spawn is drawn from the elite tiers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EliteCurve {
    /// Chance at index zero.
    pub base: f32,
    /// Growth per index.
    pub per_index: f32,
    /// Upper limit of the chance.
    pub max: f32,
}

impl Default for EliteCurve {
    fn default() -> Self {
        Self {
            base: 0.2,
            per_index: 0.01,
            max: 0.45,
        }
    }
}

impl EliteCurve {
    /// Elite chance at `index`.
    #[must_use]
    pub fn chance(&self, index: u32) -> f32 {
        (self.base + self.per_index * index as f32).min(self.max)
    }
}

/// Number of enemies a single wave spawns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrowdSize {
    /// Enemies at index zero.
    pub base: u32,
    /// Extra enemies per index.
    pub growth: u32,
    /// Lower limit.
    pub min: u32,
    /// Upper limit.
    pub max: u32,
}

impl Default for CrowdSize {
    fn default() -> Self {
        Self {
            base: 2,
            growth: 1,
            min: 2,
            max: 10,
        }
    }
}

impl CrowdSize {
    /// Enemies per wave at `index`.
    #[must_use]
    pub fn count(&self, index: u32) -> u32 {
        self.base
            .saturating_add(index.saturating_mul(self.growth))
            .max(self.min)
            .min(self.max)
    }
}

/// Scaled parameters of a single floor or wave.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveContext {
    /// Pause after each wave.
    pub wave_interval: Duration,
    /// Delay between consecutive spawns.
    pub spawn_interval: Duration,
    /// Chance of drawing from the elite tiers.
    pub elite_chance: f32,
    /// Enemies per wave.
    pub enemy_count: u32,
}

impl WaveContext {
    /// Context at `index` under the provided curves.
    #[must_use]
    pub fn at(index: u32, pacing: &Pacing, elite: &EliteCurve, crowd: &CrowdSize) -> Self {
        Self {
            wave_interval: pacing.wave_interval(index),
            spawn_interval: pacing.spawn_interval(index),
            elite_chance: elite.chance(index),
            enemy_count: crowd.count(index),
        }
    }
}
