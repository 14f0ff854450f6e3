#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic encounter director that spawns enemy waves.
//!
//! Tower runs play a fixed number of waves per floor and open the exit once
//! the floor is clear. Survival runs loop waves forever. Both share the same
//! timing model: a warmup after the level loads, one spawn per spawn interval,
//! and a pause after every wave.

mod arena;
mod config;
mod placement;
mod scaling;
mod tiers;

use std::time::Duration;

use glam::Vec2;
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use zenith_core::{ArchetypeId, CameraView, Command, Event, LevelLayout, RunMode};

pub use arena::{ArenaPools, ArenaSelector};
pub use config::{Config, ConfigError, Encounter, SurvivalConfig, TowerConfig};
pub use scaling::{CrowdSize, EliteCurve, Pacing, WaveContext};
pub use tiers::{EnemyTier, TierTable};

/// World facts the director needs for a single update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnContext {
    /// Horizontal player position, if a player exists.
    pub player_x: Option<f32>,
    /// Window currently shown to the player.
    pub camera: CameraView,
    /// Geometry of the loaded arena.
    pub layout: LevelLayout,
    /// Enemies still present, dying ones included.
    pub enemy_population: usize,
}

/// Stage of the encounter on the current level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No level is loaded.
    Idle,
    /// Waiting for the first wave.
    Warmup {
        /// Time left before the first wave.
        remaining: Duration,
    },
    /// A wave is spawning.
    Spawning {
        /// Enemies of the wave still to spawn.
        pending: u32,
        /// Time until the next spawn.
        next_in: Duration,
    },
    /// Pausing after a wave.
    Resting {
        /// Time left before the next wave.
        remaining: Duration,
    },
    /// Every tower wave spawned; waiting for the floor to empty.
    AwaitingClear,
    /// The exit was activated.
    Cleared,
}

/// Encounter director reacting to level loads and clock ticks.
#[derive(Debug)]
pub struct Spawning {
    config: Config,
    rng: ChaCha8Rng,
    mode: RunMode,
    index: u32,
    wave: u32,
    waves_left: u32,
    scale: WaveContext,
    phase: Phase,
}

impl Spawning {
    /// Creates an idle director after validating the configuration.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let scale = config.tower.encounter.wave_context(1);
        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            config,
            mode: RunMode::Tower,
            index: 0,
            wave: 0,
            waves_left: 0,
            scale,
            phase: Phase::Idle,
        })
    }

    /// Current stage of the encounter.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Waves announced on the current level.
    #[must_use]
    pub fn wave(&self) -> u32 {
        self.wave
    }

    /// Consumes world events and emits the spawns that became due.
    pub fn handle(&mut self, events: &[Event], context: &SpawnContext, out: &mut Vec<Command>) {
        let mut elapsed = Duration::ZERO;
        for event in events {
            match event {
                Event::TimeAdvanced { dt } => elapsed = elapsed.saturating_add(*dt),
                Event::RunStarted { .. } => self.phase = Phase::Idle,
                Event::LevelLoaded { mode, floor, .. } => self.start_level(*mode, *floor),
                _ => {}
            }
        }

        if elapsed.is_zero() {
            return;
        }
        self.advance(elapsed, context, out);
    }

    fn start_level(&mut self, mode: RunMode, floor: u32) {
        self.mode = mode;
        self.index = match mode {
            RunMode::Tower => floor,
            RunMode::Survival => 0,
        };
        self.wave = 0;
        self.waves_left = 0;
        self.phase = Phase::Warmup {
            remaining: self.config.encounter(mode).initial_delay,
        };
        log::debug!("{mode:?} director armed for floor {floor}");
    }

    fn advance(&mut self, mut budget: Duration, context: &SpawnContext, out: &mut Vec<Command>) {
        loop {
            match self.phase {
                Phase::Idle | Phase::Cleared => return,
                Phase::AwaitingClear => {
                    if context.enemy_population == 0 {
                        log::debug!("floor {} cleared", self.index);
                        out.push(Command::ActivateExit);
                        self.phase = Phase::Cleared;
                    }
                    return;
                }
                Phase::Warmup { remaining } => {
                    if budget < remaining {
                        self.phase = Phase::Warmup {
                            remaining: remaining - budget,
                        };
                        return;
                    }
                    budget -= remaining;
                    self.begin(context, out);
                }
                Phase::Spawning { pending, next_in } => {
                    if budget < next_in {
                        self.phase = Phase::Spawning {
                            pending,
                            next_in: next_in - budget,
                        };
                        return;
                    }
                    budget -= next_in;
                    self.spawn_regular(context, out);
                    let pending = pending.saturating_sub(1);
                    self.phase = if pending > 0 {
                        Phase::Spawning {
                            pending,
                            next_in: self.scale.spawn_interval,
                        }
                    } else {
                        Phase::Resting {
                            remaining: self
                                .scale
                                .spawn_interval
                                .saturating_add(self.scale.wave_interval),
                        }
                    };
                }
                Phase::Resting { remaining } => {
                    if budget < remaining {
                        self.phase = Phase::Resting {
                            remaining: remaining - budget,
                        };
                        return;
                    }
                    budget -= remaining;
                    self.next_wave(context, out);
                }
            }
        }
    }

    /// Runs once the warmup ends: schedules the level and opens the first wave.
    fn begin(&mut self, context: &SpawnContext, out: &mut Vec<Command>) {
        match self.mode {
            RunMode::Tower => {
                let floor = self.index;
                self.rescale();
                let tower = &self.config.tower;
                let mut waves = tower.waves_for(floor);
                let boss = if floor == tower.final_boss_floor
                    && tower.encounter.final_boss.is_some()
                {
                    tower.encounter.final_boss
                } else if is_boss_index(tower.encounter.boss_every, floor) {
                    let boss = tower.encounter.bosses.choose(&mut self.rng).copied();
                    if boss.is_some() {
                        waves = waves.saturating_sub(2).max(1);
                    }
                    boss
                } else {
                    None
                };
                if let Some(boss) = boss {
                    log::debug!("boss {} guards floor {floor}", boss.get());
                    self.spawn(boss, context, out);
                }
                self.waves_left = waves;
                log::debug!("floor {floor} holds {waves} waves");
            }
            RunMode::Survival => {}
        }
        self.next_wave(context, out);
    }

    fn next_wave(&mut self, context: &SpawnContext, out: &mut Vec<Command>) {
        match self.mode {
            RunMode::Tower => {
                if self.waves_left == 0 {
                    self.phase = Phase::AwaitingClear;
                    return;
                }
                self.waves_left -= 1;
            }
            RunMode::Survival => {
                self.index = self.index.saturating_add(1);
                self.rescale();
                let wave = self.index;
                let survival = &self.config.survival;
                let boss = if survival.final_boss_wave != 0 && wave == survival.final_boss_wave {
                    survival.encounter.final_boss
                } else if is_boss_index(survival.encounter.boss_every, wave) {
                    survival.encounter.bosses.choose(&mut self.rng).copied()
                } else {
                    None
                };
                if let Some(boss) = boss {
                    log::debug!("boss {} joins wave {wave}", boss.get());
                    self.spawn(boss, context, out);
                }
            }
        }

        self.wave = self.wave.saturating_add(1);
        out.push(Command::AnnounceWave { wave: self.wave });

        let pending = self.scale.enemy_count;
        log::debug!("wave {} brings {pending} enemies", self.wave);
        self.phase = if pending > 0 {
            Phase::Spawning {
                pending,
                next_in: Duration::ZERO,
            }
        } else {
            Phase::Resting {
                remaining: self.scale.wave_interval,
            }
        };
    }

    fn rescale(&mut self) {
        self.scale = self.config.encounter(self.mode).wave_context(self.index);
    }

    fn spawn_regular(&mut self, context: &SpawnContext, out: &mut Vec<Command>) {
        let tiers = &self.config.encounter(self.mode).tiers;
        match tiers.pick(self.index, self.scale.elite_chance, &mut self.rng) {
            Some(archetype) => self.spawn(archetype, context, out),
            None => log::warn!("no tier available at index {}", self.index),
        }
    }

    fn spawn(&mut self, archetype: ArchetypeId, context: &SpawnContext, out: &mut Vec<Command>) {
        let Some(player_x) = context.player_x else {
            log::debug!("no player; spawn of {} skipped", archetype.get());
            return;
        };
        let distance = self.config.encounter(self.mode).spawn_distance;
        let x = placement::spawn_x(
            player_x,
            distance,
            &context.layout,
            &context.camera,
            &mut self.rng,
        );
        log::trace!("spawning {} at x = {x}", archetype.get());
        out.push(Command::SpawnEnemy {
            archetype,
            position: Vec2::new(x, context.layout.spawn_y),
        });
    }
}

fn is_boss_index(every: u32, index: u32) -> bool {
    every != 0 && index % every == 0
}
