#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that steers enemies toward the player and drives their attacks.
//!
//! Every archetype runs the same controller parameterised by its
//! [`BehaviorProfile`](zenith_core::BehaviorProfile): approach when far, hold
//! and attack when close, idle in between. The system only reads snapshots
//! and answers with `SteerEnemy`, `FireEnemyProjectile` and `StrikePlayer`
//! commands.

mod brain;
mod steering;

use std::{collections::BTreeMap, time::Duration};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use zenith_core::{
    Bestiary, Command, EnemyId, EnemyPosture, EnemyView, Event, Facing, Locomotion,
    PlayerSnapshot, PlayerState,
};

use brain::{Brain, Engagement};
use steering::{altitude_velocity, separation, Band};

/// Configuration of the enemy AI system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a configuration seeding crouch rolls and separation jitter.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }

    /// Seed of the random stream.
    #[must_use]
    pub const fn rng_seed(&self) -> u64 {
        self.rng_seed
    }
}

/// Enemy controller that turns world snapshots into steering and attack commands.
#[derive(Debug)]
pub struct EnemyAi {
    brains: BTreeMap<EnemyId, Brain>,
    rng: ChaCha8Rng,
    scratch: Vec<Command>,
}

impl EnemyAi {
    /// Creates a controller with no remembered attack state.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            brains: BTreeMap::new(),
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            scratch: Vec::new(),
        }
    }

    /// Consumes world events and snapshots, emitting one steer per living enemy
    /// on every tick plus any attacks that became due.
    pub fn handle(
        &mut self,
        events: &[Event],
        bestiary: &Bestiary,
        enemies: &EnemyView,
        player: Option<&PlayerSnapshot>,
        out: &mut Vec<Command>,
    ) {
        let mut elapsed = Duration::ZERO;
        for event in events {
            match event {
                Event::TimeAdvanced { dt } => elapsed = elapsed.saturating_add(*dt),
                Event::RunStarted { .. } | Event::LevelLoaded { .. } => self.brains.clear(),
                _ => {}
            }
        }

        self.brains.retain(|id, _| {
            enemies
                .get(*id)
                .is_some_and(|enemy| !enemy.is_dead())
        });

        if elapsed.is_zero() {
            return;
        }

        let target = player.filter(|player| player.state != PlayerState::Dead);
        let seconds = elapsed.as_secs_f32();

        for enemy in enemies.iter().filter(|enemy| !enemy.is_dead()) {
            let Some(archetype) = bestiary.get(enemy.archetype) else {
                log::warn!(
                    "enemy {} uses unknown archetype {}",
                    enemy.id.get(),
                    enemy.archetype.get()
                );
                continue;
            };
            let behavior = &archetype.behavior;
            let brain = self
                .brains
                .entry(enemy.id)
                .or_insert_with(|| Brain::new(&behavior.attack));

            let push = separation(enemy, enemies, &behavior.separation, &mut self.rng);
            let drift = push.x * behavior.separation.strength * seconds;

            let Some(player) = target else {
                brain.stand_down(elapsed);
                let velocity_y = match behavior.locomotion {
                    Locomotion::Flying(_) => Some(0.0),
                    Locomotion::Grounded => None,
                };
                out.push(Command::SteerEnemy {
                    enemy: enemy.id,
                    velocity_x: drift,
                    velocity_y,
                    facing: enemy.facing,
                    posture: EnemyPosture::Idle,
                });
                continue;
            };

            let facing = Facing::toward(enemy.position.x, player.position.x);
            let distance = enemy.position.distance(player.position);
            let band = Band::classify(distance, behavior);
            let engagement = Engagement {
                enemy,
                archetype,
                player,
                facing,
                distance,
            };

            self.scratch.clear();
            let posture = brain.update(
                elapsed,
                band,
                &engagement,
                &mut self.rng,
                &mut self.scratch,
            );

            let stride = match band {
                Band::Approach => facing.sign() * behavior.move_speed,
                Band::Hold | Band::Idle => 0.0,
            };
            let velocity_y = match behavior.locomotion {
                Locomotion::Flying(altitude) => Some(altitude_velocity(
                    enemy.position.y,
                    player.position.y,
                    &altitude,
                )),
                Locomotion::Grounded => None,
            };
            if enemy.posture != posture {
                log::trace!("enemy {} {:?} -> {posture:?}", enemy.id.get(), enemy.posture);
            }

            out.push(Command::SteerEnemy {
                enemy: enemy.id,
                velocity_x: stride + drift,
                velocity_y,
                facing,
                posture,
            });
            out.append(&mut self.scratch);
        }
    }
}
