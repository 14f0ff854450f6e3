//! Scripted player used to exercise a run without a human at the keyboard.

use serde::Deserialize;
use zenith_core::{
    EnemySnapshot, EnemyView, ExitSnapshot, Facing, PlayerInput, PlayerSnapshot, PlayerState,
    RunSnapshot,
};

/// Distances the autopilot fights at.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AutopilotConfig {
    /// Walk toward the nearest enemy until it is this close.
    pub engage_range: f32,
    /// Swing the melee weapon at enemies this close.
    pub melee_range: f32,
    /// Count enemies this close when deciding to throw a grenade.
    pub grenade_range: f32,
    /// Enemies inside the grenade range that justify a throw.
    pub grenade_crowd: usize,
    /// Jump when the target hovers at least this far above the player.
    pub jump_height: f32,
}

impl Default for AutopilotConfig {
    fn default() -> Self {
        Self {
            engage_range: 6.0,
            melee_range: 1.2,
            grenade_range: 4.0,
            grenade_crowd: 3,
            jump_height: 1.5,
        }
    }
}

/// Turns snapshots into one frame of player input.
#[derive(Clone, Copy, Debug)]
pub struct Autopilot {
    config: AutopilotConfig,
}

impl Autopilot {
    /// Creates an autopilot with the provided distances.
    #[must_use]
    pub fn new(config: AutopilotConfig) -> Self {
        Self { config }
    }

    /// Input for the next frame.
    #[must_use]
    pub fn input(
        &self,
        player: Option<&PlayerSnapshot>,
        enemies: &EnemyView,
        exit: &ExitSnapshot,
        run: &RunSnapshot,
    ) -> PlayerInput {
        let Some(player) = player.filter(|player| player.state == PlayerState::Normal) else {
            return PlayerInput::default();
        };

        let x = player.position.x;
        let living: Vec<&EnemySnapshot> =
            enemies.iter().filter(|enemy| !enemy.is_dead()).collect();
        let nearest = living.iter().copied().min_by(|a, b| {
            let a = (a.position.x - x).abs();
            let b = (b.position.x - x).abs();
            a.total_cmp(&b)
        });
        let Some(target) = nearest else {
            if exit.active && !exit.entered {
                return PlayerInput {
                    horizontal: toward(x, exit.position.x, exit.half_width * 0.5),
                    ..PlayerInput::default()
                };
            }
            return PlayerInput::default();
        };

        let facing = Facing::toward(x, target.position.x);
        let distance = (target.position.x - x).abs();
        let mut input = PlayerInput::default();

        if player.facing != facing || distance > self.config.engage_range {
            input.horizontal = facing.sign();
        }
        if player.facing == facing {
            input.fire = true;
            input.melee = distance <= self.config.melee_range;
        }

        let ammo = if run.using_primary {
            run.primary
        } else {
            run.secondary
        };
        if let Some(ammo) = ammo {
            if ammo.current_clip == 0 && !ammo.reloading && !ammo.reserve.is_empty() {
                input.fire = false;
                input.reload = true;
            }
        }

        let crowd = living
            .iter()
            .filter(|enemy| (enemy.position.x - x).abs() <= self.config.grenade_range)
            .count();
        input.throw_grenade = run.grenades > 0 && crowd >= self.config.grenade_crowd;
        input.jump = player.grounded
            && !player.crouching
            && target.position.y - player.position.y >= self.config.jump_height;
        input
    }
}

fn toward(from: f32, to: f32, tolerance: f32) -> f32 {
    if (to - from).abs() <= tolerance {
        0.0
    } else {
        Facing::toward(from, to).sign()
    }
}
