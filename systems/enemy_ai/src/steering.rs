use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use zenith_core::{
    AltitudeProfile, BehaviorProfile, EnemySnapshot, EnemyView, Layer, SeparationProfile,
};

/// Band the distance to the player falls into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Band {
    /// Too far away; close the distance.
    Approach,
    /// Close enough to stop and attack.
    Hold,
    /// Between the two; stand still.
    Idle,
}

impl Band {
    pub(crate) fn classify(distance: f32, behavior: &BehaviorProfile) -> Self {
        if distance > behavior.approach_range {
            Self::Approach
        } else if distance <= behavior.hold_range && distance <= behavior.attack_range {
            Self::Hold
        } else {
            Self::Idle
        }
    }
}

/// Direction of the averaged push away from living allies inside the
/// separation radius, or zero when nobody is close.
pub(crate) fn separation(
    enemy: &EnemySnapshot,
    enemies: &EnemyView,
    profile: &SeparationProfile,
    rng: &mut ChaCha8Rng,
) -> Vec2 {
    if profile.radius <= 0.0 {
        return Vec2::ZERO;
    }

    let mut sum = Vec2::ZERO;
    let mut neighbours = 0_u32;
    for other in enemies.iter() {
        if other.id == enemy.id || other.layer != Layer::Enemy {
            continue;
        }
        let offset = enemy.position - other.position;
        let distance = offset.length();
        if distance >= profile.radius {
            continue;
        }
        let direction = if distance <= f32::EPSILON {
            random_unit(rng)
        } else {
            offset / distance
        };
        sum += direction * (1.0 - distance / profile.radius);
        neighbours += 1;
    }

    if neighbours == 0 {
        return Vec2::ZERO;
    }
    (sum / neighbours as f32).normalize_or_zero()
}

fn random_unit(rng: &mut ChaCha8Rng) -> Vec2 {
    let angle = rng.gen_range(0.0..TAU);
    Vec2::new(angle.cos(), angle.sin())
}

/// Vertical velocity that steers a flyer toward its altitude above the player.
pub(crate) fn altitude_velocity(y: f32, player_y: f32, profile: &AltitudeProfile) -> f32 {
    let error = player_y + profile.desired_altitude - y;
    if error.abs() <= profile.dead_zone {
        return 0.0;
    }
    error.clamp(-1.0, 1.0) * profile.adjust_speed
}
