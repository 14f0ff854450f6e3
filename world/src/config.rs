//! Tunables of the authoritative world.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use zenith_core::{Bestiary, GrenadeSpec, MeleeStats, WeaponDefinition, WeaponId};

use crate::catalog;

/// Errors reported when a world configuration is inconsistent.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The loadout names a weapon the armory does not define.
    #[error("loadout references unknown weapon {0:?}")]
    UnknownWeapon(WeaponId),
    /// A ranged slot names a weapon without a ranged mode.
    #[error("weapon {0:?} cannot be equipped in a ranged slot")]
    NotRanged(WeaponId),
    /// The melee slot names a weapon without a melee mode.
    #[error("weapon {0:?} cannot be equipped in the melee slot")]
    NotMelee(WeaponId),
    /// The player would start the run dead.
    #[error("maximum health must be positive")]
    NoHealth,
}

/// Complete configuration of the world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Player movement and combat tuning.
    pub player: PlayerTuning,
    /// Run-level limits and starting values.
    pub run: RunTuning,
    /// Hand grenade carried at the start of a run.
    pub grenade: GrenadeSpec,
    /// Downward acceleration applied to grounded bodies.
    pub gravity: f32,
    /// Every weapon that may be equipped.
    pub armory: Vec<WeaponDefinition>,
    /// Weapons equipped when a run starts.
    pub loadout: Loadout,
    /// Every enemy kind that may be spawned.
    pub bestiary: Bestiary,
    /// Seed of the loot and cosmetic random stream.
    pub rng_seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            player: PlayerTuning::default(),
            run: RunTuning::default(),
            grenade: GrenadeSpec::default(),
            gravity: 30.0,
            armory: catalog::armory(),
            loadout: Loadout::default(),
            bestiary: catalog::bestiary(),
            rng_seed: 0x5eed_2e17_a0f1_c3b9,
        }
    }
}

impl WorldConfig {
    pub(crate) fn weapon(&self, id: WeaponId) -> Option<&WeaponDefinition> {
        self.armory.iter().find(|definition| definition.id == id)
    }

    /// Checks that the loadout only references suitable armory entries.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.run.max_health <= 0.0 {
            return Err(ConfigError::NoHealth);
        }

        let ranged = |id: WeaponId| -> Result<(), ConfigError> {
            let definition = self.weapon(id).ok_or(ConfigError::UnknownWeapon(id))?;
            if definition.ranged.is_none() {
                return Err(ConfigError::NotRanged(id));
            }
            Ok(())
        };
        ranged(self.loadout.primary)?;
        if let Some(secondary) = self.loadout.secondary {
            ranged(secondary)?;
        }
        if let Some(melee) = self.loadout.melee {
            let definition = self
                .weapon(melee)
                .ok_or(ConfigError::UnknownWeapon(melee))?;
            if definition.melee.is_none() {
                return Err(ConfigError::NotMelee(melee));
            }
        }
        Ok(())
    }
}

/// Weapons equipped at the start of a run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Loadout {
    /// Primary weapon; always fed by an infinite reserve.
    pub primary: WeaponId,
    /// Optional secondary weapon.
    pub secondary: Option<WeaponId>,
    /// Reserve of the secondary weapon.
    pub secondary_reserve: u32,
    /// Optional melee weapon; the unarmed strike is used without one.
    pub melee: Option<WeaponId>,
    /// Disables swapping between the ranged slots.
    pub selection_locked: bool,
}

impl Default for Loadout {
    fn default() -> Self {
        Self {
            primary: catalog::PISTOL,
            secondary: Some(catalog::RIFLE),
            secondary_reserve: 120,
            melee: None,
            selection_locked: false,
        }
    }
}

/// Player movement and combat tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Collider radius; grounded bodies rest one radius above the ground.
    pub radius: f32,
    /// Walking speed.
    pub move_speed: f32,
    /// Walking speed while crouching.
    pub crouch_speed: f32,
    /// Vertical speed of a jump.
    pub jump_speed: f32,
    /// Horizontal speed of a dodge.
    pub dodge_speed: f32,
    /// Length of a dodge.
    #[serde(with = "zenith_core::seconds")]
    pub dodge_duration: Duration,
    /// Recharge after a dodge ends.
    #[serde(with = "zenith_core::seconds")]
    pub dodge_cooldown: Duration,
    /// Invincibility after an accepted hit.
    #[serde(with = "zenith_core::seconds")]
    pub hit_invincibility: Duration,
    /// Input lock while the level intro plays.
    #[serde(with = "zenith_core::seconds")]
    pub intro_lock: Duration,
    /// Busy time after throwing a grenade.
    #[serde(with = "zenith_core::seconds")]
    pub grenade_throw_lock: Duration,
    /// Fire point relative to the body while standing, mirrored by facing.
    pub fire_offset: Vec2,
    /// Fire point relative to the body while crouching, mirrored by facing.
    pub crouch_fire_offset: Vec2,
    /// Distance of the melee point in front of the body.
    pub melee_offset: f32,
    /// Strike used when no melee weapon is equipped.
    pub unarmed: MeleeStats,
    /// Distance at which pickups are collected.
    pub pickup_radius: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            radius: 0.5,
            move_speed: 6.0,
            crouch_speed: 3.0,
            jump_speed: 12.0,
            dodge_speed: 12.0,
            dodge_duration: Duration::from_millis(250),
            dodge_cooldown: Duration::from_millis(500),
            hit_invincibility: Duration::from_millis(500),
            intro_lock: Duration::from_secs(1),
            grenade_throw_lock: Duration::from_millis(400),
            fire_offset: Vec2::new(0.6, 0.1),
            crouch_fire_offset: Vec2::new(0.6, -0.2),
            melee_offset: 0.6,
            unarmed: MeleeStats::default(),
            pickup_radius: 0.8,
        }
    }
}

/// Run-level limits and starting values.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunTuning {
    /// Maximum health.
    pub max_health: f32,
    /// Maximum armour.
    pub max_armour: f32,
    /// Armour at the start of a run.
    pub starting_armour: f32,
    /// Grenade capacity.
    pub max_grenades: u32,
    /// Grenades at the start of a run.
    pub starting_grenades: u32,
    /// Floor whose exit ends a tower run with victory.
    pub final_floor: u32,
}

impl Default for RunTuning {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            max_armour: 50.0,
            starting_armour: 0.0,
            max_grenades: 5,
            starting_grenades: 3,
            final_floor: zenith_core::FINAL_FLOOR,
        }
    }
}
