use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{ActionError, ProjectileSpec};

/// Identifier of a weapon definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeaponId(u32);

impl WeaponId {
    /// Creates a new weapon identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Immutable description of a weapon.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeaponDefinition {
    /// Unique identifier.
    pub id: WeaponId,
    /// Display name.
    pub name: String,
    /// Ranged mode, if the weapon can shoot.
    #[serde(default)]
    pub ranged: Option<RangedStats>,
    /// Melee mode, if the weapon can swing.
    #[serde(default)]
    pub melee: Option<MeleeStats>,
    /// Muzzle flash placement.
    #[serde(default)]
    pub muzzle: MuzzleTuning,
    /// Cosmetic recoil applied when firing.
    #[serde(default)]
    pub recoil: RecoilTuning,
}

/// Ranged mode of a weapon.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangedStats {
    /// Minimum time between two shots.
    #[serde(with = "crate::seconds")]
    pub fire_interval: Duration,
    /// Rounds held by a full clip.
    pub clip_size: u32,
    /// Reloads never draw from a reserve.
    pub infinite_ammo: bool,
    /// Time a reload takes.
    #[serde(with = "crate::seconds")]
    pub reload_time: Duration,
    /// Projectile launched per shot.
    pub projectile: ProjectileSpec,
}

impl Default for RangedStats {
    fn default() -> Self {
        Self {
            fire_interval: Duration::from_millis(200),
            clip_size: 12,
            infinite_ammo: false,
            reload_time: Duration::from_millis(1200),
            projectile: ProjectileSpec::default(),
        }
    }
}

/// Melee mode of a weapon.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeleeStats {
    /// Damage dealt per swing and target.
    pub damage: u32,
    /// Reach of the swing measured from the melee point.
    pub range: f32,
    /// Delay before the swing can hit.
    #[serde(with = "crate::seconds")]
    pub windup: Duration,
    /// Window during which the swing hits.
    #[serde(with = "crate::seconds")]
    pub active: Duration,
    /// Recovery after the active window.
    #[serde(with = "crate::seconds")]
    pub recovery: Duration,
    /// Impulse applied to struck enemies.
    pub knockback: f32,
}

impl Default for MeleeStats {
    fn default() -> Self {
        Self {
            damage: 25,
            range: 1.0,
            windup: Duration::from_millis(150),
            active: Duration::from_millis(200),
            recovery: Duration::from_millis(300),
            knockback: 4.0,
        }
    }
}

impl MeleeStats {
    /// Total time the swing keeps the player busy.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.windup + self.active + self.recovery
    }
}

/// Placement of the muzzle flash effect.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MuzzleTuning {
    /// Offset from the fire point, mirrored by facing.
    pub offset: Vec2,
    /// Uniform scale of the flash.
    pub scale: f32,
    /// Time the flash stays visible.
    #[serde(with = "crate::seconds")]
    pub lifetime: Duration,
}

impl Default for MuzzleTuning {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
            lifetime: Duration::from_millis(50),
        }
    }
}

/// Cosmetic recoil of a weapon.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoilTuning {
    /// Positional offset applied on each shot.
    pub offset: Vec2,
    /// Duration of the kick.
    #[serde(with = "crate::seconds")]
    pub kick: Duration,
    /// Duration of the return to rest.
    #[serde(with = "crate::seconds")]
    pub recover: Duration,
}

impl Default for RecoilTuning {
    fn default() -> Self {
        Self {
            offset: Vec2::new(0.0, 0.05),
            kick: Duration::from_millis(50),
            recover: Duration::from_millis(80),
        }
    }
}

/// Ammunition banked outside the clip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reserve {
    /// Reloads always fill the clip.
    Infinite,
    /// Rounds left to transfer into the clip.
    Finite(u32),
}

impl Reserve {
    /// Reports whether no rounds can be drawn.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Finite(0))
    }

    fn draw(&mut self, wanted: u32) -> u32 {
        match self {
            Self::Infinite => wanted,
            Self::Finite(left) => {
                let taken = wanted.min(*left);
                *left -= taken;
                taken
            }
        }
    }
}

/// Clip and reserve bookkeeping of an equipped ranged weapon.
#[derive(Clone, Debug, PartialEq)]
pub struct AmmoState {
    weapon: WeaponId,
    clip_size: u32,
    current_clip: u32,
    reserve: Reserve,
    reload_time: Duration,
    reload_remaining: Option<Duration>,
}

impl AmmoState {
    /// Creates a full clip for `definition` backed by `reserve`.
    ///
    /// Weapons flagged with infinite ammunition always receive an infinite
    /// reserve. Weapons without a ranged mode yield an empty clip.
    #[must_use]
    pub fn full(definition: &WeaponDefinition, reserve: Reserve) -> Self {
        let (clip_size, reload_time, reserve) = match definition.ranged {
            Some(stats) if stats.infinite_ammo => {
                (stats.clip_size, stats.reload_time, Reserve::Infinite)
            }
            Some(stats) => (stats.clip_size, stats.reload_time, reserve),
            None => (0, Duration::ZERO, Reserve::Finite(0)),
        };
        Self {
            weapon: definition.id,
            clip_size,
            current_clip: clip_size,
            reserve,
            reload_time,
            reload_remaining: None,
        }
    }

    /// Weapon tracked by the state.
    #[must_use]
    pub const fn weapon(&self) -> WeaponId {
        self.weapon
    }

    /// Rounds held by a full clip.
    #[must_use]
    pub const fn clip_size(&self) -> u32 {
        self.clip_size
    }

    /// Rounds currently in the clip.
    #[must_use]
    pub const fn current_clip(&self) -> u32 {
        self.current_clip
    }

    /// Rounds banked outside the clip.
    #[must_use]
    pub const fn reserve(&self) -> Reserve {
        self.reserve
    }

    /// Reports whether a reload is in progress.
    #[must_use]
    pub const fn is_reloading(&self) -> bool {
        self.reload_remaining.is_some()
    }

    /// Reports whether a round can be fired right now.
    #[must_use]
    pub const fn can_fire(&self) -> bool {
        self.current_clip > 0 && !self.is_reloading()
    }

    /// Removes one round from the clip.
    pub fn consume_round(&mut self) -> Result<(), ActionError> {
        if self.is_reloading() {
            return Err(ActionError::Reloading);
        }
        if self.current_clip == 0 {
            return Err(ActionError::ClipEmpty);
        }
        self.current_clip -= 1;
        Ok(())
    }

    /// Starts a reload if one is useful and possible.
    pub fn begin_reload(&mut self) -> Result<(), ActionError> {
        if self.is_reloading() {
            return Err(ActionError::Reloading);
        }
        if self.current_clip >= self.clip_size {
            return Err(ActionError::ClipFull);
        }
        if self.reserve.is_empty() {
            return Err(ActionError::ReserveEmpty);
        }
        self.reload_remaining = Some(self.reload_time);
        Ok(())
    }

    /// Advances an in-progress reload, returning `true` when it completes.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let Some(remaining) = self.reload_remaining else {
            return false;
        };
        if dt < remaining {
            self.reload_remaining = Some(remaining - dt);
            return false;
        }
        let needed = self.clip_size - self.current_clip;
        self.current_clip += self.reserve.draw(needed);
        self.reload_remaining = None;
        true
    }

    /// Adds rounds to a finite reserve. Infinite reserves are unaffected.
    pub fn add_reserve(&mut self, amount: u32) {
        if let Reserve::Finite(left) = &mut self.reserve {
            *left = left.saturating_add(amount);
        }
    }
}
