use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::EnemyId;

/// Category of damage carried by a projectile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    /// Direct-hit bullet that may pierce.
    #[default]
    Bullet,
    /// Explodes on first contact and damages everything in a radius.
    Explosive,
}

/// Collision layer a body currently occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    /// Living player outside of a dodge.
    Player,
    /// Living enemy.
    Enemy,
    /// Enemy that died and awaits removal.
    DeadEnemy,
    /// Player while dodging.
    Dodge,
    /// Static level geometry.
    Ground,
}

impl Layer {
    const ALL: [Layer; 5] = [
        Layer::Player,
        Layer::Enemy,
        Layer::DeadEnemy,
        Layer::Dodge,
        Layer::Ground,
    ];

    const fn bit(self) -> u32 {
        1 << self as u32
    }
}

/// Set of collision layers.
///
/// An empty mask on a projectile means "no layer filtering".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Layer>", into = "Vec<Layer>")]
pub struct LayerMask(u32);

impl LayerMask {
    /// Mask that contains no layers.
    pub const EMPTY: Self = Self(0);

    /// Returns a copy of the mask that also contains `layer`.
    #[must_use]
    pub const fn with(self, layer: Layer) -> Self {
        Self(self.0 | layer.bit())
    }

    /// Reports whether the mask contains `layer`.
    #[must_use]
    pub const fn contains(self, layer: Layer) -> bool {
        self.0 & layer.bit() != 0
    }

    /// Reports whether the mask contains no layers.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Reports whether a body on `layer` passes the filter.
    ///
    /// Empty masks accept every layer.
    #[must_use]
    pub const fn admits(self, layer: Layer) -> bool {
        self.is_empty() || self.contains(layer)
    }

    /// Layers contained in the mask in declaration order.
    #[must_use]
    pub fn layers(self) -> Vec<Layer> {
        Layer::ALL
            .into_iter()
            .filter(|layer| self.contains(*layer))
            .collect()
    }
}

impl From<Vec<Layer>> for LayerMask {
    fn from(layers: Vec<Layer>) -> Self {
        layers
            .into_iter()
            .fold(Self::EMPTY, |mask, layer| mask.with(layer))
    }
}

impl From<LayerMask> for Vec<Layer> {
    fn from(mask: LayerMask) -> Self {
        mask.layers()
    }
}

/// Friendly-fire switches of a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetFilter {
    /// Projectile may damage the player.
    pub player: bool,
    /// Projectile may damage enemies.
    pub enemies: bool,
}

impl TargetFilter {
    /// Filter used by projectiles fired by the player.
    pub const HOSTILE_TO_ENEMIES: Self = Self {
        player: false,
        enemies: true,
    };

    /// Filter used by projectiles fired by enemies.
    pub const HOSTILE_TO_PLAYER: Self = Self {
        player: true,
        enemies: false,
    };

    /// Reports whether the filter allows damaging `target`.
    #[must_use]
    pub const fn allows(self, target: HitTarget) -> bool {
        match target {
            HitTarget::Player => self.player,
            HitTarget::Enemy(_) => self.enemies,
        }
    }
}

/// Immutable description of a projectile fired by a weapon or an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileSpec {
    /// Damage dealt per hit.
    pub damage: u32,
    /// Whether the projectile pierces or explodes.
    pub damage_type: DamageType,
    /// Travel speed in units per second.
    pub speed: f32,
    /// Time the projectile remains in flight.
    #[serde(with = "crate::seconds")]
    pub lifetime: Duration,
    /// Additional targets a bullet may pass through.
    pub pierce: u32,
    /// Radius of the explosion overlap query.
    pub explosion_radius: f32,
    /// Impulse applied to damaged targets.
    pub knockback: f32,
    /// Collider radius used for contact tests.
    pub radius: f32,
    /// Layers the projectile can touch; empty touches everything.
    pub hit_layers: LayerMask,
    /// Layers damaged by the explosion.
    pub explosion_layers: LayerMask,
}

impl Default for ProjectileSpec {
    fn default() -> Self {
        Self {
            damage: 10,
            damage_type: DamageType::Bullet,
            speed: 15.0,
            lifetime: Duration::from_secs(3),
            pierce: 0,
            explosion_radius: 2.0,
            knockback: 5.0,
            radius: 0.1,
            hit_layers: LayerMask::EMPTY,
            explosion_layers: LayerMask::EMPTY
                .with(Layer::Player)
                .with(Layer::Enemy),
        }
    }
}

impl ProjectileSpec {
    /// Reports whether the projectile explodes on contact.
    #[must_use]
    pub fn is_explosive(&self) -> bool {
        self.damage_type == DamageType::Explosive
    }
}

/// Tuning of the hand grenade thrown by the player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrenadeSpec {
    /// Display name of the grenade type.
    pub name: String,
    /// Delay between the throw and the explosion.
    #[serde(with = "crate::seconds")]
    pub fuse: Duration,
    /// Radius of the explosion.
    pub radius: f32,
    /// Damage dealt to each enemy in the radius.
    pub damage: u32,
    /// Impulse applied to each damaged enemy.
    pub force: f32,
    /// Horizontal speed of the throw.
    pub throw_force: f32,
    /// Upward speed added to a standing throw.
    pub standing_lift: f32,
    /// Upward speed added to a crouching throw.
    pub crouching_lift: f32,
}

impl Default for GrenadeSpec {
    fn default() -> Self {
        Self {
            name: String::from("Frag"),
            fuse: Duration::from_millis(1500),
            radius: 2.5,
            damage: 50,
            force: 8.0,
            throw_force: 8.0,
            standing_lift: 3.0,
            crouching_lift: 1.5,
        }
    }
}

/// Damageable entity touched by a projectile or explosion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HitTarget {
    /// The player.
    Player,
    /// An enemy instance.
    Enemy(EnemyId),
}

/// Origin of a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Source {
    /// Fired by the player.
    Player,
    /// Fired by the identified enemy.
    Enemy(EnemyId),
}

/// Reasons a projectile leaves the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RetireReason {
    /// Lifetime ran out.
    Expired,
    /// Pierce budget was exhausted by a hit.
    PierceExhausted,
    /// Explosive projectile detonated.
    Exploded,
}
