use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{PickupKind, ProjectileSpec};

/// Identifier of an enemy archetype.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArchetypeId(u32);

impl ArchetypeId {
    /// Creates a new archetype identifier with the provided numeric value.
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

/// Kill-counter category of an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyRank {
    /// Regular enemy.
    Basic,
    /// Tougher variant drawn with the elite chance.
    Elite,
    /// Periodic boss.
    Boss,
    /// Boss of the final floor.
    FinalBoss,
}

/// Loot rolled once when an enemy dies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropTable {
    /// Probability in `[0, 1]` that anything drops.
    pub chance: f32,
    /// Candidates picked uniformly when the roll succeeds.
    pub pickups: Vec<PickupKind>,
}

impl Default for DropTable {
    fn default() -> Self {
        Self {
            chance: 0.25,
            pickups: Vec::new(),
        }
    }
}

/// Steering away from nearby allies.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeparationProfile {
    /// Neighbours closer than this push the enemy away.
    pub radius: f32,
    /// Gain applied to the averaged push.
    pub strength: f32,
}

impl Default for SeparationProfile {
    fn default() -> Self {
        Self {
            radius: 0.6,
            strength: 1.5,
        }
    }
}

/// Hover controller of flying enemies.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AltitudeProfile {
    /// Height above the player to hold.
    pub desired_altitude: f32,
    /// Vertical speed used to correct the altitude.
    pub adjust_speed: f32,
    /// Altitude error tolerated without correction.
    pub dead_zone: f32,
}

impl Default for AltitudeProfile {
    fn default() -> Self {
        Self {
            desired_altitude: 3.0,
            adjust_speed: 2.5,
            dead_zone: 0.1,
        }
    }
}

/// How an enemy moves through the arena.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Locomotion {
    /// Walks on the ground under gravity.
    #[default]
    Grounded,
    /// Hovers without gravity at an altitude relative to the player.
    Flying(AltitudeProfile),
}

/// Close-range strike with a windup.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeleeAttack {
    /// Damage dealt by a connecting strike.
    pub damage: u32,
    /// Delay between arming the strike and the hit check.
    #[serde(with = "crate::seconds")]
    pub windup: Duration,
    /// Time the strike stays out after the hit check.
    #[serde(with = "crate::seconds")]
    pub active: Duration,
    /// Minimum time between two strikes.
    #[serde(with = "crate::seconds")]
    pub cooldown: Duration,
    /// Impulse applied to the player on a hit.
    pub knockback: f32,
}

impl Default for MeleeAttack {
    fn default() -> Self {
        Self {
            damage: 10,
            windup: Duration::from_millis(200),
            active: Duration::from_millis(100),
            cooldown: Duration::from_millis(1200),
            knockback: 3.0,
        }
    }
}

/// Where a ranged enemy points its shots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AimMode {
    /// Straight along the facing.
    #[default]
    Horizontal,
    /// Directly at the player.
    AtPlayer,
}

/// Clip-fed ranged attack.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangedAttack {
    /// Projectile launched per shot.
    pub projectile: ProjectileSpec,
    /// Shots per clip.
    pub clip_size: u32,
    /// Minimum time between two shots.
    #[serde(with = "crate::seconds")]
    pub fire_interval: Duration,
    /// Time a reload takes.
    #[serde(with = "crate::seconds")]
    pub reload_time: Duration,
    /// Delay between entering the attack state and the first shot.
    #[serde(with = "crate::seconds")]
    pub first_shot_delay: Duration,
    /// Probability of crouching when the attack state is entered.
    pub crouch_chance: f32,
    /// Aiming rule.
    pub aim: AimMode,
}

impl Default for RangedAttack {
    fn default() -> Self {
        Self {
            projectile: ProjectileSpec::default(),
            clip_size: 6,
            fire_interval: Duration::from_millis(400),
            reload_time: Duration::from_millis(1600),
            first_shot_delay: Duration::from_millis(500),
            crouch_chance: 0.5,
            aim: AimMode::Horizontal,
        }
    }
}

/// Attack an enemy performs while holding range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AttackProfile {
    /// Close-range strike.
    Melee(MeleeAttack),
    /// Clip-fed projectile attack.
    Ranged(RangedAttack),
}

impl Default for AttackProfile {
    fn default() -> Self {
        Self::Melee(MeleeAttack::default())
    }
}

/// Parameters of the shared enemy controller.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorProfile {
    /// Horizontal speed while approaching.
    pub move_speed: f32,
    /// Distance beyond which the enemy approaches.
    pub approach_range: f32,
    /// Distance within which the enemy stops to attack.
    pub hold_range: f32,
    /// Distance within which the attack may be used.
    pub attack_range: f32,
    /// Movement model.
    pub locomotion: Locomotion,
    /// Attack used while holding.
    pub attack: AttackProfile,
    /// Steering away from allies.
    pub separation: SeparationProfile,
}

impl Default for BehaviorProfile {
    fn default() -> Self {
        Self {
            move_speed: 2.5,
            approach_range: 1.4,
            hold_range: 1.0,
            attack_range: 0.9,
            locomotion: Locomotion::Grounded,
            attack: AttackProfile::default(),
            separation: SeparationProfile::default(),
        }
    }
}

/// Immutable description of an enemy kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyArchetype {
    /// Unique identifier.
    pub id: ArchetypeId,
    /// Display name.
    pub name: String,
    /// Kill-counter category.
    pub rank: EnemyRank,
    /// Health on spawn.
    pub max_health: u32,
    /// Collider radius of the body.
    #[serde(default = "default_body_radius")]
    pub body_radius: f32,
    /// Muzzle position relative to the body, mirrored by facing.
    #[serde(default)]
    pub muzzle_offset: Vec2,
    /// Controller parameters.
    #[serde(default)]
    pub behavior: BehaviorProfile,
    /// Loot rolled on death.
    #[serde(default)]
    pub drops: DropTable,
    /// Delay between death and removal.
    #[serde(with = "crate::seconds", default = "default_destroy_delay")]
    pub destroy_delay: Duration,
    /// Probability of a hurt sound on a non-lethal hit.
    #[serde(default = "default_hurt_sound_chance")]
    pub hurt_sound_chance: f32,
}

fn default_body_radius() -> f32 {
    0.4
}

fn default_destroy_delay() -> Duration {
    Duration::from_secs(2)
}

fn default_hurt_sound_chance() -> f32 {
    0.5
}

/// Catalogue of enemy archetypes keyed by identifier.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<EnemyArchetype>", into = "Vec<EnemyArchetype>")]
pub struct Bestiary {
    archetypes: Vec<EnemyArchetype>,
}

impl Bestiary {
    /// Builds a bestiary ordered by identifier. Later duplicates are dropped.
    #[must_use]
    pub fn new(mut archetypes: Vec<EnemyArchetype>) -> Self {
        archetypes.sort_by_key(|archetype| archetype.id);
        archetypes.dedup_by_key(|archetype| archetype.id);
        Self { archetypes }
    }

    /// Looks up an archetype.
    #[must_use]
    pub fn get(&self, id: ArchetypeId) -> Option<&EnemyArchetype> {
        self.archetypes
            .binary_search_by_key(&id, |archetype| archetype.id)
            .ok()
            .and_then(|index| self.archetypes.get(index))
    }

    /// Iterator over the archetypes in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemyArchetype> {
        self.archetypes.iter()
    }

    /// Number of archetypes in the catalogue.
    #[must_use]
    pub fn len(&self) -> usize {
        self.archetypes.len()
    }

    /// Reports whether the catalogue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }
}

impl From<Vec<EnemyArchetype>> for Bestiary {
    fn from(archetypes: Vec<EnemyArchetype>) -> Self {
        Self::new(archetypes)
    }
}

impl From<Bestiary> for Vec<EnemyArchetype> {
    fn from(bestiary: Bestiary) -> Self {
        bestiary.archetypes
    }
}

#[cfg(test)]
mod tests {
    use super::{ArchetypeId, AttackProfile, Bestiary, EnemyRank, Locomotion};

    #[derive(serde::Deserialize)]
    struct Pack {
        bestiary: Bestiary,
    }

    #[test]
    fn reads_archetypes_with_defaults() {
        let pack: Pack = toml::from_str(
            r#"
            [[bestiary]]
            id = 7
            name = "Drone"
            rank = "basic"
            max_health = 30

            [bestiary.behavior]
            approach_range = 7.0
            hold_range = 6.0
            attack_range = 6.5

            [bestiary.behavior.locomotion]
            type = "flying"
            desired_altitude = 2.5

            [bestiary.behavior.attack]
            type = "ranged"
            aim = "at_player"

            [[bestiary]]
            id = 2
            name = "Grunt"
            rank = "basic"
            max_health = 50
            "#,
        )
        .expect("valid toml");

        let ids: Vec<u32> = pack.bestiary.iter().map(|a| a.id.get()).collect();
        assert_eq!(ids, vec![2, 7]);

        let drone = pack.bestiary.get(ArchetypeId::new(7)).expect("drone");
        assert_eq!(drone.rank, EnemyRank::Basic);
        assert!(matches!(
            drone.behavior.locomotion,
            Locomotion::Flying(profile)
                if profile.desired_altitude == 2.5 && profile.adjust_speed == 2.5
        ));
        assert!(matches!(
            drone.behavior.attack,
            AttackProfile::Ranged(attack) if attack.clip_size == 6
        ));

        let grunt = pack.bestiary.get(ArchetypeId::new(2)).expect("grunt");
        assert!(matches!(grunt.behavior.attack, AttackProfile::Melee(_)));
        assert!(pack.bestiary.get(ArchetypeId::new(3)).is_none());
    }
}
