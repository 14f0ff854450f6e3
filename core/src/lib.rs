#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Zenith combat simulation.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

mod bestiary;
mod combat;
mod effects;
mod pickup;
pub mod seconds;
mod snapshot;
mod weapon;

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use bestiary::{
    AimMode, AltitudeProfile, ArchetypeId, AttackProfile, BehaviorProfile, Bestiary, DropTable,
    EnemyArchetype, EnemyRank, Locomotion, MeleeAttack, RangedAttack, SeparationProfile,
};
pub use combat::{
    DamageType, GrenadeSpec, HitTarget, Layer, LayerMask, ProjectileSpec, RetireReason, Source,
    TargetFilter,
};
pub use effects::{EffectKind, EffectRequest, SceneRequest, SoundClip, SoundCue};
pub use pickup::PickupKind;
pub use snapshot::{
    AmmoSnapshot, CameraView, EnemySnapshot, EnemyView, ExitSnapshot, PlayerSnapshot,
    ProjectileSnapshot, ProjectileView, RunSnapshot,
};
pub use weapon::{
    AmmoState, MeleeStats, MuzzleTuning, RangedStats, RecoilTuning, Reserve, WeaponDefinition,
    WeaponId,
};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Zenith.";

/// Floor that hosts the final boss and ends a tower run once cleared.
pub const FINAL_FLOOR: u32 = 20;

/// Describes which progression loop a run follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Floor-based progression that ends after the final floor.
    Tower,
    /// Endless wave survival inside a single arena.
    Survival,
}

/// Horizontal direction an entity is looking toward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    /// Looking toward decreasing x.
    Left,
    /// Looking toward increasing x.
    Right,
}

impl Facing {
    /// Returns `1.0` for right and `-1.0` for left.
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    /// Facing that looks from `from_x` toward `to_x`.
    ///
    /// Ties resolve to [`Facing::Left`], matching a strict "target is to the
    /// right" comparison.
    #[must_use]
    pub fn toward(from_x: f32, to_x: f32) -> Self {
        if to_x > from_x {
            Self::Right
        } else {
            Self::Left
        }
    }

    /// Unit vector pointing along the facing.
    #[must_use]
    pub const fn unit(self) -> Vec2 {
        Vec2::new(self.sign(), 0.0)
    }
}

/// States of the player state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerState {
    /// Input is ignored while the level intro plays.
    IntroLocked,
    /// Regular movement and combat.
    Normal,
    /// Invincible dash with gravity disabled.
    Dodging,
    /// Player stepped into the exit; input is ignored until the next level.
    ElevatorLocked,
    /// Terminal state entered once when health reaches zero.
    Dead,
}

impl PlayerState {
    /// Reports whether the state accepts player input.
    #[must_use]
    pub const fn accepts_input(self) -> bool {
        matches!(self, Self::Normal | Self::Dodging)
    }
}

/// Posture an enemy controller reports for presentation purposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyPosture {
    /// Closing the distance toward the target.
    Moving,
    /// Standing still without attacking.
    Idle,
    /// Holding position with the attack state armed.
    Attacking {
        /// Ranged attackers may crouch while firing.
        crouching: bool,
    },
    /// Waiting for the clip to refill.
    Reloading,
}

/// Input sampled for the player during a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlayerInput {
    /// Horizontal axis in `[-1, 1]`.
    pub horizontal: f32,
    /// Crouch key held.
    pub crouch: bool,
    /// Jump pressed this frame.
    pub jump: bool,
    /// Dodge pressed this frame.
    pub dodge: bool,
    /// Fire held this frame.
    pub fire: bool,
    /// Melee pressed this frame.
    pub melee: bool,
    /// Reload pressed this frame.
    pub reload: bool,
    /// Weapon swap pressed this frame.
    pub swap_weapon: bool,
    /// Grenade throw pressed this frame.
    pub throw_grenade: bool,
}

/// Discrete player actions that may be rejected by precondition checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Jump off the ground.
    Jump,
    /// Start a dodge.
    Dodge,
    /// Fire the current ranged weapon.
    Fire,
    /// Reload the current ranged weapon.
    Reload,
    /// Swap between primary and secondary slots.
    Swap,
    /// Swing the melee weapon.
    Melee,
    /// Throw a grenade.
    ThrowGrenade,
}

/// Reasons an action is rejected without side effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
pub enum ActionError {
    /// The player state does not accept input.
    #[error("player input is locked")]
    InputLocked,
    /// Another mutually exclusive action is in progress.
    #[error("another action is in progress")]
    Busy,
    /// The weapon fired too recently.
    #[error("weapon is cooling down")]
    OnCooldown,
    /// The weapon is reloading.
    #[error("weapon is reloading")]
    Reloading,
    /// The clip holds no rounds.
    #[error("clip is empty")]
    ClipEmpty,
    /// The clip is already full.
    #[error("clip is already full")]
    ClipFull,
    /// No reserve rounds remain.
    #[error("no reserve ammunition")]
    ReserveEmpty,
    /// The selected weapon cannot fire projectiles.
    #[error("weapon has no ranged mode")]
    NotRanged,
    /// No secondary weapon is equipped.
    #[error("no secondary weapon equipped")]
    NoSecondary,
    /// Weapon selection is disabled.
    #[error("weapon selection is locked")]
    SelectionLocked,
    /// The dodge has not recharged yet.
    #[error("dodge is recharging")]
    DodgeRecharging,
    /// Jumping requires standing on the ground.
    #[error("not standing on ground")]
    Airborne,
    /// Jumping is disabled while crouching.
    #[error("cannot jump while crouching")]
    Crouching,
    /// The grenade pouch is empty.
    #[error("no grenades left")]
    NoGrenades,
}

/// Horizontal extents and anchor points of a loaded arena.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelLayout {
    /// Leftmost x reachable by bodies and spawns.
    pub left_bound: f32,
    /// Rightmost x reachable by bodies and spawns.
    pub right_bound: f32,
    /// Height of the walkable ground plane.
    pub ground_y: f32,
    /// Height at which spawned enemies appear.
    pub spawn_y: f32,
    /// Where the player appears when the level loads.
    pub player_spawn: Vec2,
    /// Location of the floor exit.
    pub exit_position: Vec2,
    /// Horizontal half extent of the exit trigger.
    pub exit_half_width: f32,
}

impl Default for LevelLayout {
    fn default() -> Self {
        Self {
            left_bound: -50.0,
            right_bound: 50.0,
            ground_y: -3.0,
            spawn_y: -3.0,
            player_spawn: Vec2::new(0.0, -3.0),
            exit_position: Vec2::new(0.0, -3.0),
            exit_half_width: 1.0,
        }
    }
}

impl LevelLayout {
    /// Clamps an x coordinate into the level bounds.
    #[must_use]
    pub fn clamp_x(&self, x: f32) -> f32 {
        x.clamp(self.left_bound, self.right_bound)
    }
}

/// Unique identifier assigned to an enemy instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
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

/// Unique identifier assigned to a projectile in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
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

/// Unique identifier assigned to a thrown grenade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GrenadeId(u32);

impl GrenadeId {
    /// Creates a new grenade identifier with the provided numeric value.
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

/// Unique identifier assigned to a pickup lying in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PickupId(u32);

impl PickupId {
    /// Creates a new pickup identifier with the provided numeric value.
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

/// Identifier of an arena layout that adapters know how to present.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArenaId(u32);

impl ArenaId {
    /// Creates a new arena identifier with the provided numeric value.
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

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Starts a fresh run in the provided mode, resetting all progress.
    StartRun {
        /// Progression loop of the run.
        mode: RunMode,
    },
    /// Replaces the arena contents with a freshly loaded level.
    LoadLevel {
        /// Arena chosen for the level.
        arena: ArenaId,
        /// Geometry of the arena.
        layout: LevelLayout,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Delivers the input sampled for the player this frame.
    SubmitInput {
        /// Sampled input state.
        input: PlayerInput,
    },
    /// Updates an enemy's velocity, facing, and posture.
    SteerEnemy {
        /// Enemy being steered.
        enemy: EnemyId,
        /// Horizontal velocity to apply.
        velocity_x: f32,
        /// Vertical velocity to apply, or `None` to keep the current one.
        velocity_y: Option<f32>,
        /// Direction the enemy should look toward.
        facing: Facing,
        /// Posture reported for presentation.
        posture: EnemyPosture,
    },
    /// Requests that an enemy fire its ranged weapon.
    FireEnemyProjectile {
        /// Enemy firing the shot.
        enemy: EnemyId,
        /// Direction of travel of the projectile.
        direction: Vec2,
    },
    /// Requests that a melee enemy damage the player.
    StrikePlayer {
        /// Enemy delivering the strike.
        enemy: EnemyId,
        /// Damage dealt by the strike.
        damage: u32,
        /// Impulse applied away from the enemy.
        knockback: f32,
    },
    /// Requests that an enemy of the given archetype enter the arena.
    SpawnEnemy {
        /// Archetype to instantiate.
        archetype: ArchetypeId,
        /// Spawn position.
        position: Vec2,
    },
    /// Announces the start of a wave.
    AnnounceWave {
        /// One-based wave index.
        wave: u32,
    },
    /// Activates the floor exit once every enemy is gone.
    ActivateExit,
    /// Places a pickup into the arena.
    SpawnPickup {
        /// Pickup to place.
        kind: PickupKind,
        /// Position of the pickup.
        position: Vec2,
    },
    /// Moves the run to the next floor.
    AdvanceFloor,
    /// Restores all run progress to its defaults.
    ResetRun,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that a new run started.
    RunStarted {
        /// Progression loop of the run.
        mode: RunMode,
    },
    /// Announces that a level finished loading.
    LevelLoaded {
        /// Arena that was loaded.
        arena: ArenaId,
        /// Progression loop of the run.
        mode: RunMode,
        /// Current floor of the run.
        floor: u32,
    },
    /// Reports a player state machine transition.
    PlayerStateChanged {
        /// State before the transition.
        from: PlayerState,
        /// State after the transition.
        to: PlayerState,
    },
    /// Reports an action rejected by its precondition check.
    ActionRejected {
        /// Action that was attempted.
        action: PlayerAction,
        /// Reason the action was rejected.
        reason: ActionError,
    },
    /// Reports damage accepted by the player.
    PlayerDamaged {
        /// Damage dealt before armour absorption.
        amount: u32,
        /// Portion absorbed by armour.
        absorbed: f32,
        /// Health after the hit.
        health: f32,
        /// Armour after the hit.
        armour: f32,
    },
    /// Announces that the player died.
    PlayerDied,
    /// Confirms that the player fired a ranged weapon.
    WeaponFired {
        /// Weapon that fired.
        weapon: WeaponId,
        /// Muzzle position.
        origin: Vec2,
        /// Facing at the moment of firing.
        facing: Facing,
    },
    /// Confirms that a reload started.
    ReloadStarted {
        /// Weapon being reloaded.
        weapon: WeaponId,
    },
    /// Confirms that a reload completed.
    ReloadFinished {
        /// Weapon that finished reloading.
        weapon: WeaponId,
        /// Rounds in the clip after the reload.
        clip: u32,
        /// Reserve after the reload.
        reserve: Reserve,
    },
    /// Confirms a weapon swap.
    WeaponSwapped {
        /// Weapon that is now active.
        weapon: WeaponId,
        /// Whether the primary slot is active.
        using_primary: bool,
    },
    /// Confirms that a melee swing started.
    MeleeSwingStarted {
        /// Melee weapon used, if any.
        weapon: Option<WeaponId>,
    },
    /// Confirms that a grenade left the player's hand.
    GrenadeThrown {
        /// Identifier of the grenade.
        grenade: GrenadeId,
    },
    /// Confirms that a grenade exploded.
    GrenadeExploded {
        /// Identifier of the grenade.
        grenade: GrenadeId,
        /// Explosion centre.
        position: Vec2,
    },
    /// Confirms that a projectile entered the arena.
    ProjectileSpawned {
        /// Identifier of the projectile.
        projectile: ProjectileId,
        /// Who fired the projectile.
        source: Source,
    },
    /// Reports that a projectile damaged a target.
    ProjectileHit {
        /// Identifier of the projectile.
        projectile: ProjectileId,
        /// Target that was hit.
        target: HitTarget,
    },
    /// Reports that a projectile left the arena.
    ProjectileRetired {
        /// Identifier of the projectile.
        projectile: ProjectileId,
        /// Why the projectile retired.
        reason: RetireReason,
    },
    /// Confirms that an enemy entered the arena.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Archetype of the enemy.
        archetype: ArchetypeId,
        /// Spawn position.
        position: Vec2,
    },
    /// Reports damage accepted by an enemy.
    EnemyDamaged {
        /// Enemy that was hurt.
        enemy: EnemyId,
        /// Damage dealt.
        amount: u32,
        /// Health remaining (may be negative on the killing blow).
        remaining: i64,
    },
    /// Announces that an enemy died.
    EnemyDied {
        /// Enemy that died.
        enemy: EnemyId,
        /// Archetype of the enemy.
        archetype: ArchetypeId,
        /// Rank credited in the kill counters.
        rank: EnemyRank,
        /// Position of death.
        position: Vec2,
    },
    /// Announces that a dead enemy was removed from the arena.
    EnemyDespawned {
        /// Enemy that was removed.
        enemy: EnemyId,
    },
    /// Confirms that a pickup entered the arena.
    PickupSpawned {
        /// Identifier of the pickup.
        pickup: PickupId,
        /// Kind of pickup.
        kind: PickupKind,
        /// Position of the pickup.
        position: Vec2,
    },
    /// Confirms that the player collected a pickup.
    PickupCollected {
        /// Identifier of the pickup.
        pickup: PickupId,
        /// Kind of pickup.
        kind: PickupKind,
    },
    /// Announces the start of a wave.
    WaveStarted {
        /// One-based wave index.
        wave: u32,
    },
    /// Announces that the floor exit became active.
    ExitActivated,
    /// Announces that the player stepped into the active exit.
    ExitEntered,
    /// Announces that the run moved to another floor.
    FloorAdvanced {
        /// New floor number.
        floor: u32,
    },
    /// Requests a cosmetic effect from the presentation layer.
    EffectRequested {
        /// Effect to spawn.
        effect: EffectRequest,
    },
    /// Requests a sound from the presentation layer.
    SoundRequested {
        /// Sound to play.
        cue: SoundCue,
    },
    /// Requests a scene transition from the presentation layer.
    SceneRequested {
        /// Requested transition.
        request: SceneRequest,
    },
}
