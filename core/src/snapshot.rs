use glam::Vec2;

use crate::{
    AmmoState, ArchetypeId, EnemyId, EnemyPosture, Facing, Layer, PlayerState, ProjectileId,
    Reserve, RunMode, Source, WeaponId,
};

/// Immutable representation of a single enemy used by systems.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Archetype the enemy was spawned from.
    pub archetype: ArchetypeId,
    /// Body centre.
    pub position: Vec2,
    /// Current velocity.
    pub velocity: Vec2,
    /// Direction the enemy looks toward.
    pub facing: Facing,
    /// Posture last reported by the controller.
    pub posture: EnemyPosture,
    /// Remaining health; may be negative after the killing blow.
    pub health: i64,
    /// Health on spawn.
    pub max_health: u32,
    /// Collision layer the body occupies.
    pub layer: Layer,
}

impl EnemySnapshot {
    /// Reports whether the enemy has died.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.layer == Layer::DeadEnemy
    }
}

/// Read-only snapshot describing all enemies in the arena.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a view ordered by enemy identifier.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Looks up the snapshot of a single enemy.
    #[must_use]
    pub fn get(&self, id: EnemyId) -> Option<&EnemySnapshot> {
        self.snapshots
            .binary_search_by_key(&id, |snapshot| snapshot.id)
            .ok()
            .and_then(|index| self.snapshots.get(index))
    }

    /// Number of enemies captured, dying ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view holds no enemies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of the player body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Body centre at the feet.
    pub position: Vec2,
    /// Current velocity.
    pub velocity: Vec2,
    /// Direction the player looks toward.
    pub facing: Facing,
    /// State machine state.
    pub state: PlayerState,
    /// Collision layer the body occupies.
    pub layer: Layer,
    /// Standing on the ground.
    pub grounded: bool,
    /// Crouch held.
    pub crouching: bool,
    /// Current health.
    pub health: f32,
    /// Current armour.
    pub armour: f32,
}

/// Clip and reserve of an equipped ranged weapon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AmmoSnapshot {
    /// Weapon tracked.
    pub weapon: WeaponId,
    /// Rounds in the clip.
    pub current_clip: u32,
    /// Rounds in a full clip.
    pub clip_size: u32,
    /// Rounds banked outside the clip.
    pub reserve: Reserve,
    /// Reload in progress.
    pub reloading: bool,
}

impl From<&AmmoState> for AmmoSnapshot {
    fn from(ammo: &AmmoState) -> Self {
        Self {
            weapon: ammo.weapon(),
            current_clip: ammo.current_clip(),
            clip_size: ammo.clip_size(),
            reserve: ammo.reserve(),
            reloading: ammo.is_reloading(),
        }
    }
}

/// Counters of the current run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSnapshot {
    /// Progression loop.
    pub mode: RunMode,
    /// Current floor.
    pub floor: u32,
    /// Waves of the current floor, or the current survival wave.
    pub current_waves: u32,
    /// Every enemy killed.
    pub total_kills: u32,
    /// Basic enemies killed.
    pub basic_kills: u32,
    /// Elite enemies killed.
    pub elite_kills: u32,
    /// Bosses killed, final boss included.
    pub boss_kills: u32,
    /// Current health.
    pub health: f32,
    /// Maximum health.
    pub max_health: f32,
    /// Current armour.
    pub armour: f32,
    /// Maximum armour.
    pub max_armour: f32,
    /// Grenades carried.
    pub grenades: u32,
    /// Grenade capacity.
    pub max_grenades: u32,
    /// Name of the carried grenade type.
    pub grenade_type: String,
    /// Primary slot ammunition.
    pub primary: Option<AmmoSnapshot>,
    /// Secondary slot ammunition.
    pub secondary: Option<AmmoSnapshot>,
    /// Whether the primary slot is active.
    pub using_primary: bool,
    /// Equipped melee weapon.
    pub melee_weapon: Option<WeaponId>,
}

/// Immutable representation of a projectile in flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Unique identifier.
    pub id: ProjectileId,
    /// Who fired the projectile.
    pub source: Source,
    /// Current position.
    pub position: Vec2,
    /// Current velocity.
    pub velocity: Vec2,
}

/// Read-only snapshot describing every projectile in flight.
#[derive(Clone, Debug, Default)]
pub struct ProjectileView {
    snapshots: Vec<ProjectileSnapshot>,
}

impl ProjectileView {
    /// Creates a view ordered by projectile identifier.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ProjectileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
        self.snapshots.iter()
    }
}

/// State of the floor exit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExitSnapshot {
    /// Centre of the exit trigger.
    pub position: Vec2,
    /// Horizontal half extent of the trigger.
    pub half_width: f32,
    /// The spawner has opened the exit.
    pub active: bool,
    /// The player already stepped in.
    pub entered: bool,
}

/// Horizontal window the presentation layer shows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraView {
    /// Centre of the window.
    pub center_x: f32,
    /// Half of the visible width.
    pub half_width: f32,
}

impl CameraView {
    /// Reports whether `x` lies strictly inside the visible window.
    #[must_use]
    pub fn contains(&self, x: f32) -> bool {
        x > self.center_x - self.half_width && x < self.center_x + self.half_width
    }
}

#[cfg(test)]
mod tests {
    use super::CameraView;

    #[test]
    fn camera_edges_are_not_visible() {
        let camera = CameraView {
            center_x: 0.0,
            half_width: 10.0,
        };
        assert!(camera.contains(9.9));
        assert!(!camera.contains(10.0));
        assert!(!camera.contains(-10.0));
    }
}
