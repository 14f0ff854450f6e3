use std::time::Duration;

use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use zenith_core::{
    AimMode, AttackProfile, Command, EnemyArchetype, EnemyPosture, EnemySnapshot, Facing,
    MeleeAttack, PlayerSnapshot, RangedAttack,
};

use crate::steering::Band;

/// What an enemy sees of its target during one update.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Engagement<'a> {
    pub(crate) enemy: &'a EnemySnapshot,
    pub(crate) archetype: &'a EnemyArchetype,
    pub(crate) player: &'a PlayerSnapshot,
    pub(crate) facing: Facing,
    pub(crate) distance: f32,
}

/// Attack state kept per enemy between updates.
#[derive(Clone, Debug)]
pub(crate) enum Brain {
    Melee(MeleeBrain),
    Ranged(RangedBrain),
}

impl Brain {
    pub(crate) fn new(attack: &AttackProfile) -> Self {
        match attack {
            AttackProfile::Melee(attack) => Self::Melee(MeleeBrain::new(*attack)),
            AttackProfile::Ranged(attack) => Self::Ranged(RangedBrain::new(*attack)),
        }
    }

    /// Advances the attack timers and acts on the distance band.
    pub(crate) fn update(
        &mut self,
        dt: Duration,
        band: Band,
        engagement: &Engagement<'_>,
        rng: &mut ChaCha8Rng,
        out: &mut Vec<Command>,
    ) -> EnemyPosture {
        match self {
            Self::Melee(brain) => brain.update(dt, band, engagement, out),
            Self::Ranged(brain) => brain.update(dt, band, engagement, rng, out),
        }
    }

    /// Drops the attack state when there is nothing to fight.
    pub(crate) fn stand_down(&mut self, dt: Duration) {
        match self {
            Self::Melee(brain) => brain.stand_down(dt),
            Self::Ranged(brain) => brain.stand_down(dt),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Swing {
    Ready,
    Windup(Duration),
    Active(Duration),
    Cooldown(Duration),
}

/// Windup, active window and cooldown of a melee attacker.
#[derive(Clone, Debug)]
pub(crate) struct MeleeBrain {
    attack: MeleeAttack,
    swing: Swing,
}

impl MeleeBrain {
    fn new(attack: MeleeAttack) -> Self {
        Self {
            attack,
            swing: Swing::Ready,
        }
    }

    fn tick(&mut self, dt: Duration) -> bool {
        let (next, struck) = match self.swing {
            Swing::Ready => (Swing::Ready, false),
            Swing::Windup(left) if dt >= left => (Swing::Active(self.attack.active), true),
            Swing::Windup(left) => (Swing::Windup(left - dt), false),
            Swing::Active(left) if dt >= left => (Swing::Cooldown(self.attack.cooldown), false),
            Swing::Active(left) => (Swing::Active(left - dt), false),
            Swing::Cooldown(left) if dt >= left => (Swing::Ready, false),
            Swing::Cooldown(left) => (Swing::Cooldown(left - dt), false),
        };
        self.swing = next;
        struck
    }

    fn update(
        &mut self,
        dt: Duration,
        band: Band,
        engagement: &Engagement<'_>,
        out: &mut Vec<Command>,
    ) -> EnemyPosture {
        if self.tick(dt) {
            let enemy = engagement.enemy;
            let in_front =
                enemy.facing == Facing::toward(enemy.position.x, engagement.player.position.x);
            let behavior = &engagement.archetype.behavior;
            if in_front && engagement.distance <= behavior.attack_range {
                out.push(Command::StrikePlayer {
                    enemy: enemy.id,
                    damage: self.attack.damage,
                    knockback: self.attack.knockback,
                });
            } else {
                log::trace!("enemy {} swung at nothing", enemy.id.get());
            }
        }

        match band {
            Band::Approach => {
                if matches!(self.swing, Swing::Windup(_)) {
                    self.swing = Swing::Ready;
                }
                EnemyPosture::Moving
            }
            Band::Hold => {
                if self.swing == Swing::Ready {
                    self.swing = Swing::Windup(self.attack.windup);
                }
                EnemyPosture::Attacking { crouching: false }
            }
            Band::Idle => EnemyPosture::Idle,
        }
    }

    fn stand_down(&mut self, dt: Duration) {
        let _ = self.tick(dt);
        if matches!(self.swing, Swing::Windup(_)) {
            self.swing = Swing::Ready;
        }
    }
}

/// Clip, reload and fire timing of a ranged attacker.
#[derive(Clone, Debug)]
pub(crate) struct RangedBrain {
    attack: RangedAttack,
    clip: u32,
    reload_left: Option<Duration>,
    cooldown_left: Duration,
    first_shot_left: Duration,
    armed: bool,
    crouching: bool,
}

impl RangedBrain {
    fn new(attack: RangedAttack) -> Self {
        Self {
            attack,
            clip: attack.clip_size,
            reload_left: None,
            cooldown_left: Duration::ZERO,
            first_shot_left: Duration::ZERO,
            armed: false,
            crouching: false,
        }
    }

    fn tick(&mut self, dt: Duration) {
        self.cooldown_left = self.cooldown_left.saturating_sub(dt);
        if let Some(left) = self.reload_left {
            if dt >= left {
                self.clip = self.attack.clip_size;
                self.reload_left = None;
            } else {
                self.reload_left = Some(left - dt);
            }
        }
    }

    fn begin_reload(&mut self) {
        self.reload_left = Some(self.attack.reload_time);
        self.armed = false;
        self.crouching = false;
    }

    fn update(
        &mut self,
        dt: Duration,
        band: Band,
        engagement: &Engagement<'_>,
        rng: &mut ChaCha8Rng,
        out: &mut Vec<Command>,
    ) -> EnemyPosture {
        self.tick(dt);

        match band {
            Band::Approach => {
                self.armed = false;
                self.crouching = false;
                return EnemyPosture::Moving;
            }
            Band::Idle => {
                return if self.reload_left.is_some() {
                    EnemyPosture::Reloading
                } else {
                    EnemyPosture::Idle
                };
            }
            Band::Hold => {}
        }

        if self.reload_left.is_some() {
            return EnemyPosture::Reloading;
        }
        if self.clip == 0 {
            self.begin_reload();
            return EnemyPosture::Reloading;
        }

        if self.armed {
            self.first_shot_left = self.first_shot_left.saturating_sub(dt);
        } else {
            self.armed = true;
            self.first_shot_left = self.attack.first_shot_delay;
            self.crouching = rng.gen::<f32>() < self.attack.crouch_chance;
        }

        if self.first_shot_left.is_zero() && self.cooldown_left.is_zero() {
            out.push(Command::FireEnemyProjectile {
                enemy: engagement.enemy.id,
                direction: self.aim(engagement),
            });
            self.clip -= 1;
            self.cooldown_left = self.attack.fire_interval;
            if self.clip == 0 {
                log::trace!("enemy {} reloading", engagement.enemy.id.get());
                self.begin_reload();
                return EnemyPosture::Reloading;
            }
        }

        EnemyPosture::Attacking {
            crouching: self.crouching,
        }
    }

    fn aim(&self, engagement: &Engagement<'_>) -> Vec2 {
        let forward = engagement.facing.unit();
        match self.attack.aim {
            AimMode::Horizontal => forward,
            AimMode::AtPlayer => {
                let offset = engagement.archetype.muzzle_offset;
                let muzzle = engagement.enemy.position
                    + Vec2::new(offset.x * engagement.facing.sign(), offset.y);
                (engagement.player.position - muzzle)
                    .try_normalize()
                    .unwrap_or(forward)
            }
        }
    }

    fn stand_down(&mut self, dt: Duration) {
        self.tick(dt);
        self.armed = false;
        self.crouching = false;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use glam::Vec2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use zenith_core::{
        ArchetypeId, AttackProfile, BehaviorProfile, Command, EnemyArchetype, EnemyId,
        EnemyPosture, EnemyRank, EnemySnapshot, Facing, Layer, MeleeAttack, PlayerSnapshot,
        PlayerState, RangedAttack,
    };

    use super::{Brain, Engagement};
    use crate::steering::Band;

    fn archetype(attack: AttackProfile) -> EnemyArchetype {
        EnemyArchetype {
            id: ArchetypeId::new(1),
            name: String::from("Test"),
            rank: EnemyRank::Basic,
            max_health: 10,
            body_radius: 0.4,
            muzzle_offset: Vec2::ZERO,
            behavior: BehaviorProfile {
                attack,
                ..BehaviorProfile::default()
            },
            drops: zenith_core::DropTable::default(),
            destroy_delay: Duration::from_secs(1),
            hurt_sound_chance: 0.0,
        }
    }

    fn enemy(facing: Facing) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(4),
            archetype: ArchetypeId::new(1),
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            facing,
            posture: EnemyPosture::Idle,
            health: 10,
            max_health: 10,
            layer: Layer::Enemy,
        }
    }

    fn player(x: f32) -> PlayerSnapshot {
        PlayerSnapshot {
            position: Vec2::new(x, 0.0),
            velocity: Vec2::ZERO,
            facing: Facing::Left,
            state: PlayerState::Normal,
            layer: Layer::Player,
            grounded: true,
            crouching: false,
            health: 100.0,
            armour: 0.0,
        }
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn melee_strike_lands_once_after_the_windup() {
        let attack = MeleeAttack::default();
        let archetype = archetype(AttackProfile::Melee(attack));
        let enemy = enemy(Facing::Right);
        let target = player(0.8);
        let engagement = Engagement {
            enemy: &enemy,
            archetype: &archetype,
            player: &target,
            facing: Facing::Right,
            distance: 0.8,
        };
        let mut brain = Brain::new(&archetype.behavior.attack);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut out = Vec::new();

        let mut strikes = 0;
        for _ in 0..100 {
            out.clear();
            let _ = brain.update(ms(10), Band::Hold, &engagement, &mut rng, &mut out);
            strikes += out.len();
            if strikes > 0 {
                break;
            }
        }
        assert_eq!(
            out,
            vec![Command::StrikePlayer {
                enemy: EnemyId::new(4),
                damage: attack.damage,
                knockback: attack.knockback,
            }]
        );

        // active window plus cooldown must pass before the next strike
        let mut quiet = Vec::new();
        for _ in 0..100 {
            let _ = brain.update(ms(10), Band::Hold, &engagement, &mut rng, &mut quiet);
        }
        assert!(quiet.is_empty());
    }

    #[test]
    fn melee_strike_misses_when_the_player_got_behind() {
        let archetype = archetype(AttackProfile::Melee(MeleeAttack::default()));
        let enemy = enemy(Facing::Left);
        let target = player(0.5);
        let engagement = Engagement {
            enemy: &enemy,
            archetype: &archetype,
            player: &target,
            facing: Facing::Right,
            distance: 0.5,
        };
        let mut brain = Brain::new(&archetype.behavior.attack);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut out = Vec::new();
        for _ in 0..40 {
            let _ = brain.update(ms(10), Band::Hold, &engagement, &mut rng, &mut out);
        }
        assert!(out.is_empty());
    }

    #[test]
    fn ranged_attacker_waits_fires_and_reloads() {
        let attack = RangedAttack {
            clip_size: 2,
            fire_interval: ms(100),
            reload_time: ms(500),
            first_shot_delay: ms(200),
            crouch_chance: 1.0,
            ..RangedAttack::default()
        };
        let archetype = archetype(AttackProfile::Ranged(attack));
        let enemy = enemy(Facing::Right);
        let target = player(3.0);
        let engagement = Engagement {
            enemy: &enemy,
            archetype: &archetype,
            player: &target,
            facing: Facing::Right,
            distance: 3.0,
        };
        let mut brain = Brain::new(&archetype.behavior.attack);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut out = Vec::new();

        let posture = brain.update(ms(50), Band::Hold, &engagement, &mut rng, &mut out);
        assert_eq!(posture, EnemyPosture::Attacking { crouching: true });
        assert!(out.is_empty());

        let _ = brain.update(ms(150), Band::Hold, &engagement, &mut rng, &mut out);
        assert!(out.is_empty(), "first shot waits for its delay");
        let _ = brain.update(ms(50), Band::Hold, &engagement, &mut rng, &mut out);
        assert_eq!(
            out,
            vec![Command::FireEnemyProjectile {
                enemy: EnemyId::new(4),
                direction: Vec2::X,
            }]
        );

        let _ = brain.update(ms(50), Band::Hold, &engagement, &mut rng, &mut out);
        assert_eq!(out.len(), 1, "fire interval gates the second shot");
        let posture = brain.update(ms(50), Band::Hold, &engagement, &mut rng, &mut out);
        assert_eq!(out.len(), 2);
        assert_eq!(posture, EnemyPosture::Reloading);

        let posture = brain.update(ms(400), Band::Hold, &engagement, &mut rng, &mut out);
        assert_eq!(posture, EnemyPosture::Reloading);
        let posture = brain.update(ms(100), Band::Hold, &engagement, &mut rng, &mut out);
        assert_eq!(posture, EnemyPosture::Attacking { crouching: true });
        assert_eq!(out.len(), 2, "a fresh first-shot delay follows the reload");
    }

    #[test]
    fn approaching_cancels_the_attack_state() {
        let attack = RangedAttack {
            first_shot_delay: ms(100),
            crouch_chance: 0.0,
            ..RangedAttack::default()
        };
        let archetype = archetype(AttackProfile::Ranged(attack));
        let enemy = enemy(Facing::Right);
        let target = player(3.0);
        let engagement = Engagement {
            enemy: &enemy,
            archetype: &archetype,
            player: &target,
            facing: Facing::Right,
            distance: 3.0,
        };
        let mut brain = Brain::new(&archetype.behavior.attack);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut out = Vec::new();

        let _ = brain.update(ms(10), Band::Hold, &engagement, &mut rng, &mut out);
        let posture = brain.update(ms(80), Band::Approach, &engagement, &mut rng, &mut out);
        assert_eq!(posture, EnemyPosture::Moving);
        let _ = brain.update(ms(80), Band::Hold, &engagement, &mut rng, &mut out);
        assert!(out.is_empty(), "re-entering the attack restarts the delay");
        let _ = brain.update(ms(100), Band::Hold, &engagement, &mut rng, &mut out);
        assert_eq!(out.len(), 1);
    }
}
