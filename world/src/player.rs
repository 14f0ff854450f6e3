use std::{collections::BTreeSet, time::Duration};

use glam::Vec2;
use zenith_core::{
    ActionError, EnemyId, Event, Facing, Layer, MeleeStats, PlayerSnapshot, PlayerState,
};

use crate::{body::Body, config::PlayerTuning};

/// Melee swing in progress: windup, active window, then recovery.
#[derive(Clone, Debug)]
pub(crate) struct MeleeSwing {
    pub(crate) stats: MeleeStats,
    elapsed: Duration,
    pub(crate) struck: BTreeSet<EnemyId>,
}

impl MeleeSwing {
    fn new(stats: MeleeStats) -> Self {
        Self {
            stats,
            elapsed: Duration::ZERO,
            struck: BTreeSet::new(),
        }
    }

    /// Advances the swing, reporting whether the step overlapped the active window.
    fn advance(&mut self, dt: Duration) -> bool {
        let before = self.elapsed;
        self.elapsed = self.elapsed.saturating_add(dt);
        let opens = self.stats.windup;
        let closes = self.stats.windup + self.stats.active;
        before < closes && self.elapsed >= opens
    }

    fn finished(&self) -> bool {
        self.elapsed >= self.stats.total()
    }
}

/// Player body and state machine.
#[derive(Clone, Debug)]
pub(crate) struct Player {
    pub(crate) body: Body,
    pub(crate) facing: Facing,
    pub(crate) state: PlayerState,
    pub(crate) crouching: bool,
    intro_left: Duration,
    dodge_left: Duration,
    dodge_ready_at: Duration,
    invincible_left: Duration,
    throw_left: Duration,
    pub(crate) swing: Option<MeleeSwing>,
}

impl Player {
    pub(crate) fn new(position: Vec2, tuning: &PlayerTuning) -> Self {
        Self {
            body: Body::new(position, tuning.radius, true),
            facing: Facing::Right,
            state: PlayerState::IntroLocked,
            crouching: false,
            intro_left: tuning.intro_lock,
            dodge_left: Duration::ZERO,
            dodge_ready_at: Duration::ZERO,
            invincible_left: Duration::ZERO,
            throw_left: Duration::ZERO,
            swing: None,
        }
    }

    pub(crate) fn layer(&self) -> Layer {
        match self.state {
            PlayerState::Dodging => Layer::Dodge,
            _ => Layer::Player,
        }
    }

    pub(crate) fn transition(&mut self, to: PlayerState, out_events: &mut Vec<Event>) {
        let from = self.state;
        if from == to {
            return;
        }
        self.state = to;
        log::debug!("player {from:?} -> {to:?}");
        out_events.push(Event::PlayerStateChanged { from, to });
    }

    /// Dodging, swinging, or throwing.
    pub(crate) fn is_busy(&self) -> bool {
        self.state == PlayerState::Dodging || self.swing.is_some() || !self.throw_left.is_zero()
    }

    /// Reports whether a hit would currently be accepted.
    pub(crate) fn is_vulnerable(&self) -> bool {
        !matches!(self.state, PlayerState::Dead | PlayerState::Dodging)
            && self.invincible_left.is_zero()
    }

    pub(crate) fn arm_invincibility(&mut self, tuning: &PlayerTuning) {
        self.invincible_left = tuning.hit_invincibility;
    }

    /// Point in front of the body used by melee swings.
    pub(crate) fn melee_point(&self, tuning: &PlayerTuning) -> Vec2 {
        self.body.position + self.facing.unit() * tuning.melee_offset
    }

    pub(crate) fn fire_point(&self, tuning: &PlayerTuning) -> Vec2 {
        let offset = if self.crouching {
            tuning.crouch_fire_offset
        } else {
            tuning.fire_offset
        };
        self.body.position + Vec2::new(offset.x * self.facing.sign(), offset.y)
    }

    pub(crate) fn begin_dodge(
        &mut self,
        clock: Duration,
        direction: Facing,
        tuning: &PlayerTuning,
        out_events: &mut Vec<Event>,
    ) -> Result<(), ActionError> {
        if self.is_busy() {
            return Err(ActionError::Busy);
        }
        if clock < self.dodge_ready_at {
            return Err(ActionError::DodgeRecharging);
        }
        self.facing = direction;
        self.dodge_left = tuning.dodge_duration;
        self.dodge_ready_at = clock + tuning.dodge_duration + tuning.dodge_cooldown;
        self.body.gravity = false;
        self.body.velocity = Vec2::new(direction.sign() * tuning.dodge_speed, 0.0);
        self.transition(PlayerState::Dodging, out_events);
        Ok(())
    }

    fn end_dodge(&mut self) {
        self.dodge_left = Duration::ZERO;
        self.body.gravity = true;
        self.body.velocity.x = 0.0;
    }

    pub(crate) fn begin_swing(&mut self, stats: MeleeStats) -> Result<(), ActionError> {
        if self.is_busy() {
            return Err(ActionError::Busy);
        }
        self.swing = Some(MeleeSwing::new(stats));
        Ok(())
    }

    pub(crate) fn begin_throw(&mut self, tuning: &PlayerTuning) -> Result<(), ActionError> {
        if self.is_busy() {
            return Err(ActionError::Busy);
        }
        self.throw_left = tuning.grenade_throw_lock;
        Ok(())
    }

    /// Cancels every in-flight action and enters a locked state.
    pub(crate) fn lock(&mut self, to: PlayerState, out_events: &mut Vec<Event>) {
        if self.state == PlayerState::Dodging {
            self.end_dodge();
        }
        self.swing = None;
        self.throw_left = Duration::ZERO;
        self.body.velocity.x = 0.0;
        self.transition(to, out_events);
    }

    /// Advances timers; returns whether the melee swing's active window overlapped the step.
    pub(crate) fn advance(&mut self, dt: Duration, out_events: &mut Vec<Event>) -> bool {
        self.invincible_left = self.invincible_left.saturating_sub(dt);
        self.throw_left = self.throw_left.saturating_sub(dt);

        match self.state {
            PlayerState::IntroLocked => {
                self.intro_left = self.intro_left.saturating_sub(dt);
                if self.intro_left.is_zero() {
                    self.transition(PlayerState::Normal, out_events);
                }
            }
            PlayerState::Dodging => {
                self.dodge_left = self.dodge_left.saturating_sub(dt);
                if self.dodge_left.is_zero() {
                    self.end_dodge();
                    self.transition(PlayerState::Normal, out_events);
                }
            }
            PlayerState::Normal | PlayerState::ElevatorLocked | PlayerState::Dead => {}
        }

        self.swing
            .as_mut()
            .map_or(false, |swing| swing.advance(dt))
    }

    /// Drops a swing whose recovery elapsed; call after resolving its hits.
    pub(crate) fn clear_finished_swing(&mut self) {
        if self.swing.as_ref().is_some_and(MeleeSwing::finished) {
            self.swing = None;
        }
    }

    pub(crate) fn snapshot(&self, health: f32, armour: f32) -> PlayerSnapshot {
        PlayerSnapshot {
            position: self.body.position,
            velocity: self.body.velocity,
            facing: self.facing,
            state: self.state,
            layer: self.layer(),
            grounded: self.body.grounded,
            crouching: self.crouching,
            health,
            armour,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use glam::Vec2;
    use zenith_core::{ActionError, Event, Facing, Layer, MeleeStats, PlayerState};

    use super::Player;
    use crate::config::PlayerTuning;

    fn ready_player(tuning: &PlayerTuning) -> Player {
        let mut player = Player::new(Vec2::ZERO, tuning);
        let mut events = Vec::new();
        let _ = player.advance(tuning.intro_lock, &mut events);
        assert_eq!(player.state, PlayerState::Normal);
        player
    }

    #[test]
    fn dodge_recharges_after_duration_plus_cooldown() {
        let tuning = PlayerTuning::default();
        let mut player = ready_player(&tuning);
        let mut events = Vec::new();
        let start = Duration::from_secs(2);

        player
            .begin_dodge(start, Facing::Left, &tuning, &mut events)
            .expect("dodge");
        assert_eq!(player.layer(), Layer::Dodge);
        assert!(!player.body.gravity);
        assert!(!player.is_vulnerable());
        assert_eq!(player.body.velocity, Vec2::new(-12.0, 0.0));

        let _ = player.advance(Duration::from_millis(250), &mut events);
        assert_eq!(player.state, PlayerState::Normal);
        assert!(player.body.gravity);
        assert_eq!(player.layer(), Layer::Player);

        assert_eq!(
            player.begin_dodge(
                start + Duration::from_millis(700),
                Facing::Left,
                &tuning,
                &mut events
            ),
            Err(ActionError::DodgeRecharging)
        );
        assert!(player
            .begin_dodge(start + Duration::from_millis(750), Facing::Right, &tuning, &mut events)
            .is_ok());
    }

    #[test]
    fn swing_reports_its_active_window_once_overlapped() {
        let tuning = PlayerTuning::default();
        let mut player = ready_player(&tuning);
        let mut events = Vec::new();
        player.begin_swing(MeleeStats::default()).expect("swing");
        assert_eq!(
            player.begin_swing(MeleeStats::default()),
            Err(ActionError::Busy)
        );

        assert!(!player.advance(Duration::from_millis(100), &mut events));
        assert!(player.advance(Duration::from_millis(100), &mut events));
        assert!(player.advance(Duration::from_millis(200), &mut events));
        assert!(!player.advance(Duration::from_millis(100), &mut events));
        player.clear_finished_swing();
        assert!(player.swing.is_some());
        assert!(!player.advance(Duration::from_millis(300), &mut events));
        player.clear_finished_swing();
        assert!(player.swing.is_none());
    }

    #[test]
    fn locking_cancels_a_dodge() {
        let tuning = PlayerTuning::default();
        let mut player = ready_player(&tuning);
        let mut events = Vec::new();
        player
            .begin_dodge(Duration::ZERO, Facing::Right, &tuning, &mut events)
            .expect("dodge");
        player.lock(PlayerState::Dead, &mut events);
        assert!(player.body.gravity);
        assert_eq!(player.layer(), Layer::Player);
        assert!(!player.is_vulnerable());
        assert_eq!(
            events.last(),
            Some(&Event::PlayerStateChanged {
                from: PlayerState::Dodging,
                to: PlayerState::Dead
            })
        );
    }
}
