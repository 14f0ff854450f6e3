#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for the Zenith combat simulation.
//!
//! The world owns the run counters, the player's arsenal and body, every enemy,
//! projectile, grenade and pickup, and the floor exit. [`apply`] is the only
//! mutation entry point; the [`query`] module exposes read-only snapshots.

mod arsenal;
mod body;
pub mod catalog;
mod config;
mod enemies;
mod pickups;
mod player;
mod projectiles;
mod run;

use std::time::Duration;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use zenith_core::{
    ActionError, ArchetypeId, ArenaId, AttackProfile, Command, EffectKind, EffectRequest, EnemyId,
    EnemyPosture, EnemyRank, Event, Facing, HitTarget, LevelLayout, PlayerAction, PlayerInput,
    PlayerState, RunMode, SceneRequest, SoundClip, SoundCue, Source, WELCOME_BANNER,
};

pub use config::{ConfigError, Loadout, PlayerTuning, RunTuning, WorldConfig};

use arsenal::Arsenal;
use enemies::{Death, EnemyRegistry};
use pickups::Pickup;
use player::Player;
use projectiles::{Grenade, Projectile};
use run::RunState;

/// Floor exit opened by the spawner once a floor is cleared.
#[derive(Clone, Copy, Debug)]
struct ExitState {
    position: Vec2,
    half_width: f32,
    active: bool,
    entered: bool,
}

impl ExitState {
    fn closed(layout: &LevelLayout) -> Self {
        Self {
            position: layout.exit_position,
            half_width: layout.exit_half_width,
            active: false,
            entered: false,
        }
    }
}

/// Represents the authoritative Zenith world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: WorldConfig,
    rng: ChaCha8Rng,
    clock: Duration,
    run: RunState,
    starting_arsenal: Arsenal,
    arsenal: Arsenal,
    arena: Option<ArenaId>,
    layout: LevelLayout,
    exit: ExitState,
    player: Option<Player>,
    enemies: EnemyRegistry,
    projectiles: Vec<Projectile>,
    grenades: Vec<Grenade>,
    pickups: Vec<Pickup>,
    next_projectile: u32,
    next_grenade: u32,
    next_pickup: u32,
}

impl World {
    /// Creates a world in tower mode with no level loaded.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let arsenal = Arsenal::from_loadout(&config)?;
        let layout = LevelLayout::default();
        Ok(Self {
            banner: WELCOME_BANNER,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            clock: Duration::ZERO,
            run: RunState::new(RunMode::Tower, &config.run, &config.grenade),
            starting_arsenal: arsenal.clone(),
            arsenal,
            arena: None,
            exit: ExitState::closed(&layout),
            layout,
            player: None,
            enemies: EnemyRegistry::default(),
            projectiles: Vec::new(),
            grenades: Vec::new(),
            pickups: Vec::new(),
            next_projectile: 0,
            next_grenade: 0,
            next_pickup: 0,
            config,
        })
    }

    fn reset_run(&mut self, mode: RunMode) {
        self.run = RunState::new(mode, &self.config.run, &self.config.grenade);
        self.arsenal = self.starting_arsenal.clone();
    }

    fn clear_arena(&mut self) {
        self.enemies.clear();
        self.projectiles.clear();
        self.grenades.clear();
        self.pickups.clear();
    }

    fn load_level(&mut self, arena: ArenaId, layout: LevelLayout, out_events: &mut Vec<Event>) {
        self.clear_arena();
        self.arena = Some(arena);
        self.layout = layout;
        self.exit = ExitState::closed(&layout);

        let mut player = Player::new(layout.player_spawn, &self.config.player);
        let rest = player.body.rest_height(&layout);
        player.body.position.x = layout.clamp_x(player.body.position.x);
        player.body.position.y = player.body.position.y.max(rest);
        self.player = Some(player);
        self.run.restore_health();

        log::debug!(
            "loaded arena {} on floor {} ({:?})",
            arena.get(),
            self.run.floor,
            self.run.mode
        );
        out_events.push(Event::LevelLoaded {
            arena,
            mode: self.run.mode,
            floor: self.run.floor,
        });
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.clock = self.clock.saturating_add(dt);
        out_events.push(Event::TimeAdvanced { dt });

        self.arsenal.advance(dt, out_events);

        let striking = match self.player.as_mut() {
            Some(player) => player.advance(dt, out_events),
            None => false,
        };
        if striking {
            self.resolve_melee(out_events);
        }

        let seconds = dt.as_secs_f32();
        let gravity = self.config.gravity;
        if let Some(player) = self.player.as_mut() {
            player.clear_finished_swing();
            player.body.integrate(seconds, gravity, &self.layout);
        }
        for enemy in self.enemies.iter_mut() {
            enemy.body.integrate(seconds, gravity, &self.layout);
        }

        self.advance_projectiles(dt, out_events);
        self.advance_grenades(dt, out_events);
        self.collect_pickups(out_events);
        self.check_exit(out_events);
        self.enemies.advance_despawns(dt, out_events);
    }

    fn damage_target(
        &mut self,
        target: HitTarget,
        amount: u32,
        push: Vec2,
        out_events: &mut Vec<Event>,
    ) {
        match target {
            HitTarget::Player => self.damage_player(amount, push, out_events),
            HitTarget::Enemy(id) => {
                let Some(enemy) = self.enemies.get_mut(id) else {
                    return;
                };
                if let Some(death) = enemy.take_damage(amount, push, &mut self.rng, out_events) {
                    self.credit_death(death, out_events);
                }
            }
        }
    }

    fn damage_player(&mut self, amount: u32, push: Vec2, out_events: &mut Vec<Event>) {
        let Some(player) = self.player.as_mut() else {
            return;
        };
        if !player.is_vulnerable() {
            log::trace!("player ignored {amount} damage in {:?}", player.state);
            return;
        }

        let outcome = self.run.apply_damage(amount);
        player.arm_invincibility(&self.config.player);
        player.body.velocity += push;
        out_events.push(Event::PlayerDamaged {
            amount,
            absorbed: outcome.absorbed,
            health: outcome.health,
            armour: outcome.armour,
        });
        out_events.push(Event::EffectRequested {
            effect: EffectRequest::at(EffectKind::Hit, player.body.position),
        });
        out_events.push(Event::SoundRequested {
            cue: SoundCue::new(SoundClip::PlayerHurt),
        });

        if outcome.health <= 0.0 {
            player.lock(PlayerState::Dead, out_events);
            out_events.push(Event::PlayerDied);
            out_events.push(Event::SceneRequested {
                request: SceneRequest::GameOver { victory: false },
            });
        }
    }

    /// Credits the kill and rolls the loot of an enemy that just died.
    fn credit_death(&mut self, death: Death, out_events: &mut Vec<Event>) {
        self.run.record_kill(death.rank);
        log::debug!(
            "enemy {} credited as {:?}, {} kills",
            death.enemy.get(),
            death.rank,
            self.run.total_kills
        );

        let roll: f32 = self.rng.gen();
        let Some(drops) = self
            .config
            .bestiary
            .get(death.archetype)
            .map(|archetype| &archetype.drops)
        else {
            return;
        };
        if roll >= drops.chance || drops.pickups.is_empty() {
            return;
        }
        let index = self.rng.gen_range(0..drops.pickups.len());
        let kind = drops.pickups.get(index).cloned();
        if let Some(kind) = kind {
            self.spawn_pickup(kind, death.position, out_events);
        }
    }

    fn resolve_melee(&mut self, out_events: &mut Vec<Event>) {
        let tuning = self.config.player;
        let Some(player) = self.player.as_ref() else {
            return;
        };
        let Some(swing) = player.swing.as_ref() else {
            return;
        };
        let point = player.melee_point(&tuning);
        let push = player.facing.unit() * swing.stats.knockback;
        let stats = swing.stats;
        let targets: Vec<EnemyId> = self
            .enemies
            .iter()
            .filter(|enemy| {
                !enemy.is_dead()
                    && !swing.struck.contains(&enemy.id)
                    && enemy.body.position.distance(point) <= stats.range + enemy.body.radius
            })
            .map(|enemy| enemy.id)
            .collect();

        if let Some(swing) = self.player.as_mut().and_then(|player| player.swing.as_mut()) {
            swing.struck.extend(targets.iter().copied());
        }
        for id in targets {
            self.damage_target(HitTarget::Enemy(id), stats.damage, push, out_events);
        }
    }

    fn check_exit(&mut self, out_events: &mut Vec<Event>) {
        if !self.exit.active || self.exit.entered {
            return;
        }
        let Some(player) = self.player.as_mut() else {
            return;
        };
        if !player.state.accepts_input()
            || (player.body.position.x - self.exit.position.x).abs() > self.exit.half_width
        {
            return;
        }

        self.exit.entered = true;
        player.lock(PlayerState::ElevatorLocked, out_events);
        out_events.push(Event::ExitEntered);
        out_events.push(Event::EffectRequested {
            effect: EffectRequest::at(EffectKind::Fade, self.exit.position),
        });

        let request = if self.run.mode == RunMode::Tower
            && self.run.floor >= self.config.run.final_floor
        {
            SceneRequest::GameOver { victory: true }
        } else {
            SceneRequest::NextFloor
        };
        log::debug!("exit entered on floor {}, requesting {request:?}", self.run.floor);
        out_events.push(Event::SceneRequested { request });
    }

    fn submit_input(&mut self, input: PlayerInput, out_events: &mut Vec<Event>) {
        let Some(player) = self.player.as_mut() else {
            return;
        };
        if !player.state.accepts_input() {
            for action in pressed_actions(&input) {
                reject(action, ActionError::InputLocked, out_events);
            }
            return;
        }

        let tuning = self.config.player;
        let horizontal = input.horizontal.clamp(-1.0, 1.0);
        player.crouching = input.crouch;
        if player.state == PlayerState::Normal {
            let speed = if player.crouching {
                tuning.crouch_speed
            } else {
                tuning.move_speed
            };
            player.body.velocity.x = horizontal * speed;
            if horizontal > f32::EPSILON {
                player.facing = Facing::Right;
            } else if horizontal < -f32::EPSILON {
                player.facing = Facing::Left;
            }
        }

        if input.jump {
            let outcome = self.try_jump();
            report(PlayerAction::Jump, outcome, out_events);
        }
        if input.dodge {
            let outcome = self.try_dodge(horizontal, out_events);
            report(PlayerAction::Dodge, outcome, out_events);
        }
        if input.swap_weapon {
            let outcome = self.try_swap(out_events);
            report(PlayerAction::Swap, outcome, out_events);
        }
        if input.reload {
            let outcome = self.try_reload(out_events);
            report(PlayerAction::Reload, outcome, out_events);
        }
        if input.fire {
            let outcome = self.try_fire(out_events);
            report(PlayerAction::Fire, outcome, out_events);
        }
        if input.melee {
            let outcome = self.try_melee(out_events);
            report(PlayerAction::Melee, outcome, out_events);
        }
        if input.throw_grenade {
            let outcome = self.try_throw(out_events);
            report(PlayerAction::ThrowGrenade, outcome, out_events);
        }
    }

    fn try_jump(&mut self) -> Result<(), ActionError> {
        let tuning = self.config.player;
        let player = self.player.as_mut().ok_or(ActionError::InputLocked)?;
        if player.state == PlayerState::Dodging {
            return Err(ActionError::Busy);
        }
        if player.crouching {
            return Err(ActionError::Crouching);
        }
        if !player.body.grounded {
            return Err(ActionError::Airborne);
        }
        player.body.velocity.y = tuning.jump_speed;
        player.body.grounded = false;
        Ok(())
    }

    fn try_dodge(
        &mut self,
        horizontal: f32,
        out_events: &mut Vec<Event>,
    ) -> Result<(), ActionError> {
        let tuning = self.config.player;
        let clock = self.clock;
        let player = self.player.as_mut().ok_or(ActionError::InputLocked)?;
        let direction = if horizontal > f32::EPSILON {
            Facing::Right
        } else if horizontal < -f32::EPSILON {
            Facing::Left
        } else {
            player.facing
        };
        player.begin_dodge(clock, direction, &tuning, out_events)?;
        out_events.push(Event::EffectRequested {
            effect: EffectRequest::at(EffectKind::DodgeTrail, player.body.position),
        });
        out_events.push(Event::SoundRequested {
            cue: SoundCue::new(SoundClip::Dodge),
        });
        Ok(())
    }

    fn try_swap(&mut self, out_events: &mut Vec<Event>) -> Result<(), ActionError> {
        let weapon = self.arsenal.swap()?;
        out_events.push(Event::WeaponSwapped {
            weapon,
            using_primary: self.arsenal.using_primary(),
        });
        Ok(())
    }

    fn try_reload(&mut self, out_events: &mut Vec<Event>) -> Result<(), ActionError> {
        let weapon = self.arsenal.reload()?;
        out_events.push(Event::ReloadStarted { weapon });
        out_events.push(Event::SoundRequested {
            cue: SoundCue::new(SoundClip::Reload),
        });
        Ok(())
    }

    fn try_fire(&mut self, out_events: &mut Vec<Event>) -> Result<(), ActionError> {
        let tuning = self.config.player;
        let player = self.player.as_ref().ok_or(ActionError::InputLocked)?;
        if player.is_busy() {
            return Err(ActionError::Busy);
        }
        let origin = player.fire_point(&tuning);
        let facing = player.facing;

        let shot = match self.arsenal.fire(self.clock) {
            Ok(shot) => shot,
            Err(ActionError::ClipEmpty) => {
                out_events.push(Event::SoundRequested {
                    cue: SoundCue::new(SoundClip::DryFire),
                });
                return Err(ActionError::ClipEmpty);
            }
            Err(reason) => return Err(reason),
        };
        out_events.push(Event::WeaponFired {
            weapon: shot.weapon,
            origin,
            facing,
        });
        let _ = self.spawn_projectile(
            Source::Player,
            shot.projectile,
            origin,
            facing.unit(),
            out_events,
        );
        let flash = origin + Vec2::new(shot.muzzle.offset.x * facing.sign(), shot.muzzle.offset.y);
        out_events.push(Event::EffectRequested {
            effect: EffectRequest {
                kind: EffectKind::MuzzleFlash,
                position: flash,
                rotation: match facing {
                    Facing::Right => 0.0,
                    Facing::Left => std::f32::consts::PI,
                },
            },
        });
        out_events.push(Event::SoundRequested {
            cue: SoundCue::new(SoundClip::PlayerShot),
        });
        Ok(())
    }

    fn try_melee(&mut self, out_events: &mut Vec<Event>) -> Result<(), ActionError> {
        let (weapon, stats) = self.arsenal.melee(self.config.player.unarmed);
        let player = self.player.as_mut().ok_or(ActionError::InputLocked)?;
        player.begin_swing(stats)?;
        out_events.push(Event::MeleeSwingStarted { weapon });
        out_events.push(Event::SoundRequested {
            cue: SoundCue::new(SoundClip::Swing),
        });
        Ok(())
    }

    fn try_throw(&mut self, out_events: &mut Vec<Event>) -> Result<(), ActionError> {
        let tuning = self.config.player;
        let player = self.player.as_mut().ok_or(ActionError::InputLocked)?;
        if player.is_busy() {
            return Err(ActionError::Busy);
        }
        if self.run.grenades == 0 {
            return Err(ActionError::NoGrenades);
        }
        player.begin_throw(&tuning)?;
        let _ = self.run.take_grenade();

        let grenade = &self.run.grenade;
        let lift = if player.crouching {
            grenade.crouching_lift
        } else {
            grenade.standing_lift
        };
        let velocity = Vec2::new(player.facing.sign() * grenade.throw_force, lift);
        let origin = player.fire_point(&tuning);
        self.throw_grenade(origin, velocity, out_events);
        Ok(())
    }

    fn steer_enemy(
        &mut self,
        id: EnemyId,
        velocity_x: f32,
        velocity_y: Option<f32>,
        facing: Facing,
        posture: EnemyPosture,
    ) {
        let Some(enemy) = self.enemies.get_mut(id) else {
            log::trace!("steering unknown enemy {}", id.get());
            return;
        };
        if enemy.is_dead() {
            return;
        }
        enemy.body.velocity.x = velocity_x;
        if let Some(velocity_y) = velocity_y {
            enemy.body.velocity.y = velocity_y;
        }
        enemy.facing = facing;
        enemy.posture = posture;
    }

    fn spawn_enemy(&mut self, archetype: ArchetypeId, position: Vec2, out_events: &mut Vec<Event>) {
        let Some(definition) = self.config.bestiary.get(archetype) else {
            log::warn!("cannot spawn unknown archetype {}", archetype.get());
            return;
        };
        let position = Vec2::new(self.layout.clamp_x(position.x), position.y);
        let enemy = self.enemies.spawn(definition, position);
        if definition.rank != EnemyRank::Basic {
            log::debug!(
                "spawned {:?} {} as enemy {}",
                definition.rank,
                definition.name,
                enemy.get()
            );
        }
        out_events.push(Event::EnemySpawned {
            enemy,
            archetype,
            position,
        });
    }

    fn fire_enemy_projectile(&mut self, id: EnemyId, direction: Vec2, out_events: &mut Vec<Event>) {
        let Some(enemy) = self.enemies.get(id) else {
            log::trace!("unknown enemy {} tried to fire", id.get());
            return;
        };
        if enemy.is_dead() {
            return;
        }
        let Some(archetype) = self.config.bestiary.get(enemy.archetype) else {
            log::warn!("enemy {} has no archetype", id.get());
            return;
        };
        let AttackProfile::Ranged(attack) = archetype.behavior.attack else {
            log::warn!("{} has no ranged attack", archetype.name);
            return;
        };
        let offset = archetype.muzzle_offset;
        let origin = enemy.body.position + Vec2::new(offset.x * enemy.facing.sign(), offset.y);

        let _ = self.spawn_projectile(
            Source::Enemy(id),
            attack.projectile,
            origin,
            direction,
            out_events,
        );
        out_events.push(Event::EffectRequested {
            effect: EffectRequest::at(EffectKind::MuzzleFlash, origin),
        });
        out_events.push(Event::SoundRequested {
            cue: SoundCue::new(SoundClip::EnemyShot),
        });
    }

    fn strike_player(
        &mut self,
        id: EnemyId,
        damage: u32,
        knockback: f32,
        out_events: &mut Vec<Event>,
    ) {
        let Some(enemy) = self.enemies.get(id) else {
            return;
        };
        if enemy.is_dead() {
            return;
        }
        let Some(player) = self.player.as_ref() else {
            return;
        };
        let away = Facing::toward(enemy.body.position.x, player.body.position.x);
        self.damage_player(damage, away.unit() * knockback, out_events);
    }

    fn activate_exit(&mut self, out_events: &mut Vec<Event>) {
        if self.exit.active {
            return;
        }
        self.exit.active = true;
        log::debug!("exit opened on floor {}", self.run.floor);
        out_events.push(Event::ExitActivated);
        out_events.push(Event::SoundRequested {
            cue: SoundCue::new(SoundClip::ExitOpened),
        });
    }
}

/// Discrete actions requested by an input frame; a held trigger is not one.
fn pressed_actions(input: &PlayerInput) -> Vec<PlayerAction> {
    [
        (input.jump, PlayerAction::Jump),
        (input.dodge, PlayerAction::Dodge),
        (input.swap_weapon, PlayerAction::Swap),
        (input.reload, PlayerAction::Reload),
        (input.melee, PlayerAction::Melee),
        (input.throw_grenade, PlayerAction::ThrowGrenade),
    ]
    .into_iter()
    .filter_map(|(pressed, action)| pressed.then_some(action))
    .collect()
}

fn reject(action: PlayerAction, reason: ActionError, out_events: &mut Vec<Event>) {
    log::trace!("{action:?} rejected: {reason}");
    out_events.push(Event::ActionRejected { action, reason });
}

fn report(action: PlayerAction, outcome: Result<(), ActionError>, out_events: &mut Vec<Event>) {
    if let Err(reason) = outcome {
        reject(action, reason, out_events);
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::StartRun { mode } => {
            world.reset_run(mode);
            world.clear_arena();
            world.player = None;
            world.arena = None;
            log::debug!("run started in {mode:?} mode");
            out_events.push(Event::RunStarted { mode });
        }
        Command::ResetRun => {
            let mode = world.run.mode;
            world.reset_run(mode);
        }
        Command::LoadLevel { arena, layout } => world.load_level(arena, layout, out_events),
        Command::Tick { dt } => world.tick(dt, out_events),
        Command::SubmitInput { input } => world.submit_input(input, out_events),
        Command::SteerEnemy {
            enemy,
            velocity_x,
            velocity_y,
            facing,
            posture,
        } => world.steer_enemy(enemy, velocity_x, velocity_y, facing, posture),
        Command::FireEnemyProjectile { enemy, direction } => {
            world.fire_enemy_projectile(enemy, direction, out_events);
        }
        Command::StrikePlayer {
            enemy,
            damage,
            knockback,
        } => world.strike_player(enemy, damage, knockback, out_events),
        Command::SpawnEnemy {
            archetype,
            position,
        } => world.spawn_enemy(archetype, position, out_events),
        Command::AnnounceWave { wave } => {
            world.run.current_waves = wave;
            log::debug!("wave {wave} started");
            out_events.push(Event::WaveStarted { wave });
        }
        Command::ActivateExit => world.activate_exit(out_events),
        Command::SpawnPickup { kind, position } => world.spawn_pickup(kind, position, out_events),
        Command::AdvanceFloor => {
            world.run.floor = world.run.floor.saturating_add(1);
            out_events.push(Event::FloorAdvanced {
                floor: world.run.floor,
            });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use zenith_core::{
        ArenaId, Bestiary, EnemyView, ExitSnapshot, LevelLayout, PlayerSnapshot, ProjectileView,
        RunSnapshot,
    };

    use super::World;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Total simulated time.
    #[must_use]
    pub fn clock(world: &World) -> Duration {
        world.clock
    }

    /// Counters and vitals of the current run.
    #[must_use]
    pub fn run_snapshot(world: &World) -> RunSnapshot {
        let run = &world.run;
        RunSnapshot {
            mode: run.mode,
            floor: run.floor,
            current_waves: run.current_waves,
            total_kills: run.total_kills,
            basic_kills: run.basic_kills,
            elite_kills: run.elite_kills,
            boss_kills: run.boss_kills,
            health: run.health,
            max_health: run.max_health,
            armour: run.armour,
            max_armour: run.max_armour,
            grenades: run.grenades,
            max_grenades: run.max_grenades,
            grenade_type: run.grenade.name.clone(),
            primary: Some(world.arsenal.primary_snapshot()),
            secondary: world.arsenal.secondary_snapshot(),
            using_primary: world.arsenal.using_primary(),
            melee_weapon: world.arsenal.melee_weapon(),
        }
    }

    /// Snapshot of the player body, if a level is loaded.
    #[must_use]
    pub fn player_snapshot(world: &World) -> Option<PlayerSnapshot> {
        world
            .player
            .as_ref()
            .map(|player| player.snapshot(world.run.health, world.run.armour))
    }

    /// Captures a read-only view of every enemy, dying ones included.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(world.enemies.snapshots())
    }

    /// Number of enemies in the arena, dying ones included.
    #[must_use]
    pub fn enemy_population(world: &World) -> usize {
        world.enemies.len()
    }

    /// Captures a read-only view of every projectile in flight.
    #[must_use]
    pub fn projectile_view(world: &World) -> ProjectileView {
        ProjectileView::from_snapshots(
            world
                .projectiles
                .iter()
                .map(|projectile| projectile.snapshot())
                .collect(),
        )
    }

    /// Number of grenades waiting for their fuse.
    #[must_use]
    pub fn live_grenades(world: &World) -> usize {
        world.grenades.len()
    }

    /// Number of pickups lying in the arena.
    #[must_use]
    pub fn pickup_count(world: &World) -> usize {
        world.pickups.len()
    }

    /// State of the floor exit.
    #[must_use]
    pub fn exit_state(world: &World) -> ExitSnapshot {
        ExitSnapshot {
            position: world.exit.position,
            half_width: world.exit.half_width,
            active: world.exit.active,
            entered: world.exit.entered,
        }
    }

    /// Geometry of the loaded level.
    #[must_use]
    pub fn level_layout(world: &World) -> LevelLayout {
        world.layout
    }

    /// Arena of the loaded level, if any.
    #[must_use]
    pub fn arena(world: &World) -> Option<ArenaId> {
        world.arena
    }

    /// Enemy catalogue the world spawns from.
    #[must_use]
    pub fn bestiary(world: &World) -> &Bestiary {
        &world.config.bestiary
    }
}
