use std::time::Duration;

use glam::Vec2;
use zenith_core::{
    ActionError, ArchetypeId, ArenaId, Command, DropTable, EnemyId, EnemyPosture, Event, Facing,
    HitTarget, LevelLayout, PickupKind, PlayerAction, PlayerInput, PlayerState, Reserve,
    RetireReason, RunMode, SceneRequest,
};
use zenith_world::{self as world, catalog, query, Loadout, World, WorldConfig};

const STEP: Duration = Duration::from_millis(10);

fn ready_world(config: WorldConfig) -> World {
    let mut world = World::new(config).expect("valid configuration");
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::StartRun {
            mode: RunMode::Tower,
        },
        &mut events,
    );
    world::apply(
        &mut world,
        Command::LoadLevel {
            arena: ArenaId::new(1),
            layout: LevelLayout::default(),
        },
        &mut events,
    );
    world::apply(
        &mut world,
        Command::Tick {
            dt: Duration::from_secs(1),
        },
        &mut events,
    );
    assert_eq!(
        query::player_snapshot(&world).map(|player| player.state),
        Some(PlayerState::Normal)
    );
    world
}

fn spawn(world: &mut World, archetype: ArchetypeId, x: f32) -> EnemyId {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::SpawnEnemy {
            archetype,
            position: Vec2::new(x, -2.6),
        },
        &mut events,
    );
    events
        .iter()
        .find_map(|event| match event {
            Event::EnemySpawned { enemy, .. } => Some(*enemy),
            _ => None,
        })
        .expect("enemy spawned")
}

fn send(world: &mut World, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, command, &mut events);
    events
}

fn press(world: &mut World, input: PlayerInput) -> Vec<Event> {
    send(world, Command::SubmitInput { input })
}

/// Holds the given enemies in place, then advances one step.
fn step(world: &mut World, pinned: &[EnemyId]) -> Vec<Event> {
    let mut events = Vec::new();
    for &enemy in pinned {
        world::apply(
            world,
            Command::SteerEnemy {
                enemy,
                velocity_x: 0.0,
                velocity_y: None,
                facing: Facing::Left,
                posture: EnemyPosture::Idle,
            },
            &mut events,
        );
    }
    world::apply(world, Command::Tick { dt: STEP }, &mut events);
    events
}

fn rejection(events: &[Event], wanted: PlayerAction) -> Option<ActionError> {
    events.iter().find_map(|event| match event {
        Event::ActionRejected { action, reason } if *action == wanted => Some(*reason),
        _ => None,
    })
}

fn damage_to(events: &[Event], target: EnemyId) -> Vec<u32> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::EnemyDamaged { enemy, amount, .. } if *enemy == target => Some(*amount),
            _ => None,
        })
        .collect()
}

const FIRE: PlayerInput = PlayerInput {
    horizontal: 0.0,
    crouch: false,
    jump: false,
    dodge: false,
    fire: true,
    melee: false,
    reload: false,
    swap_weapon: false,
    throw_grenade: false,
};

#[test]
fn armour_absorbs_first_and_health_stops_at_zero() {
    let mut config = WorldConfig::default();
    config.run.starting_armour = 20.0;
    let mut world = ready_world(config);
    let grunt = spawn(&mut world, catalog::GRUNT, 2.0);

    let events = send(
        &mut world,
        Command::StrikePlayer {
            enemy: grunt,
            damage: 35,
            knockback: 3.0,
        },
    );
    assert!(events.contains(&Event::PlayerDamaged {
        amount: 35,
        absorbed: 20.0,
        health: 85.0,
        armour: 0.0,
    }));

    let ignored = send(
        &mut world,
        Command::StrikePlayer {
            enemy: grunt,
            damage: 35,
            knockback: 3.0,
        },
    );
    assert!(ignored.is_empty(), "hit invincibility swallows the second strike");
    assert_eq!(query::run_snapshot(&world).health, 85.0);

    let _ = send(
        &mut world,
        Command::Tick {
            dt: Duration::from_millis(500),
        },
    );
    let lethal = send(
        &mut world,
        Command::StrikePlayer {
            enemy: grunt,
            damage: 500,
            knockback: 3.0,
        },
    );
    assert!(lethal.contains(&Event::PlayerDied));
    assert!(lethal.contains(&Event::SceneRequested {
        request: SceneRequest::GameOver { victory: false },
    }));
    assert_eq!(query::run_snapshot(&world).health, 0.0);
    assert_eq!(
        query::player_snapshot(&world).map(|player| player.state),
        Some(PlayerState::Dead)
    );

    let _ = send(
        &mut world,
        Command::Tick {
            dt: Duration::from_secs(1),
        },
    );
    let after_death = send(
        &mut world,
        Command::StrikePlayer {
            enemy: grunt,
            damage: 10,
            knockback: 3.0,
        },
    );
    assert!(after_death.is_empty());
}

#[test]
fn dodge_is_invincible_for_exactly_its_duration() {
    let mut world = ready_world(WorldConfig::default());
    let grunt = spawn(&mut world, catalog::GRUNT, 8.0);
    let strike = Command::StrikePlayer {
        enemy: grunt,
        damage: 10,
        knockback: 0.0,
    };

    let events = press(
        &mut world,
        PlayerInput {
            dodge: true,
            ..PlayerInput::default()
        },
    );
    assert!(events.contains(&Event::PlayerStateChanged {
        from: PlayerState::Normal,
        to: PlayerState::Dodging,
    }));
    assert!(send(&mut world, strike.clone()).is_empty());

    let _ = send(
        &mut world,
        Command::Tick {
            dt: Duration::from_millis(240),
        },
    );
    assert!(send(&mut world, strike.clone()).is_empty());

    let ended = send(
        &mut world,
        Command::Tick {
            dt: Duration::from_millis(10),
        },
    );
    assert!(ended.contains(&Event::PlayerStateChanged {
        from: PlayerState::Dodging,
        to: PlayerState::Normal,
    }));
    let hit = send(&mut world, strike);
    assert!(hit
        .iter()
        .any(|event| matches!(event, Event::PlayerDamaged { amount: 10, .. })));
}

#[test]
fn next_dodge_waits_for_duration_plus_cooldown() {
    let mut world = ready_world(WorldConfig::default());
    let dodge = PlayerInput {
        dodge: true,
        ..PlayerInput::default()
    };

    assert_eq!(rejection(&press(&mut world, dodge), PlayerAction::Dodge), None);
    let _ = send(
        &mut world,
        Command::Tick {
            dt: Duration::from_millis(250),
        },
    );
    assert_eq!(
        rejection(&press(&mut world, dodge), PlayerAction::Dodge),
        Some(ActionError::DodgeRecharging)
    );

    let _ = send(
        &mut world,
        Command::Tick {
            dt: Duration::from_millis(490),
        },
    );
    assert_eq!(
        rejection(&press(&mut world, dodge), PlayerAction::Dodge),
        Some(ActionError::DodgeRecharging)
    );

    let _ = send(
        &mut world,
        Command::Tick {
            dt: Duration::from_millis(10),
        },
    );
    assert_eq!(rejection(&press(&mut world, dodge), PlayerAction::Dodge), None);
}

#[test]
fn input_is_rejected_while_the_intro_plays() {
    let mut world = World::new(WorldConfig::default()).expect("valid configuration");
    let _ = send(
        &mut world,
        Command::LoadLevel {
            arena: ArenaId::new(3),
            layout: LevelLayout::default(),
        },
    );
    let events = press(
        &mut world,
        PlayerInput {
            jump: true,
            fire: true,
            ..PlayerInput::default()
        },
    );
    assert_eq!(
        events,
        vec![Event::ActionRejected {
            action: PlayerAction::Jump,
            reason: ActionError::InputLocked,
        }]
    );
    assert!(query::projectile_view(&world).iter().next().is_none());
}

#[test]
fn rifle_round_damages_pierce_plus_one_targets() {
    let mut world = ready_world(WorldConfig::default());
    let grunts = [
        spawn(&mut world, catalog::GRUNT, 3.0),
        spawn(&mut world, catalog::GRUNT, 4.0),
        spawn(&mut world, catalog::GRUNT, 5.0),
    ];

    let swapped = press(
        &mut world,
        PlayerInput {
            swap_weapon: true,
            ..PlayerInput::default()
        },
    );
    assert!(swapped.contains(&Event::WeaponSwapped {
        weapon: catalog::RIFLE,
        using_primary: false,
    }));

    let mut events = press(&mut world, FIRE);
    for _ in 0..100 {
        events.extend(step(&mut world, &grunts));
    }

    let hits: Vec<HitTarget> = events
        .iter()
        .filter_map(|event| match event {
            Event::ProjectileHit { target, .. } => Some(*target),
            _ => None,
        })
        .collect();
    assert_eq!(
        hits,
        vec![HitTarget::Enemy(grunts[0]), HitTarget::Enemy(grunts[1])]
    );
    assert!(events.iter().any(|event| matches!(
        event,
        Event::ProjectileRetired {
            reason: RetireReason::PierceExhausted,
            ..
        }
    )));

    let view = query::enemy_view(&world);
    assert_eq!(view.get(grunts[0]).map(|enemy| enemy.health), Some(42));
    assert_eq!(view.get(grunts[1]).map(|enemy| enemy.health), Some(42));
    assert_eq!(view.get(grunts[2]).map(|enemy| enemy.health), Some(50));
}

#[test]
fn rocket_blast_hits_each_body_in_range_once() {
    let config = WorldConfig {
        loadout: Loadout {
            secondary: Some(catalog::LAUNCHER),
            secondary_reserve: 6,
            ..Loadout::default()
        },
        ..WorldConfig::default()
    };
    let mut world = ready_world(config);
    let near = [
        spawn(&mut world, catalog::GRUNT, 3.0),
        spawn(&mut world, catalog::GRUNT, 3.8),
        spawn(&mut world, catalog::GRUNT, 4.6),
    ];
    let far = spawn(&mut world, catalog::GRUNT, 6.5);
    let all = [near[0], near[1], near[2], far];

    let _ = press(
        &mut world,
        PlayerInput {
            swap_weapon: true,
            ..PlayerInput::default()
        },
    );
    let mut events = press(&mut world, FIRE);
    for _ in 0..100 {
        events.extend(step(&mut world, &all));
    }

    for enemy in near {
        assert_eq!(damage_to(&events, enemy), vec![40]);
    }
    assert!(damage_to(&events, far).is_empty());
    assert_eq!(
        events
            .iter()
            .filter(|event| matches!(
                event,
                Event::ProjectileRetired {
                    reason: RetireReason::Exploded,
                    ..
                }
            ))
            .count(),
        1
    );
    assert_eq!(query::run_snapshot(&world).health, 100.0);
}

#[test]
fn dead_enemies_ignore_damage_and_despawn_after_their_delay() {
    let mut world = ready_world(WorldConfig::default());
    let grunt = spawn(&mut world, catalog::GRUNT, 3.0);

    let mut events = Vec::new();
    for _ in 0..300 {
        events.extend(press(&mut world, FIRE));
        events.extend(step(&mut world, &[grunt]));
        if events
            .iter()
            .any(|event| matches!(event, Event::EnemyDied { .. }))
        {
            break;
        }
    }
    assert_eq!(damage_to(&events, grunt), vec![10, 10, 10, 10, 10]);

    let run = query::run_snapshot(&world);
    assert_eq!(run.total_kills, 1);
    assert_eq!(run.basic_kills, 1);
    assert_eq!(query::enemy_population(&world), 1);

    let mut after = Vec::new();
    for _ in 0..250 {
        after.extend(press(&mut world, FIRE));
        after.extend(step(&mut world, &[grunt]));
    }
    assert!(damage_to(&after, grunt).is_empty());
    assert!(after.contains(&Event::EnemyDespawned { enemy: grunt }));
    assert_eq!(query::enemy_population(&world), 0);
    assert_eq!(query::run_snapshot(&world).total_kills, 1);
}

#[test]
fn guaranteed_loot_drops_where_the_enemy_died() {
    let mut grunt = catalog::bestiary()
        .get(catalog::GRUNT)
        .cloned()
        .expect("grunt archetype");
    grunt.max_health = 10;
    grunt.drops = DropTable {
        chance: 1.0,
        pickups: vec![PickupKind::Armour { amount: 25.0 }],
    };
    let config = WorldConfig {
        bestiary: zenith_core::Bestiary::new(vec![grunt]),
        ..WorldConfig::default()
    };
    let mut world = ready_world(config);
    let enemy = spawn(&mut world, catalog::GRUNT, 3.0);

    let mut events = press(&mut world, FIRE);
    for _ in 0..50 {
        events.extend(step(&mut world, &[enemy]));
    }
    assert!(events.iter().any(|event| matches!(
        event,
        Event::PickupSpawned {
            kind: PickupKind::Armour { .. },
            ..
        }
    )));
    assert_eq!(query::pickup_count(&world), 1);

    let mut walk = press(
        &mut world,
        PlayerInput {
            horizontal: 1.0,
            ..PlayerInput::default()
        },
    );
    for _ in 0..60 {
        walk.extend(step(&mut world, &[]));
    }
    assert!(walk.iter().any(|event| matches!(
        event,
        Event::PickupCollected {
            kind: PickupKind::Armour { .. },
            ..
        }
    )));
    assert_eq!(query::pickup_count(&world), 0);
    assert_eq!(query::run_snapshot(&world).armour, 25.0);
}

#[test]
fn pickups_respect_their_caps() {
    let mut world = ready_world(WorldConfig::default());
    let here = Vec2::new(0.0, -2.5);
    for kind in [
        PickupKind::Health {
            amount: 30.0,
            overheal: true,
        },
        PickupKind::Armour { amount: 80.0 },
        PickupKind::GrenadeAmmo { amount: 10 },
        PickupKind::SecondaryAmmo,
    ] {
        let _ = send(&mut world, Command::SpawnPickup { kind, position: here });
    }
    let events = step(&mut world, &[]);
    assert_eq!(
        events
            .iter()
            .filter(|event| matches!(event, Event::PickupCollected { .. }))
            .count(),
        4
    );

    let run = query::run_snapshot(&world);
    assert_eq!(run.health, 130.0);
    assert_eq!(run.armour, run.max_armour);
    assert_eq!(run.grenades, run.max_grenades);
    assert_eq!(
        run.secondary.map(|ammo| ammo.reserve),
        Some(Reserve::Finite(150))
    );
}

#[test]
fn reload_and_fire_preconditions_are_reported() {
    let mut world = ready_world(WorldConfig::default());
    let reload = PlayerInput {
        reload: true,
        ..PlayerInput::default()
    };

    assert_eq!(
        rejection(&press(&mut world, reload), PlayerAction::Reload),
        Some(ActionError::ClipFull)
    );
    let fired = press(&mut world, FIRE);
    assert!(fired.iter().any(|event| matches!(
        event,
        Event::WeaponFired { weapon, .. } if *weapon == catalog::PISTOL
    )));
    assert_eq!(
        rejection(&press(&mut world, FIRE), PlayerAction::Fire),
        Some(ActionError::OnCooldown)
    );

    let started = press(&mut world, reload);
    assert!(started.contains(&Event::ReloadStarted {
        weapon: catalog::PISTOL
    }));
    assert_eq!(
        rejection(&press(&mut world, FIRE), PlayerAction::Fire),
        Some(ActionError::Reloading)
    );

    let finished = send(
        &mut world,
        Command::Tick {
            dt: Duration::from_secs(1),
        },
    );
    assert!(finished.contains(&Event::ReloadFinished {
        weapon: catalog::PISTOL,
        clip: 12,
        reserve: Reserve::Infinite,
    }));
}

#[test]
fn melee_swing_strikes_each_enemy_once() {
    let mut world = ready_world(WorldConfig::default());
    let grunt = spawn(&mut world, catalog::GRUNT, 1.2);

    let mut events = press(
        &mut world,
        PlayerInput {
            melee: true,
            ..PlayerInput::default()
        },
    );
    assert!(events.contains(&Event::MeleeSwingStarted { weapon: None }));
    for _ in 0..80 {
        events.extend(step(&mut world, &[grunt]));
    }
    assert_eq!(damage_to(&events, grunt), vec![25]);
}

#[test]
fn grenade_explodes_once_when_its_fuse_runs_out() {
    let mut world = ready_world(WorldConfig::default());
    let throw = PlayerInput {
        throw_grenade: true,
        ..PlayerInput::default()
    };

    let mut events = press(&mut world, throw);
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::GrenadeThrown { .. })));
    assert_eq!(query::run_snapshot(&world).grenades, 2);
    assert_eq!(
        rejection(&press(&mut world, throw), PlayerAction::ThrowGrenade),
        Some(ActionError::Busy)
    );
    assert_eq!(query::live_grenades(&world), 1);

    for _ in 0..200 {
        events.extend(step(&mut world, &[]));
    }
    assert_eq!(
        events
            .iter()
            .filter(|event| matches!(event, Event::GrenadeExploded { .. }))
            .count(),
        1
    );
    assert_eq!(query::live_grenades(&world), 0);
    assert_eq!(query::run_snapshot(&world).health, 100.0);
}

#[test]
fn grenade_type_pickup_changes_later_throws() {
    let mut world = ready_world(WorldConfig::default());
    let cluster = catalog::cluster_grenade();
    let _ = send(
        &mut world,
        Command::SpawnPickup {
            kind: PickupKind::GrenadeType {
                grenade: cluster.clone(),
                bonus: 1,
            },
            position: Vec2::new(0.0, -2.5),
        },
    );
    let _ = step(&mut world, &[]);
    let run = query::run_snapshot(&world);
    assert_eq!(run.grenade_type, "Cluster");
    assert_eq!(run.grenades, 4);

    let brutes: Vec<EnemyId> = (1..=8)
        .flat_map(|x| [x as f32, -(x as f32)])
        .map(|x| spawn(&mut world, catalog::BRUTE, x))
        .collect();
    let mut events = press(
        &mut world,
        PlayerInput {
            throw_grenade: true,
            ..PlayerInput::default()
        },
    );
    for _ in 0..200 {
        events.extend(step(&mut world, &brutes));
    }

    let blast_damage: Vec<u32> = brutes
        .iter()
        .flat_map(|&brute| damage_to(&events, brute))
        .collect();
    assert!(!blast_damage.is_empty());
    assert!(blast_damage.iter().all(|&amount| amount == cluster.damage));
    assert_ne!(cluster.damage, WorldConfig::default().grenade.damage);
}

#[test]
fn entering_the_exit_requests_the_next_floor() {
    let mut world = ready_world(WorldConfig::default());
    assert!(step(&mut world, &[]).iter().all(|event| *event != Event::ExitEntered));

    let opened = send(&mut world, Command::ActivateExit);
    assert!(opened.contains(&Event::ExitActivated));
    assert!(send(&mut world, Command::ActivateExit).is_empty());

    let events = step(&mut world, &[]);
    assert!(events.contains(&Event::ExitEntered));
    assert!(events.contains(&Event::SceneRequested {
        request: SceneRequest::NextFloor,
    }));
    assert_eq!(
        query::player_snapshot(&world).map(|player| player.state),
        Some(PlayerState::ElevatorLocked)
    );
    assert_eq!(
        rejection(
            &press(
                &mut world,
                PlayerInput {
                    dodge: true,
                    ..PlayerInput::default()
                }
            ),
            PlayerAction::Dodge
        ),
        Some(ActionError::InputLocked)
    );
    assert!(query::exit_state(&world).entered);
}

#[test]
fn leaving_the_final_floor_wins_the_run() {
    let mut world = World::new(WorldConfig::default()).expect("valid configuration");
    let _ = send(
        &mut world,
        Command::StartRun {
            mode: RunMode::Tower,
        },
    );
    for _ in 1..zenith_core::FINAL_FLOOR {
        let _ = send(&mut world, Command::AdvanceFloor);
    }
    let loaded = send(
        &mut world,
        Command::LoadLevel {
            arena: ArenaId::new(99),
            layout: LevelLayout::default(),
        },
    );
    assert!(loaded.contains(&Event::LevelLoaded {
        arena: ArenaId::new(99),
        mode: RunMode::Tower,
        floor: zenith_core::FINAL_FLOOR,
    }));
    let _ = send(
        &mut world,
        Command::Tick {
            dt: Duration::from_secs(1),
        },
    );
    let _ = send(&mut world, Command::ActivateExit);
    let events = step(&mut world, &[]);
    assert!(events.contains(&Event::SceneRequested {
        request: SceneRequest::GameOver { victory: true },
    }));
}

fn scripted_session() -> Vec<Event> {
    let mut world = ready_world(WorldConfig::default());
    let grunts = [
        spawn(&mut world, catalog::GRUNT, 2.5),
        spawn(&mut world, catalog::GUNNER, 4.0),
    ];
    let mut events = Vec::new();
    for frame in 0..400 {
        let input = PlayerInput {
            fire: frame % 3 != 0,
            throw_grenade: frame == 50,
            swap_weapon: frame == 120,
            ..PlayerInput::default()
        };
        events.extend(press(&mut world, input));
        if frame % 40 == 0 {
            events.extend(send(
                &mut world,
                Command::FireEnemyProjectile {
                    enemy: grunts[1],
                    direction: Vec2::new(-1.0, 0.0),
                },
            ));
        }
        events.extend(step(&mut world, &grunts));
    }
    events
}

#[test]
fn identical_sessions_replay_identically() {
    let first = scripted_session();
    let second = scripted_session();
    assert!(!first.is_empty());
    assert_eq!(first, second);
}
