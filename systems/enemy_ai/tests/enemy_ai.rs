use std::time::Duration;

use glam::Vec2;
use zenith_core::{
    ArchetypeId, ArenaId, Command, EnemyPosture, Event, Facing, LevelLayout, PlayerInput, RunMode,
};
use zenith_system_enemy_ai::{Config, EnemyAi};
use zenith_world::{self as world, catalog, query, World, WorldConfig};

const STEP: Duration = Duration::from_millis(10);

fn ready_world() -> World {
    let mut world = World::new(WorldConfig::default()).expect("valid configuration");
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
    world
}

fn spawn(world: &mut World, archetype: ArchetypeId, x: f32) {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::SpawnEnemy {
            archetype,
            position: Vec2::new(x, -2.6),
        },
        &mut events,
    );
}

/// Drives the world and the controller the way an adapter does.
fn pump(world: &mut World, ai: &mut EnemyAi, frames: usize) -> Vec<Event> {
    let mut log = Vec::new();
    for _ in 0..frames {
        let mut events = Vec::new();
        world::apply(
            world,
            Command::SubmitInput {
                input: PlayerInput::default(),
            },
            &mut events,
        );
        world::apply(world, Command::Tick { dt: STEP }, &mut events);

        let mut commands = Vec::new();
        let player = query::player_snapshot(world);
        ai.handle(
            &events,
            query::bestiary(world),
            &query::enemy_view(world),
            player.as_ref(),
            &mut commands,
        );
        log.extend(events);
        for command in commands {
            world::apply(world, command, &mut log);
        }
    }
    log
}

fn player_damage(events: &[Event]) -> Vec<u32> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::PlayerDamaged { amount, .. } => Some(*amount),
            _ => None,
        })
        .collect()
}

#[test]
fn grunt_walks_up_and_strikes() {
    let mut world = ready_world();
    let mut ai = EnemyAi::new(Config::new(0x1d));
    spawn(&mut world, catalog::GRUNT, 4.0);

    let early = pump(&mut world, &mut ai, 50);
    assert!(player_damage(&early).is_empty());
    let view = query::enemy_view(&world);
    let grunt = view.iter().next().expect("grunt");
    assert_eq!(grunt.facing, Facing::Left);
    assert_eq!(grunt.posture, EnemyPosture::Moving);
    assert!(grunt.position.x < 4.0);

    let later = pump(&mut world, &mut ai, 250);
    assert_eq!(player_damage(&later).first(), Some(&10));
}

#[test]
fn gunner_opens_fire_from_range() {
    let mut world = ready_world();
    let mut ai = EnemyAi::new(Config::new(0x2e));
    spawn(&mut world, catalog::GUNNER, -9.0);

    let events = pump(&mut world, &mut ai, 500);

    let shots = events
        .iter()
        .filter(|event| matches!(event, Event::ProjectileSpawned { .. }))
        .count();
    assert!(shots > 0);
    assert!(player_damage(&events).contains(&8));

    let gunner = query::enemy_view(&world)
        .into_vec()
        .pop()
        .expect("gunner");
    assert!((gunner.position.x - -5.0).abs() < 0.1);
    assert_eq!(gunner.facing, Facing::Right);
}

#[test]
fn drone_hovers_above_the_player() {
    let mut world = ready_world();
    let mut ai = EnemyAi::new(Config::new(0x3f));
    spawn(&mut world, catalog::DRONE, 3.0);

    let _ = pump(&mut world, &mut ai, 400);

    let drone = query::enemy_view(&world)
        .into_vec()
        .pop()
        .expect("drone");
    let player = query::player_snapshot(&world).expect("player");
    assert!((drone.position.y - (player.position.y + 3.0)).abs() <= 0.15);
}

#[test]
fn identical_seeds_replay_identically() {
    let run = || {
        let mut world = ready_world();
        let mut ai = EnemyAi::new(Config::new(0x44));
        spawn(&mut world, catalog::GRUNT, 3.0);
        spawn(&mut world, catalog::GRUNT, 3.0);
        spawn(&mut world, catalog::MARKSMAN, -12.0);
        pump(&mut world, &mut ai, 400)
    };
    assert_eq!(run(), run());
}
