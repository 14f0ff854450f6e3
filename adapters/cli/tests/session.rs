use std::time::Duration;

use zenith_cli::{GameConfig, Outcome, Session};
use zenith_core::RunMode;
use zenith_world::query;

const TICK: Duration = Duration::from_millis(10);

fn seeded(seed: u64) -> GameConfig {
    let mut config = GameConfig::default();
    config.reseed(seed);
    config
}

#[test]
fn identical_seeds_replay_identically() {
    let play = || {
        let mut session =
            Session::new(seeded(0xfeed), RunMode::Tower, TICK).expect("valid session");
        session.run(Duration::from_secs(30))
    };
    let first = play();
    assert_eq!(first, play());
    assert!(first.events > 0);
}

#[test]
fn tower_runs_start_on_the_first_floor_and_bring_waves() {
    let mut session = Session::new(seeded(7), RunMode::Tower, TICK).expect("valid session");
    assert_eq!(query::run_snapshot(session.world()).floor, 1);
    assert!(query::arena(session.world()).is_some());

    let summary = session.run(Duration::from_secs(10));

    assert!(summary.waves >= 1);
}

#[test]
fn survival_runs_stay_on_one_floor() {
    let mut session = Session::new(seeded(9), RunMode::Survival, TICK).expect("valid session");

    let summary = session.run(Duration::from_secs(30));

    assert_eq!(summary.mode, RunMode::Survival);
    assert_eq!(summary.floor, 1);
    assert!(summary.waves >= 1);
}

#[test]
fn finished_sessions_stop_advancing() {
    let mut session = Session::new(seeded(3), RunMode::Tower, TICK).expect("valid session");
    let summary = session.run(Duration::from_secs(1));
    assert_eq!(summary.outcome, Outcome::TimeLimit);
    assert_eq!(summary.clock, Duration::from_secs(1));
}

#[test]
fn zero_ticks_are_rejected() {
    assert!(Session::new(GameConfig::default(), RunMode::Tower, Duration::ZERO).is_err());
}

#[test]
fn missing_first_arena_is_an_error() {
    let mut config = GameConfig::default();
    config.arenas.pools.opening.clear();
    assert!(Session::new(config, RunMode::Tower, TICK).is_err());
}

#[test]
fn bundled_configuration_loads() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("zenith.toml");
    let config = GameConfig::load(Some(&path)).expect("bundled configuration");
    assert_eq!(config.world.rng_seed, 20_260_101);
    assert_eq!(config.spawning.tower.base_waves, 3);
    assert!(Session::new(config, RunMode::Tower, TICK).is_ok());
}

#[test]
fn missing_configuration_files_are_reported() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("missing.toml");
    assert!(GameConfig::load(Some(&path)).is_err());
}
