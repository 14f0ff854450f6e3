//! Fixed-step driver that wires the world to its systems.

use std::{fmt, time::Duration};

use anyhow::{bail, Context, Result};
use zenith_core::{ArenaId, CameraView, Command, Event, LevelLayout, RunMode, SceneRequest};
use zenith_system_enemy_ai::{Config as EnemyAiConfig, EnemyAi};
use zenith_system_spawning::{ArenaSelector, SpawnContext, Spawning};
use zenith_world::{self as world, query, World};

use crate::{autopilot::Autopilot, config::GameConfig};

/// How a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The final floor was cleared.
    Victory,
    /// The player died.
    Defeat,
    /// The world asked to return to the menu.
    Abandoned,
    /// Simulated time ran out first.
    TimeLimit,
}

/// Counters printed when a session ends.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    /// Progression loop of the run.
    pub mode: RunMode,
    /// How the run ended.
    pub outcome: Outcome,
    /// Floor reached.
    pub floor: u32,
    /// Waves of the floor, or the survival wave reached.
    pub waves: u32,
    /// Every enemy killed.
    pub total_kills: u32,
    /// Basic enemies killed.
    pub basic_kills: u32,
    /// Elite enemies killed.
    pub elite_kills: u32,
    /// Bosses killed.
    pub boss_kills: u32,
    /// Health left.
    pub health: f32,
    /// Simulated time.
    pub clock: Duration,
    /// Fixed steps taken.
    pub frames: u64,
    /// Events the world reported.
    pub events: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:?} run ended: {:?}", self.mode, self.outcome)?;
        writeln!(f, "  floor {} (waves {})", self.floor, self.waves)?;
        writeln!(
            f,
            "  kills {} (basic {}, elite {}, boss {})",
            self.total_kills, self.basic_kills, self.elite_kills, self.boss_kills
        )?;
        writeln!(f, "  health {:.1}", self.health)?;
        write!(
            f,
            "  {:.2}s simulated over {} frames, {} events",
            self.clock.as_secs_f64(),
            self.frames,
            self.events
        )
    }
}

/// World, systems and autopilot advanced together at a fixed step.
#[derive(Debug)]
pub struct Session {
    world: World,
    enemy_ai: EnemyAi,
    spawning: Spawning,
    arenas: ArenaSelector,
    autopilot: Autopilot,
    layout: LevelLayout,
    camera_half_width: f32,
    tick: Duration,
    mode: RunMode,
    frames: u64,
    events: usize,
    outcome: Option<Outcome>,
}

impl Session {
    /// Builds every component and loads the first level.
    pub fn new(config: GameConfig, mode: RunMode, tick: Duration) -> Result<Self> {
        if tick.is_zero() {
            bail!("the fixed step must be positive");
        }
        let seed = config.world.rng_seed;
        let world = World::new(config.world).context("invalid world configuration")?;
        let spawning = Spawning::new(config.spawning).context("invalid spawning configuration")?;

        let mut session = Self {
            world,
            enemy_ai: EnemyAi::new(EnemyAiConfig::new(seed.rotate_left(32))),
            spawning,
            arenas: ArenaSelector::new(config.arenas.pools, seed.rotate_left(48)),
            autopilot: Autopilot::new(config.autopilot),
            layout: config.arenas.layout,
            camera_half_width: config.camera_half_width,
            tick,
            mode,
            frames: 0,
            events: 0,
            outcome: None,
        };

        session.dispatch(vec![Command::StartRun { mode }]);
        let floor = query::run_snapshot(&session.world).floor;
        let arena = session
            .arena_for(floor)
            .with_context(|| format!("no arena configured for floor {floor}"))?;
        session.dispatch(vec![Command::LoadLevel {
            arena,
            layout: session.layout,
        }]);
        Ok(session)
    }

    /// Banner reported by the world.
    #[must_use]
    pub fn banner(&self) -> &'static str {
        query::welcome_banner(&self.world)
    }

    /// Read-only access to the simulated world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Advances one fixed step and reports the outcome once the run ends.
    pub fn step(&mut self) -> Option<Outcome> {
        if self.outcome.is_some() {
            return self.outcome;
        }

        let player = query::player_snapshot(&self.world);
        let input = self.autopilot.input(
            player.as_ref(),
            &query::enemy_view(&self.world),
            &query::exit_state(&self.world),
            &query::run_snapshot(&self.world),
        );
        self.frames += 1;
        self.dispatch(vec![
            Command::SubmitInput { input },
            Command::Tick { dt: self.tick },
        ]);
        self.outcome
    }

    /// Steps until the run ends or `limit` of simulated time has passed.
    pub fn run(&mut self, limit: Duration) -> RunSummary {
        while self.outcome.is_none() && query::clock(&self.world) < limit {
            let _ = self.step();
        }
        self.summary()
    }

    /// Counters of the run so far.
    #[must_use]
    pub fn summary(&self) -> RunSummary {
        let run = query::run_snapshot(&self.world);
        RunSummary {
            mode: self.mode,
            outcome: self.outcome.unwrap_or(Outcome::TimeLimit),
            floor: run.floor,
            waves: run.current_waves,
            total_kills: run.total_kills,
            basic_kills: run.basic_kills,
            elite_kills: run.elite_kills,
            boss_kills: run.boss_kills,
            health: run.health,
            clock: query::clock(&self.world),
            frames: self.frames,
            events: self.events,
        }
    }

    /// Applies commands and feeds the resulting events through the systems
    /// until nothing new is produced.
    fn dispatch(&mut self, commands: Vec<Command>) {
        let mut commands = commands;
        let mut events = Vec::new();

        while !commands.is_empty() {
            events.clear();
            for command in commands.drain(..) {
                world::apply(&mut self.world, command, &mut events);
            }
            self.events += events.len();

            self.run_systems(&events, &mut commands);
            self.handle_scenes(&events, &mut commands);
        }
    }

    fn run_systems(&mut self, events: &[Event], out: &mut Vec<Command>) {
        let player = query::player_snapshot(&self.world);
        let enemies = query::enemy_view(&self.world);
        self.enemy_ai.handle(
            events,
            query::bestiary(&self.world),
            &enemies,
            player.as_ref(),
            out,
        );

        let player_x = player.map(|player| player.position.x);
        let context = SpawnContext {
            player_x,
            camera: CameraView {
                center_x: player_x.unwrap_or_default(),
                half_width: self.camera_half_width,
            },
            layout: query::level_layout(&self.world),
            enemy_population: query::enemy_population(&self.world),
        };
        self.spawning.handle(events, &context, out);
    }

    fn handle_scenes(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            let Event::SceneRequested { request } = event else {
                continue;
            };
            match request {
                SceneRequest::NextFloor => {
                    let floor = query::run_snapshot(&self.world).floor.saturating_add(1);
                    let arena = self
                        .arena_for(floor)
                        .or_else(|| query::arena(&self.world));
                    out.push(Command::AdvanceFloor);
                    match arena {
                        Some(arena) => out.push(Command::LoadLevel {
                            arena,
                            layout: self.layout,
                        }),
                        None => log::warn!("no arena to load for floor {floor}"),
                    }
                }
                SceneRequest::GameOver { victory } => {
                    log::info!("game over after {} frames", self.frames);
                    self.outcome = Some(if *victory {
                        Outcome::Victory
                    } else {
                        Outcome::Defeat
                    });
                }
                SceneRequest::MainMenu => self.outcome = Some(Outcome::Abandoned),
            }
        }
    }

    fn arena_for(&mut self, floor: u32) -> Option<ArenaId> {
        match self.mode {
            RunMode::Tower => self.arenas.select(floor),
            RunMode::Survival => self.arenas.select(1),
        }
    }
}
