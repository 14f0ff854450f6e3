#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line entry point that plays a headless Zenith run.

use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use zenith_cli::{GameConfig, Session};
use zenith_core::RunMode;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    Tower,
    Survival,
}

impl From<Mode> for RunMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Tower => RunMode::Tower,
            Mode::Survival => RunMode::Survival,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "zenith", about = "Plays a headless Zenith run with the autopilot")]
struct Cli {
    /// Progression loop to play.
    #[arg(long, value_enum, default_value_t = Mode::Tower)]
    mode: Mode,
    /// Seed for every random stream; the configured seeds are used without it.
    #[arg(long)]
    seed: Option<u64>,
    /// TOML file overriding the default tuning.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Simulated seconds before the run is cut short.
    #[arg(long, default_value = "600", value_parser = parse_seconds)]
    time_limit: Duration,
    /// Length of a fixed step in milliseconds.
    #[arg(long, default_value_t = 10)]
    tick_ms: u64,
}

fn parse_seconds(value: &str) -> Result<Duration, String> {
    let seconds = value.parse::<f64>().map_err(|error| error.to_string())?;
    Duration::try_from_secs_f64(seconds)
        .map_err(|error| format!("expected a non-negative number of seconds: {error}"))
}

fn main() -> Result<()> {
    let _ = env_logger::Builder::from_default_env().try_init();
    let cli = Cli::parse();

    let mut config = GameConfig::load(cli.config.as_deref())?;
    if let Some(seed) = cli.seed {
        config.reseed(seed);
    }

    let mut session = Session::new(
        config,
        cli.mode.into(),
        Duration::from_millis(cli.tick_ms),
    )?;
    println!("{}", session.banner());
    let summary = session.run(cli.time_limit);
    println!("{summary}");
    Ok(())
}
