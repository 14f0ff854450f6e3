#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Headless adapter that plays Zenith runs with a scripted player.
//!
//! The adapter owns the fixed-step loop: it samples the autopilot, submits the
//! input and a tick to the world, routes the resulting events through the
//! enemy AI and the encounter director, and resolves scene requests by loading
//! the next floor or ending the session.

mod autopilot;
mod config;
mod session;

pub use autopilot::{Autopilot, AutopilotConfig};
pub use config::{ArenaSettings, GameConfig};
pub use session::{Outcome, RunSummary, Session};
