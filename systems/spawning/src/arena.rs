//! Floor to arena mapping used when the adapter loads the next floor.

use std::ops::RangeInclusive;

use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use zenith_core::ArenaId;

/// Arena pools per floor bracket.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaPools {
    /// Floors 1 to 5.
    pub opening: Vec<ArenaId>,
    /// Floors 6 to 10.
    pub lower: Vec<ArenaId>,
    /// Floors 11 to 15.
    pub upper: Vec<ArenaId>,
    /// Floors 16 to 19.
    pub summit: Vec<ArenaId>,
    /// Floor 20 and above.
    pub final_arena: Option<ArenaId>,
}

impl Default for ArenaPools {
    fn default() -> Self {
        let ids =
            |range: RangeInclusive<u32>| -> Vec<ArenaId> { range.map(ArenaId::new).collect() };
        Self {
            opening: ids(1..=3),
            lower: ids(4..=6),
            upper: ids(7..=9),
            summit: ids(10..=11),
            final_arena: Some(ArenaId::new(20)),
        }
    }
}

impl ArenaPools {
    fn bracket(&self, floor: u32) -> &[ArenaId] {
        match floor {
            0..=5 => &self.opening,
            6..=10 => &self.lower,
            11..=15 => &self.upper,
            _ => &self.summit,
        }
    }
}

/// Picks the arena for each floor.
#[derive(Debug)]
pub struct ArenaSelector {
    pools: ArenaPools,
    rng: ChaCha8Rng,
}

impl ArenaSelector {
    /// Floor from which only the final arena is used.
    pub const FINAL_FLOOR: u32 = 20;

    /// Creates a selector drawing from `pools`.
    #[must_use]
    pub fn new(pools: ArenaPools, rng_seed: u64) -> Self {
        Self {
            pools,
            rng: ChaCha8Rng::seed_from_u64(rng_seed),
        }
    }

    /// Arena for `floor`, or `None` when the matching pool is empty.
    pub fn select(&mut self, floor: u32) -> Option<ArenaId> {
        let arena = if floor >= Self::FINAL_FLOOR {
            self.pools.final_arena
        } else {
            self.pools.bracket(floor).choose(&mut self.rng).copied()
        };
        if arena.is_none() {
            log::warn!("no arena configured for floor {floor}");
        }
        arena
    }
}
