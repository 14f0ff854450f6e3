//! Enemy tier tables and the weighted basic/elite pick.

use rand::{seq::SliceRandom, Rng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use zenith_core::ArchetypeId;

/// Archetype that may spawn within an index window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyTier {
    /// Archetype to spawn.
    pub archetype: ArchetypeId,
    /// First index the tier is available at.
    #[serde(default)]
    pub unlock: u32,
    /// Last index the tier is available at; zero never locks.
    #[serde(default)]
    pub lock: u32,
}

impl EnemyTier {
    /// Creates a tier that unlocks at `unlock` and never locks.
    #[must_use]
    pub const fn new(archetype: ArchetypeId, unlock: u32) -> Self {
        Self {
            archetype,
            unlock,
            lock: 0,
        }
    }

    /// Reports whether the tier may spawn at `index`.
    #[must_use]
    pub fn available_at(&self, index: u32) -> bool {
        self.unlock <= index && (self.lock == 0 || index <= self.lock)
    }

    pub(crate) fn inverted(&self) -> bool {
        self.lock != 0 && self.unlock > self.lock
    }
}

/// Basic and elite tiers a director draws regular spawns from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierTable {
    /// Tiers drawn when the elite roll fails.
    pub basic: Vec<EnemyTier>,
    /// Tiers drawn when the elite roll succeeds.
    pub elite: Vec<EnemyTier>,
}

impl Default for TierTable {
    fn default() -> Self {
        use zenith_world::catalog;

        Self {
            basic: vec![
                EnemyTier::new(catalog::GRUNT, 1),
                EnemyTier::new(catalog::GUNNER, 1),
                EnemyTier::new(catalog::DRONE, 4),
            ],
            elite: vec![
                EnemyTier::new(catalog::BRUTE, 3),
                EnemyTier::new(catalog::MARKSMAN, 6),
            ],
        }
    }
}

impl TierTable {
    /// First tier whose unlock index exceeds its lock index.
    pub(crate) fn inverted(&self) -> Option<&EnemyTier> {
        self.basic
            .iter()
            .chain(self.elite.iter())
            .find(|tier| tier.inverted())
    }

    /// Reports whether a basic tier can spawn at `index`.
    #[must_use]
    pub fn has_basic_at(&self, index: u32) -> bool {
        self.basic.iter().any(|tier| tier.available_at(index))
    }

    /// Picks an archetype for `index`, preferring elites with `elite_chance`.
    pub(crate) fn pick(
        &self,
        index: u32,
        elite_chance: f32,
        rng: &mut ChaCha8Rng,
    ) -> Option<ArchetypeId> {
        if rng.gen::<f32>() < elite_chance {
            let elites = available(&self.elite, index);
            if let Some(archetype) = elites.choose(rng) {
                return Some(*archetype);
            }
        }
        available(&self.basic, index).choose(rng).copied()
    }
}

fn available(tiers: &[EnemyTier], index: u32) -> Vec<ArchetypeId> {
    tiers
        .iter()
        .filter(|tier| tier.available_at(index))
        .map(|tier| tier.archetype)
        .collect()
}
