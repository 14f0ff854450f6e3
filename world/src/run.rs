use zenith_core::{EnemyRank, GrenadeSpec, RunMode};

use crate::config::RunTuning;

/// Outcome of damage absorbed by the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct DamageOutcome {
    pub(crate) absorbed: f32,
    pub(crate) health: f32,
    pub(crate) armour: f32,
}

/// Counters and vitals that persist across the floors of a run.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RunState {
    pub(crate) mode: RunMode,
    pub(crate) floor: u32,
    pub(crate) current_waves: u32,
    pub(crate) total_kills: u32,
    pub(crate) basic_kills: u32,
    pub(crate) elite_kills: u32,
    pub(crate) boss_kills: u32,
    pub(crate) max_health: f32,
    pub(crate) health: f32,
    pub(crate) max_armour: f32,
    pub(crate) armour: f32,
    pub(crate) max_grenades: u32,
    pub(crate) grenades: u32,
    pub(crate) grenade: GrenadeSpec,
}

impl RunState {
    pub(crate) fn new(mode: RunMode, tuning: &RunTuning, grenade: &GrenadeSpec) -> Self {
        Self {
            mode,
            floor: 1,
            current_waves: 0,
            total_kills: 0,
            basic_kills: 0,
            elite_kills: 0,
            boss_kills: 0,
            max_health: tuning.max_health,
            health: tuning.max_health,
            max_armour: tuning.max_armour,
            armour: tuning.starting_armour.clamp(0.0, tuning.max_armour),
            max_grenades: tuning.max_grenades,
            grenades: tuning.starting_grenades.min(tuning.max_grenades),
            grenade: grenade.clone(),
        }
    }

    /// Absorbs damage with armour first; health never drops below zero.
    pub(crate) fn apply_damage(&mut self, amount: u32) -> DamageOutcome {
        let mut remaining = amount as f32;
        let absorbed = remaining.min(self.armour);
        self.armour -= absorbed;
        remaining -= absorbed;
        self.health = (self.health - remaining).max(0.0);
        DamageOutcome {
            absorbed,
            health: self.health,
            armour: self.armour,
        }
    }

    pub(crate) fn heal(&mut self, amount: f32, overheal: bool) {
        self.health += amount.max(0.0);
        if !overheal {
            self.health = self.health.min(self.max_health);
        }
    }

    pub(crate) fn restore_health(&mut self) {
        self.health = self.health.max(self.max_health);
    }

    pub(crate) fn add_armour(&mut self, amount: f32) {
        self.armour = (self.armour + amount).clamp(0.0, self.max_armour);
    }

    pub(crate) fn add_grenades(&mut self, amount: u32) {
        self.grenades = self.grenades.saturating_add(amount).min(self.max_grenades);
    }

    pub(crate) fn take_grenade(&mut self) -> bool {
        if self.grenades == 0 {
            return false;
        }
        self.grenades -= 1;
        true
    }

    pub(crate) fn record_kill(&mut self, rank: EnemyRank) {
        self.total_kills = self.total_kills.saturating_add(1);
        let counter = match rank {
            EnemyRank::Basic => &mut self.basic_kills,
            EnemyRank::Elite => &mut self.elite_kills,
            EnemyRank::Boss | EnemyRank::FinalBoss => &mut self.boss_kills,
        };
        *counter = counter.saturating_add(1);
    }
}
